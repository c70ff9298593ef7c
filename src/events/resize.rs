use super::Listener;
use crate::core::InputLatch;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_resize(latch: Rc<RefCell<InputLatch>>) -> anyhow::Result<Listener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    Listener::new(&window, "resize", move |_ev: web::Event| {
        if let Some(vp) = dom::viewport() {
            latch.borrow_mut().resized(vp);
        }
    })
}
