use super::Listener;
use crate::core::{InputLatch, PointerSample, Viewport};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Viewport-global pointer moves, in client pixels.
pub fn wire_pointer(latch: Rc<RefCell<InputLatch>>) -> anyhow::Result<Listener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    Listener::new(&window, "pointermove", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            latch.borrow_mut().pointer_moved(PointerSample {
                x: ev.client_x() as f32,
                y: ev.client_y() as f32,
                timestamp_ms: ev.time_stamp(),
            });
        }
    })
}

/// Pointer moves over `element`, normalized to `[-1, 1]` against its box.
pub fn wire_local_pointer(
    element: &web::HtmlElement,
    latch: Rc<RefCell<InputLatch>>,
) -> anyhow::Result<Listener> {
    let el = element.clone();
    Listener::new(element, "pointermove", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            if let Some(p) = pointer_in_element(ev, &el) {
                latch.borrow_mut().local_pointer_moved(p);
            }
        }
    })
}

#[inline]
fn pointer_in_element(ev: &web::MouseEvent, el: &web::HtmlElement) -> Option<Vec2> {
    let rect = el.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let local = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    Some(Viewport::new(rect.width() as f32, rect.height() as f32).normalize(local))
}
