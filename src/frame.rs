use crate::core::{Engine, EngineLoop, FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame` behind the [`FrameScheduler`] seam.
#[derive(Default)]
pub struct RafScheduler {
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let cb = self.callback.as_ref()?;
        let w = web::window()?;
        w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(handle);
        }
    }
}

pub type SharedLoop<E> = Rc<RefCell<EngineLoop<E, RafScheduler>>>;

/// Wire the frame callback into the loop's scheduler and start it.
///
/// The callback holds the loop weakly, so dropping the last strong handle
/// ends the cycle even if a frame is still queued.
pub fn start_loop<E: Engine + 'static>(engine_loop: EngineLoop<E, RafScheduler>) -> SharedLoop<E> {
    let shared = Rc::new(RefCell::new(engine_loop));
    let weak: Weak<RefCell<EngineLoop<E, RafScheduler>>> = Rc::downgrade(&shared);
    let tick = Closure::wrap(Box::new(move |now_ms: f64| {
        if let Some(l) = weak.upgrade() {
            l.borrow_mut().on_frame(now_ms);
        }
    }) as Box<dyn FnMut(f64)>);
    {
        let mut l = shared.borrow_mut();
        l.scheduler_mut().callback = Some(tick);
        l.start();
    }
    shared
}
