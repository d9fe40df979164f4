use crate::core::{CrowdAnimation, FrameHandle, FrameScheduler, KnobError};
use crate::view::DomSpriteSink;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
pub type WebCrowd = CrowdAnimation<RafScheduler, DomSpriteSink>;

/// `requestAnimationFrame` scheduler that always re-arms the same callback.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: web::Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self) -> Result<FrameHandle, KnobError> {
        let cb = self.callback.borrow();
        let cb = cb
            .as_ref()
            .ok_or_else(|| KnobError::Dom("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| KnobError::Dom(format!("{:?}", e)))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// Install the frame callback and mount the crowd. The callback only holds a
/// weak reference, so dropping the animation ends the loop.
pub fn start_loop(
    animation: &Rc<RefCell<WebCrowd>>,
    callback: &FrameCallback,
    value: impl Fn() -> f32 + 'static,
    bounds: Vec2,
) -> Result<(), KnobError> {
    let anim = Rc::downgrade(animation);
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let Some(anim) = anim.upgrade() else {
            return;
        };
        let now_ms = js_sys::Date::now();
        let current = value();
        anim.borrow_mut().frame(now_ms, current);
    }) as Box<dyn FnMut(f64)>));
    animation.borrow_mut().mount(bounds)
}
