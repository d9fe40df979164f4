use crate::core::KnobError;
use crate::dom::{element_bounds, EventListener};
use crate::frame::WebCrowd;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Regenerate the crowd whenever the viewport changes size.
pub fn wire_resize(
    window: &web::Window,
    container: &web::Element,
    animation: &Rc<RefCell<WebCrowd>>,
) -> Result<EventListener, KnobError> {
    let container = container.clone();
    let animation = Rc::downgrade(animation);
    EventListener::new(window, "resize", move |_ev: web::Event| {
        let Some(animation) = animation.upgrade() else {
            return;
        };
        let bounds = element_bounds(&container);
        let resized = animation.borrow_mut().resize(bounds);
        if let Err(e) = resized {
            log::error!("[crowd] resize failed: {}", e);
        }
    })
}

pub fn wire_bpm_input(
    input: &web::HtmlInputElement,
    animation: &Rc<RefCell<WebCrowd>>,
) -> Result<EventListener, KnobError> {
    let input_for_read = input.clone();
    let animation = Rc::downgrade(animation);
    EventListener::new(input, "input", move |_ev: web::Event| {
        let Some(animation) = animation.upgrade() else {
            return;
        };
        let text = input_for_read.value();
        match text.trim().parse::<f32>() {
            Ok(bpm) if bpm.is_finite() => {
                animation.borrow_mut().set_bpm(bpm);
            }
            _ => log::warn!("[crowd] ignoring bpm input {:?}", text),
        }
    })
}
