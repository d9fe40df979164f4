use crate::core::KnobError;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn html_element_by_id(
    document: &web::Document,
    element_id: &str,
) -> Result<web::HtmlElement, KnobError> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| KnobError::MissingElement(element_id.to_string()))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| KnobError::Dom(format!("{:?}", e)))
}

pub fn input_by_id(
    document: &web::Document,
    element_id: &str,
) -> Result<web::HtmlInputElement, KnobError> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| KnobError::MissingElement(element_id.to_string()))?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| KnobError::Dom(format!("{:?}", e)))
}

/// CSS-pixel size of an element's box.
#[inline]
pub fn element_bounds(el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

/// A DOM listener that unregisters itself when dropped.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, KnobError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| KnobError::Dom(format!("{:?}", e)))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
