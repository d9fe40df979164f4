use crate::core::{KnobController, KnobVisual, ParameterBridge};
use crate::dom::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Press on the knob starts a drag; move and release are global so letting
/// go anywhere on the page ends it.
pub fn wire_knob_pointer<B, V>(
    window: &web::Window,
    knob: &web::HtmlElement,
    controller: &Rc<RefCell<KnobController<B, V>>>,
) -> Result<Vec<EventListener>, crate::core::KnobError>
where
    B: ParameterBridge + 'static,
    V: KnobVisual + 'static,
{
    Ok(vec![
        wire_pointerdown(knob, controller)?,
        wire_pointermove(window, controller)?,
        wire_pointerup(window, "pointerup", controller)?,
        wire_pointerup(window, "pointercancel", controller)?,
    ])
}

fn wire_pointerdown<B, V>(
    knob: &web::HtmlElement,
    controller: &Rc<RefCell<KnobController<B, V>>>,
) -> Result<EventListener, crate::core::KnobError>
where
    B: ParameterBridge + 'static,
    V: KnobVisual + 'static,
{
    let controller = controller.clone();
    let knob_for_capture = knob.clone();
    EventListener::new(knob, "pointerdown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        ev.prevent_default();
        _ = knob_for_capture.set_pointer_capture(ev.pointer_id());
        controller.borrow_mut().pointer_down(ev.client_y() as f32);
    })
}

fn wire_pointermove<B, V>(
    window: &web::Window,
    controller: &Rc<RefCell<KnobController<B, V>>>,
) -> Result<EventListener, crate::core::KnobError>
where
    B: ParameterBridge + 'static,
    V: KnobVisual + 'static,
{
    let controller = controller.clone();
    EventListener::new(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let mut ctrl = controller.borrow_mut();
        if !ctrl.is_dragging() {
            return;
        }
        ev.prevent_default();
        ctrl.pointer_move(ev.client_y() as f32);
    })
}

fn wire_pointerup<B, V>(
    window: &web::Window,
    event: &'static str,
    controller: &Rc<RefCell<KnobController<B, V>>>,
) -> Result<EventListener, crate::core::KnobError>
where
    B: ParameterBridge + 'static,
    V: KnobVisual + 'static,
{
    let controller = controller.clone();
    EventListener::new(window, event, move |_ev: web::Event| {
        controller.borrow_mut().pointer_up();
    })
}
