use crate::bridge::JsSliderState;
use crate::core::constants::{
    BPM_INPUT_ID, CROWD_CONTAINER_ID, KNOB_ELEMENT_ID, KNOB_ROTATION_RANGE,
};
use crate::core::{Crowd, CrowdAnimation, CrowdConfig, KnobController};
use crate::dom::{self, element_bounds, EventListener};
use crate::events;
use crate::frame::{self, FrameCallback, RafScheduler, WebCrowd};
use crate::view::{DomSpriteSink, ElementKnobVisual};
use anyhow::anyhow;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

type WebKnob = KnobController<JsSliderState, ElementKnobVisual>;

struct CrowdMount {
    animation: Rc<RefCell<WebCrowd>>,
    callback: FrameCallback,
    listeners: Vec<EventListener>,
}

/// A mounted knob (and optionally its crowd) on the current page.
///
/// ```js
/// const app = new KnobApp(Juce.getSliderState("impact"));
/// app.attach_crowd();
/// ```
#[wasm_bindgen]
pub struct KnobApp {
    window: web::Window,
    document: web::Document,
    controller: Rc<RefCell<WebKnob>>,
    listeners: Vec<EventListener>,
    crowd: Option<CrowdMount>,
}

#[wasm_bindgen]
impl KnobApp {
    #[wasm_bindgen(constructor)]
    pub fn new(slider_state: JsValue, knob_id: Option<String>) -> Result<KnobApp, JsValue> {
        let knob_id = knob_id.unwrap_or_else(|| KNOB_ELEMENT_ID.to_string());
        mount_knob(&knob_id, slider_state).map_err(|e| {
            log::error!("[knob] init error: {:?}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    /// Current parameter value in display units (0–100).
    pub fn value(&self) -> f32 {
        self.controller.borrow().value()
    }

    pub fn attach_crowd(&mut self, container_id: Option<String>) -> Result<(), JsValue> {
        let container_id = container_id.unwrap_or_else(|| CROWD_CONTAINER_ID.to_string());
        self.mount_crowd(&container_id).map_err(|e| {
            log::error!("[crowd] init error: {:?}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    pub fn attach_bpm_input(&mut self, input_id: Option<String>) -> Result<(), JsValue> {
        let input_id = input_id.unwrap_or_else(|| BPM_INPUT_ID.to_string());
        self.wire_bpm(&input_id).map_err(|e| {
            log::error!("[crowd] bpm input error: {:?}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    /// Returns the tempo actually applied after clamping, or NaN without a crowd.
    pub fn set_bpm(&self, bpm: f32) -> f32 {
        match &self.crowd {
            Some(c) => c.animation.borrow_mut().set_bpm(bpm),
            None => f32::NAN,
        }
    }

    /// Tear everything down: frame loop, sprites, listeners, bridge
    /// subscription. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(crowd) = self.crowd.take() {
            crowd.animation.borrow_mut().unmount();
            drop(crowd.listeners);
            crowd.callback.borrow_mut().take();
        }
        self.listeners.clear();
        self.controller.borrow_mut().detach();
    }
}

impl KnobApp {
    fn mount_crowd(&mut self, container_id: &str) -> anyhow::Result<()> {
        if self.crowd.is_some() {
            return Err(anyhow!("crowd already attached"));
        }
        let container = dom::html_element_by_id(&self.document, container_id)?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let animation = Rc::new(RefCell::new(CrowdAnimation::new(
            Crowd::new(CrowdConfig::default()),
            RafScheduler::new(self.window.clone(), callback.clone()),
            DomSpriteSink::new(self.document.clone(), (*container).clone()),
        )));

        let controller = Rc::downgrade(&self.controller);
        let value = move || {
            let Some(ctrl) = controller.upgrade() else {
                return 0.0;
            };
            let current = ctrl.try_borrow().map(|c| c.value()).unwrap_or(0.0);
            current
        };
        frame::start_loop(&animation, &callback, value, element_bounds(&container))?;
        let resize = events::wire_resize(&self.window, &container, &animation)?;

        self.crowd = Some(CrowdMount {
            animation,
            callback,
            listeners: vec![resize],
        });
        Ok(())
    }

    fn wire_bpm(&mut self, input_id: &str) -> anyhow::Result<()> {
        let crowd = self
            .crowd
            .as_mut()
            .ok_or_else(|| anyhow!("attach the crowd before its bpm input"))?;
        let input = dom::input_by_id(&self.document, input_id)?;
        if let Ok(bpm) = input.value().trim().parse::<f32>() {
            crowd.animation.borrow_mut().set_bpm(bpm);
        }
        crowd
            .listeners
            .push(events::wire_bpm_input(&input, &crowd.animation)?);
        Ok(())
    }
}

impl Drop for KnobApp {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn mount_knob(knob_id: &str, slider_state: JsValue) -> anyhow::Result<KnobApp> {
    let (window, document) = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let knob = dom::html_element_by_id(&document, knob_id)?;
    let bridge = JsSliderState::new(slider_state)?;
    let controller = KnobController::attach(
        bridge,
        ElementKnobVisual::new(knob.clone()),
        KNOB_ROTATION_RANGE,
    )?;
    let listeners = events::wire_knob_pointer(&window, &knob, &controller)?;
    log::info!("[knob] mounted on #{}", knob_id);
    Ok(KnobApp {
        window,
        document,
        controller,
        listeners,
        crowd: None,
    })
}
