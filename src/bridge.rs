//! `ParameterBridge` over a JUCE web slider state
//! (`Juce.getSliderState(id)` on the page side).

use crate::core::constants::VALUE_MIN;
use crate::core::{KnobError, ListenerId, ParameterBridge};
use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

struct Subscription {
    id: ListenerId,
    js_id: JsValue,
    // kept alive for as long as the host may call it
    closure: Closure<dyn FnMut()>,
}

pub struct JsSliderState {
    state: JsValue,
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
}

impl JsSliderState {
    /// Validate the slider object up front so a missing bridge fails the
    /// mount instead of the first drag. `removeListener` is optional; without
    /// it unsubscribed callbacks are leaked to the host rather than freed.
    pub fn new(state: JsValue) -> Result<Self, KnobError> {
        if state.is_undefined() || state.is_null() {
            return Err(KnobError::BridgeUnavailable("slider state is missing".into()));
        }
        method_of(&state, "getScaledValue")?;
        method_of(&state, "setNormalisedValue")?;
        let event = value_changed_event(&state)?;
        method_of(&event, "addListener")?;
        Ok(Self {
            state,
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    fn call_optional(&self, name: &'static str) {
        match method_of(&self.state, name) {
            Ok(f) => {
                if let Err(e) = f.call0(&self.state) {
                    log::warn!("[bridge] {} failed: {:?}", name, e);
                }
            }
            Err(_) => log::debug!("[bridge] {} not provided", name),
        }
    }
}

impl ParameterBridge for JsSliderState {
    fn subscribe(&self, mut listener: Box<dyn FnMut()>) -> Result<ListenerId, KnobError> {
        let event = value_changed_event(&self.state)?;
        let add = method_of(&event, "addListener")?;
        let closure = Closure::wrap(Box::new(move || listener()) as Box<dyn FnMut()>);
        let js_id = add
            .call1(&event, closure.as_ref())
            .map_err(|e| KnobError::BridgeCall {
                method: "addListener",
                detail: format!("{:?}", e),
            })?;

        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            js_id,
            closure,
        });
        Ok(id)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = {
            let mut subs = self.subscriptions.borrow_mut();
            subs.iter()
                .position(|s| s.id == id)
                .map(|i| subs.remove(i))
        };
        let Some(sub) = removed else {
            return true;
        };
        let remove = value_changed_event(&self.state)
            .and_then(|event| method_of(&event, "removeListener").map(|f| (event, f)))
            .and_then(|(event, f)| {
                f.call1(&event, &sub.js_id)
                    .map_err(|e| KnobError::BridgeCall {
                        method: "removeListener",
                        detail: format!("{:?}", e),
                    })
            });
        match remove {
            Ok(_) => true,
            Err(e) => {
                // the host still holds the function; freeing it would make the
                // next notification call into a dropped closure
                log::warn!("[bridge] {}; listener leaked", e);
                sub.closure.forget();
                false
            }
        }
    }

    fn scaled_value(&self) -> f32 {
        let value = method_of(&self.state, "getScaledValue").and_then(|f| {
            f.call0(&self.state).map_err(|e| KnobError::BridgeCall {
                method: "getScaledValue",
                detail: format!("{:?}", e),
            })
        });
        match value.map(|v| v.as_f64()) {
            Ok(Some(v)) => v as f32,
            Ok(None) => {
                log::warn!("[bridge] getScaledValue returned a non-number");
                VALUE_MIN
            }
            Err(e) => {
                log::warn!("[bridge] {}", e);
                VALUE_MIN
            }
        }
    }

    fn set_normalized(&self, normalized: f32) {
        let result = method_of(&self.state, "setNormalisedValue").and_then(|f| {
            f.call1(&self.state, &JsValue::from_f64(normalized as f64))
                .map_err(|e| KnobError::BridgeCall {
                    method: "setNormalisedValue",
                    detail: format!("{:?}", e),
                })
        });
        if let Err(e) = result {
            log::warn!("[bridge] {}", e);
        }
    }

    fn drag_started(&self) {
        self.call_optional("sliderDragStarted");
    }

    fn drag_ended(&self) {
        self.call_optional("sliderDragEnded");
    }
}

fn method_of(target: &JsValue, name: &'static str) -> Result<js_sys::Function, KnobError> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| KnobError::BridgeCall {
            method: name,
            detail: format!("{:?}", e),
        })?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| KnobError::BridgeUnavailable(format!("`{}` is not a function", name)))
}

fn value_changed_event(state: &JsValue) -> Result<JsValue, KnobError> {
    let event = js_sys::Reflect::get(state, &JsValue::from_str("valueChangedEvent")).map_err(
        |e| KnobError::BridgeCall {
            method: "valueChangedEvent",
            detail: format!("{:?}", e),
        },
    )?;
    if event.is_undefined() || event.is_null() {
        return Err(KnobError::BridgeUnavailable(
            "slider state has no valueChangedEvent".into(),
        ));
    }
    Ok(event)
}
