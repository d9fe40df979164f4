//! Seams to the outside world: the host parameter bridge and the knob's
//! visual surface. Both are injected so the controller runs without a DOM.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnobError {
    #[error("missing #{0}")]
    MissingElement(String),
    #[error("parameter bridge unavailable: {0}")]
    BridgeUnavailable(String),
    #[error("bridge call `{method}` failed: {detail}")]
    BridgeCall { method: &'static str, detail: String },
    #[error("dom error: {0}")]
    Dom(String),
}

/// Token returned by [`ParameterBridge::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host-owned parameter. The host holds the authoritative value.
pub trait ParameterBridge {
    /// Register a change listener. Notifications carry no payload; re-read
    /// with [`scaled_value`](Self::scaled_value).
    fn subscribe(&self, listener: Box<dyn FnMut()>) -> Result<ListenerId, KnobError>;

    /// Drop a listener. Returns false when the host could not release it;
    /// the callback then stays registered and must remain safe to call.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Current value in display units (0–100).
    fn scaled_value(&self) -> f32;

    /// Push a value in the host's normalized unit (0–1).
    fn set_normalized(&self, normalized: f32);

    /// Start of an interactive edit (e.g. an undo transaction). Best effort.
    fn drag_started(&self) {}

    fn drag_ended(&self) {}
}

pub trait KnobVisual {
    fn set_rotation(&mut self, degrees: f32);

    fn set_active(&mut self, _active: bool) {}
}
