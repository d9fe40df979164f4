//! Knob controller: owns the parameter value and keeps the visual, the drag
//! gesture and the host bridge in agreement.
//!
//! Inbound changes (automation, preset recall) re-render without touching the
//! bridge setter; only the drag path pushes outward.

use super::bridge::{KnobError, KnobVisual, ListenerId, ParameterBridge};
use super::constants::VALUE_MIN;
use super::gesture::GestureTracker;
use super::mapper::{clamp_value, value_to_normalized, value_to_rotation, RotationRange};
use std::cell::RefCell;
use std::rc::Rc;

pub struct KnobController<B: ParameterBridge, V: KnobVisual> {
    bridge: B,
    visual: V,
    gesture: GestureTracker,
    range: RotationRange,
    value: f32,
    listener: Option<ListenerId>,
}

impl<B, V> KnobController<B, V>
where
    B: ParameterBridge + 'static,
    V: KnobVisual + 'static,
{
    /// Subscribe to the bridge and render its current value.
    ///
    /// The listener only holds a weak reference, so dropping the returned
    /// controller silences it even if the host keeps the callback around.
    pub fn attach(
        bridge: B,
        visual: V,
        range: RotationRange,
    ) -> Result<Rc<RefCell<Self>>, KnobError> {
        let controller = Rc::new(RefCell::new(Self {
            bridge,
            visual,
            gesture: GestureTracker::default(),
            range,
            value: VALUE_MIN,
            listener: None,
        }));

        let weak = Rc::downgrade(&controller);
        let listener = Box::new(move || {
            let Some(ctrl) = weak.upgrade() else {
                return;
            };
            let busy = match ctrl.try_borrow_mut() {
                Ok(mut ctrl) => {
                    // a host that cannot remove listeners keeps calling after detach
                    if ctrl.listener.is_some() {
                        ctrl.on_bridge_changed();
                    }
                    false
                }
                Err(_) => true,
            };
            if busy {
                log::debug!("[bridge] notification during local update; skipped");
            }
        });
        let id = controller.borrow().bridge.subscribe(listener)?;

        {
            let mut ctrl = controller.borrow_mut();
            ctrl.listener = Some(id);
            ctrl.on_bridge_changed();
            log::info!("[knob] attached at value {:.1}", ctrl.value);
        }
        Ok(controller)
    }
}

impl<B: ParameterBridge, V: KnobVisual> KnobController<B, V> {
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        value_to_rotation(self.value, self.range)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Re-read the host value and re-render. Never echoes back to the host.
    pub fn on_bridge_changed(&mut self) {
        let scaled = self.bridge.scaled_value();
        self.render(scaled);
    }

    pub fn pointer_down(&mut self, y: f32) {
        if self.gesture.pointer_down(y) {
            self.visual.set_active(true);
            self.bridge.drag_started();
            log::debug!("[knob] begin drag at {:.1}", self.value);
        }
    }

    /// Apply one move event. Returns the new value when a drag is active.
    pub fn pointer_move(&mut self, y: f32) -> Option<f32> {
        let delta = self.gesture.pointer_move(y)?;
        self.render(self.value + delta);
        self.push_local_change(self.value);
        Some(self.value)
    }

    pub fn pointer_up(&mut self) {
        if self.gesture.pointer_up() {
            self.visual.set_active(false);
            self.bridge.drag_ended();
            log::debug!("[knob] end drag at {:.1}", self.value);
        }
    }

    /// Forward a locally driven value to the host. Only the drag path calls
    /// this; bridge-originated changes never come back out.
    pub fn push_local_change(&self, value: f32) {
        self.bridge
            .set_normalized(value_to_normalized(clamp_value(value)));
    }

    /// Drop the bridge subscription. Safe to call more than once.
    pub fn detach(&mut self) {
        if let Some(id) = self.listener.take() {
            if self.bridge.unsubscribe(id) {
                log::info!("[knob] detached");
            } else {
                log::warn!("[knob] detached; host kept listener {} registered", id.0);
            }
        }
    }

    fn render(&mut self, value: f32) {
        self.value = clamp_value(value);
        let degrees = value_to_rotation(self.value, self.range);
        self.visual.set_rotation(degrees);
    }
}
