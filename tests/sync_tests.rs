// Host-side tests for the knob controller against a fake host bridge.

use groove_glide_ui::core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct HostState {
    value: Cell<f32>,
    set_calls: RefCell<Vec<f32>>,
    drag_started: Cell<u32>,
    drag_ended: Cell<u32>,
    listeners: RefCell<Vec<(ListenerId, Box<dyn FnMut()>)>>,
    next_id: Cell<u64>,
    unsubscribed: Cell<u32>,
    refuse_subscribe: Cell<bool>,
    echo_on_set: Cell<bool>,
    keep_listeners: Cell<bool>,
}

#[derive(Clone, Default)]
struct FakeBridge(Rc<HostState>);

impl FakeBridge {
    fn at(value: f32) -> Self {
        let b = FakeBridge::default();
        b.0.value.set(value);
        b
    }

    /// Host-side change (automation, preset recall).
    fn host_change(&self, value: f32) {
        self.0.value.set(value);
        self.notify();
    }

    fn notify(&self) {
        for (_, listener) in self.0.listeners.borrow_mut().iter_mut() {
            listener();
        }
    }

    fn sets(&self) -> Vec<f32> {
        self.0.set_calls.borrow().clone()
    }
}

impl ParameterBridge for FakeBridge {
    fn subscribe(&self, listener: Box<dyn FnMut()>) -> Result<ListenerId, KnobError> {
        if self.0.refuse_subscribe.get() {
            return Err(KnobError::BridgeUnavailable("no host".into()));
        }
        let id = ListenerId(self.0.next_id.get());
        self.0.next_id.set(id.0 + 1);
        self.0.listeners.borrow_mut().push((id, listener));
        Ok(id)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.0.unsubscribed.set(self.0.unsubscribed.get() + 1);
        if self.0.keep_listeners.get() {
            return false;
        }
        self.0.listeners.borrow_mut().retain(|(l, _)| *l != id);
        true
    }

    fn scaled_value(&self) -> f32 {
        self.0.value.get()
    }

    fn set_normalized(&self, normalized: f32) {
        self.0.set_calls.borrow_mut().push(normalized);
        self.0.value.set(normalized * 100.0);
        if self.0.echo_on_set.get() {
            self.notify();
        }
    }

    fn drag_started(&self) {
        self.0.drag_started.set(self.0.drag_started.get() + 1);
    }

    fn drag_ended(&self) {
        self.0.drag_ended.set(self.0.drag_ended.get() + 1);
    }
}

#[derive(Default)]
struct Face {
    rotations: Vec<f32>,
    active: bool,
}

#[derive(Clone, Default)]
struct FakeVisual(Rc<RefCell<Face>>);

impl FakeVisual {
    fn last_rotation(&self) -> Option<f32> {
        self.0.borrow().rotations.last().copied()
    }
}

impl KnobVisual for FakeVisual {
    fn set_rotation(&mut self, degrees: f32) {
        self.0.borrow_mut().rotations.push(degrees);
    }

    fn set_active(&mut self, active: bool) {
        self.0.borrow_mut().active = active;
    }
}

type Ctrl = Rc<RefCell<KnobController<FakeBridge, FakeVisual>>>;

fn attach(value: f32) -> (Ctrl, FakeBridge, FakeVisual) {
    let bridge = FakeBridge::at(value);
    let visual = FakeVisual::default();
    let ctrl = KnobController::attach(bridge.clone(), visual.clone(), RotationRange::SYMMETRIC)
        .expect("attach");
    (ctrl, bridge, visual)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn attach_renders_host_value() {
    let (ctrl, bridge, visual) = attach(40.0);
    assert_eq!(ctrl.borrow().value(), 40.0);
    assert!(approx(visual.last_rotation().unwrap(), -27.0));
    assert!(bridge.sets().is_empty());
}

#[test]
fn attach_fails_fast_without_subscription() {
    let bridge = FakeBridge::default();
    bridge.0.refuse_subscribe.set(true);
    let res = KnobController::attach(bridge, FakeVisual::default(), RotationRange::SYMMETRIC);
    assert!(matches!(res, Err(KnobError::BridgeUnavailable(_))));
}

#[test]
fn dragging_up_adds_half_a_unit_per_pixel() {
    let (ctrl, bridge, visual) = attach(40.0);
    let mut c = ctrl.borrow_mut();
    c.pointer_down(300.0);
    assert_eq!(c.pointer_move(280.0), Some(50.0));
    assert_eq!(bridge.sets(), vec![0.5]);
    assert!(approx(visual.last_rotation().unwrap(), 0.0));

    // and back down
    assert_eq!(c.pointer_move(300.0), Some(40.0));
    assert_eq!(c.value(), 40.0);
}

#[test]
fn drag_clamps_at_both_ends() {
    let (ctrl, bridge, visual) = attach(90.0);
    let mut c = ctrl.borrow_mut();
    c.pointer_down(500.0);
    assert_eq!(c.pointer_move(0.0), Some(100.0));
    assert_eq!(visual.last_rotation(), Some(135.0));
    assert_eq!(c.pointer_move(2000.0), Some(0.0));
    assert_eq!(visual.last_rotation(), Some(-135.0));
    assert_eq!(bridge.sets(), vec![1.0, 0.0]);
}

#[test]
fn host_change_updates_visual_without_echo() {
    let (ctrl, bridge, visual) = attach(0.0);
    bridge.host_change(75.0);
    assert_eq!(ctrl.borrow().value(), 75.0);
    assert!(approx(visual.last_rotation().unwrap(), 67.5));
    assert!(bridge.sets().is_empty());
}

#[test]
fn every_host_notification_rerenders() {
    let (ctrl, bridge, visual) = attach(0.0);
    for value in [10.0, 40.0, 90.0] {
        bridge.host_change(value);
        assert_eq!(ctrl.borrow().value(), value);
    }
    // attach plus one render per notification
    assert_eq!(visual.0.borrow().rotations.len(), 4);
    assert!(bridge.sets().is_empty());
}

#[test]
fn host_values_out_of_range_are_clamped() {
    let (ctrl, bridge, visual) = attach(150.0);
    assert_eq!(ctrl.borrow().value(), 100.0);
    assert_eq!(visual.last_rotation(), Some(135.0));
    bridge.host_change(-20.0);
    assert_eq!(ctrl.borrow().value(), 0.0);
}

#[test]
fn release_anywhere_ends_the_drag() {
    let (ctrl, bridge, visual) = attach(20.0);
    let mut c = ctrl.borrow_mut();
    c.pointer_down(100.0);
    assert!(c.is_dragging());
    assert!(visual.0.borrow().active);

    // the release carries no target; the window listener always forwards it
    c.pointer_up();
    assert!(!c.is_dragging());
    assert!(!visual.0.borrow().active);
    assert_eq!(c.pointer_move(0.0), None);
    assert!(bridge.sets().is_empty());
    assert_eq!(bridge.0.drag_ended.get(), 1);
}

#[test]
fn drag_bracket_fires_once_per_gesture() {
    let (ctrl, bridge, _visual) = attach(0.0);
    let mut c = ctrl.borrow_mut();
    c.pointer_down(10.0);
    c.pointer_down(12.0);
    c.pointer_move(0.0);
    c.pointer_up();
    c.pointer_up();
    assert_eq!(bridge.0.drag_started.get(), 1);
    assert_eq!(bridge.0.drag_ended.get(), 1);
}

#[test]
fn idle_moves_never_reach_the_host() {
    let (ctrl, bridge, visual) = attach(30.0);
    let renders = visual.0.borrow().rotations.len();
    for y in [0.0, 50.0, 900.0] {
        assert_eq!(ctrl.borrow_mut().pointer_move(y), None);
    }
    assert!(bridge.sets().is_empty());
    assert_eq!(visual.0.borrow().rotations.len(), renders);
}

#[test]
fn synchronous_echo_during_drag_is_skipped() {
    let (ctrl, bridge, _visual) = attach(10.0);
    bridge.0.echo_on_set.set(true);
    let mut c = ctrl.borrow_mut();
    c.pointer_down(100.0);
    assert_eq!(c.pointer_move(90.0), Some(15.0));
    assert_eq!(bridge.sets(), vec![0.15]);
}

#[test]
fn detach_stops_notifications_and_is_idempotent() {
    let (ctrl, bridge, _visual) = attach(10.0);
    ctrl.borrow_mut().detach();
    ctrl.borrow_mut().detach();
    assert_eq!(bridge.0.unsubscribed.get(), 1);

    bridge.host_change(80.0);
    assert_eq!(ctrl.borrow().value(), 10.0);
}

#[test]
fn dropped_controller_ignores_late_notifications() {
    let (ctrl, bridge, visual) = attach(10.0);
    drop(ctrl);
    let renders = visual.0.borrow().rotations.len();
    bridge.host_change(60.0);
    assert_eq!(visual.0.borrow().rotations.len(), renders);
}

#[test]
fn clockwise_face_tracks_drag() {
    let bridge = FakeBridge::at(0.0);
    let visual = FakeVisual::default();
    let ctrl = KnobController::attach(bridge, visual.clone(), RotationRange::CLOCKWISE).unwrap();
    assert_eq!(visual.last_rotation(), Some(0.0));
    let mut c = ctrl.borrow_mut();
    c.pointer_down(400.0);
    c.pointer_move(200.0);
    assert_eq!(c.value(), 100.0);
    assert_eq!(c.rotation(), 300.0);
}

#[test]
fn listener_kept_by_host_is_inert_after_detach() {
    let (ctrl, bridge, visual) = attach(10.0);
    bridge.0.keep_listeners.set(true);
    ctrl.borrow_mut().detach();
    assert_eq!(bridge.0.unsubscribed.get(), 1);
    assert_eq!(bridge.0.listeners.borrow().len(), 1);

    let renders = visual.0.borrow().rotations.len();
    bridge.host_change(70.0);
    assert_eq!(ctrl.borrow().value(), 10.0);
    assert_eq!(visual.0.borrow().rotations.len(), renders);

    drop(ctrl);
    bridge.host_change(30.0);
    assert_eq!(visual.0.borrow().rotations.len(), renders);
}
