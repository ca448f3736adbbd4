//! Gesture state machine tests
//!
//! Drives `DragEvents` with synthetic pointer events, a recording listener
//! host, and the manual scheduler to step through double-click windows.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tablegrid::interactions::{
    CoordinateData, DragEvents, DragHandler, ListenerHost, ManualScheduler, PointerSample,
    Scheduler, TimerToken,
};
use tablegrid::TableError;
use test_case::test_case;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Activate,
    DragMove(CoordinateData),
    DragEnd(CoordinateData),
    Click([f64; 2]),
    DoubleClick([f64; 2]),
}

type CallLog = Rc<RefCell<Vec<Call>>>;
type OpLog = Rc<RefCell<Vec<String>>>;

/// Records every listener operation, tagged with the element name
struct FakeListeners {
    name: &'static str,
    ops: OpLog,
}

impl FakeListeners {
    fn new(name: &'static str, ops: &OpLog) -> Self {
        Self {
            name,
            ops: Rc::clone(ops),
        }
    }

    fn record(&self, op: &str) {
        self.ops.borrow_mut().push(format!("{}:{op}", self.name));
    }
}

impl ListenerHost for FakeListeners {
    fn listen_element(&mut self) {
        self.record("listen_element");
    }

    fn unlisten_element(&mut self) {
        self.record("unlisten_element");
    }

    fn listen_document(&mut self) {
        self.record("listen_document");
    }

    fn unlisten_document(&mut self) {
        self.record("unlisten_document");
    }
}

type Tracker = DragEvents<PointerSample, FakeListeners, ManualScheduler>;

fn point(event: &PointerSample) -> [f64; 2] {
    [event.client_x, event.client_y]
}

fn recording_handler(log: &CallLog, activate_result: bool) -> DragHandler<PointerSample> {
    let (a, m, e, c, d) = (
        Rc::clone(log),
        Rc::clone(log),
        Rc::clone(log),
        Rc::clone(log),
        Rc::clone(log),
    );
    DragHandler::new()
        .on_activate(move |_| {
            a.borrow_mut().push(Call::Activate);
            activate_result
        })
        .on_drag_move(move |_, coords| m.borrow_mut().push(Call::DragMove(*coords)))
        .on_drag_end(move |_, coords| e.borrow_mut().push(Call::DragEnd(*coords)))
        .on_click(move |event| c.borrow_mut().push(Call::Click(point(event))))
        .on_double_click(move |event| d.borrow_mut().push(Call::DoubleClick(point(event))))
}

fn click_only_handler(log: &CallLog) -> DragHandler<PointerSample> {
    let c = Rc::clone(log);
    DragHandler::new().on_click(move |event| c.borrow_mut().push(Call::Click(point(event))))
}

fn attached(handler: DragHandler<PointerSample>) -> (Tracker, OpLog) {
    let ops = OpLog::default();
    let mut tracker = Tracker::new(ManualScheduler::new());
    tracker.attach(FakeListeners::new("el", &ops), handler);
    (tracker, ops)
}

fn click_at(tracker: &mut Tracker, x: f64, y: f64) {
    tracker.handle_pointer_down(&PointerSample::at(x, y));
    tracker.handle_pointer_up(&PointerSample::at(x, y));
}

fn clicks(log: &CallLog) -> usize {
    log.borrow()
        .iter()
        .filter(|c| matches!(c, Call::Click(_)))
        .count()
}

fn double_clicks(log: &CallLog) -> usize {
    log.borrow()
        .iter()
        .filter(|c| matches!(c, Call::DoubleClick(_)))
        .count()
}

// =============================================================================
// ATTACH / DETACH
// =============================================================================

#[test]
fn test_attach_installs_element_listener_only() {
    let log = CallLog::default();
    let (_tracker, ops) = attached(click_only_handler(&log));
    assert_eq!(*ops.borrow(), vec!["el:listen_element"]);
}

#[test]
fn test_attach_with_empty_handler_is_inert() {
    let (mut tracker, ops) = attached(DragHandler::new());
    assert!(ops.borrow().is_empty());
    assert!(tracker.listeners().is_some());
    assert!(tracker.handler().is_some());

    let down = PointerSample::at(5.0, 5.0);
    tracker.handle_pointer_down(&down);
    assert!(!tracker.is_activated());
    assert!(!down.default_prevented());
}

#[test]
fn test_detach_is_idempotent() {
    let mut unattached = Tracker::new(ManualScheduler::new());
    unattached.detach();
    unattached.detach();

    let log = CallLog::default();
    let (mut tracker, ops) = attached(click_only_handler(&log));
    tracker.detach();
    tracker.detach();
    assert_eq!(*ops.borrow(), vec!["el:listen_element", "el:unlisten_element"]);
}

#[test]
fn test_reattach_detaches_previous_element() {
    let log = CallLog::default();
    let (mut tracker, ops) = attached(click_only_handler(&log));
    tracker.attach(FakeListeners::new("other", &ops), click_only_handler(&log));
    assert_eq!(
        *ops.borrow(),
        vec![
            "el:listen_element",
            "el:unlisten_element",
            "other:listen_element"
        ]
    );
}

#[test]
fn test_detach_mid_gesture_removes_document_listeners() {
    let log = CallLog::default();
    let (mut tracker, ops) = attached(click_only_handler(&log));
    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
    tracker.detach();

    assert!(!tracker.is_activated());
    assert!(ops.borrow().contains(&"el:unlisten_document".to_string()));

    // The pointer-up never reaches a detached tracker
    tracker.handle_pointer_up(&PointerSample::at(0.0, 0.0));
    assert_eq!(clicks(&log), 0);
}

// =============================================================================
// CLICK
// =============================================================================

#[test]
fn test_click_without_double_click_handler_fires_immediately() {
    let log = CallLog::default();
    let (mut tracker, ops) = attached(click_only_handler(&log));

    let down = PointerSample::at(3.0, 4.0);
    let up = PointerSample::at(3.0, 4.0);
    tracker.handle_pointer_down(&down);
    assert!(tracker.is_activated());
    tracker.handle_pointer_up(&up);

    assert_eq!(*log.borrow(), vec![Call::Click([3.0, 4.0])]);
    assert!(down.default_prevented());
    assert!(up.default_prevented());
    assert_eq!(
        *ops.borrow(),
        vec![
            "el:listen_element",
            "el:listen_document",
            "el:unlisten_document"
        ]
    );
}

#[test]
fn test_secondary_button_is_ignored() {
    let log = CallLog::default();
    let (mut tracker, ops) = attached(click_only_handler(&log));
    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0).with_button(2));
    tracker.handle_pointer_up(&PointerSample::at(0.0, 0.0));
    assert!(log.borrow().is_empty());
    assert_eq!(ops.borrow().len(), 1);
}

#[test]
fn test_state_is_reset_after_pointer_up() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
    tracker.handle_pointer_move(&PointerSample::at(1.0, 0.0));
    assert!(tracker.is_activated());
    assert!(tracker.is_dragging());
    tracker.handle_pointer_up(&PointerSample::at(2.0, 0.0));
    assert!(!tracker.is_activated());
    assert!(!tracker.is_dragging());

    click_at(&mut tracker, 0.0, 0.0);
    assert!(!tracker.is_activated());
    assert!(!tracker.is_dragging());
}

// =============================================================================
// VETO
// =============================================================================

#[test]
fn test_activate_veto_suppresses_the_gesture() {
    let log = CallLog::default();
    let (mut tracker, ops) = attached(recording_handler(&log, false));

    let down = PointerSample::at(1.0, 1.0);
    tracker.handle_pointer_down(&down);
    tracker.handle_pointer_move(&PointerSample::at(5.0, 5.0));
    tracker.handle_pointer_up(&PointerSample::at(5.0, 5.0));
    tracker.advance_clock(Duration::from_secs(1));

    assert_eq!(*log.borrow(), vec![Call::Activate]);
    assert!(!down.default_prevented());
    assert!(!tracker.is_activated());
    assert_eq!(*ops.borrow(), vec!["el:listen_element"]);
}

#[test]
fn test_activate_returning_true_proceeds() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));
    tracker.handle_pointer_down(&PointerSample::at(1.0, 1.0));
    assert!(tracker.is_activated());
}

// =============================================================================
// DRAG
// =============================================================================

#[test]
fn test_drag_reports_delta_and_offset() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    tracker.handle_pointer_down(&PointerSample::at(10.0, 10.0));
    tracker.handle_pointer_move(&PointerSample::at(15.0, 12.0));
    tracker.handle_pointer_move(&PointerSample::at(20.0, 20.0));
    tracker.handle_pointer_up(&PointerSample::at(25.0, 30.0));

    let first = CoordinateData {
        activation: [10.0, 10.0],
        current: [15.0, 12.0],
        last: [10.0, 10.0],
        delta: [5.0, 2.0],
        offset: [5.0, 2.0],
    };
    let second = CoordinateData {
        activation: [10.0, 10.0],
        current: [20.0, 20.0],
        last: [15.0, 12.0],
        delta: [5.0, 8.0],
        offset: [10.0, 10.0],
    };
    let last = CoordinateData {
        activation: [10.0, 10.0],
        current: [25.0, 30.0],
        last: [20.0, 20.0],
        delta: [5.0, 10.0],
        offset: [15.0, 20.0],
    };
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Activate,
            Call::DragMove(first),
            Call::DragMove(second),
            Call::DragMove(last),
            Call::DragEnd(last),
        ]
    );
}

#[test]
fn test_drag_continues_outside_element() {
    // Move/up arrive through the document listeners, wherever the pointer is
    let log = CallLog::default();
    let (mut tracker, ops) = attached(recording_handler(&log, true));
    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
    assert!(ops.borrow().contains(&"el:listen_document".to_string()));

    tracker.handle_pointer_move(&PointerSample::at(-500.0, 9000.0));
    tracker.handle_pointer_up(&PointerSample::at(-600.0, 9000.0));
    assert!(matches!(log.borrow().last(), Some(Call::DragEnd(c)) if c.offset == [-600.0, 9000.0]));
}

#[test]
fn test_moves_without_activation_are_ignored() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));
    let stray = PointerSample::at(1.0, 1.0);
    tracker.handle_pointer_move(&stray);
    tracker.handle_pointer_up(&stray);
    assert!(log.borrow().is_empty());
    assert!(!stray.default_prevented());
}

#[test_case(0 ; "no moves is a click")]
#[test_case(1 ; "one move is a drag")]
#[test_case(5 ; "many moves is a drag")]
fn test_exactly_one_terminal_sequence(moves: u32) {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
    for i in 1..=moves {
        tracker.handle_pointer_move(&PointerSample::at(f64::from(i), 0.0));
    }
    tracker.handle_pointer_up(&PointerSample::at(f64::from(moves), 0.0));
    tracker.advance_clock(Duration::from_secs(1));

    let calls = log.borrow();
    let drag_ends = calls
        .iter()
        .filter(|c| matches!(c, Call::DragEnd(_)))
        .count();
    let drag_moves = calls
        .iter()
        .filter(|c| matches!(c, Call::DragMove(_)))
        .count();
    let taps = calls
        .iter()
        .filter(|c| matches!(c, Call::Click(_) | Call::DoubleClick(_)))
        .count();
    if moves == 0 {
        assert_eq!((drag_ends, drag_moves, taps), (0, 0, 1));
    } else {
        assert_eq!((drag_ends, taps), (1, 0));
        assert_eq!(drag_moves, usize::try_from(moves).unwrap() + 1);
        assert!(matches!(calls.last(), Some(Call::DragEnd(_))));
    }
}

// =============================================================================
// DOUBLE CLICK
// =============================================================================

#[test]
fn test_double_click_within_timeout() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    click_at(&mut tracker, 1.0, 1.0);
    assert!(tracker.has_pending_click());
    tracker.advance_clock(Duration::from_millis(200));
    click_at(&mut tracker, 2.0, 2.0);
    assert!(!tracker.has_pending_click());
    assert_eq!(tracker.scheduler().pending(), 0);

    tracker.advance_clock(Duration::from_secs(2));
    assert_eq!(double_clicks(&log), 1);
    assert_eq!(clicks(&log), 0);
    assert_eq!(log.borrow().last(), Some(&Call::DoubleClick([2.0, 2.0])));
}

#[test]
fn test_clicks_past_timeout_are_separate() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    click_at(&mut tracker, 1.0, 1.0);
    tracker.advance_clock(Duration::from_millis(500));
    click_at(&mut tracker, 2.0, 2.0);
    tracker.advance_clock(Duration::from_millis(500));

    assert_eq!(double_clicks(&log), 0);
    let fired: Vec<Call> = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::Click(_)))
        .cloned()
        .collect();
    assert_eq!(fired, vec![Call::Click([1.0, 1.0]), Call::Click([2.0, 2.0])]);
}

#[test]
fn test_single_click_waits_for_the_full_timeout() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    click_at(&mut tracker, 7.0, 8.0);
    tracker.advance_clock(Duration::from_millis(499));
    assert_eq!(clicks(&log), 0);
    tracker.advance_clock(Duration::from_millis(1));
    // The deferred click carries the original event
    assert_eq!(log.borrow().last(), Some(&Call::Click([7.0, 8.0])));
    assert!(!tracker.has_pending_click());
}

#[test]
fn test_custom_timeout() {
    let log = CallLog::default();
    let ops = OpLog::default();
    let config = tablegrid::interactions::DragConfig {
        double_click_timeout: Duration::from_millis(100),
    };
    let mut tracker = Tracker::with_config(ManualScheduler::new(), config);
    tracker.attach(FakeListeners::new("el", &ops), recording_handler(&log, true));

    click_at(&mut tracker, 0.0, 0.0);
    tracker.advance_clock(Duration::from_millis(100));
    assert_eq!(clicks(&log), 1);
}

#[test]
fn test_detach_cancels_pending_click() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    click_at(&mut tracker, 0.0, 0.0);
    tracker.detach();
    assert!(!tracker.has_pending_click());
    assert_eq!(tracker.scheduler().pending(), 0);
    tracker.advance_clock(Duration::from_secs(1));
    assert_eq!(clicks(&log), 0);
}

#[test]
fn test_drag_between_clicks_keeps_first_click_pending() {
    let log = CallLog::default();
    let (mut tracker, _ops) = attached(recording_handler(&log, true));

    click_at(&mut tracker, 0.0, 0.0);
    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
    tracker.handle_pointer_move(&PointerSample::at(3.0, 0.0));
    tracker.handle_pointer_up(&PointerSample::at(4.0, 0.0));
    assert!(tracker.has_pending_click());

    tracker.advance_clock(Duration::from_millis(500));
    assert_eq!(clicks(&log), 1);
    assert_eq!(double_clicks(&log), 0);
}

/// Scheduler that can never arm a timer
struct RefusingScheduler;

impl Scheduler for RefusingScheduler {
    fn schedule_once(&mut self, _token: TimerToken, _delay: Duration) -> tablegrid::Result<()> {
        Err(TableError::MissingDom("window"))
    }

    fn cancel(&mut self, _token: TimerToken) {}
}

#[test]
fn test_unschedulable_timer_falls_back_to_immediate_click() {
    let log = CallLog::default();
    let mut tracker: DragEvents<PointerSample, (), RefusingScheduler> =
        DragEvents::new(RefusingScheduler);
    tracker.attach((), recording_handler(&log, true));

    tracker.handle_pointer_down(&PointerSample::at(0.0, 0.0));
    tracker.handle_pointer_up(&PointerSample::at(0.0, 0.0));
    assert_eq!(clicks(&log), 1);
    assert!(!tracker.has_pending_click());
}

// =============================================================================
// MODIFIERS
// =============================================================================

#[test]
fn test_is_additive_checks_ctrl_and_meta() {
    assert!(Tracker::is_additive(&PointerSample::at(0.0, 0.0).with_ctrl()));
    assert!(Tracker::is_additive(&PointerSample::at(0.0, 0.0).with_meta()));
    assert!(!Tracker::is_additive(&PointerSample::at(0.0, 0.0)));
}
