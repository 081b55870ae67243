//! Gesture recognition for a single touch contact
//!
//! Each touch (down → … → up) is classified at most once:
//! - Swipe left/right/up/down when the displacement at touch up exceeds the threshold
//! - Double tap when two short, still touches land within the double tap window
//!
//! Long press is separate: a timer armed at touch down fires while the finger
//! is still down, unless any motion or the touch up cancels it first.
//!
//! The recognizer never reports errors. Out of order input (up without down,
//! motion without down) is ignored.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::timer::{ManualTimers, TimerId, TimerQueue};

/// Maximum touch duration that still counts as a tap (ms)
pub const TAP_MAX_DURATION_MS: i64 = 200;

/// A touch position with the time it was observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: i64,
}

impl Contact {
    pub fn new(x: f64, y: f64, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    LongPress,
    DoubleTap,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Gesture::SwipeLeft,
        Gesture::SwipeRight,
        Gesture::SwipeUp,
        Gesture::SwipeDown,
        Gesture::LongPress,
        Gesture::DoubleTap,
    ];
}

impl From<SwipeDirection> for Gesture {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Up => Gesture::SwipeUp,
            SwipeDirection::Down => Gesture::SwipeDown,
            SwipeDirection::Left => Gesture::SwipeLeft,
            SwipeDirection::Right => Gesture::SwipeRight,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gesture::SwipeLeft => "swipe-left",
            Gesture::SwipeRight => "swipe-right",
            Gesture::SwipeUp => "swipe-up",
            Gesture::SwipeDown => "swipe-down",
            Gesture::LongPress => "long-press",
            Gesture::DoubleTap => "double-tap",
        };
        f.write_str(name)
    }
}

/// Classify a touch displacement as a swipe.
///
/// Either axis must move strictly more than `threshold`. The horizontal axis
/// wins only when it moved strictly further than the vertical one, so equal
/// magnitudes resolve vertically.
pub fn classify_swipe(dx: f64, dy: f64, threshold: f64) -> Option<SwipeDirection> {
    let abs_dx = dx.abs();
    let abs_dy = dy.abs();

    if !(abs_dx > threshold || abs_dy > threshold) {
        return None;
    }

    if abs_dx > abs_dy {
        if dx > 0.0 {
            Some(SwipeDirection::Right)
        } else if dx < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    } else if dy > 0.0 {
        Some(SwipeDirection::Down)
    } else if dy < 0.0 {
        Some(SwipeDirection::Up)
    } else {
        None
    }
}

/// Configuration for gesture recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Displacement on either axis needed for a swipe (px)
    pub swipe_threshold_px: f64,

    /// Time the finger must stay down, without moving, for a long press (ms)
    pub long_press_delay_ms: u64,

    /// Maximum gap between two taps of a double tap (ms)
    pub double_tap_window_ms: i64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
            long_press_delay_ms: 500,
            double_tap_window_ms: 300,
        }
    }
}

impl GestureConfig {
    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }
}

type Callback = Box<dyn FnMut()>;

/// Gesture callbacks. Gestures without a callback are not reported.
#[derive(Default)]
pub struct GestureCallbacks {
    swipe_left: Option<Callback>,
    swipe_right: Option<Callback>,
    swipe_up: Option<Callback>,
    swipe_down: Option<Callback>,
    long_press: Option<Callback>,
    double_tap: Option<Callback>,
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_left(self, f: impl FnMut() + 'static) -> Self {
        self.on(Gesture::SwipeLeft, f)
    }

    pub fn on_swipe_right(self, f: impl FnMut() + 'static) -> Self {
        self.on(Gesture::SwipeRight, f)
    }

    pub fn on_swipe_up(self, f: impl FnMut() + 'static) -> Self {
        self.on(Gesture::SwipeUp, f)
    }

    pub fn on_swipe_down(self, f: impl FnMut() + 'static) -> Self {
        self.on(Gesture::SwipeDown, f)
    }

    pub fn on_long_press(self, f: impl FnMut() + 'static) -> Self {
        self.on(Gesture::LongPress, f)
    }

    pub fn on_double_tap(self, f: impl FnMut() + 'static) -> Self {
        self.on(Gesture::DoubleTap, f)
    }

    /// Set the callback for any gesture
    pub fn on(mut self, gesture: Gesture, f: impl FnMut() + 'static) -> Self {
        *self.slot(gesture) = Some(Box::new(f));
        self
    }

    /// Check if a gesture has a callback
    pub fn is_set(&self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::SwipeLeft => self.swipe_left.is_some(),
            Gesture::SwipeRight => self.swipe_right.is_some(),
            Gesture::SwipeUp => self.swipe_up.is_some(),
            Gesture::SwipeDown => self.swipe_down.is_some(),
            Gesture::LongPress => self.long_press.is_some(),
            Gesture::DoubleTap => self.double_tap.is_some(),
        }
    }

    fn slot(&mut self, gesture: Gesture) -> &mut Option<Callback> {
        match gesture {
            Gesture::SwipeLeft => &mut self.swipe_left,
            Gesture::SwipeRight => &mut self.swipe_right,
            Gesture::SwipeUp => &mut self.swipe_up,
            Gesture::SwipeDown => &mut self.swipe_down,
            Gesture::LongPress => &mut self.long_press,
            Gesture::DoubleTap => &mut self.double_tap,
        }
    }

    /// Invoke the callback for a gesture, if one is set
    fn emit(&mut self, gesture: Gesture) {
        if let Some(callback) = self.slot(gesture) {
            info!(%gesture, "Gesture recognized");
            callback();
        }
    }
}

impl fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("swipe_left", &self.swipe_left.is_some())
            .field("swipe_right", &self.swipe_right.is_some())
            .field("swipe_up", &self.swipe_up.is_some())
            .field("swipe_down", &self.swipe_down.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("double_tap", &self.double_tap.is_some())
            .finish()
    }
}

/// An armed long press timer
#[derive(Debug)]
struct ArmedTimer<H> {
    id: TimerId,
    handle: H,
}

/// The open touch: where it started and its pending long press
#[derive(Debug)]
struct Session<H> {
    origin: Contact,
    long_press: Option<ArmedTimer<H>>,
}

/// Consecutive short taps, kept across touches for double tap detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapRun {
    pub last_tap_ms: i64,
    pub length: u32,
}

/// Gesture recognizer state machine
///
/// Idle when no touch is open, armed while one is. The tap run lives as long as
/// the recognizer and is shared by every touch it sees.
pub struct GestureRecognizer<T: TimerQueue = ManualTimers> {
    config: GestureConfig,
    callbacks: GestureCallbacks,
    timers: T,
    session: Option<Session<T::Handle>>,
    taps: TapRun,
    next_timer_id: u64,
}

impl<T: TimerQueue> GestureRecognizer<T> {
    pub fn new(config: GestureConfig, callbacks: GestureCallbacks, timers: T) -> Self {
        Self {
            config,
            callbacks,
            timers,
            session: None,
            taps: TapRun::default(),
            next_timer_id: 0,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Check if a touch is currently open
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Check if a long press timer is armed
    pub fn long_press_pending(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.long_press.is_some())
    }

    pub fn tap_run(&self) -> TapRun {
        self.taps
    }

    /// Handle touch down
    pub fn start(&mut self, contact: Contact) {
        if self.session.is_some() {
            debug!("Touch down while a touch is open, abandoning previous touch");
            self.close_session();
        }

        let long_press = if self.callbacks.is_set(Gesture::LongPress) {
            self.arm_long_press(contact.timestamp_ms)
        } else {
            None
        };

        debug!(x = contact.x, y = contact.y, t = contact.timestamp_ms, "Touch down");
        self.session = Some(Session {
            origin: contact,
            long_press,
        });
    }

    /// Handle touch motion. Any motion cancels a pending long press.
    pub fn motion(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(timer) = session.long_press.take() {
            debug!(timer = timer.id.0, "Motion cancelled long press");
            self.timers.cancel(timer.handle);
        }
    }

    /// Handle touch up: classify the touch and close it
    pub fn end(&mut self, contact: Contact) {
        let Some(session) = self.session.take() else {
            debug!("Touch up without touch down, ignoring");
            return;
        };

        if let Some(timer) = session.long_press {
            self.timers.cancel(timer.handle);
        }

        let origin = session.origin;
        let dx = contact.x - origin.x;
        let dy = contact.y - origin.y;
        let duration_ms = contact.timestamp_ms.saturating_sub(origin.timestamp_ms);
        debug!(dx, dy, duration_ms, "Touch up");

        let threshold = self.config.swipe_threshold_px;
        if dx.abs() > threshold || dy.abs() > threshold {
            if let Some(direction) = classify_swipe(dx, dy, threshold) {
                self.callbacks.emit(direction.into());
            }
            return;
        }

        if duration_ms < TAP_MAX_DURATION_MS && self.callbacks.is_set(Gesture::DoubleTap) {
            self.register_tap(contact.timestamp_ms);
        }
    }

    /// Abandon the open touch without reporting anything
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            debug!("Touch cancelled");
            self.close_session();
        }
    }

    /// Deliver an expired long press timer.
    ///
    /// Only the timer armed for the open touch fires; anything else is stale
    /// and dropped. The touch stays open and is still classified at touch up.
    pub fn long_press_elapsed(&mut self, id: TimerId) {
        let armed = self
            .session
            .as_mut()
            .and_then(|s| s.long_press.take_if(|timer| timer.id == id));

        if armed.is_none() {
            debug!(timer = id.0, "Ignoring stale long press timer");
            return;
        }

        self.callbacks.emit(Gesture::LongPress);
    }

    fn arm_long_press(&mut self, origin_ms: i64) -> Option<ArmedTimer<T::Handle>> {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;

        match self.timers.arm(id, origin_ms, self.config.long_press_delay()) {
            Ok(handle) => Some(ArmedTimer { id, handle }),
            Err(e) => {
                warn!("Failed to arm long press timer: {}", e);
                None
            }
        }
    }

    fn close_session(&mut self) {
        if let Some(timer) = self.session.take().and_then(|s| s.long_press) {
            self.timers.cancel(timer.handle);
        }
    }

    fn register_tap(&mut self, timestamp_ms: i64) {
        let gap = timestamp_ms.saturating_sub(self.taps.last_tap_ms);

        if gap < self.config.double_tap_window_ms {
            self.taps.length += 1;
            if self.taps.length == 2 {
                self.callbacks.emit(Gesture::DoubleTap);
                self.taps.length = 0;
            }
        } else {
            self.taps.length = 1;
        }

        self.taps.last_tap_ms = timestamp_ms;
    }
}

impl GestureRecognizer<ManualTimers> {
    /// Move the virtual clock forward, firing a long press that became due
    pub fn advance_to(&mut self, now_ms: i64) {
        for id in self.timers.advance_to(now_ms) {
            self.long_press_elapsed(id);
        }
    }
}

impl<T: TimerQueue> Drop for GestureRecognizer<T> {
    fn drop(&mut self) {
        self.close_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ALL: [Gesture; 6] = Gesture::ALL;

    fn recording(gestures: &[Gesture]) -> (GestureCallbacks, Rc<RefCell<Vec<Gesture>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = GestureCallbacks::new();
        for &gesture in gestures {
            let log = log.clone();
            callbacks = callbacks.on(gesture, move || log.borrow_mut().push(gesture));
        }
        (callbacks, log)
    }

    fn recognizer(gestures: &[Gesture]) -> (GestureRecognizer, Rc<RefCell<Vec<Gesture>>>) {
        let (callbacks, log) = recording(gestures);
        (
            GestureRecognizer::new(GestureConfig::default(), callbacks, ManualTimers::new()),
            log,
        )
    }

    /// Feed a down/up pair on the virtual clock
    fn touch(rec: &mut GestureRecognizer, from: Contact, to: Contact) {
        rec.advance_to(from.timestamp_ms);
        rec.start(from);
        rec.advance_to(to.timestamp_ms);
        rec.end(to);
    }

    #[test]
    fn test_classify_swipe() {
        assert_eq!(classify_swipe(60.0, 10.0, 50.0), Some(SwipeDirection::Right));
        assert_eq!(classify_swipe(-60.0, 10.0, 50.0), Some(SwipeDirection::Left));
        assert_eq!(classify_swipe(5.0, 60.0, 50.0), Some(SwipeDirection::Down));
        assert_eq!(classify_swipe(5.0, -60.0, 50.0), Some(SwipeDirection::Up));
        assert_eq!(classify_swipe(50.0, -50.0, 50.0), None);
        // Equal magnitudes resolve vertically
        assert_eq!(classify_swipe(70.0, -70.0, 50.0), Some(SwipeDirection::Up));
    }

    #[test]
    fn test_swipe_down() {
        let (mut rec, log) = recognizer(&ALL);
        touch(&mut rec, Contact::new(0.0, 0.0, 0), Contact::new(0.0, 60.0, 100));
        assert_eq!(*log.borrow(), vec![Gesture::SwipeDown]);
        assert!(!rec.has_session());
    }

    #[test]
    fn test_swipe_directions_exclusive() {
        let cases = [
            ((80.0, 30.0), Gesture::SwipeRight),
            ((-80.0, 30.0), Gesture::SwipeLeft),
            ((30.0, -80.0), Gesture::SwipeUp),
            ((-30.0, 80.0), Gesture::SwipeDown),
        ];

        for ((dx, dy), expected) in cases {
            let (mut rec, log) = recognizer(&ALL);
            touch(&mut rec, Contact::new(100.0, 100.0, 0), Contact::new(100.0 + dx, 100.0 + dy, 50));
            assert_eq!(*log.borrow(), vec![expected], "dx={dx} dy={dy}");
        }
    }

    #[test]
    fn test_no_swipe_within_threshold() {
        let (mut rec, log) = recognizer(&[
            Gesture::SwipeLeft,
            Gesture::SwipeRight,
            Gesture::SwipeUp,
            Gesture::SwipeDown,
        ]);
        touch(&mut rec, Contact::new(0.0, 0.0, 0), Contact::new(50.0, -50.0, 100));
        touch(&mut rec, Contact::new(0.0, 0.0, 1000), Contact::new(-49.5, 12.0, 1100));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_swipe_without_callback_is_silent() {
        let (mut rec, log) = recognizer(&[Gesture::SwipeLeft, Gesture::DoubleTap]);
        touch(&mut rec, Contact::new(0.0, 0.0, 0), Contact::new(90.0, 0.0, 50));
        assert!(log.borrow().is_empty());
        // A swipe never counts as a tap
        assert_eq!(rec.tap_run(), TapRun::default());
    }

    #[test]
    fn test_long_press_fires_after_delay() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.advance_to(499);
        assert!(log.borrow().is_empty());
        rec.advance_to(500);
        assert_eq!(*log.borrow(), vec![Gesture::LongPress]);
        assert!(rec.has_session());

        // Touch up still runs its own classification, which finds nothing here
        rec.advance_to(600);
        rec.end(Contact::new(0.0, 0.0, 600));
        assert_eq!(*log.borrow(), vec![Gesture::LongPress]);
    }

    #[test]
    fn test_motion_cancels_long_press() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.advance_to(50);
        rec.motion();
        assert!(!rec.long_press_pending());
        rec.advance_to(600);
        rec.end(Contact::new(0.0, 0.0, 600));
        assert!(log.borrow().is_empty());
        assert_eq!(rec.timers().pending(), 0);
    }

    #[test]
    fn test_touch_up_cancels_long_press() {
        let (mut rec, log) = recognizer(&[Gesture::LongPress]);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.advance_to(300);
        rec.end(Contact::new(0.0, 0.0, 300));
        rec.advance_to(2000);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_long_press_and_swipe_on_same_touch() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.advance_to(700);
        rec.end(Contact::new(-120.0, 0.0, 700));
        assert_eq!(*log.borrow(), vec![Gesture::LongPress, Gesture::SwipeLeft]);
    }

    #[test]
    fn test_no_timer_without_long_press_callback() {
        let (mut rec, _log) = recognizer(&[Gesture::DoubleTap]);
        rec.start(Contact::new(0.0, 0.0, 0));
        assert!(!rec.long_press_pending());
        assert_eq!(rec.timers().pending(), 0);
    }

    #[test]
    fn test_double_tap() {
        let (mut rec, log) = recognizer(&ALL);
        touch(&mut rec, Contact::new(10.0, 10.0, 1000), Contact::new(10.0, 10.0, 1050));
        assert!(log.borrow().is_empty());
        touch(&mut rec, Contact::new(10.0, 10.0, 1200), Contact::new(10.0, 10.0, 1250));
        assert_eq!(*log.borrow(), vec![Gesture::DoubleTap]);
    }

    #[test]
    fn test_third_tap_starts_fresh_run() {
        let (mut rec, log) = recognizer(&[Gesture::DoubleTap]);
        touch(&mut rec, Contact::new(0.0, 0.0, 1000), Contact::new(0.0, 0.0, 1050));
        touch(&mut rec, Contact::new(0.0, 0.0, 1100), Contact::new(0.0, 0.0, 1150));
        touch(&mut rec, Contact::new(0.0, 0.0, 1200), Contact::new(0.0, 0.0, 1250));
        assert_eq!(*log.borrow(), vec![Gesture::DoubleTap]);
        assert_eq!(rec.tap_run().length, 1);

        touch(&mut rec, Contact::new(0.0, 0.0, 1300), Contact::new(0.0, 0.0, 1350));
        assert_eq!(*log.borrow(), vec![Gesture::DoubleTap, Gesture::DoubleTap]);
    }

    #[test]
    fn test_taps_outside_window_do_not_pair() {
        let (mut rec, log) = recognizer(&[Gesture::DoubleTap]);
        touch(&mut rec, Contact::new(0.0, 0.0, 1000), Contact::new(0.0, 0.0, 1050));
        touch(&mut rec, Contact::new(0.0, 0.0, 1300), Contact::new(0.0, 0.0, 1350));
        assert!(log.borrow().is_empty());
        assert_eq!(rec.tap_run(), TapRun { last_tap_ms: 1350, length: 1 });
    }

    #[test]
    fn test_slow_touch_is_not_a_tap() {
        let (mut rec, log) = recognizer(&[Gesture::DoubleTap]);
        touch(&mut rec, Contact::new(0.0, 0.0, 1000), Contact::new(0.0, 0.0, 1050));
        touch(&mut rec, Contact::new(0.0, 0.0, 1060), Contact::new(0.0, 0.0, 1260));
        assert!(log.borrow().is_empty());
        assert_eq!(rec.tap_run().last_tap_ms, 1050);
    }

    #[test]
    fn test_new_touch_abandons_open_touch() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.advance_to(100);
        rec.start(Contact::new(500.0, 500.0, 100));
        assert_eq!(rec.timers().pending(), 1);

        // First long press deadline passes without firing
        rec.advance_to(550);
        assert!(log.borrow().is_empty());

        // Deltas are measured from the new origin
        rec.end(Contact::new(500.0, 520.0, 550));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_out_of_order_input_ignored() {
        let (mut rec, log) = recognizer(&ALL);
        rec.motion();
        rec.end(Contact::new(100.0, 0.0, 10));
        rec.cancel();
        assert!(log.borrow().is_empty());
        assert!(!rec.has_session());
    }

    #[test]
    fn test_cancel_abandons_touch() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.cancel();
        rec.advance_to(1000);
        rec.end(Contact::new(200.0, 0.0, 1000));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_stale_timer_ignored() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.long_press_elapsed(TimerId(42));
        assert!(log.borrow().is_empty());
        assert!(rec.long_press_pending());
    }

    #[test]
    fn test_no_callbacks_classifies_silently() {
        let mut rec = GestureRecognizer::new(
            GestureConfig::default(),
            GestureCallbacks::new(),
            ManualTimers::new(),
        );
        rec.start(Contact::new(0.0, 0.0, 0));
        rec.end(Contact::new(300.0, 0.0, 10));
        assert!(!rec.has_session());
    }

    #[test]
    fn test_custom_threshold() {
        let (callbacks, log) = recording(&ALL);
        let config = GestureConfig {
            swipe_threshold_px: 10.0,
            ..Default::default()
        };
        let mut rec = GestureRecognizer::new(config, callbacks, ManualTimers::new());
        touch(&mut rec, Contact::new(0.0, 0.0, 0), Contact::new(11.0, 0.0, 100));
        assert_eq!(*log.borrow(), vec![Gesture::SwipeRight]);
    }

    #[test]
    fn test_long_press_counts_from_touch_down() {
        let (mut rec, log) = recognizer(&ALL);
        // Clock is still at 0 when the touch lands at 1000
        rec.start(Contact::new(0.0, 0.0, 1000));
        rec.advance_to(1100);
        rec.advance_to(1499);
        assert!(log.borrow().is_empty());
        rec.advance_to(1500);
        assert_eq!(*log.borrow(), vec![Gesture::LongPress]);
    }

    #[test]
    fn test_touch_up_at_long_press_deadline() {
        let (mut rec, log) = recognizer(&ALL);
        touch(&mut rec, Contact::new(0.0, 0.0, 0), Contact::new(0.0, 0.0, 500));
        assert_eq!(*log.borrow(), vec![Gesture::LongPress]);
        assert!(!rec.has_session());
    }

    #[test]
    fn test_extreme_timestamps() {
        let (mut rec, log) = recognizer(&ALL);
        rec.start(Contact::new(0.0, 0.0, i64::MIN));
        rec.end(Contact::new(0.0, 0.0, 10));
        // Saturated duration is far too long for a tap
        assert_eq!(rec.tap_run(), TapRun::default());

        rec.start(Contact::new(0.0, 0.0, i64::MAX - 10));
        rec.end(Contact::new(0.0, 0.0, i64::MAX));
        assert_eq!(rec.tap_run(), TapRun { last_tap_ms: i64::MAX, length: 1 });

        rec.start(Contact::new(0.0, 0.0, i64::MAX));
        rec.advance_to(i64::MAX);
        assert_eq!(*log.borrow(), vec![Gesture::LongPress]);
        rec.cancel();
        assert!(!rec.has_session());
    }
}
