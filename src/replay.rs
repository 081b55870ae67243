//! Touch trace replay
//!
//! A trace is JSON lines, one touch event per line:
//!
//! ```text
//! # swipe down
//! {"kind":"start","x":0,"y":0,"t":0}
//! {"kind":"move","t":40}
//! {"kind":"end","x":0,"y":60,"t":100}
//! ```
//!
//! Replay runs either on a virtual clock (instant, deterministic) or on a
//! calloop event loop in real time with each event at its recorded offset.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use calloop::{
    timer::{TimeoutAction, Timer},
    EventLoop,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::input::{
    CalloopTimers, Contact, Gesture, GestureCallbacks, GestureConfig, GestureRecognizer, ManualTimers, TimerQueue,
};

/// One recorded touch event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TraceEvent {
    Start { x: f64, y: f64, t: i64 },
    Move { t: i64 },
    End { x: f64, y: f64, t: i64 },
    Cancel { t: i64 },
}

impl TraceEvent {
    pub fn time_ms(&self) -> i64 {
        match *self {
            TraceEvent::Start { t, .. }
            | TraceEvent::Move { t }
            | TraceEvent::End { t, .. }
            | TraceEvent::Cancel { t } => t,
        }
    }

    fn apply<T: TimerQueue>(&self, recognizer: &mut GestureRecognizer<T>) {
        match *self {
            TraceEvent::Start { x, y, t } => recognizer.start(Contact::new(x, y, t)),
            TraceEvent::Move { .. } => recognizer.motion(),
            TraceEvent::End { x, y, t } => recognizer.end(Contact::new(x, y, t)),
            TraceEvent::Cancel { .. } => recognizer.cancel(),
        }
    }
}

/// A gesture reported during replay, with the trace time it was reported at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recognized {
    pub gesture: Gesture,
    pub t_ms: i64,
}

impl fmt::Display for Recognized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8} ms  {}", self.t_ms, self.gesture)
    }
}

/// Parse a JSON-lines trace. Blank lines and `#` comments are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| serde_json::from_str(line).map_err(|source| Error::Trace { line: idx + 1, source }))
        .collect()
}

pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>> {
    let text = fs::read_to_string(path)?;
    let events = parse_trace(&text)?;
    info!(events = events.len(), "Loaded touch trace from {:?}", path);
    Ok(events)
}

type Log = Rc<RefCell<Vec<Recognized>>>;

/// Callbacks for every gesture, stamped with the current trace time
fn recording_callbacks(clock: &Rc<Cell<i64>>, log: &Log) -> GestureCallbacks {
    Gesture::ALL.iter().fold(GestureCallbacks::new(), |callbacks, &gesture| {
        let clock = clock.clone();
        let log = log.clone();
        callbacks.on(gesture, move || {
            log.borrow_mut().push(Recognized {
                gesture,
                t_ms: clock.get(),
            });
        })
    })
}

/// Replay on a virtual clock.
///
/// The clock advances to each event's time before it is applied, and past the
/// last event by the long press delay so a trailing hold still fires.
pub fn replay(events: &[TraceEvent], config: &GestureConfig) -> Vec<Recognized> {
    let clock = Rc::new(Cell::new(0));
    let log: Log = Rc::default();
    let mut recognizer = GestureRecognizer::new(config.clone(), recording_callbacks(&clock, &log), ManualTimers::new());

    for event in events {
        advance(&mut recognizer, &clock, event.time_ms());
        debug!(?event, "Replaying");
        event.apply(&mut recognizer);
    }

    if let Some(last) = events.last() {
        let delay_ms = i64::try_from(config.long_press_delay_ms).unwrap_or(i64::MAX);
        advance(&mut recognizer, &clock, last.time_ms().saturating_add(delay_ms));
    }

    drop(recognizer);
    log.take()
}

/// Step the virtual clock through every due deadline so each long press is
/// stamped with the time it became due
fn advance(recognizer: &mut GestureRecognizer<ManualTimers>, clock: &Cell<i64>, to_ms: i64) {
    while let Some(deadline) = recognizer.timers().next_deadline().filter(|&d| d <= to_ms) {
        clock.set(deadline);
        recognizer.advance_to(deadline);
    }
    recognizer.advance_to(to_ms);
    clock.set(recognizer.timers().now_ms());
}

/// Loop data for real time replay
struct Live {
    recognizer: GestureRecognizer<CalloopTimers<Live>>,
    clock: Rc<Cell<i64>>,
    started: Instant,
    base_ms: i64,
    remaining: usize,
}

impl Live {
    fn trace_now(&self) -> i64 {
        let elapsed = i64::try_from(self.started.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.base_ms.saturating_add(elapsed)
    }
}

/// Replay in real time on a calloop event loop.
///
/// Events are scheduled at their offset from the first event. Long press is
/// delivered by calloop timers, so a hold in the trace takes as long as it
/// did when recorded.
pub fn replay_realtime(events: &[TraceEvent], config: &GestureConfig) -> Result<Vec<Recognized>> {
    let mut event_loop: EventLoop<'static, Live> = EventLoop::try_new()?;
    let handle = event_loop.handle();

    let clock = Rc::new(Cell::new(0));
    let log: Log = Rc::default();
    let timers = CalloopTimers::new(handle.clone(), |live: &mut Live, id| {
        live.clock.set(live.trace_now());
        live.recognizer.long_press_elapsed(id);
    });

    let base_ms = events.first().map_or(0, TraceEvent::time_ms);
    let mut live = Live {
        recognizer: GestureRecognizer::new(config.clone(), recording_callbacks(&clock, &log), timers),
        clock,
        started: Instant::now(),
        base_ms,
        remaining: events.len(),
    };

    for &event in events {
        let offset_ms = u64::try_from(event.time_ms().saturating_sub(base_ms)).unwrap_or(0);
        handle
            .insert_source(Timer::from_duration(Duration::from_millis(offset_ms)), move |_, _, live: &mut Live| {
                live.clock.set(event.time_ms());
                debug!(?event, "Replaying");
                event.apply(&mut live.recognizer);
                live.remaining = live.remaining.saturating_sub(1);
                TimeoutAction::Drop
            })
            .map_err(|e| Error::EventLoop(e.error))?;
    }

    info!(events = events.len(), "Replaying trace in real time");
    while live.remaining > 0 || live.recognizer.long_press_pending() {
        event_loop.dispatch(Some(Duration::from_millis(50)), &mut live)?;
    }

    drop(live);
    Ok(log.take())
}
