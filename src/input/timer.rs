//! Long press timers
//!
//! The recognizer arms one timer per touch and must be able to cancel it on
//! every exit path of that touch. A `TimerQueue` hands back an owned handle for
//! each armed timer; cancelling through the handle guarantees the expiry is
//! never delivered. A timer that has already fired is consumed by the queue and
//! is never cancelled afterwards.

use std::rc::Rc;
use std::time::Duration;

use calloop::{
    timer::{TimeoutAction, Timer},
    LoopHandle, RegistrationToken,
};

use crate::error::{Error, Result};

/// Identity of an armed timer, unique for the lifetime of one recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// A scheduling primitive for one-shot deferred callbacks
pub trait TimerQueue {
    /// Owned handle for an armed timer
    type Handle;

    /// Arm a one-shot timer that reports `id` back `delay` after `origin_ms`.
    ///
    /// `origin_ms` is the contact timestamp the delay counts from. Queues
    /// driven by a real clock start counting when they are armed instead.
    fn arm(&mut self, id: TimerId, origin_ms: i64, delay: Duration) -> Result<Self::Handle>;

    /// Cancel a timer that has not fired yet
    fn cancel(&mut self, handle: Self::Handle);
}

/// Deterministic timer queue driven by an explicit millisecond clock
///
/// Used by tests and trace replay. Nothing fires until `advance_to` is called.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now_ms: i64,
    pending: Vec<(i64, TimerId)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Earliest armed deadline
    pub fn next_deadline(&self) -> Option<i64> {
        self.pending.iter().map(|&(deadline, _)| deadline).min()
    }

    /// Move the clock forward and return the timers that are now due, earliest first.
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now_ms: i64) -> Vec<TimerId> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let mut due = Vec::new();
        self.pending.retain(|&(deadline, id)| {
            if deadline <= now {
                due.push((deadline, id));
                false
            } else {
                true
            }
        });

        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl TimerQueue for ManualTimers {
    type Handle = TimerId;

    fn arm(&mut self, id: TimerId, origin_ms: i64, delay: Duration) -> Result<TimerId> {
        let delay_ms = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        self.pending.push((origin_ms.saturating_add(delay_ms), id));
        Ok(id)
    }

    fn cancel(&mut self, handle: TimerId) {
        self.pending.retain(|&(_, id)| id != handle);
    }
}

/// Timer queue backed by calloop timer sources
///
/// Each armed timer is a separate `Timer` source; the registration token is
/// the handle, and cancelling removes the source from the loop. On expiry the
/// host callback receives the loop data and the timer id, and is expected to
/// route it to `GestureRecognizer::long_press_elapsed`.
pub struct CalloopTimers<D: 'static> {
    handle: LoopHandle<'static, D>,
    on_expire: Rc<dyn Fn(&mut D, TimerId)>,
}

impl<D: 'static> CalloopTimers<D> {
    pub fn new(handle: LoopHandle<'static, D>, on_expire: impl Fn(&mut D, TimerId) + 'static) -> Self {
        Self {
            handle,
            on_expire: Rc::new(on_expire),
        }
    }
}

impl<D: 'static> TimerQueue for CalloopTimers<D> {
    type Handle = RegistrationToken;

    fn arm(&mut self, id: TimerId, _origin_ms: i64, delay: Duration) -> Result<RegistrationToken> {
        let on_expire = self.on_expire.clone();
        self.handle
            .insert_source(Timer::from_duration(delay), move |_, _, data| {
                on_expire(data, id);
                TimeoutAction::Drop
            })
            .map_err(|e| Error::EventLoop(e.error))
    }

    fn cancel(&mut self, handle: RegistrationToken) {
        self.handle.remove(handle);
    }
}
