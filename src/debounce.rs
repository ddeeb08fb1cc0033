//! Trailing-edge debouncing of raw input.
//!
//! Every raw change schedules a single evaluation after a fixed delay. A newer
//! change cancels the pending evaluation and starts the delay again, so only
//! the last value of a burst ever settles. There is no leading edge and no
//! maximum wait.
//!
//! Timers are not owned by the debouncer. It asks a [`Scheduler`] to deliver a
//! [`DebounceMsg`] after the delay. [`TickScheduler`] wraps `bubbletea_rs::tick`
//! and is what the widget uses at runtime; [`ManualScheduler`] is a virtual
//! clock for tests and headless hosts.
//!
//! Ticks that cannot be cancelled at the source are recognised as stale by
//! their `(id, tag)` pair, the same way spinner and timer ticks are.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_autocomplete::debounce::{Debounced, Debouncer, ManualScheduler};
//! use std::time::Duration;
//!
//! let clock = ManualScheduler::new();
//! let mut debouncer = Debouncer::with_scheduler(Duration::from_millis(300), Box::new(clock.clone()));
//!
//! debouncer.push("a");
//! debouncer.push("ab");
//! assert!(clock.advance(Duration::from_millis(299)).is_empty());
//!
//! let due = clock.advance(Duration::from_millis(1));
//! assert_eq!(due.len(), 1);
//! assert_eq!(debouncer.settle(&due[0]), Some("ab".to_string()));
//! # let _ = Debounced::Settled(String::new());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::trace;

/// Default debounce delay.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

// Internal ID management for debouncer instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered when a debounce delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceMsg {
    /// Identifier of the debouncer that scheduled this message.
    pub id: i64,
    tag: i64,
}

impl DebounceMsg {
    /// Generation of the scheduling this message belongs to.
    pub fn tag(&self) -> i64 {
        self.tag
    }
}

/// Capability to deliver a message after a delay.
pub trait Scheduler: Send {
    /// Schedules `msg` to be delivered after `delay`.
    ///
    /// Runtime-backed schedulers return the command the host must execute;
    /// schedulers that deliver messages themselves return `None`.
    fn schedule_after(&mut self, delay: Duration, msg: DebounceMsg) -> Option<Cmd>;

    /// Cancels a previously scheduled message if the scheduler can.
    fn cancel(&mut self, _msg: &DebounceMsg) {}
}

/// Scheduler backed by `bubbletea_rs::tick`.
///
/// Commands cannot be recalled once handed to the runtime, so cancellation is
/// a no-op here and superseded ticks are dropped by [`Debouncer::settle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScheduler;

impl Scheduler for TickScheduler {
    fn schedule_after(&mut self, delay: Duration, msg: DebounceMsg) -> Option<Cmd> {
        Some(bubbletea_tick(delay, move |_| Box::new(msg.clone()) as Msg))
    }
}

#[derive(Debug, Default)]
struct Clock {
    now: Duration,
    queue: Vec<(Duration, DebounceMsg)>,
}

/// A virtual clock. Clones share the same clock, so a test can keep one handle
/// while the debouncer owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl ManualScheduler {
    /// Creates a clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves time forward and returns every message that came due, oldest
    /// deadline first.
    pub fn advance(&self, by: Duration) -> Vec<DebounceMsg> {
        let mut clock = self.lock();
        clock.now += by;
        let now = clock.now;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            clock.queue.drain(..).partition(|(at, _)| *at <= now);
        clock.queue = rest;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, msg)| msg).collect()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of messages still waiting.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, msg: DebounceMsg) -> Option<Cmd> {
        let mut clock = self.lock();
        let at = clock.now + delay;
        clock.queue.push((at, msg));
        None
    }

    fn cancel(&mut self, msg: &DebounceMsg) {
        self.lock().queue.retain(|(_, queued)| queued != msg);
    }
}

/// Outcome of recording a raw change.
pub enum Debounced {
    /// The value is waiting for the delay. Holds the command to run, if any.
    Scheduled(Option<Cmd>),
    /// The delay is zero and the value settled immediately.
    Settled(String),
}

/// Trailing-edge debouncer for one widget instance.
pub struct Debouncer {
    delay: Duration,
    id: i64,
    tag: i64,
    pending: Option<String>,
    in_flight: Option<DebounceMsg>,
    scheduler: Box<dyn Scheduler>,
}

impl Debouncer {
    /// Creates a debouncer driven by bubbletea ticks.
    pub fn new(delay: Duration) -> Self {
        Self::with_scheduler(delay, Box::new(TickScheduler))
    }

    /// Creates a debouncer driven by the given scheduler.
    pub fn with_scheduler(delay: Duration, scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            delay,
            id: next_id(),
            tag: 0,
            pending: None,
            in_flight: None,
            scheduler,
        }
    }

    /// Unique identifier used to route [`DebounceMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay. Applies from the next raw change on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Replaces the scheduler, cancelling anything pending on the old one.
    pub fn set_scheduler(&mut self, scheduler: Box<dyn Scheduler>) {
        self.cancel();
        self.scheduler = scheduler;
    }

    /// Whether a value is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a raw change, superseding any pending one.
    pub fn push(&mut self, raw: &str) -> Debounced {
        self.cancel_in_flight();

        if self.delay.is_zero() {
            self.pending = None;
            return Debounced::Settled(raw.to_string());
        }

        self.tag += 1;
        let msg = DebounceMsg {
            id: self.id,
            tag: self.tag,
        };
        trace!(
            id = self.id,
            tag = self.tag,
            delay_ms = self.delay.as_millis() as u64,
            "debounce scheduled"
        );

        self.pending = Some(raw.to_string());
        self.in_flight = Some(msg.clone());
        Debounced::Scheduled(self.scheduler.schedule_after(self.delay, msg))
    }

    /// Handles a delivered message. Returns the settled value, or `None` if the
    /// message belongs to another debouncer or was superseded.
    pub fn settle(&mut self, msg: &DebounceMsg) -> Option<String> {
        if msg.id != self.id || msg.tag != self.tag {
            trace!(id = self.id, tag = msg.tag, current = self.tag, "stale debounce tick dropped");
            return None;
        }
        self.in_flight = None;
        self.pending.take()
    }

    /// Settles the pending value now, without waiting for the delay.
    pub fn flush(&mut self) -> Option<String> {
        self.cancel_in_flight();
        self.pending.take()
    }

    /// Drops the pending value without settling it.
    pub fn cancel(&mut self) {
        self.cancel_in_flight();
        self.pending = None;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(prev) = self.in_flight.take() {
            self.scheduler.cancel(&prev);
        }
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(delay_ms: u64) -> (ManualScheduler, Debouncer) {
        let clock = ManualScheduler::new();
        let d = Debouncer::with_scheduler(Duration::from_millis(delay_ms), Box::new(clock.clone()));
        (clock, d)
    }

    #[test]
    fn test_burst_settles_once_with_last_value() {
        let (clock, mut d) = manual(300);
        for raw in ["r", "re", "rea", "reac", "react"] {
            d.push(raw);
            clock.advance(Duration::from_millis(100));
        }
        assert_eq!(clock.pending(), 1);

        let due = clock.advance(Duration::from_millis(200));
        let settled: Vec<_> = due.iter().filter_map(|m| d.settle(m)).collect();
        assert_eq!(settled, vec!["react".to_string()]);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_each_push_restarts_delay() {
        let (clock, mut d) = manual(300);
        d.push("a");
        clock.advance(Duration::from_millis(250));
        d.push("ab");
        assert!(clock.advance(Duration::from_millis(250)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(50)).len(), 1);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        // a runtime scheduler cannot recall ticks, simulate that by never cancelling
        struct Leaky(Vec<DebounceMsg>);
        impl Scheduler for Leaky {
            fn schedule_after(&mut self, _delay: Duration, msg: DebounceMsg) -> Option<Cmd> {
                self.0.push(msg);
                None
            }
        }

        let mut d = Debouncer::with_scheduler(DEFAULT_DELAY, Box::new(Leaky(Vec::new())));
        d.push("x");
        let first = DebounceMsg { id: d.id(), tag: d.tag };
        d.push("xy");
        let second = DebounceMsg { id: d.id(), tag: d.tag };

        assert_eq!(d.settle(&first), None);
        assert_eq!(d.settle(&second), Some("xy".to_string()));
        // delivering twice settles nothing more
        assert_eq!(d.settle(&second), None);
    }

    #[test]
    fn test_foreign_id_is_ignored() {
        let (clock, mut a) = manual(10);
        let mut b = Debouncer::with_scheduler(Duration::from_millis(10), Box::new(clock.clone()));
        a.push("a");
        b.push("b");
        let due = clock.advance(Duration::from_millis(10));
        assert_eq!(due.len(), 2);
        let for_a: Vec<_> = due.iter().filter_map(|m| a.settle(m)).collect();
        assert_eq!(for_a, vec!["a".to_string()]);
    }

    #[test]
    fn test_zero_delay_settles_immediately() {
        let (clock, mut d) = manual(0);
        match d.push("now") {
            Debounced::Settled(v) => assert_eq!(v, "now"),
            Debounced::Scheduled(_) => panic!("zero delay must not schedule"),
        }
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_flush_and_cancel() {
        let (clock, mut d) = manual(300);
        d.push("abc");
        assert_eq!(d.flush(), Some("abc".to_string()));
        assert_eq!(clock.pending(), 0);
        assert!(clock.advance(Duration::from_secs(1)).is_empty());

        d.push("def");
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.flush(), None);
    }

    #[tokio::test]
    async fn test_tick_scheduler_delivers_message() {
        let mut d = Debouncer::new(Duration::from_millis(5));
        let cmd = match d.push("tick") {
            Debounced::Scheduled(Some(cmd)) => cmd,
            _ => panic!("tick scheduler must return a command"),
        };
        let msg = cmd.await.expect("tick produces a message");
        let msg = msg.downcast_ref::<DebounceMsg>().expect("debounce message").clone();
        assert_eq!(d.settle(&msg), Some("tick".to_string()));
    }
}
