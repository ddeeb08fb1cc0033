//! Loading indicator shown while the caller is fetching options.
//!
//! The indicator is advisory only: it never blocks input or filtering. It
//! animates with self-rescheduling ticks routed by `(id, tag)` so that a
//! restarted indicator does not speed up from stray ticks.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Advances the loading animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTickMsg {
    /// Indicator this tick belongs to.
    pub id: i64,
    tag: i64,
}

/// Animated loading indicator.
#[derive(Debug, Clone)]
pub struct Loading {
    id: i64,
    tag: i64,
    frame: usize,
    active: bool,
    /// Time between frames.
    pub interval: Duration,
    /// Style applied to the frame.
    pub style: Style,
}

impl Default for Loading {
    fn default() -> Self {
        Self::new()
    }
}

impl Loading {
    /// An inactive indicator.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            frame: 0,
            active: false,
            interval: Duration::from_millis(80),
            style: Style::new().foreground(Color::from("69")),
        }
    }

    /// Identifier used to route ticks.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the indicator is shown.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Starts or stops the indicator. Starting returns the first tick.
    pub fn set_active(&mut self, active: bool) -> Option<Cmd> {
        if self.active == active {
            return None;
        }
        self.active = active;
        // invalidate any tick still in flight
        self.tag += 1;
        if active {
            self.frame = 0;
            Some(self.tick())
        } else {
            None
        }
    }

    /// The next tick while active. Used to start an indicator that was
    /// activated before the runtime was running.
    pub fn resume(&self) -> Option<Cmd> {
        self.active.then(|| self.tick())
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(LoadingTickMsg { id, tag }) as Msg)
    }

    /// Handles a tick. Returns the next tick while active.
    pub fn update(&mut self, msg: &LoadingTickMsg) -> Option<Cmd> {
        if msg.id != self.id || msg.tag != self.tag || !self.active {
            return None;
        }
        self.frame = (self.frame + 1) % FRAMES.len();
        self.tag += 1;
        Some(self.tick())
    }

    /// Current frame, or an empty string while inactive.
    pub fn view(&self) -> String {
        if !self.active {
            return String::new();
        }
        self.style.render(FRAMES[self.frame])
    }
}
