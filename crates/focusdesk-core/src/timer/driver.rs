//! Wall-clock tick delivery.
//!
//! The engine moves one second per `tick()` and never catches up on its
//! own. `TickDriver` sits between a host loop and the engine: it remembers
//! the wall-clock instant of the last delivered tick and reports how many
//! whole seconds have passed since, so a loop that was suspended still
//! delivers one tick (and one logged focus second) per elapsed second.

use super::engine::{FocusSink, PomodoroEngine};
use crate::events::Event;

const TICK_MS: u64 = 1000;

#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    /// Epoch milliseconds the next tick is measured from; `None` while paused.
    anchor_ms: Option<u64>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring from `now_ms`. Call on start/resume.
    pub fn arm(&mut self, now_ms: u64) {
        self.anchor_ms = Some(now_ms);
    }

    /// Stop measuring. Call on pause/reset.
    pub fn disarm(&mut self) {
        self.anchor_ms = None;
    }

    /// Whole seconds elapsed since the last delivered tick.
    ///
    /// The remainder below one second is kept for the next call. A clock
    /// that moved backwards re-anchors at `now_ms` and yields nothing.
    pub fn due(&mut self, now_ms: u64) -> u64 {
        let Some(anchor) = self.anchor_ms else {
            return 0;
        };
        if now_ms < anchor {
            self.anchor_ms = Some(now_ms);
            return 0;
        }
        let ticks = (now_ms - anchor) / TICK_MS;
        self.anchor_ms = Some(anchor + ticks * TICK_MS);
        ticks
    }

    /// Deliver every due tick to `engine`, collecting phase events.
    ///
    /// Stops early if the engine is no longer running.
    pub fn drive<S: FocusSink + ?Sized>(
        &mut self,
        engine: &mut PomodoroEngine,
        sink: &mut S,
        now_ms: u64,
    ) -> Vec<Event> {
        self.drive_until(engine, sink, now_ms, usize::MAX)
    }

    /// Like [`drive`](Self::drive), but stops right after the
    /// `max_phase_changes`-th phase change; ticks due beyond it are dropped.
    pub fn drive_until<S: FocusSink + ?Sized>(
        &mut self,
        engine: &mut PomodoroEngine,
        sink: &mut S,
        now_ms: u64,
        max_phase_changes: usize,
    ) -> Vec<Event> {
        let due = self.due(now_ms);
        if due > 1 {
            tracing::debug!(due, "catching up on missed ticks");
        }
        let mut events = Vec::new();
        for _ in 0..due {
            if !engine.is_running() || events.len() >= max_phase_changes {
                break;
            }
            if let Some(event) = engine.tick(sink) {
                events.push(event);
            }
        }
        events
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
