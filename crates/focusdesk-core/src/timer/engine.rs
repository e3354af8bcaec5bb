//! Pomodoro engine implementation.
//!
//! The engine alternates WORK and BREAK countdowns. It does not use internal
//! threads - the host delivers one `tick()` per elapsed second while the
//! timer runs, and each tick moves the countdown by exactly one second.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(countdown hits 0)--> Break --(countdown hits 0)--> Work
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(25, 5);
//! engine.start();
//! // Once per second:
//! engine.tick(&mut store); // Returns Some(Event::PhaseChanged) on a switch
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::events::Event;
use crate::storage::TimerConfig;

/// Accepted work lengths in minutes; other inputs are clamped.
pub const WORK_MINUTES_RANGE: RangeInclusive<i64> = 1..=180;
/// Accepted break lengths in minutes; other inputs are clamped.
pub const BREAK_MINUTES_RANGE: RangeInclusive<i64> = 1..=60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn flipped(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

/// Audible/visual cue for a phase switch, one per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    WorkStart,
    BreakStart,
}

/// Receiver of elapsed focus seconds.
///
/// Reporting is best-effort: the engine never fails on a sink problem.
pub trait FocusSink {
    fn log_focus_seconds(&mut self, seconds: u64);
}

/// Core Pomodoro state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroEngine {
    phase: Phase,
    remaining_secs: u64,
    work_secs: u64,
    break_secs: u64,
    running: bool,
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new(25, 5)
    }
}

impl PomodoroEngine {
    /// Create an idle engine at the start of a work phase.
    ///
    /// Durations are clamped like [`configure_work`](Self::configure_work)
    /// and [`configure_break`](Self::configure_break).
    pub fn new(work_minutes: i64, break_minutes: i64) -> Self {
        let work_secs = minutes_to_secs(work_minutes, WORK_MINUTES_RANGE);
        Self {
            phase: Phase::Work,
            remaining_secs: work_secs,
            work_secs,
            break_secs: minutes_to_secs(break_minutes, BREAK_MINUTES_RANGE),
            running: false,
        }
    }

    pub fn from_config(config: &TimerConfig) -> Self {
        Self::new(
            i64::from(config.work_minutes),
            i64::from(config.break_minutes),
        )
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn work_secs(&self) -> u64 {
        self.work_secs
    }

    pub fn break_secs(&self) -> u64 {
        self.break_secs
    }

    /// Configured length of the current phase.
    pub fn total_secs(&self) -> u64 {
        self.duration_of(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            running: self.running,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress: self.progress_fraction(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the work length. A change while stopped also resets the
    /// countdown to the new work length, whatever the current phase.
    pub fn configure_work(&mut self, minutes: i64) {
        let secs = minutes_to_secs(minutes, WORK_MINUTES_RANGE);
        if secs == self.work_secs {
            return;
        }
        self.work_secs = secs;
        if !self.running {
            self.remaining_secs = secs;
        }
        tracing::debug!(work_secs = secs, running = self.running, "work length changed");
    }

    /// Set the break length. Takes effect at the next break.
    pub fn configure_break(&mut self, minutes: i64) {
        self.break_secs = minutes_to_secs(minutes, BREAK_MINUTES_RANGE);
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.phase = Phase::Work;
        self.remaining_secs = self.work_secs;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance by one elapsed second. Returns `Some(Event::PhaseChanged)`
    /// when the phase switches.
    ///
    /// A tick in WORK reports one focus second to `sink` before the
    /// countdown moves. A tick that finds the countdown already at zero
    /// only switches phase.
    pub fn tick<S: FocusSink + ?Sized>(&mut self, sink: &mut S) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs == 0 {
            return Some(self.switch_phase());
        }
        if self.phase == Phase::Work {
            sink.log_focus_seconds(1);
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            return Some(self.switch_phase());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn duration_of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }

    fn switch_phase(&mut self) -> Event {
        let from = self.phase;
        let to = from.flipped();
        self.phase = to;
        self.remaining_secs = self.duration_of(to);
        let cue = match to {
            Phase::Work => Cue::WorkStart,
            Phase::Break => Cue::BreakStart,
        };
        tracing::debug!(?from, ?to, remaining_secs = self.remaining_secs, "phase changed");
        Event::PhaseChanged {
            from,
            to,
            cue,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }
}

fn minutes_to_secs(minutes: i64, range: RangeInclusive<i64>) -> u64 {
    let clamped = minutes.clamp(*range.start(), *range.end());
    // Clamped to a positive range above.
    clamped as u64 * 60
}
