use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Cue, Phase};

/// Every observable timer state change produces an Event.
/// Front-ends print or render them; the phase cue drives the sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The countdown ran out and the engine switched phase.
    PhaseChanged {
        from: Phase,
        to: Phase,
        cue: Cue,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
