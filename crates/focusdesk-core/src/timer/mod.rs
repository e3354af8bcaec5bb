mod driver;
mod engine;

pub use driver::{now_ms, TickDriver};
pub use engine::{
    Cue, FocusSink, Phase, PomodoroEngine, BREAK_MINUTES_RANGE, WORK_MINUTES_RANGE,
};
