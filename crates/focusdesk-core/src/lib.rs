//! # Focusdesk Core Library
//!
//! This library provides the core logic for Focusdesk: a task list with a
//! weekly timetable, quick links, a Pomodoro focus timer, and a ledger of
//! focus time for charts. Front-ends (the `focusdesk` CLI) are thin layers
//! over the same core.
//!
//! ## Architecture
//!
//! - **Task store**: owns tasks, links and the focus ledger, persists every
//!   mutation through an injected key-value store, and rehydrates at startup
//! - **Pomodoro engine**: a tick-driven WORK/BREAK state machine that reports
//!   each focus second to the store
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`TaskStore`]: mutations and derived aggregates
//! - [`PomodoroEngine`]: timer state machine
//! - [`TickDriver`]: converts wall-clock time into due ticks
//! - [`Database`]: durable key-value storage
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod storage;
pub mod store;
pub mod task;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use ledger::{ChartPoint, DailyPoint, FocusLedger, MonthGrouping};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use store::{CompletionSummary, TaskStore, Timetable};
pub use task::{Category, Day, Link, LinkId, NewTask, Task, TaskId};
pub use timer::{Cue, FocusSink, Phase, PomodoroEngine, TickDriver};
