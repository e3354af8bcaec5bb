//! The task store: tasks, quick links and the focus ledger.
//!
//! `TaskStore` is the only owner of these values. Every mutation writes the
//! touched entity back to the injected [`KvStore`] in full before returning,
//! and construction rehydrates each entity independently, falling back to
//! its empty default when the key is missing or unreadable.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::ledger::{ChartPoint, DailyPoint, FocusLedger, MonthGrouping};
use crate::storage::KvStore;
use crate::task::{Day, Link, LinkId, NewTask, Task, TaskId};
use crate::timer::FocusSink;

pub const TASKS_KEY: &str = "tasks";
pub const LINKS_KEY: &str = "links";
pub const TOTAL_SECONDS_KEY: &str = "focus_total_seconds";
pub const DAILY_LOG_KEY: &str = "daily_focus_log";
pub const ID_COUNTERS_KEY: &str = "id_counters";

/// Hourly rows the timetable always shows.
pub const DEFAULT_TIME_SLOTS: [&str; 13] = [
    "07:00", "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00",
    "17:00", "18:00", "19:00",
];

/// Completed vs. open task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub completed: usize,
    pub remaining: usize,
}

/// Next ids to hand out. Persisted so a deleted id is never reissued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct IdCounters {
    next_task_id: u64,
    next_link_id: u64,
}

/// Weekly grid of tasks by weekday and time slot.
#[derive(Debug, Clone, Serialize)]
pub struct Timetable<'a> {
    /// Sorted "HH:MM" rows.
    pub slots: Vec<String>,
    /// Sunday first; each column has one cell per slot.
    pub days: Vec<TimetableColumn<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimetableColumn<'a> {
    pub day: Day,
    pub cells: Vec<Vec<&'a Task>>,
}

impl<'a> Timetable<'a> {
    /// Tasks planned for `day` at `slot`; empty if the slot is not a row.
    pub fn cell(&self, day: Day, slot: &str) -> &[&'a Task] {
        let Some(row) = self.slots.iter().position(|s| s == slot) else {
            return &[];
        };
        self.days
            .iter()
            .find(|c| c.day == day)
            .map(|c| c.cells[row].as_slice())
            .unwrap_or(&[])
    }
}

/// Single source of truth for tasks, links and focus time.
pub struct TaskStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    tasks: Vec<Task>,
    links: Vec<Link>,
    ledger: FocusLedger,
    ids: IdCounters,
    month_grouping: MonthGrouping,
}

impl<S: KvStore> TaskStore<S> {
    /// Rehydrate from `storage`, dating focus time by the local clock.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KvStore, C: Clock> TaskStore<S, C> {
    /// Rehydrate from `storage` with an explicit source of "today".
    pub fn with_clock(storage: S, clock: C) -> Self {
        let tasks: Vec<Task> = load(&storage, TASKS_KEY);
        let links: Vec<Link> = load(&storage, LINKS_KEY);
        let ledger = FocusLedger {
            total_seconds: load(&storage, TOTAL_SECONDS_KEY),
            daily_log: load(&storage, DAILY_LOG_KEY),
        };
        let stored: IdCounters = load(&storage, ID_COUNTERS_KEY);
        let ids = IdCounters {
            next_task_id: tasks
                .iter()
                .map(|t| t.id.0.saturating_add(1))
                .fold(stored.next_task_id.max(1), u64::max),
            next_link_id: links
                .iter()
                .map(|l| l.id.0.saturating_add(1))
                .fold(stored.next_link_id.max(1), u64::max),
        };
        tracing::debug!(
            tasks = tasks.len(),
            links = links.len(),
            total_seconds = ledger.total_seconds,
            "task store rehydrated"
        );
        Self {
            storage,
            clock,
            tasks,
            links,
            ledger,
            ids,
            month_grouping: MonthGrouping::default(),
        }
    }

    /// Choose how [`monthly_aggregate`](Self::monthly_aggregate) keys months.
    pub fn with_month_grouping(mut self, grouping: MonthGrouping) -> Self {
        self.month_grouping = grouping;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task and return its new id.
    pub fn add_task(&mut self, task: NewTask) -> Result<TaskId> {
        let id = TaskId(self.ids.next_task_id);
        self.ids.next_task_id += 1;
        self.tasks.push(task.into_task(id));
        tracing::debug!(%id, "task added");
        persist(&mut self.storage, ID_COUNTERS_KEY, &self.ids)?;
        persist(&mut self.storage, TASKS_KEY, &self.tasks)?;
        Ok(id)
    }

    /// Flip a task's completion flag. Unknown ids are a no-op (`Ok(false)`).
    pub fn toggle_task(&mut self, id: TaskId) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(%id, "toggle of unknown task ignored");
            return Ok(false);
        };
        task.completed = !task.completed;
        tracing::debug!(%id, completed = task.completed, "task toggled");
        persist(&mut self.storage, TASKS_KEY, &self.tasks)?;
        Ok(true)
    }

    /// Remove a task, keeping the others in order. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: TaskId) -> Result<bool> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!(%id, "delete of unknown task ignored");
            return Ok(false);
        };
        self.tasks.remove(pos);
        tracing::debug!(%id, "task deleted");
        persist(&mut self.storage, TASKS_KEY, &self.tasks)?;
        Ok(true)
    }

    /// Tasks whose calendar date is `date`, in collection order.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    pub fn completion_summary(&self) -> CompletionSummary {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        CompletionSummary {
            completed,
            remaining: self.tasks.len() - completed,
        }
    }

    /// Weekly grid: default hourly slots plus every task time, sorted.
    pub fn timetable(&self) -> Timetable<'_> {
        let slots: Vec<String> = DEFAULT_TIME_SLOTS
            .iter()
            .map(|s| s.to_string())
            .chain(self.tasks.iter().map(|t| t.time.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let days = Day::TIMETABLE_ORDER
            .into_iter()
            .map(|day| TimetableColumn {
                day,
                cells: slots
                    .iter()
                    .map(|slot| {
                        self.tasks
                            .iter()
                            .filter(|t| t.day == day && &t.time == slot)
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        Timetable { slots, days }
    }

    // ── Links ────────────────────────────────────────────────────────

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn add_link(&mut self, url: impl Into<String>) -> Result<LinkId> {
        let id = LinkId(self.ids.next_link_id);
        self.ids.next_link_id += 1;
        self.links.push(Link {
            id,
            url: url.into(),
        });
        tracing::debug!(%id, "link added");
        persist(&mut self.storage, ID_COUNTERS_KEY, &self.ids)?;
        persist(&mut self.storage, LINKS_KEY, &self.links)?;
        Ok(id)
    }

    /// Remove a link. Unknown ids are a no-op (`Ok(false)`).
    pub fn delete_link(&mut self, id: LinkId) -> Result<bool> {
        let Some(pos) = self.links.iter().position(|l| l.id == id) else {
            tracing::debug!(%id, "delete of unknown link ignored");
            return Ok(false);
        };
        self.links.remove(pos);
        tracing::debug!(%id, "link deleted");
        persist(&mut self.storage, LINKS_KEY, &self.links)?;
        Ok(true)
    }

    // ── Focus ledger ─────────────────────────────────────────────────

    pub fn ledger(&self) -> &FocusLedger {
        &self.ledger
    }

    pub fn total_seconds(&self) -> u64 {
        self.ledger.total_seconds
    }

    pub fn daily_log(&self) -> &std::collections::BTreeMap<NaiveDate, u64> {
        &self.ledger.daily_log
    }

    /// Add `seconds` of focus time to the lifetime total and to today.
    ///
    /// "Today" is read from the clock on every call. Zero is ignored.
    pub fn log_focus_seconds(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Ok(());
        }
        let today = self.clock.today();
        self.ledger.record(today, seconds);
        persist(&mut self.storage, TOTAL_SECONDS_KEY, &self.ledger.total_seconds)?;
        persist(&mut self.storage, DAILY_LOG_KEY, &self.ledger.daily_log)?;
        Ok(())
    }

    pub fn focus_minutes_on(&self, date: NaiveDate) -> u64 {
        self.ledger.minutes_on(date)
    }

    pub fn today_focus_minutes(&self) -> u64 {
        self.ledger.minutes_on(self.clock.today())
    }

    /// Minutes per day for the seven days ending today, oldest first.
    pub fn weekly_aggregate(&self) -> Vec<ChartPoint> {
        self.ledger.weekly(self.clock.today())
    }

    /// Minutes per month using the store's configured grouping.
    pub fn monthly_aggregate(&self) -> Vec<ChartPoint> {
        self.ledger.monthly(self.month_grouping)
    }

    pub fn monthly_aggregate_by(&self, grouping: MonthGrouping) -> Vec<ChartPoint> {
        self.ledger.monthly(grouping)
    }

    /// The last `days` days ending today, oldest first.
    pub fn daily_series(&self, days: u32) -> Vec<DailyPoint> {
        self.ledger.daily_series(self.clock.today(), days)
    }
}

impl<S: KvStore, C: Clock> FocusSink for TaskStore<S, C> {
    fn log_focus_seconds(&mut self, seconds: u64) {
        if let Err(e) = TaskStore::log_focus_seconds(self, seconds) {
            tracing::warn!(error = %e, seconds, "failed to persist focus time");
        }
    }
}

fn load<S: KvStore, T: DeserializeOwned + Default>(storage: &S, key: &str) -> T {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value; using default");
            return T::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "malformed stored value; using default");
        T::default()
    })
}

fn persist<S: KvStore, T: Serialize + ?Sized>(
    storage: &mut S,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}
