//! Task and quick-link types.
//!
//! Tasks and links carry a stable id assigned by the store at creation.
//! The store keeps them in insertion order; order is only a presentation
//! concern and never used to address an entry.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Stable identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

/// Stable identifier of a quick link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Study,
    Work,
    Personal,
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Category::Study),
            "work" => Ok(Category::Work),
            "personal" => Ok(Category::Personal),
            _ => Err(ValidationError::InvalidCategory(s.to_string())),
        }
    }
}

/// Day of the week a task is planned on, serialized by its full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Timetable column order, Sunday first.
    pub const TIMETABLE_ORDER: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// The weekday a calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::TIMETABLE_ORDER
            .into_iter()
            .find(|d| {
                let name = d.name().to_ascii_lowercase();
                name == lower || name[..3] == lower
            })
            .ok_or_else(|| ValidationError::InvalidWeekday(s.to_string()))
    }
}

/// A planned task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub day: Day,
    pub date: NaiveDate,
    /// Zero-padded "HH:MM".
    pub time: String,
    pub category: Category,
    #[serde(default)]
    pub completed: bool,
}

/// Fields for a task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub day: Day,
    pub date: NaiveDate,
    pub time: String,
    pub category: Category,
}

impl NewTask {
    /// Build a task from raw form input, checking every field.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first invalid field.
    pub fn parse(
        title: &str,
        day: &str,
        date: &str,
        time: &str,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty("title"));
        }
        if time.trim().is_empty() {
            return Err(ValidationError::Empty("time"));
        }
        if date.trim().is_empty() {
            return Err(ValidationError::Empty("date"));
        }
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
        Ok(Self {
            title: title.to_string(),
            day: day.parse()?,
            date,
            time: parse_time(time)?,
            category: category.parse()?,
        })
    }

    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            day: self.day,
            date: self.date,
            time: normalize_time(&self.time),
            category: self.category,
            completed: false,
        }
    }
}

/// A saved quick link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub url: String,
}

/// Left-pad a time string with zeros to five characters ("9:30" -> "09:30").
pub fn normalize_time(time: &str) -> String {
    format!("{:0>5}", time.trim())
}

/// Normalize and check a 24-hour "H:MM"/"HH:MM" time.
pub fn parse_time(time: &str) -> Result<String, ValidationError> {
    let normalized = normalize_time(time);
    let invalid = || ValidationError::InvalidTime(time.to_string());
    let (h, m) = normalized.split_once(':').ok_or_else(invalid)?;
    if h.len() != 2 || m.len() != 2 {
        return Err(invalid());
    }
    let h: u8 = h.parse().map_err(|_| invalid())?;
    let m: u8 = m.parse().map_err(|_| invalid())?;
    if h > 23 || m > 59 {
        return Err(invalid());
    }
    Ok(normalized)
}
