//! Focus-time ledger and the chart aggregates derived from it.
//!
//! The ledger keeps a lifetime total and a per-day log keyed by calendar
//! date. Every aggregate here is recomputed from the log on each call.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Lifetime focus total plus seconds per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusLedger {
    pub total_seconds: u64,
    /// Date-key ("YYYY-MM-DD") to accumulated focus seconds.
    pub daily_log: BTreeMap<NaiveDate, u64>,
}

/// One bar of a focus chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub minutes: u64,
}

/// One day of the daily progress series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub minutes: u64,
    /// Hours rounded to two decimals.
    pub hours: f64,
}

/// How monthly totals are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthGrouping {
    /// One bucket per calendar month of each year, oldest first.
    #[default]
    MonthYear,
    /// One bucket per month name, merging years, January to December.
    MonthName,
}

impl FocusLedger {
    /// Add `seconds` to the lifetime total and to `date`'s entry.
    pub fn record(&mut self, date: NaiveDate, seconds: u64) {
        self.total_seconds = self.total_seconds.saturating_add(seconds);
        let entry = self.daily_log.entry(date).or_insert(0);
        *entry = entry.saturating_add(seconds);
    }

    pub fn seconds_on(&self, date: NaiveDate) -> u64 {
        self.daily_log.get(&date).copied().unwrap_or(0)
    }

    pub fn minutes_on(&self, date: NaiveDate) -> u64 {
        self.seconds_on(date) / 60
    }

    /// The seven days ending at `today`, oldest first, labelled "Mon".."Sun".
    pub fn weekly(&self, today: NaiveDate) -> Vec<ChartPoint> {
        (0..7)
            .rev()
            .map(|back| {
                let date = today - chrono::Duration::days(back);
                ChartPoint {
                    name: date.format("%a").to_string(),
                    minutes: self.minutes_on(date),
                }
            })
            .collect()
    }

    /// Monthly totals in calendar order, skipping months with nothing logged.
    pub fn monthly(&self, grouping: MonthGrouping) -> Vec<ChartPoint> {
        match grouping {
            MonthGrouping::MonthYear => {
                let mut by_month: BTreeMap<(i32, u32), u64> = BTreeMap::new();
                for (date, secs) in &self.daily_log {
                    let bucket = by_month.entry((date.year(), date.month0())).or_insert(0);
                    *bucket = bucket.saturating_add(*secs);
                }
                by_month
                    .into_iter()
                    .filter(|(_, secs)| *secs > 0)
                    .map(|((year, month0), secs)| ChartPoint {
                        name: format!("{} {year}", MONTH_LABELS[month0 as usize]),
                        minutes: secs / 60,
                    })
                    .collect()
            }
            MonthGrouping::MonthName => {
                let mut by_month = [0u64; 12];
                for (date, secs) in &self.daily_log {
                    let bucket = &mut by_month[date.month0() as usize];
                    *bucket = bucket.saturating_add(*secs);
                }
                by_month
                    .iter()
                    .zip(MONTH_LABELS)
                    .filter(|(secs, _)| **secs > 0)
                    .map(|(secs, label)| ChartPoint {
                        name: label.to_string(),
                        minutes: secs / 60,
                    })
                    .collect()
            }
        }
    }

    /// The last `days` calendar days ending at `today`, oldest first.
    pub fn daily_series(&self, today: NaiveDate, days: u32) -> Vec<DailyPoint> {
        (0..i64::from(days))
            .rev()
            .map(|back| {
                let date = today - chrono::Duration::days(back);
                let secs = self.seconds_on(date);
                DailyPoint {
                    date,
                    minutes: secs / 60,
                    hours: (secs as f64 / 3600.0 * 100.0).round() / 100.0,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn record_accumulates_total_and_day() {
        let mut ledger = FocusLedger::default();
        ledger.record(d(2026, 10, 19), 30);
        ledger.record(d(2026, 10, 19), 45);
        ledger.record(d(2026, 10, 20), 5);
        assert_eq!(ledger.total_seconds, 80);
        assert_eq!(ledger.seconds_on(d(2026, 10, 19)), 75);
        assert_eq!(ledger.minutes_on(d(2026, 10, 19)), 1);
    }

    #[test]
    fn weekly_ends_today_and_fills_gaps() {
        let mut ledger = FocusLedger::default();
        ledger.record(d(2026, 10, 19), 125);
        ledger.record(d(2026, 10, 13), 600);
        ledger.record(d(2026, 10, 12), 6000);

        let week = ledger.weekly(d(2026, 10, 19));
        let names: Vec<_> = week.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"]);
        assert_eq!(week[0].minutes, 10);
        assert_eq!(week[6].minutes, 2);
        assert!(week[1..6].iter().all(|p| p.minutes == 0));
    }

    #[test]
    fn weekly_on_empty_log_has_seven_zero_entries() {
        let week = FocusLedger::default().weekly(d(2026, 1, 1));
        assert_eq!(week.len(), 7);
        assert!(week.iter().all(|p| p.minutes == 0));
    }

    #[test]
    fn monthly_month_year_keeps_years_apart() {
        let mut ledger = FocusLedger::default();
        ledger.record(d(2025, 10, 3), 120);
        ledger.record(d(2026, 1, 9), 61);
        ledger.record(d(2026, 10, 1), 600);
        ledger.record(d(2026, 10, 31), 59);

        let months = ledger.monthly(MonthGrouping::MonthYear);
        assert_eq!(
            months,
            vec![
                ChartPoint { name: "Oct 2025".into(), minutes: 2 },
                ChartPoint { name: "Jan 2026".into(), minutes: 1 },
                ChartPoint { name: "Oct 2026".into(), minutes: 10 },
            ]
        );
    }

    #[test]
    fn monthly_month_name_merges_years_in_calendar_order() {
        let mut ledger = FocusLedger::default();
        ledger.record(d(2025, 10, 3), 120);
        ledger.record(d(2026, 10, 1), 600);
        ledger.record(d(2026, 3, 1), 60);

        let months = ledger.monthly(MonthGrouping::MonthName);
        assert_eq!(
            months,
            vec![
                ChartPoint { name: "Mar".into(), minutes: 1 },
                ChartPoint { name: "Oct".into(), minutes: 12 },
            ]
        );
    }

    #[test]
    fn monthly_skips_zero_months() {
        let mut ledger = FocusLedger::default();
        ledger.daily_log.insert(d(2026, 4, 1), 0);
        ledger.record(d(2026, 5, 1), 30);
        for grouping in [MonthGrouping::MonthYear, MonthGrouping::MonthName] {
            let months = ledger.monthly(grouping);
            assert_eq!(months.len(), 1);
            assert!(months[0].name.starts_with("May"));
            assert_eq!(months[0].minutes, 0);
        }
    }

    #[test]
    fn daily_series_rounds_hours() {
        let mut ledger = FocusLedger::default();
        ledger.record(d(2026, 10, 19), 5400);
        ledger.record(d(2026, 10, 18), 1000);
        let series = ledger.daily_series(d(2026, 10, 19), 3);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, d(2026, 10, 17));
        assert_eq!(series[1].hours, 0.28);
        assert_eq!(series[2].minutes, 90);
        assert_eq!(series[2].hours, 1.5);
    }

    #[test]
    fn ledger_json_uses_date_keys() {
        let mut ledger = FocusLedger::default();
        ledger.record(d(2026, 10, 19), 42);
        let json = serde_json::to_string(&ledger.daily_log).unwrap();
        assert_eq!(json, r#"{"2026-10-19":42}"#);
    }

    #[test]
    fn monthly_saturates_instead_of_overflowing() {
        let mut ledger = FocusLedger::default();
        ledger.daily_log.insert(d(2026, 10, 1), u64::MAX);
        ledger.daily_log.insert(d(2026, 10, 2), 5);
        let expected = vec![ChartPoint {
            name: "Oct 2026".into(),
            minutes: u64::MAX / 60,
        }];
        assert_eq!(ledger.monthly(MonthGrouping::MonthYear), expected);
        assert_eq!(ledger.monthly(MonthGrouping::MonthName)[0].minutes, u64::MAX / 60);
    }
}
