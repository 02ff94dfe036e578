//! Reporting aggregator: pure functions that roll a set of closed time
//! entries up into per-range totals, a per-location breakdown and a per-day
//! breakdown. No side effects; deterministic for identical input.
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::models::location::Location;
use crate::domain::models::time_entry::TimeEntry;

/// Aggregated time report over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSummary {
    pub total_minutes: i64,
    /// Total hours rounded to one decimal
    pub total_hours: f64,
    /// Sorted by minutes descending, then location id
    pub by_location: Vec<LocationSummary>,
    /// Sorted ascending by date
    pub by_day: Vec<DaySummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationSummary {
    pub location_id: String,
    /// Display name, "Unknown" when the id doesn't resolve
    pub location_name: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    /// UTC calendar date of the entries' check-in
    pub date: NaiveDate,
    pub minutes: i64,
}

/// Summarize closed entries. Entries without a duration (still open) are
/// skipped; day buckets use the UTC calendar date of the check-in.
pub fn summarize(entries: &[TimeEntry], locations: &[Location]) -> TimeSummary {
    let mut total_minutes = 0i64;
    let mut location_minutes: BTreeMap<&str, i64> = BTreeMap::new();
    let mut day_minutes: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for entry in entries {
        let Some(minutes) = entry.duration_minutes else {
            continue;
        };
        total_minutes += minutes;
        *location_minutes.entry(entry.location_id.as_str()).or_insert(0) += minutes;
        *day_minutes.entry(entry.check_in_time.date_naive()).or_insert(0) += minutes;
    }

    let mut by_location: Vec<LocationSummary> = location_minutes
        .into_iter()
        .map(|(location_id, minutes)| LocationSummary {
            location_name: locations
                .iter()
                .find(|l| l.id == location_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            location_id: location_id.to_string(),
            minutes,
        })
        .collect();
    by_location.sort_by(|a, b| {
        b.minutes
            .cmp(&a.minutes)
            .then_with(|| a.location_id.cmp(&b.location_id))
    });

    let by_day = day_minutes
        .into_iter()
        .map(|(date, minutes)| DaySummary { date, minutes })
        .collect();

    TimeSummary {
        total_minutes,
        total_hours: round_one_decimal(total_minutes as f64 / 60.0),
        by_location,
        by_day,
    }
}

fn round_one_decimal(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::time_entry::{NewManualEntry, TimeEntry};
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, h, m, 0).unwrap()
    }

    fn closed(location: &str, check_in: DateTime<Utc>, minutes: i64) -> TimeEntry {
        TimeEntry::manual(
            format!("{}-{}", location, check_in.timestamp()),
            NewManualEntry {
                employee_id: "EMP001".into(),
                location_id: location.into(),
                check_in_time: check_in,
                check_out_time: Some(check_in + chrono::Duration::minutes(minutes)),
                notes: String::new(),
            },
            check_in,
        )
    }

    fn hq() -> Location {
        Location {
            id: "LOC001".into(),
            name: "Headquarters".into(),
            address: String::new(),
            latitude: None,
            longitude: None,
            is_active: true,
        }
    }

    #[test]
    fn totals_equal_sum_of_durations() {
        let entries = vec![
            closed("LOC001", ts(2, 8, 0), 90),
            closed("LOC001", ts(3, 8, 0), 120),
            closed("LOC002", ts(3, 14, 0), 30),
        ];
        let summary = summarize(&entries, &[hq()]);

        assert_eq!(summary.total_minutes, 240);
        assert_eq!(summary.total_hours, 4.0);

        let by_location_total: i64 = summary.by_location.iter().map(|l| l.minutes).sum();
        let by_day_total: i64 = summary.by_day.iter().map(|d| d.minutes).sum();
        assert_eq!(by_location_total, summary.total_minutes);
        assert_eq!(by_day_total, summary.total_minutes);
    }

    #[test]
    fn open_entries_are_excluded() {
        let mut open = closed("LOC001", ts(4, 8, 0), 60);
        open.check_out_time = None;
        open.duration_minutes = None;
        let entries = vec![open, closed("LOC001", ts(4, 10, 0), 45)];

        let summary = summarize(&entries, &[hq()]);
        assert_eq!(summary.total_minutes, 45);
        assert_eq!(summary.by_day.len(), 1);
    }

    #[test]
    fn unresolved_location_reports_unknown() {
        let entries = vec![closed("LOC999", ts(2, 9, 0), 60)];
        let summary = summarize(&entries, &[hq()]);
        assert_eq!(summary.by_location[0].location_name, "Unknown");
        assert_eq!(summary.by_location[0].location_id, "LOC999");
    }

    #[test]
    fn breakdowns_are_deterministically_ordered() {
        let entries = vec![
            closed("LOC002", ts(5, 8, 0), 200),
            closed("LOC001", ts(3, 8, 0), 50),
            closed("LOC003", ts(4, 8, 0), 200),
        ];
        let summary = summarize(&entries, &[]);

        let location_ids: Vec<&str> = summary
            .by_location
            .iter()
            .map(|l| l.location_id.as_str())
            .collect();
        // minutes desc, ties broken by id
        assert_eq!(location_ids, vec!["LOC002", "LOC003", "LOC001"]);

        let days: Vec<u32> = summary
            .by_day
            .iter()
            .map(|d| chrono::Datelike::day(&d.date))
            .collect();
        assert_eq!(days, vec![3, 4, 5]);
    }

    #[test]
    fn hours_round_to_one_decimal() {
        // 100 minutes = 1.666... hours -> 1.7
        let entries = vec![closed("LOC001", ts(2, 8, 0), 100)];
        let summary = summarize(&entries, &[hq()]);
        assert_eq!(summary.total_hours, 1.7);
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        let summary = summarize(&[], &[hq()]);
        assert_eq!(summary.total_minutes, 0);
        assert_eq!(summary.total_hours, 0.0);
        assert!(summary.by_location.is_empty());
        assert!(summary.by_day.is_empty());
    }
}
