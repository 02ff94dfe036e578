//! Domain model for a check-in/check-out time entry.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a time entry. `Open` mirrors `check_out_time == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Open,
    Closed,
}

/// One check-in/check-out cycle for an employee at a location.
///
/// Created open by a check-in, closed exactly once by a check-out, and
/// possibly amended afterwards by a manager correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub employee_id: String,
    pub location_id: String,
    pub check_in_time: DateTime<Utc>,
    /// `None` while the employee is still checked in
    pub check_out_time: Option<DateTime<Utc>>,
    /// Whole minutes between the checkpoints; `None` while open
    pub duration_minutes: Option<i64>,
    pub notes: String,
    pub status: EntryStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Fields for a new open entry created by a check-in.
#[derive(Debug, Clone)]
pub struct NewOpenEntry {
    pub employee_id: String,
    pub location_id: String,
    pub notes: String,
    pub check_in_time: DateTime<Utc>,
}

/// Fields for a manager-added entry covering a missed cycle.
#[derive(Debug, Clone)]
pub struct NewManualEntry {
    pub employee_id: String,
    pub location_id: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub notes: String,
}

/// Whole minutes between two checkpoints, rounded to the nearest minute.
pub fn duration_minutes(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}

impl TimeEntry {
    /// Build the open entry a check-in produces.
    pub fn open(id: String, new: NewOpenEntry) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            location_id: new.location_id,
            check_in_time: new.check_in_time,
            check_out_time: None,
            duration_minutes: None,
            notes: new.notes,
            status: EntryStatus::Open,
            created_at: new.check_in_time,
            modified_at: new.check_in_time,
        }
    }

    /// Build a manager-added entry; closed iff a check-out time is given.
    pub fn manual(id: String, new: NewManualEntry, now: DateTime<Utc>) -> Self {
        let duration = new
            .check_out_time
            .map(|out| duration_minutes(new.check_in_time, out));
        Self {
            id,
            employee_id: new.employee_id,
            location_id: new.location_id,
            check_in_time: new.check_in_time,
            check_out_time: new.check_out_time,
            duration_minutes: duration,
            notes: new.notes,
            status: if new.check_out_time.is_some() {
                EntryStatus::Closed
            } else {
                EntryStatus::Open
            },
            created_at: now,
            modified_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Close an open entry: stamp the exit time, compute the duration and
    /// append any check-out notes after a `" | "` separator.
    pub fn close(&mut self, at: DateTime<Utc>, notes: Option<&str>) {
        self.check_out_time = Some(at);
        self.duration_minutes = Some(duration_minutes(self.check_in_time, at));
        self.status = EntryStatus::Closed;
        if let Some(extra) = notes.filter(|n| !n.trim().is_empty()) {
            self.notes = append_notes(&self.notes, extra);
        }
        self.modified_at = at;
    }

    /// Bring duration and status back in line with the checkpoints after a
    /// manager correction changed them.
    pub fn recompute(&mut self) {
        match self.check_out_time {
            Some(out) => {
                self.duration_minutes = Some(duration_minutes(self.check_in_time, out));
                self.status = EntryStatus::Closed;
            }
            None => {
                self.duration_minutes = None;
                self.status = EntryStatus::Open;
            }
        }
    }
}

fn append_notes(existing: &str, extra: &str) -> String {
    if existing.trim().is_empty() {
        extra.trim().to_string()
    } else {
        format!("{} | {}", existing.trim(), extra.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, s).unwrap()
    }

    fn open_entry() -> TimeEntry {
        TimeEntry::open(
            "e1".into(),
            NewOpenEntry {
                employee_id: "EMP001".into(),
                location_id: "LOC001".into(),
                notes: "morning shift".into(),
                check_in_time: at(8, 0, 0),
            },
        )
    }

    #[test]
    fn duration_rounds_to_nearest_minute() {
        assert_eq!(duration_minutes(at(8, 0, 0), at(9, 30, 0)), 90);
        // 29 seconds rounds down, 30 rounds up
        assert_eq!(duration_minutes(at(8, 0, 0), at(8, 10, 29)), 10);
        assert_eq!(duration_minutes(at(8, 0, 0), at(8, 10, 30)), 11);
        assert_eq!(duration_minutes(at(8, 0, 0), at(8, 0, 0)), 0);
    }

    #[test]
    fn close_sets_duration_and_status() {
        let mut entry = open_entry();
        assert!(entry.is_open());
        entry.close(at(9, 30, 0), None);
        assert!(!entry.is_open());
        assert_eq!(entry.status, EntryStatus::Closed);
        assert_eq!(entry.duration_minutes, Some(90));
        assert_eq!(entry.check_out_time, Some(at(9, 30, 0)));
        assert_eq!(entry.notes, "morning shift");
    }

    #[test]
    fn close_appends_notes_with_separator() {
        let mut entry = open_entry();
        entry.close(at(16, 0, 0), Some("left early"));
        assert_eq!(entry.notes, "morning shift | left early");
    }

    #[test]
    fn close_with_empty_existing_notes_takes_checkout_notes() {
        let mut entry = open_entry();
        entry.notes = String::new();
        entry.close(at(16, 0, 0), Some("forgot at check-in"));
        assert_eq!(entry.notes, "forgot at check-in");
    }

    #[test]
    fn manual_entry_is_closed_only_with_checkout() {
        let now = at(18, 0, 0);
        let closed = TimeEntry::manual(
            "m1".into(),
            NewManualEntry {
                employee_id: "EMP001".into(),
                location_id: "LOC002".into(),
                check_in_time: at(9, 0, 0),
                check_out_time: Some(at(12, 0, 0)),
                notes: String::new(),
            },
            now,
        );
        assert_eq!(closed.status, EntryStatus::Closed);
        assert_eq!(closed.duration_minutes, Some(180));

        let open = TimeEntry::manual(
            "m2".into(),
            NewManualEntry {
                employee_id: "EMP001".into(),
                location_id: "LOC002".into(),
                check_in_time: at(13, 0, 0),
                check_out_time: None,
                notes: String::new(),
            },
            now,
        );
        assert_eq!(open.status, EntryStatus::Open);
        assert_eq!(open.duration_minutes, None);
    }

    #[test]
    fn recompute_follows_checkpoints() {
        let mut entry = open_entry();
        entry.close(at(9, 0, 0), None);

        entry.check_out_time = Some(at(10, 15, 0));
        entry.recompute();
        assert_eq!(entry.duration_minutes, Some(135));
        assert_eq!(entry.status, EntryStatus::Closed);

        entry.check_out_time = None;
        entry.recompute();
        assert_eq!(entry.duration_minutes, None);
        assert_eq!(entry.status, EntryStatus::Open);
    }
}
