//! Assembled duty schedule.
//!
//! The output handed to the rendering collaborator: one record per day
//! carrying the people assigned in slot order, plus the roster with final
//! point tallies. Serializes cleanly so the renderer can consume it
//! without knowing any model internals.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::person::Person;

/// One day of the solved schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// The date.
    pub date: NaiveDate,
    /// Day of the week.
    pub weekday: Weekday,
    /// Final point value after holiday revision.
    pub points: u32,
    /// Whether a double-length holiday credited this shift.
    pub doubled: bool,
    /// Names of the people on duty, in ascending slot order.
    pub assigned: Vec<String>,
}

/// A complete solved schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutySchedule {
    /// Day records in chronological order.
    pub days: Vec<ScheduleDay>,
    /// The roster with accumulated point totals.
    pub roster: Vec<Person>,
}

impl DutySchedule {
    /// Number of scheduled days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the schedule covers no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Final point total for a person, if they are on the roster.
    pub fn points_for(&self, name: &str) -> Option<u32> {
        self.roster.iter().find(|p| p.name == name).map(|p| p.points)
    }

    /// Number of shifts a person works.
    pub fn shift_count(&self, name: &str) -> usize {
        self.days
            .iter()
            .filter(|d| d.assigned.iter().any(|n| n == name))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> DutySchedule {
        let mut ana = Person::new("Ana", date(2023, 12, 28));
        ana.points = 3;
        DutySchedule {
            days: vec![
                ScheduleDay {
                    date: date(2024, 1, 1),
                    weekday: Weekday::Mon,
                    points: 1,
                    doubled: false,
                    assigned: vec!["Ana".into()],
                },
                ScheduleDay {
                    date: date(2024, 1, 5),
                    weekday: Weekday::Fri,
                    points: 2,
                    doubled: true,
                    assigned: vec!["Ana".into(), "Ben".into()],
                },
            ],
            roster: vec![ana],
        }
    }

    #[test]
    fn test_lookups() {
        let schedule = sample();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.points_for("Ana"), Some(3));
        assert_eq!(schedule.points_for("Nobody"), None);
        assert_eq!(schedule.shift_count("Ana"), 2);
        assert_eq!(schedule.shift_count("Ben"), 1);
    }

    #[test]
    fn test_renders_as_json() {
        // The rendering collaborator consumes this shape as-is.
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["days"][1]["assigned"][1], "Ben");
        assert_eq!(json["days"][1]["doubled"], true);
        assert_eq!(json["roster"][0]["points"], 3);
    }
}
