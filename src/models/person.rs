//! Staff member model.
//!
//! A `Person` carries both the availability inputs gathered from the duty
//! form (exclusions, preferences, seniority) and the roster outputs the
//! assembler fills in (accumulated points). Keeping them on one entity
//! means exclusions can never drift out of alignment with the person they
//! belong to.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where in the term a person prefers their shifts to land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Weight shifts toward the first half of the schedule.
    FrontLoad,
    /// Weight shifts toward the second half of the schedule.
    BackLoad,
    /// No stated preference.
    #[default]
    None,
}

/// A staff member on the duty roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Name, unique within a roster.
    pub name: String,
    /// Move-in date; no duty on or before it.
    pub move_in: NaiveDate,
    /// Individual dates this person cannot serve.
    pub excluded_dates: BTreeSet<NaiveDate>,
    /// Weekdays this person can never serve.
    pub excluded_weekdays: Vec<Weekday>,
    /// Front-load/back-load preference.
    pub distribution: Distribution,
    /// Has served on a duty roster before, anywhere.
    pub returner: bool,
    /// Has served in this community before.
    pub community_returner: bool,
    /// Eligible to work during institutional breaks.
    pub half_staff: bool,
    /// Points earned; written only by schedule assembly.
    pub points: u32,
}

impl Person {
    /// Creates a person with no exclusions, no preference, and no
    /// prior service.
    pub fn new(name: impl Into<String>, move_in: NaiveDate) -> Self {
        Self {
            name: name.into(),
            move_in,
            excluded_dates: BTreeSet::new(),
            excluded_weekdays: Vec::new(),
            distribution: Distribution::None,
            returner: false,
            community_returner: false,
            half_staff: false,
            points: 0,
        }
    }

    /// Sets dates this person cannot serve.
    pub fn with_excluded_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.excluded_dates = dates.into_iter().collect();
        self
    }

    /// Sets weekdays this person can never serve.
    pub fn with_excluded_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.excluded_weekdays = weekdays.into_iter().collect();
        self
    }

    /// Sets the distribution preference.
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Marks prior service anywhere.
    pub fn returner(mut self) -> Self {
        self.returner = true;
        self
    }

    /// Marks prior service in this community (implies prior service).
    pub fn community_returner(mut self) -> Self {
        self.returner = true;
        self.community_returner = true;
        self
    }

    /// Marks eligibility to serve during breaks.
    pub fn half_staff(mut self) -> Self {
        self.half_staff = true;
        self
    }

    /// Objective weight for preferred-half shifts.
    ///
    /// Community returners outrank returners outrank new staff, so a
    /// senior person's placement preference wins ties against a newer
    /// person's.
    pub fn seniority_weight(&self) -> i64 {
        if self.community_returner {
            6
        } else if self.returner {
            4
        } else {
            2
        }
    }
}

/// Flags the named people as half-staff.
///
/// Names that match nobody on the roster are logged and skipped; the
/// roster is left otherwise untouched.
pub fn apply_half_staff(roster: &mut [Person], names: &[String]) {
    for name in names {
        match roster.iter_mut().find(|p| &p.name == name) {
            Some(person) => person.half_staff = true,
            None => warn!(%name, "half-staff name matches nobody on the roster"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let p = Person::new("Avery", date(2023, 12, 28));
        assert!(!p.returner);
        assert!(!p.community_returner);
        assert!(!p.half_staff);
        assert_eq!(p.distribution, Distribution::None);
        assert_eq!(p.points, 0);
    }

    #[test]
    fn test_community_returner_implies_returner() {
        let p = Person::new("Noor", date(2023, 12, 28)).community_returner();
        assert!(p.returner);
        assert!(p.community_returner);
    }

    #[test]
    fn test_seniority_weights() {
        let base = Person::new("A", date(2023, 12, 28));
        assert_eq!(base.clone().seniority_weight(), 2);
        assert_eq!(base.clone().returner().seniority_weight(), 4);
        assert_eq!(base.community_returner().seniority_weight(), 6);
    }

    #[test]
    fn test_apply_half_staff_matches_by_name() {
        let mut roster = vec![
            Person::new("Avery", date(2023, 12, 28)),
            Person::new("Noor", date(2023, 12, 28)),
        ];
        apply_half_staff(
            &mut roster,
            &["Noor".to_string(), "Nobody".to_string()],
        );
        assert!(!roster[0].half_staff);
        assert!(roster[1].half_staff);
    }
}
