//! Roster input validation.
//!
//! Structural checks on the roster against the duty calendar before any
//! model is built. Detects:
//! - Duplicate names
//! - An empty roster
//! - People who can never serve (move-in on or after the last duty day,
//!   or every weekday excluded)
//!
//! A person who can never serve makes the model trivially infeasible
//! whenever the fairness floor is positive; catching it here names the
//! person instead of surfacing a bare infeasibility verdict.

use std::collections::HashSet;

use chrono::Weekday;

use crate::models::{DutyCalendar, Person};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two people share a name.
    DuplicateName,
    /// The roster has nobody on it.
    EmptyRoster,
    /// A person cannot serve on any day of the calendar.
    NeverEligible,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster against the calendar it will be scheduled over.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &[Person], calendar: &DutyCalendar) -> ValidationResult {
    let mut errors = Vec::new();

    if roster.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "roster has no people",
        ));
    }

    let mut names = HashSet::new();
    for person in roster {
        if !names.insert(person.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate name on roster: {}", person.name),
            ));
        }
    }

    let last_day = calendar.days.last().map(|d| d.date);
    for person in roster {
        if let Some(last) = last_day {
            if person.move_in >= last {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NeverEligible,
                    format!(
                        "{} moves in on {}, on or after the last duty day {last}",
                        person.name, person.move_in
                    ),
                ));
            }
        }

        let excluded: HashSet<Weekday> = person.excluded_weekdays.iter().copied().collect();
        if excluded.len() == 7 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NeverEligible,
                format!("{} excludes every day of the week", person.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftConfig;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week() -> DutyCalendar {
        DutyCalendar::build(date(2024, 1, 1), date(2024, 1, 7), ShiftConfig::default()).unwrap()
    }

    #[test]
    fn test_valid_roster() {
        let roster = vec![
            Person::new("Ana", date(2023, 12, 28)),
            Person::new("Ben", date(2023, 12, 28)),
        ];
        assert!(validate_roster(&roster, &week()).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let roster = vec![
            Person::new("Ana", date(2023, 12, 28)),
            Person::new("Ana", date(2023, 12, 28)),
        ];
        let errors = validate_roster(&roster, &week()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName));
    }

    #[test]
    fn test_empty_roster() {
        let errors = validate_roster(&[], &week()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyRoster));
    }

    #[test]
    fn test_late_move_in_never_eligible() {
        let roster = vec![Person::new("Ana", date(2024, 1, 7))];
        let errors = validate_roster(&roster, &week()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NeverEligible));
    }

    #[test]
    fn test_all_weekdays_excluded_never_eligible() {
        let all = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        let roster = vec![Person::new("Ana", date(2023, 12, 28)).with_excluded_weekdays(all)];
        let errors = validate_roster(&roster, &week()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NeverEligible));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let roster = vec![
            Person::new("Ana", date(2024, 1, 7)),
            Person::new("Ana", date(2023, 12, 28)),
        ];
        let errors = validate_roster(&roster, &week()).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
