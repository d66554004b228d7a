//! Holiday and break point revision.
//!
//! Holidays change what a shift is worth. A double-length date extends the
//! *previous* evening's shift, so that day is credited an extra point. Break
//! dates are low-availability periods where shifts are harder to staff and
//! earn more.
//!
//! Revision is a pure function returning a new calendar: fairness bounds
//! are derived from the revised grand total, and recomputing instead of
//! mutating keeps the order dependency between the two steps explicit in
//! the types.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::calendar::{DutyCalendar, Semester};

/// Weekday that anchors the start of the duty week.
const WEEK_START_ANCHOR: Weekday = Weekday::Sun;
/// Midweek anchor day.
const MIDWEEK_ANCHOR: Weekday = Weekday::Wed;

/// Holiday and break dates for one term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// Dates whose shift runs double length, crediting the prior day.
    pub double_length: BTreeSet<NaiveDate>,
    /// Break dates in chronological order, prefixed with the day
    /// immediately preceding the first break day.
    pub breaks: Vec<NaiveDate>,
}

impl HolidayCalendar {
    /// Creates a holiday calendar.
    ///
    /// Break dates are sorted and prefixed with the day before the first
    /// break day; that evening's shift already falls inside the
    /// low-availability period.
    pub fn new(
        double_length: impl IntoIterator<Item = NaiveDate>,
        break_dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        let mut breaks: Vec<NaiveDate> = break_dates.into_iter().collect();
        breaks.sort();
        breaks.dedup();
        if let Some(&first) = breaks.first() {
            if let Some(eve) = first.pred_opt() {
                breaks.insert(0, eve);
            }
        }
        Self {
            double_length: double_length.into_iter().collect(),
            breaks,
        }
    }

    /// A calendar with no holidays or breaks.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether a date falls in the break period (prefix day included).
    pub fn is_break(&self, date: NaiveDate) -> bool {
        self.breaks.binary_search(&date).is_ok()
    }
}

/// Point increment for a break day under the semester's rules.
///
/// Spring terms distinguish low-disruption days — the week-start anchor,
/// the midweek anchor, and the two long-shift days — at +1 from the rest
/// at +2. Fall and summer terms credit every break day +1.
fn break_increment(calendar: &DutyCalendar, weekday: Weekday) -> u32 {
    match calendar.semester {
        Semester::Spring => {
            if weekday == WEEK_START_ANCHOR
                || weekday == MIDWEEK_ANCHOR
                || calendar.config.is_long_shift(weekday)
            {
                1
            } else {
                2
            }
        }
        Semester::Fall | Semester::Summer => 1,
    }
}

/// Revises a calendar's point values for holidays and breaks.
///
/// Two passes over a fresh copy of the calendar:
///
/// 1. Each double-length date credits the immediately preceding day one
///    extra point and marks it doubled; the grand total grows by that
///    day's capacity (one extra point per person on the shift).
/// 2. Each break date gains `break_increment` points; the grand total
///    grows by `increment × capacity`.
///
/// Dates that fall outside the calendar are logged and skipped. Must run
/// before fairness bounds are taken from `grand_total`.
pub fn revise_for_holidays(calendar: &DutyCalendar, holidays: &HolidayCalendar) -> DutyCalendar {
    let mut revised = calendar.clone();

    for &holiday in &holidays.double_length {
        let Some(eve) = holiday.pred_opt() else {
            warn!(%holiday, "double-length date has no preceding day");
            continue;
        };
        match revised.day_index(eve) {
            Some(idx) => {
                let day = &mut revised.days[idx];
                day.points += 1;
                day.doubled = true;
                revised.grand_total += day.capacity;
            }
            None => {
                warn!(%holiday, "double-length date precedes the calendar; skipped");
            }
        }
    }

    for &brk in &holidays.breaks {
        match revised.day_index(brk) {
            Some(idx) => {
                let increment = break_increment(&revised, brk.weekday());
                let day = &mut revised.days[idx];
                day.points += increment;
                revised.grand_total += increment * day.capacity;
            }
            None => {
                warn!(date = %brk, "break date outside the calendar; skipped");
            }
        }
    }

    debug!(
        before = calendar.grand_total,
        after = revised.grand_total,
        "holiday revision complete"
    );
    revised
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::ShiftConfig;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spring_calendar() -> DutyCalendar {
        DutyCalendar::build(date(2024, 1, 1), date(2024, 3, 31), ShiftConfig::default()).unwrap()
    }

    #[test]
    fn test_break_list_prefixed_with_eve() {
        let holidays =
            HolidayCalendar::new(vec![], vec![date(2024, 3, 5), date(2024, 3, 6), date(2024, 3, 7)]);
        assert_eq!(
            holidays.breaks,
            vec![
                date(2024, 3, 4),
                date(2024, 3, 5),
                date(2024, 3, 6),
                date(2024, 3, 7)
            ]
        );
        assert!(holidays.is_break(date(2024, 3, 4)));
        assert!(!holidays.is_break(date(2024, 3, 8)));
    }

    #[test]
    fn test_double_length_credits_prior_day() {
        let calendar = spring_calendar();
        // Mon Jan 15 is double length; Sun Jan 14 (regular, capacity 1) is credited.
        let holidays = HolidayCalendar::new(vec![date(2024, 1, 15)], vec![]);
        let revised = revise_for_holidays(&calendar, &holidays);

        let eve = revised.day(date(2024, 1, 14)).unwrap();
        assert_eq!(eve.points, 2);
        assert!(eve.doubled);
        assert_eq!(revised.grand_total, calendar.grand_total + 1);

        // Every other day is untouched.
        for (before, after) in calendar.days.iter().zip(&revised.days) {
            if before.date != date(2024, 1, 14) {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_double_length_after_long_shift_day() {
        let calendar = spring_calendar();
        // Sun Jan 21 is double length; Sat Jan 20 has capacity 2, so the
        // extra point costs one unit per person on the shift.
        let holidays = HolidayCalendar::new(vec![date(2024, 1, 21)], vec![]);
        let revised = revise_for_holidays(&calendar, &holidays);

        let eve = revised.day(date(2024, 1, 20)).unwrap();
        assert_eq!(eve.points, 3);
        assert_eq!(revised.grand_total, calendar.grand_total + 2);
    }

    #[test]
    fn test_spring_break_increments() {
        let calendar = spring_calendar();
        // Break Tue Mar 5 – Thu Mar 7; prefix Mon Mar 4.
        let holidays =
            HolidayCalendar::new(vec![], vec![date(2024, 3, 5), date(2024, 3, 6), date(2024, 3, 7)]);
        let revised = revise_for_holidays(&calendar, &holidays);

        // Mon +2, Tue +2, Wed (midweek anchor) +1, Thu +2, all capacity 1.
        assert_eq!(revised.day(date(2024, 3, 4)).unwrap().points, 3);
        assert_eq!(revised.day(date(2024, 3, 5)).unwrap().points, 3);
        assert_eq!(revised.day(date(2024, 3, 6)).unwrap().points, 2);
        assert_eq!(revised.day(date(2024, 3, 7)).unwrap().points, 3);
        assert_eq!(revised.grand_total, calendar.grand_total + 7);
    }

    #[test]
    fn test_spring_break_anchor_days_light() {
        let calendar = spring_calendar();
        // Break Fri Mar 8 – Sun Mar 10; prefix Thu Mar 7.
        let holidays = HolidayCalendar::new(
            vec![],
            vec![date(2024, 3, 8), date(2024, 3, 9), date(2024, 3, 10)],
        );
        let revised = revise_for_holidays(&calendar, &holidays);

        // Thu +2 (cap 1), Fri +1 (long shift, cap 2), Sat +1 (long shift,
        // cap 2), Sun +1 (week-start anchor, cap 1).
        assert_eq!(revised.day(date(2024, 3, 8)).unwrap().points, 3);
        assert_eq!(revised.day(date(2024, 3, 10)).unwrap().points, 2);
        assert_eq!(revised.grand_total, calendar.grand_total + 2 + 2 + 2 + 1);
    }

    #[test]
    fn test_fall_break_uniform_increment() {
        let calendar =
            DutyCalendar::build(date(2024, 8, 1), date(2024, 12, 1), ShiftConfig::default())
                .unwrap();
        // Thanksgiving Wed Nov 27 – Fri Nov 29; prefix Tue Nov 26.
        let holidays = HolidayCalendar::new(
            vec![],
            vec![date(2024, 11, 27), date(2024, 11, 28), date(2024, 11, 29)],
        );
        let revised = revise_for_holidays(&calendar, &holidays);

        // Every break day +1: Tue, Wed, Thu at capacity 1, Fri at capacity 2.
        assert_eq!(revised.day(date(2024, 11, 26)).unwrap().points, 2);
        assert_eq!(revised.day(date(2024, 11, 27)).unwrap().points, 2);
        assert_eq!(revised.day(date(2024, 11, 29)).unwrap().points, 3);
        assert_eq!(revised.grand_total, calendar.grand_total + 5);
    }

    #[test]
    fn test_out_of_range_dates_skipped() {
        let calendar = spring_calendar();
        let holidays = HolidayCalendar::new(
            vec![date(2024, 1, 1), date(2024, 6, 15)], // eve of first is outside
            vec![date(2024, 5, 1)],
        );
        let revised = revise_for_holidays(&calendar, &holidays);
        assert_eq!(revised.grand_total, calendar.grand_total);
    }

    #[test]
    fn test_no_holidays_is_identity() {
        let calendar = spring_calendar();
        let revised = revise_for_holidays(&calendar, &HolidayCalendar::none());
        assert_eq!(revised.grand_total, calendar.grand_total);
        assert_eq!(revised.days, calendar.days);
    }
}
