//! Calendar arithmetic primitives.
//!
//! Whole-month differences with day-of-month adjustment, calendar-day
//! differences, month addition and weekend-skipping day walks. Everything
//! else in the engine is built on these functions.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::EngineError;

/// Whole months from `from` to `to`.
///
/// Computed as the difference in calendar months, minus one when the
/// day-of-month anniversary has not been reached yet in the final month.
/// Negative when `to` is before `from`; callers clamp forward-only spans.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::months_between;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// assert_eq!(months_between(hire, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()), 5);
/// assert_eq!(months_between(hire, NaiveDate::from_ymd_opt(2023, 6, 14).unwrap()), 4);
/// ```
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let months = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months - 1
    } else {
        months
    }
}

/// Absolute number of calendar days between two dates.
///
/// Symmetric in its arguments.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Adds calendar months, letting a day that does not exist in the target
/// month roll over into the following month.
///
/// January 31st plus one month is therefore March 2nd or 3rd rather than the
/// last day of February.
///
/// Returns `None` if the result lies outside the range `NaiveDate` can
/// represent.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::add_months;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(add_months(date, 1), NaiveDate::from_ymd_opt(2024, 2, 15));
///
/// let end_of_month = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
/// assert_eq!(add_months(end_of_month, 1), NaiveDate::from_ymd_opt(2023, 3, 3));
///
/// assert_eq!(add_months(NaiveDate::MAX, 1), None);
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let offset = Days::new(u64::from(date.day0()));
    date.checked_sub_days(offset)?
        .checked_add_months(Months::new(months))?
        .checked_add_days(offset)
}

/// Number of days in the month-long span starting at `date`.
///
/// Counts from `date` up to the day before `add_months(date, 1)`, inclusive,
/// so a span starting on February 1st of a leap year has 29 days. `None`
/// when that span runs past the last representable date.
pub fn month_length_from(date: NaiveDate) -> Option<i64> {
    add_months(date, 1).map(|next| (next - date).num_days())
}

/// The error for date arithmetic on `field` that leaves the representable
/// calendar.
pub(crate) fn out_of_calendar(field: &str, from: NaiveDate) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("date arithmetic from {} leaves the supported calendar", from),
    }
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walks forward from `start` until `days` working days have been counted.
///
/// `start` itself counts when it is a working day. Returns the date on which
/// the last working day was counted, or `start` when `days` is zero. `None`
/// when the walk would pass the last representable date.
///
/// `is_non_working` must accept at least one day in every stretch the walk
/// crosses; a predicate that rejects every day never terminates.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{add_working_days, is_weekend};
/// use chrono::NaiveDate;
///
/// // 2024-03-01 is a Friday
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let end = add_working_days(friday, 3, is_weekend);
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 5));
/// ```
pub fn add_working_days<F>(start: NaiveDate, days: u32, is_non_working: F) -> Option<NaiveDate>
where
    F: Fn(NaiveDate) -> bool,
{
    // Every counted day needs a calendar day of its own
    if i64::from(days) > NaiveDate::MAX.signed_duration_since(start).num_days() + 1 {
        return None;
    }

    let mut remaining = days;
    let mut current = start;

    while remaining > 0 {
        if !is_non_working(current) {
            remaining -= 1;
        }
        if remaining > 0 {
            current = current.succ_opt()?;
        }
    }

    Some(current)
}

/// Counts working days from `start` to `end`, both inclusive.
///
/// Returns zero when `start` is after `end`.
pub fn count_working_days<F>(start: NaiveDate, end: NaiveDate, is_non_working: F) -> u32
where
    F: Fn(NaiveDate) -> bool,
{
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_non_working(*day))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_between_same_day_of_month() {
        assert_eq!(months_between(date(2019, 1, 1), date(2024, 1, 1)), 60);
    }

    #[test]
    fn test_months_between_adjusts_for_unreached_anniversary() {
        assert_eq!(months_between(date(2023, 1, 31), date(2023, 2, 28)), 0);
        assert_eq!(months_between(date(2023, 1, 31), date(2023, 3, 1)), 1);
    }

    #[test]
    fn test_months_between_across_year_boundary() {
        assert_eq!(months_between(date(2023, 11, 10), date(2024, 2, 10)), 3);
        assert_eq!(months_between(date(2023, 11, 10), date(2024, 2, 9)), 2);
    }

    #[test]
    fn test_months_between_reversed_is_negative() {
        assert!(months_between(date(2024, 5, 1), date(2024, 1, 1)) < 0);
    }

    #[test]
    fn test_days_between_is_symmetric() {
        let a = date(2024, 1, 1);
        let b = date(2024, 3, 1);
        assert_eq!(days_between(a, b), 60);
        assert_eq!(days_between(b, a), 60);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_add_months_plain() {
        assert_eq!(add_months(date(2024, 1, 1), 1), Some(date(2024, 2, 1)));
        assert_eq!(add_months(date(2024, 11, 20), 3), Some(date(2025, 2, 20)));
        assert_eq!(add_months(date(2024, 1, 1), 0), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_add_months_rolls_over_missing_days() {
        assert_eq!(add_months(date(2024, 1, 31), 1), Some(date(2024, 3, 2)));
        assert_eq!(add_months(date(2024, 3, 31), 1), Some(date(2024, 5, 1)));
        assert_eq!(add_months(date(2024, 1, 30), 1), Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_add_months_past_calendar_end_is_none() {
        assert_eq!(add_months(NaiveDate::MAX, 1), None);
        assert_eq!(add_months(date(2024, 1, 1), u32::MAX), None);
        assert_eq!(add_months(NaiveDate::MAX, 0), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_month_length_uses_actual_calendar() {
        assert_eq!(month_length_from(date(2024, 2, 1)), Some(29));
        assert_eq!(month_length_from(date(2023, 2, 1)), Some(28));
        assert_eq!(month_length_from(date(2024, 4, 1)), Some(30));
        assert_eq!(month_length_from(date(2024, 1, 1)), Some(31));
        // Mid-month spans take the length of the month they start in
        assert_eq!(month_length_from(date(2024, 1, 15)), Some(31));
        assert_eq!(month_length_from(date(2024, 2, 15)), Some(29));
        assert_eq!(month_length_from(NaiveDate::MAX), None);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2024, 3, 2))); // Saturday
        assert!(is_weekend(date(2024, 3, 3))); // Sunday
        assert!(!is_weekend(date(2024, 3, 1))); // Friday
        assert!(!is_weekend(date(2024, 3, 4))); // Monday
    }

    #[test]
    fn test_add_working_days_zero_returns_start() {
        let saturday = date(2024, 3, 2);
        assert_eq!(add_working_days(saturday, 0, is_weekend), Some(saturday));
    }

    #[test]
    fn test_add_working_days_single_weekday() {
        let monday = date(2024, 3, 4);
        assert_eq!(add_working_days(monday, 1, is_weekend), Some(monday));
    }

    #[test]
    fn test_add_working_days_from_weekend_start() {
        // Saturday start: the first working day is Monday
        assert_eq!(add_working_days(date(2024, 3, 2), 1, is_weekend), Some(date(2024, 3, 4)));
    }

    #[test]
    fn test_add_working_days_skips_two_weekends() {
        // Monday + 10 working days ends on the Friday of the following week
        assert_eq!(
            add_working_days(date(2024, 3, 4), 10, is_weekend),
            Some(date(2024, 3, 15))
        );
    }

    #[test]
    fn test_add_working_days_with_custom_calendar() {
        let holiday = date(2024, 3, 4);
        let end = add_working_days(date(2024, 3, 1), 2, |d| is_weekend(d) || d == holiday);
        assert_eq!(end, Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_add_working_days_past_calendar_end_is_none() {
        let near_end = NaiveDate::MAX - Days::new(3);
        assert_eq!(add_working_days(near_end, 10, |_| false), None);
        assert_eq!(add_working_days(date(2024, 3, 4), u32::MAX, is_weekend), None);
        assert_eq!(add_working_days(near_end, 4, |_| false), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_count_working_days_inclusive() {
        assert_eq!(count_working_days(date(2024, 3, 1), date(2024, 3, 5), is_weekend), 3);
        assert_eq!(count_working_days(date(2024, 3, 2), date(2024, 3, 3), is_weekend), 0);
        assert_eq!(count_working_days(date(2024, 3, 4), date(2024, 3, 4), is_weekend), 1);
    }

    #[test]
    fn test_count_working_days_inverted_range_is_zero() {
        assert_eq!(count_working_days(date(2024, 3, 5), date(2024, 3, 1), is_weekend), 0);
    }
}
