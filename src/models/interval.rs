//! Date interval and parental leave period models.
//!
//! This module contains the [`DateInterval`], [`ParentalPeriod`] and
//! [`RawPeriod`] types used for parental leave periods and vacation windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar dates with `start <= end`.
///
/// The invariant is enforced on construction and on deserialization.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let interval = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
/// )
/// .unwrap();
///
/// assert!(interval.contains_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
/// assert_eq!(interval.inclusive_days(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalFields")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct IntervalFields {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<IntervalFields> for DateInterval {
    type Error = EngineError;

    fn try_from(fields: IntervalFields) -> Result<Self, Self::Error> {
        DateInterval::new(fields.start, fields.end)
    }
}

impl DateInterval {
    /// Creates an interval, failing with `InvalidRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidRange {
                context: "interval".to_string(),
                start,
                end,
            });
        }
        Ok(Self { start, end })
    }

    /// The first day of the interval.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the interval (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a given date falls within this interval, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A parental leave period tagged with its 1-based position on the form.
///
/// The index only identifies the period in messages; ordering for
/// calculations is always by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalPeriod {
    /// 1-based position as entered.
    pub index: usize,
    /// The dates of leave, end inclusive.
    pub interval: DateInterval,
}

impl ParentalPeriod {
    /// Creates a period, failing with `InvalidRange` naming the period if
    /// `start > end`.
    pub fn new(index: usize, start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        let interval = DateInterval::new(start, end).map_err(|_| EngineError::InvalidRange {
            context: format!("period {}", index),
            start,
            end,
        })?;
        Ok(Self { index, interval })
    }
}

/// One period row exactly as entered, with either date possibly blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPeriod {
    /// First day of leave, if entered.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last day of leave, if entered.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl RawPeriod {
    /// Creates a row with both dates entered.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether both dates were entered.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Builds the period at 1-based position `index`.
    ///
    /// Returns `None` for an incomplete row and `InvalidRange` when the start
    /// falls after the end.
    pub fn to_period(&self, index: usize) -> Option<EngineResult<ParentalPeriod>> {
        let (start, end) = (self.start?, self.end?);
        Some(ParentalPeriod::new(index, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let result = DateInterval::new(date(2024, 1, 10), date(2024, 1, 1));
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn test_single_day_interval() {
        let interval = DateInterval::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(interval.inclusive_days(), 1);
        assert!(interval.contains_date(date(2024, 1, 1)));
    }

    #[test]
    fn test_contains_date_boundaries() {
        let interval = DateInterval::new(date(2024, 1, 13), date(2024, 1, 26)).unwrap();
        assert!(interval.contains_date(interval.start()));
        assert!(interval.contains_date(interval.end()));
        assert!(!interval.contains_date(date(2024, 1, 12)));
        assert!(!interval.contains_date(date(2024, 1, 27)));
    }

    #[test]
    fn test_inclusive_days_across_leap_february() {
        let interval = DateInterval::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap();
        assert_eq!(interval.inclusive_days(), 29);
    }

    #[test]
    fn test_deserialize_valid_interval() {
        let json = r#"{"start": "2024-01-01", "end": "2024-03-31"}"#;
        let interval: DateInterval = serde_json::from_str(json).unwrap();
        assert_eq!(interval.start(), date(2024, 1, 1));
        assert_eq!(interval.end(), date(2024, 3, 31));
    }

    #[test]
    fn test_deserialize_rejects_inverted_interval() {
        let json = r#"{"start": "2024-03-31", "end": "2024-01-01"}"#;
        let result: Result<DateInterval, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_interval() {
        let interval = DateInterval::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, r#"{"start":"2024-01-01","end":"2024-01-10"}"#);
    }

    #[test]
    fn test_parental_period_error_names_index() {
        let err = ParentalPeriod::new(2, date(2024, 5, 1), date(2024, 4, 1)).unwrap_err();
        match err {
            EngineError::InvalidRange { context, .. } => assert_eq!(context, "period 2"),
            other => panic!("Expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_period_incomplete_row_is_skipped() {
        let row = RawPeriod {
            start: Some(date(2024, 1, 1)),
            end: None,
        };
        assert!(!row.is_complete());
        assert!(row.to_period(1).is_none());
    }

    #[test]
    fn test_raw_period_builds_indexed_period() {
        let period = RawPeriod::new(date(2024, 1, 1), date(2024, 1, 31))
            .to_period(3)
            .unwrap()
            .unwrap();
        assert_eq!(period.index, 3);
        assert_eq!(period.interval.inclusive_days(), 31);
    }

    #[test]
    fn test_raw_period_inverted_range_fails() {
        let result = RawPeriod::new(date(2024, 2, 1), date(2024, 1, 1)).to_period(1).unwrap();
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }
}
