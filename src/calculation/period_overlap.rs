//! Leave period overlap detection.
//!
//! Periods are end-date inclusive, so two periods that share a boundary day
//! overlap.

use serde::{Deserialize, Serialize};

use crate::models::ParentalPeriod;

/// The result of checking a set of periods for overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapResult {
    /// Whether any two periods overlap.
    pub has_overlap: bool,
    /// Indices of the first conflicting pair in start-date order, as
    /// `(earlier-starting, later-starting)`.
    pub first_conflict: Option<(usize, usize)>,
}

impl OverlapResult {
    /// A result with no conflict.
    pub fn clear() -> Self {
        Self {
            has_overlap: false,
            first_conflict: None,
        }
    }
}

/// Detects overlapping periods.
///
/// Sorts a copy of the periods by start date and compares neighbours; a pair
/// conflicts when the earlier period still covers the day the next one
/// starts. Only the first conflicting neighbour pair is reported.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::detect_period_overlap;
/// use leave_engine::models::ParentalPeriod;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let periods = vec![
///     ParentalPeriod::new(1, d(1, 1), d(1, 10)).unwrap(),
///     ParentalPeriod::new(2, d(1, 10), d(1, 20)).unwrap(),
/// ];
///
/// let result = detect_period_overlap(&periods);
/// assert!(result.has_overlap);
/// assert_eq!(result.first_conflict, Some((1, 2)));
/// ```
pub fn detect_period_overlap(periods: &[ParentalPeriod]) -> OverlapResult {
    let mut sorted: Vec<&ParentalPeriod> = periods.iter().collect();
    sorted.sort_by_key(|p| p.interval.start());

    sorted
        .windows(2)
        .find(|pair| pair[0].interval.contains_date(pair[1].interval.start()))
        .map(|pair| OverlapResult {
            has_overlap: true,
            first_conflict: Some((pair[0].index, pair[1].index)),
        })
        .unwrap_or_else(OverlapResult::clear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(index: usize, start: (u32, u32), end: (u32, u32)) -> ParentalPeriod {
        ParentalPeriod::new(
            index,
            NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_and_single_have_no_overlap() {
        assert_eq!(detect_period_overlap(&[]), OverlapResult::clear());
        assert_eq!(
            detect_period_overlap(&[period(1, (1, 1), (3, 31))]),
            OverlapResult::clear()
        );
    }

    #[test]
    fn test_shared_boundary_day_overlaps() {
        let periods = vec![period(1, (1, 1), (1, 10)), period(2, (1, 10), (1, 20))];
        let result = detect_period_overlap(&periods);
        assert!(result.has_overlap);
        assert_eq!(result.first_conflict, Some((1, 2)));
    }

    #[test]
    fn test_consecutive_days_do_not_overlap() {
        let periods = vec![period(1, (1, 1), (1, 10)), period(2, (1, 11), (1, 20))];
        assert!(!detect_period_overlap(&periods).has_overlap);
    }

    #[test]
    fn test_conflict_reported_in_start_order() {
        let periods = vec![
            period(1, (6, 1), (6, 30)),
            period(2, (1, 1), (1, 31)),
            period(3, (1, 15), (2, 15)),
        ];
        let result = detect_period_overlap(&periods);
        assert_eq!(result.first_conflict, Some((2, 3)));
    }

    #[test]
    fn test_only_first_conflict_is_reported() {
        let periods = vec![
            period(1, (1, 1), (1, 31)),
            period(2, (1, 20), (2, 10)),
            period(3, (5, 1), (5, 31)),
            period(4, (5, 15), (6, 15)),
        ];
        let result = detect_period_overlap(&periods);
        assert_eq!(result.first_conflict, Some((1, 2)));
    }

    #[test]
    fn test_contained_period_overlaps() {
        let periods = vec![period(1, (1, 1), (12, 31)), period(2, (3, 1), (3, 31))];
        assert!(detect_period_overlap(&periods).has_overlap);
    }

    #[test]
    fn test_detection_does_not_depend_on_input_order() {
        let mut periods = vec![
            period(1, (1, 1), (1, 31)),
            period(2, (3, 1), (3, 31)),
            period(3, (3, 31), (4, 30)),
        ];
        let forward = detect_period_overlap(&periods);
        periods.reverse();
        let backward = detect_period_overlap(&periods);
        assert_eq!(forward, backward);
        assert_eq!(forward.first_conflict, Some((2, 3)));
    }
}
