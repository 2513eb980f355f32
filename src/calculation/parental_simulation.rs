//! Simulation of remaining parental leave.
//!
//! Projects how long the remaining balance under each cap lasts if leave
//! resumes on a given date.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ParentalLeaveRules;
use crate::error::{EngineError, EngineResult};

use super::calendar::{add_months, out_of_calendar};
use super::fractional_duration::MonthsAndDays;

/// The projected end dates of the remaining parental leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalSimulation {
    /// The day leave resumes.
    pub start_date: NaiveDate,
    /// Months left under the standard cap.
    pub remaining_12: Decimal,
    /// Months left under the extended cap.
    pub remaining_18: Decimal,
    /// Last day of leave under the standard cap, `None` when exhausted.
    pub within_12: Option<NaiveDate>,
    /// Last day of leave under the extended cap, `None` when exhausted.
    pub within_18: Option<NaiveDate>,
}

/// Date reached by taking `months` of leave from `start`.
///
/// The fractional part is converted to days with rounding, unlike usage
/// measurement which truncates.
fn projected_end(
    start: NaiveDate,
    months: Decimal,
    days_per_month: u32,
) -> EngineResult<NaiveDate> {
    let split = MonthsAndDays::from_months(months, days_per_month);
    add_months(start, split.months)
        .and_then(|date| date.checked_add_days(Days::new(u64::from(split.days))))
        .ok_or_else(|| out_of_calendar("start_date", start))
}

/// Projects the remaining parental leave from `start_date`.
///
/// # Errors
///
/// - `MissingInput` (`start_date`) if no start date is given
/// - `MissingInput` (`total_used_months`) if usage has not been calculated,
///   signalled by a non-positive total
/// - `InvalidInput` (`start_date`) if a projected end falls past the last
///   representable date
///
/// # Example
///
/// ```
/// use leave_engine::calculation::simulate_parental_remaining;
/// use leave_engine::config::LeaveRules;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = LeaveRules::statutory();
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1);
/// let simulation = simulate_parental_remaining(Decimal::new(105, 1), start, &rules.parental).unwrap();
///
/// // 1.5 months remain under 12: one month and 15 days
/// assert_eq!(simulation.within_12, NaiveDate::from_ymd_opt(2025, 2, 16));
/// // 7.5 months remain under 18
/// assert_eq!(simulation.within_18, NaiveDate::from_ymd_opt(2025, 8, 16));
/// ```
pub fn simulate_parental_remaining(
    total_used_months: Decimal,
    start_date: Option<NaiveDate>,
    rules: &ParentalLeaveRules,
) -> EngineResult<ParentalSimulation> {
    let Some(start_date) = start_date else {
        return Err(EngineError::MissingInput {
            field: "start_date".to_string(),
        });
    };
    if total_used_months <= Decimal::ZERO {
        return Err(EngineError::MissingInput {
            field: "total_used_months".to_string(),
        });
    }

    let remaining_12 = (rules.standard_cap_months - total_used_months).max(Decimal::ZERO);
    let remaining_18 = (rules.extended_cap_months - total_used_months).max(Decimal::ZERO);
    let project = |remaining: Decimal| {
        (remaining > Decimal::ZERO)
            .then(|| projected_end(start_date, remaining, rules.days_per_month))
            .transpose()
    };

    Ok(ParentalSimulation {
        start_date,
        remaining_12,
        remaining_18,
        within_12: project(remaining_12)?,
        within_18: project(remaining_18)?,
    })
}
