//! Vacation date planning.
//!
//! Given a remaining balance, a start date and a number of leave days, finds
//! the last day of the vacation by skipping weekends.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::calendar::{
    add_working_days, count_working_days, days_between, is_weekend, out_of_calendar,
};
use super::fractional_duration::decimal_to_u32;

/// Clause under which leave is taken at the time the employee requests.
const TIMING_CLAUSE: &str = "60(5)";

/// A planned vacation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPlan {
    /// First day of the vacation.
    pub start_date: NaiveDate,
    /// Last day of the vacation.
    pub end_date: NaiveDate,
    /// Leave days requested (half days allowed).
    pub requested_days: Decimal,
    /// Calendar days from start to end, inclusive.
    pub total_calendar_days: i64,
    /// Working days from start to end, inclusive.
    pub working_days: u32,
    /// Balance before the vacation.
    pub remaining_before: Decimal,
    /// Balance after the vacation.
    pub remaining_after: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Plans a vacation of `requested_days` leave days starting on `start_date`.
///
/// A fractional request still occupies its last day, so the walk covers
/// `ceil(requested_days)` working days while the balance is reduced by the
/// exact request.
///
/// # Errors
///
/// - `InvalidInput` if `requested_days` is not positive or `start_date` is absent
/// - `InsufficientBalance` if `requested_days` exceeds `remaining_days`
/// - `InvalidInput` (`requested_days`) if the vacation would end past the last
///   representable date
///
/// # Example
///
/// ```
/// use leave_engine::calculation::plan_vacation;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // 2024-03-01 is a Friday
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1);
/// let plan = plan_vacation(Decimal::from(15), start, Decimal::from(3), 1).unwrap();
///
/// assert_eq!(plan.end_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
/// assert_eq!(plan.total_calendar_days, 5);
/// assert_eq!(plan.working_days, 3);
/// assert_eq!(plan.remaining_after, Decimal::from(12));
/// ```
pub fn plan_vacation(
    remaining_days: Decimal,
    start_date: Option<NaiveDate>,
    requested_days: Decimal,
    step_number: u32,
) -> EngineResult<VacationPlan> {
    if requested_days <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "requested_days".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    let Some(start_date) = start_date else {
        return Err(EngineError::InvalidInput {
            field: "start_date".to_string(),
            message: "a start date is required".to_string(),
        });
    };
    if requested_days > remaining_days {
        return Err(EngineError::InsufficientBalance {
            requested_days,
            remaining_days,
        });
    }

    let walk_days = decimal_to_u32(requested_days.ceil());
    let end_date = add_working_days(start_date, walk_days, is_weekend)
        .ok_or_else(|| out_of_calendar("requested_days", start_date))?;
    let total_calendar_days = days_between(start_date, end_date) + 1;
    let working_days = count_working_days(start_date, end_date, is_weekend);
    let remaining_after = remaining_days - requested_days;

    let audit_step = AuditStep {
        step_number,
        rule_id: "vacation_plan".to_string(),
        rule_name: "Vacation Planning".to_string(),
        clause_ref: TIMING_CLAUSE.to_string(),
        input: serde_json::json!({
            "remaining_days": remaining_days.normalize().to_string(),
            "start_date": start_date.to_string(),
            "requested_days": requested_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "end_date": end_date.to_string(),
            "total_calendar_days": total_calendar_days,
            "working_days": working_days,
            "remaining_after": remaining_after.normalize().to_string()
        }),
        reasoning: format!(
            "{} working days from {} end on {} ({} calendar days); {} days remain",
            walk_days,
            start_date,
            end_date,
            total_calendar_days,
            remaining_after.normalize()
        ),
    };

    Ok(VacationPlan {
        start_date,
        end_date,
        requested_days,
        total_calendar_days,
        working_days,
        remaining_before: remaining_days,
        remaining_after,
        audit_step,
    })
}
