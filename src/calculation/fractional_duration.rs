//! Fractional month durations for parental leave accounting.
//!
//! A leave period is measured in whole calendar months plus the remaining
//! days expressed as a fraction of the actual length of the month in which
//! they fall. Fractions are truncated, never rounded, to three decimals.

use chrono::Days;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::ParentalLeaveRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, DateInterval, ParentalPeriod};

use super::calendar::{add_months, month_length_from, months_between, out_of_calendar};

/// Decimal places kept for month values.
pub const MONTH_PRECISION: u32 = 3;

/// Truncates a non-negative month value to [`MONTH_PRECISION`] decimals.
pub fn truncate_months(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONTH_PRECISION, RoundingStrategy::ToZero)
}

/// Elapsed months of a single inclusive interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionalMonths {
    /// Completed calendar months.
    pub whole_months: u32,
    /// Days left over after the completed months.
    pub remainder_days: u32,
    /// Length of the month-long span the remainder falls in.
    pub days_in_month: u32,
    /// `remainder_days / days_in_month`, truncated to three decimals.
    pub remainder_ratio: Decimal,
    /// `whole_months + remainder_ratio`, truncated to three decimals.
    pub total_months: Decimal,
}

/// Measures an inclusive interval in fractional months.
///
/// The end date counts as a day of leave, so the interval is first made
/// half-open by moving the end one day later.
///
/// # Errors
///
/// Returns `InvalidInput` when measuring would step past the last
/// representable date (an interval ending at or just before `NaiveDate::MAX`).
///
/// # Example
///
/// ```
/// use leave_engine::calculation::fractional_months;
/// use leave_engine::models::DateInterval;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let interval = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
/// )
/// .unwrap();
///
/// let usage = fractional_months(&interval).unwrap();
/// assert_eq!(usage.whole_months, 2);
/// assert_eq!(usage.remainder_days, 6);
/// assert_eq!(usage.days_in_month, 31);
/// // 6 / 31 = 0.19354... truncated
/// assert_eq!(usage.total_months, Decimal::new(2193, 3));
/// ```
pub fn fractional_months(interval: &DateInterval) -> EngineResult<FractionalMonths> {
    let start = interval.start();
    let end_exclusive = interval
        .end()
        .checked_add_days(Days::new(1))
        .ok_or_else(|| out_of_calendar("end_date", interval.end()))?;

    let whole_months = months_between(start, end_exclusive).max(0) as u32;
    let month_mark =
        add_months(start, whole_months).ok_or_else(|| out_of_calendar("start_date", start))?;

    let remainder_days = if end_exclusive > month_mark {
        (end_exclusive - month_mark).num_days() as u32
    } else {
        0
    };
    let days_in_month = month_length_from(month_mark)
        .ok_or_else(|| out_of_calendar("end_date", month_mark))? as u32;

    let remainder_ratio = if remainder_days > 0 {
        truncate_months(Decimal::from(remainder_days) / Decimal::from(days_in_month))
    } else {
        Decimal::ZERO
    };
    let total_months = truncate_months(Decimal::from(whole_months) + remainder_ratio);

    Ok(FractionalMonths {
        whole_months,
        remainder_days,
        days_in_month,
        remainder_ratio,
        total_months,
    })
}

/// A month value split into whole months and approximate days.
///
/// Days are `round(fraction x days_per_month)`, which makes this a
/// presentation value; calculations use the decimal month value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthsAndDays {
    /// Whole months.
    pub months: u32,
    /// Remaining days, rounded.
    pub days: u32,
}

impl MonthsAndDays {
    /// Splits a non-negative month value.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::calculation::MonthsAndDays;
    /// use rust_decimal::Decimal;
    ///
    /// let split = MonthsAndDays::from_months(Decimal::new(2500, 3), 30);
    /// assert_eq!(split, MonthsAndDays { months: 2, days: 15 });
    /// ```
    pub fn from_months(value: Decimal, days_per_month: u32) -> Self {
        let value = value.max(Decimal::ZERO);
        let whole = value.floor();
        let days = ((value - whole) * Decimal::from(days_per_month))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self {
            months: decimal_to_u32(whole),
            days: decimal_to_u32(days),
        }
    }
}

/// Converts a non-negative integral decimal, saturating at `u32::MAX`.
pub(crate) fn decimal_to_u32(value: Decimal) -> u32 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_u32().unwrap_or(u32::MAX)
}

/// Usage of one parental leave period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodUsage {
    /// 1-based position of the period as entered.
    pub index: usize,
    /// The measured duration.
    #[serde(flatten)]
    pub usage: FractionalMonths,
    /// Whether the period lies beyond the statutory number of splits.
    pub exceeds_split_limit: bool,
}

/// The result of measuring all parental leave periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalUsageResult {
    /// Usage per period, in entry order.
    pub per_period: Vec<PeriodUsage>,
    /// Sum of the per-period totals.
    pub total_months: Decimal,
    /// Months left under the standard (12-month) cap, never negative.
    pub remaining_12: Decimal,
    /// Months left under the extended (18-month) cap, never negative.
    pub remaining_18: Decimal,
    /// `total_months` as whole months and days for display.
    pub total_split: MonthsAndDays,
    /// Non-fatal findings such as periods beyond the split limit.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Measures parental leave periods and the balance left under both caps.
///
/// The periods must already be validated (see
/// [`detect_period_overlap`](super::detect_period_overlap)); this function
/// only measures them.
///
/// # Errors
///
/// Returns the first period's `InvalidInput` from [`fractional_months`].
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_parental_usage;
/// use leave_engine::config::LeaveRules;
/// use leave_engine::models::ParentalPeriod;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = LeaveRules::statutory();
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let periods = vec![
///     ParentalPeriod::new(1, d(2024, 1, 1), d(2024, 6, 30)).unwrap(),
///     ParentalPeriod::new(2, d(2024, 9, 1), d(2024, 11, 30)).unwrap(),
/// ];
///
/// let result = calculate_parental_usage(&periods, &rules.parental, 1).unwrap();
/// assert_eq!(result.total_months, Decimal::from(9));
/// assert_eq!(result.remaining_12, Decimal::from(3));
/// assert_eq!(result.remaining_18, Decimal::from(9));
/// ```
pub fn calculate_parental_usage(
    periods: &[ParentalPeriod],
    rules: &ParentalLeaveRules,
    step_number: u32,
) -> EngineResult<ParentalUsageResult> {
    let per_period = periods
        .iter()
        .map(|period| {
            Ok(PeriodUsage {
                index: period.index,
                usage: fractional_months(&period.interval)?,
                exceeds_split_limit: period.index > rules.max_splits,
            })
        })
        .collect::<EngineResult<Vec<PeriodUsage>>>()?;

    let total_months: Decimal = per_period.iter().map(|p| p.usage.total_months).sum();
    let remaining_12 = (rules.standard_cap_months - total_months).max(Decimal::ZERO);
    let remaining_18 = (rules.extended_cap_months - total_months).max(Decimal::ZERO);

    let warnings: Vec<AuditWarning> = per_period
        .iter()
        .filter(|p| p.exceeds_split_limit)
        .map(|p| AuditWarning {
            code: "SPLIT_LIMIT_EXCEEDED".to_string(),
            message: format!(
                "Period {} exceeds the statutory limit of {} splits (clause {})",
                p.index, rules.max_splits, rules.split_clause
            ),
            severity: "medium".to_string(),
        })
        .collect();

    let breakdown: Vec<serde_json::Value> = periods
        .iter()
        .zip(&per_period)
        .map(|(period, p)| {
            serde_json::json!({
                "index": p.index,
                "calendar_days": period.interval.inclusive_days(),
                "whole_months": p.usage.whole_months,
                "remainder_days": p.usage.remainder_days,
                "days_in_month": p.usage.days_in_month,
                "total_months": p.usage.total_months.to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "parental_usage".to_string(),
        rule_name: "Parental Leave Usage".to_string(),
        clause_ref: rules.clause.clone(),
        input: serde_json::json!({
            "periods": periods.len()
        }),
        output: serde_json::json!({
            "per_period": breakdown,
            "total_months": total_months.to_string(),
            "remaining_12": remaining_12.to_string(),
            "remaining_18": remaining_18.to_string()
        }),
        reasoning: format!(
            "{} periods use {} months; {} months remain of {} and {} of {}",
            periods.len(),
            total_months,
            remaining_12,
            rules.standard_cap_months,
            remaining_18,
            rules.extended_cap_months
        ),
    };

    Ok(ParentalUsageResult {
        per_period,
        total_months,
        remaining_12,
        remaining_18,
        total_split: MonthsAndDays::from_months(total_months, rules.days_per_month),
        warnings,
        audit_step,
    })
}
