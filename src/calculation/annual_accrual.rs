//! Annual leave accrual calculation.
//!
//! This module computes the annual leave an employee is entitled to on a
//! reference date from their hire date, employment type and weekly hours.
//!
//! # Rules
//!
//! - First year of service: one day per completed month, at most 11 days.
//! - From one full year: 15 days.
//! - From the third year: one additional day every two years, at most 25 days.
//! - Part-time employees working under the full-time week receive the
//!   full-time figure prorated by their weekly hours, rounded down.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AnnualLeaveRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmploymentProfile};

use super::calendar::{add_months, months_between, out_of_calendar};

/// What the employee accrues next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum AccrualOutlook {
    /// Still within the first year of service.
    FirstYear {
        /// Days accrued so far under the monthly rule.
        months_accrued: u32,
        /// The date the first full year is completed and the base days accrue.
        full_accrual_date: NaiveDate,
    },
    /// Tenured and below the ceiling.
    Tenured {
        /// The service year at which the next additional day accrues.
        next_increase_year: u32,
        /// The full-time entitlement from that year.
        next_total_days: Decimal,
    },
    /// The entitlement has reached the ceiling.
    AtCap,
}

/// The result of an annual leave accrual calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Completed years of service.
    pub service_years: u32,
    /// Completed months of service.
    pub service_months: u32,
    /// Days from the base rule (monthly accrual in the first year).
    pub base_days: Decimal,
    /// Additional days for long service, after the ceiling.
    pub additional_days: Decimal,
    /// Entitlement for a full-time employee with the same service.
    pub full_time_days: Decimal,
    /// Weekly hours over full-time hours, when proration applied.
    pub proration_ratio: Option<Decimal>,
    /// The entitlement.
    pub total_days: Decimal,
    /// What accrues next.
    pub outlook: AccrualOutlook,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Additional days for long service before the ceiling is applied.
fn additional_days_for(service_years: u32, rules: &AnnualLeaveRules) -> u32 {
    if service_years >= rules.additional_days_from_year {
        (service_years - 1)
            .checked_div(rules.additional_day_interval_years)
            .unwrap_or(0)
    } else {
        0
    }
}

/// Rejects rules that [`calculate_annual_accrual`] would divide by.
fn check_divisors(rules: &AnnualLeaveRules) -> EngineResult<()> {
    let message = if rules.additional_day_interval_years == 0 {
        "additional_day_interval_years must be positive"
    } else if rules.full_time_weekly_hours <= Decimal::ZERO {
        "full_time_weekly_hours must be positive"
    } else {
        return Ok(());
    };
    Err(EngineError::ConfigParseError {
        path: "annual".to_string(),
        message: message.to_string(),
    })
}

/// Full-time entitlement for a number of completed service years and months.
///
/// Exposed separately from [`calculate_annual_accrual`] so the step function
/// can be inspected without building a profile.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::full_time_entitlement;
/// use leave_engine::config::LeaveRules;
/// use rust_decimal::Decimal;
///
/// let rules = LeaveRules::statutory();
/// assert_eq!(full_time_entitlement(0, 5, &rules.annual), Decimal::from(5));
/// assert_eq!(full_time_entitlement(5, 60, &rules.annual), Decimal::from(17));
/// assert_eq!(full_time_entitlement(30, 360, &rules.annual), Decimal::from(25));
/// ```
pub fn full_time_entitlement(
    service_years: u32,
    service_months: u32,
    rules: &AnnualLeaveRules,
) -> Decimal {
    if service_years == 0 {
        return Decimal::from(service_months.min(rules.first_year_monthly_cap));
    }
    let days = (rules.base_days + additional_days_for(service_years, rules)).min(rules.max_days);
    Decimal::from(days)
}

/// Calculates the annual leave entitlement for an employment profile.
///
/// # Arguments
///
/// * `profile` - Hire date, reference date, employment type and weekly hours
/// * `rules` - The annual leave constants
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// - `InvalidRange` if the hire date is after the reference date
/// - `ConfigParseError` if the rules would divide by zero (a zero
///   additional-day interval or zero full-time hours)
/// - `InvalidInput` (`hire_date`) if the first anniversary falls past the
///   last representable date
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::calculate_annual_accrual;
/// use leave_engine::config::LeaveRules;
/// use leave_engine::models::{EmploymentProfile, EmploymentType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = LeaveRules::statutory();
/// let profile = EmploymentProfile {
///     hire_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     reference_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     employment_type: EmploymentType::FullTime,
///     weekly_hours: None,
/// };
///
/// let result = calculate_annual_accrual(&profile, &rules.annual, 1).unwrap();
/// assert_eq!(result.service_years, 5);
/// assert_eq!(result.total_days, Decimal::from(17));
/// ```
pub fn calculate_annual_accrual(
    profile: &EmploymentProfile,
    rules: &AnnualLeaveRules,
    step_number: u32,
) -> EngineResult<AccrualResult> {
    profile.validate()?;
    check_divisors(rules)?;

    let service_months = months_between(profile.hire_date, profile.reference_date).max(0) as u32;
    let service_years = service_months / 12;

    let full_time_days = full_time_entitlement(service_years, service_months, rules);
    let (base_days, additional_days) = if service_years == 0 {
        (full_time_days, Decimal::ZERO)
    } else {
        let base = Decimal::from(rules.base_days);
        (base, full_time_days - base)
    };

    let full_time_hours = rules.full_time_weekly_hours;
    let weekly_hours = profile.effective_weekly_hours(full_time_hours);
    let prorated = profile.is_part_time() && weekly_hours < full_time_hours;

    let (total_days, proration_ratio) = if prorated {
        let total = (full_time_days * weekly_hours / full_time_hours).floor();
        (total, Some(weekly_hours / full_time_hours))
    } else {
        (full_time_days, None)
    };

    let outlook = if service_years == 0 {
        AccrualOutlook::FirstYear {
            months_accrued: service_months.min(rules.first_year_monthly_cap),
            full_accrual_date: add_months(profile.hire_date, 12)
                .ok_or_else(|| out_of_calendar("hire_date", profile.hire_date))?,
        }
    } else if full_time_days < Decimal::from(rules.max_days) {
        let interval = rules.additional_day_interval_years;
        let next_increase_year = (service_years - (service_years - 1) % interval)
            .saturating_add(interval)
            .max(rules.additional_days_from_year);
        AccrualOutlook::Tenured {
            next_increase_year,
            next_total_days: full_time_entitlement(
                next_increase_year,
                next_increase_year.saturating_mul(12),
                rules,
            ),
        }
    } else {
        AccrualOutlook::AtCap
    };

    let (rule_clause, mut reasoning) = if service_years == 0 {
        (
            rules.first_year_clause.as_str(),
            format!(
                "{} completed months in the first year: 1 day per month, capped at {} = {} days",
                service_months, rules.first_year_monthly_cap, full_time_days
            ),
        )
    } else {
        (
            rules.clause.as_str(),
            format!(
                "{} years of service: {} base days + {} additional days = {} days",
                service_years, base_days, additional_days, full_time_days
            ),
        )
    };
    if let Some(ratio) = proration_ratio {
        reasoning.push_str(&format!(
            "; part-time {}h/{}h: floor({} x {}) = {} days",
            weekly_hours.normalize(),
            full_time_hours.normalize(),
            full_time_days,
            ratio.normalize(),
            total_days
        ));
    }

    let clause_ref = if prorated {
        format!("{}; {}", rule_clause, rules.part_time_clause)
    } else {
        rule_clause.to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "annual_accrual".to_string(),
        rule_name: "Annual Leave Accrual".to_string(),
        clause_ref,
        input: serde_json::json!({
            "hire_date": profile.hire_date.to_string(),
            "reference_date": profile.reference_date.to_string(),
            "employment_type": profile.employment_type.to_string(),
            "weekly_hours": weekly_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "service_years": service_years,
            "service_months": service_months,
            "full_time_days": full_time_days.to_string(),
            "total_days": total_days.to_string(),
            "prorated": prorated
        }),
        reasoning,
    };

    Ok(AccrualResult {
        service_years,
        service_months,
        base_days,
        additional_days,
        full_time_days,
        proration_ratio,
        total_days,
        outlook,
        audit_step,
    })
}
