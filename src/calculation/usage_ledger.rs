//! Annual leave usage ledger.
//!
//! This module validates recorded leave usage against an entitlement and
//! produces the used and remaining balances with a utilization band.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AnnualLeaveRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, RawUsageEntry, UsageEntry, UtilizationBand};

/// The result of aggregating usage entries against an entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedgerResult {
    /// The entitlement the entries were checked against.
    pub total_days: Decimal,
    /// Sum of all valid entries.
    pub used_days: Decimal,
    /// `total_days - used_days`, never negative.
    pub remaining_days: Decimal,
    /// `used_days / total_days x 100`.
    pub utilization_percent: Decimal,
    /// Classification of the utilization percentage.
    pub utilization_band: UtilizationBand,
    /// Valid entries sorted by date, ties kept in entry order.
    pub entries: Vec<UsageEntry>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Validates usage entries and computes the remaining balance.
///
/// Rows without a date or with a non-positive day count are ignored. The
/// remaining rows are validated in entry order and the first failure is
/// returned.
///
/// # Arguments
///
/// * `total_days` - The entitlement from the accrual calculation
/// * `entries` - Usage rows as entered; not modified
/// * `rules` - The annual leave constants (utilization thresholds)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// - `MissingInput` if `total_days` is not positive (no entitlement computed yet)
/// - `ExceedsEntitlement` for the first row whose days exceed `total_days`
/// - `LedgerOverflow` if the rows together exceed `total_days`
/// - `InvalidInput` (`entries`) if the rows cannot be totalled in a `Decimal`
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_usage_ledger;
/// use leave_engine::config::LeaveRules;
/// use leave_engine::models::{RawUsageEntry, UtilizationBand};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rules = LeaveRules::statutory();
/// let entries = vec![
///     RawUsageEntry::new(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), Decimal::from(3), "trip"),
///     RawUsageEntry::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), Decimal::new(5, 1), ""),
/// ];
///
/// let result = calculate_usage_ledger(Decimal::from(15), &entries, &rules.annual, 1).unwrap();
/// assert_eq!(result.used_days, Decimal::new(35, 1));
/// assert_eq!(result.remaining_days, Decimal::new(115, 1));
/// assert_eq!(result.utilization_band, UtilizationBand::Ample);
/// assert_eq!(result.entries[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// ```
pub fn calculate_usage_ledger(
    total_days: Decimal,
    entries: &[RawUsageEntry],
    rules: &AnnualLeaveRules,
    step_number: u32,
) -> EngineResult<UsageLedgerResult> {
    if total_days <= Decimal::ZERO {
        return Err(EngineError::MissingInput {
            field: "total_days".to_string(),
        });
    }

    let mut valid: Vec<UsageEntry> = Vec::with_capacity(entries.len());
    for (position, raw) in entries.iter().enumerate() {
        let Some(entry) = raw.to_entry() else {
            continue;
        };
        if entry.days > total_days {
            return Err(EngineError::ExceedsEntitlement {
                position: position + 1,
                days: entry.days,
                total_days,
            });
        }
        valid.push(entry);
    }

    let used_days = valid
        .iter()
        .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.days))
        .ok_or_else(|| EngineError::InvalidInput {
            field: "entries".to_string(),
            message: "the recorded days are too large to total".to_string(),
        })?;
    if used_days > total_days {
        return Err(EngineError::LedgerOverflow {
            used_days,
            total_days,
        });
    }

    let remaining_days = total_days - used_days;
    let utilization_percent = used_days / total_days * Decimal::ONE_HUNDRED;
    let utilization_band = UtilizationBand::classify(
        utilization_percent,
        rules.utilization.moderate_from_percent,
        rules.utilization.low_from_percent,
    );

    valid.sort_by_key(|e| e.date);

    let audit_step = AuditStep {
        step_number,
        rule_id: "usage_ledger".to_string(),
        rule_name: "Annual Leave Usage Ledger".to_string(),
        clause_ref: rules.clause.clone(),
        input: serde_json::json!({
            "total_days": total_days.normalize().to_string(),
            "rows": entries.len(),
            "valid_entries": valid.len()
        }),
        output: serde_json::json!({
            "used_days": used_days.normalize().to_string(),
            "remaining_days": remaining_days.normalize().to_string(),
            "utilization_band": utilization_band.to_string()
        }),
        reasoning: format!(
            "{} of {} days used across {} entries, {} days remaining ({})",
            used_days.normalize(),
            total_days.normalize(),
            valid.len(),
            remaining_days.normalize(),
            utilization_band
        ),
    };

    Ok(UsageLedgerResult {
        total_days,
        used_days,
        remaining_days,
        utilization_percent,
        utilization_band,
        entries: valid,
        audit_step,
    })
}
