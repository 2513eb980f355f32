//! Configuration types for leave calculations.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! compiled-in statutory defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the jurisdiction whose rules are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short identifying code (e.g., "KR-LSA").
    pub code: String,
    /// The human-readable name of the governing legislation.
    pub name: String,
    /// The version or effective date of the rules.
    pub version: String,
    /// URL to the official legislation text.
    pub source_url: String,
}

/// Thresholds splitting the utilization percentage into bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationThresholds {
    /// Usage percentage from which the balance is only moderate.
    pub moderate_from_percent: Decimal,
    /// Usage percentage from which the balance is low.
    pub low_from_percent: Decimal,
}

/// Annual leave accrual constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveRules {
    /// Clause for the tenured accrual rule.
    pub clause: String,
    /// Clause for the first-year monthly accrual rule.
    pub first_year_clause: String,
    /// Clause for the part-time proration rule.
    pub part_time_clause: String,
    /// Maximum days accrued during the first year (one per completed month).
    pub first_year_monthly_cap: u32,
    /// Days granted from the first full year of service.
    pub base_days: u32,
    /// Service year from which additional days start.
    pub additional_days_from_year: u32,
    /// Additional days accrue once per this many years of service.
    pub additional_day_interval_years: u32,
    /// Ceiling on the total entitlement.
    pub max_days: u32,
    /// Weekly hours of a full-time employee.
    pub full_time_weekly_hours: Decimal,
    /// Utilization band thresholds for the usage ledger.
    pub utilization: UtilizationThresholds,
}

/// Parental leave constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalLeaveRules {
    /// Clause for the leave duration caps.
    pub clause: String,
    /// The standard cap in months.
    pub standard_cap_months: Decimal,
    /// The extended cap in months.
    pub extended_cap_months: Decimal,
    /// Maximum number of periods the leave may be split into.
    pub max_splits: usize,
    /// Clause for the split limit.
    pub split_clause: String,
    /// Days per month when converting a month fraction to days.
    pub days_per_month: u32,
}

/// The complete rule set used by every calculation.
///
/// # Example
///
/// ```
/// use leave_engine::config::LeaveRules;
///
/// let rules = LeaveRules::statutory();
/// assert_eq!(rules.annual.base_days, 15);
/// assert_eq!(rules.annual.max_days, 25);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRules {
    /// Jurisdiction metadata.
    pub metadata: JurisdictionMetadata,
    /// Annual leave constants.
    pub annual: AnnualLeaveRules,
    /// Parental leave constants.
    pub parental: ParentalLeaveRules,
}

impl LeaveRules {
    /// Returns the statutory rules compiled into the crate.
    ///
    /// These match the files under `config/kr_labor_standards`.
    pub fn statutory() -> Self {
        Self {
            metadata: JurisdictionMetadata {
                code: "KR-LSA".to_string(),
                name: "Labor Standards Act and Equal Employment Opportunity Act (Republic of Korea)"
                    .to_string(),
                version: "2025-02-23".to_string(),
                source_url:
                    "https://www.law.go.kr/LSW/eng/engLsSc.do?menuId=2&query=labor+standards+act"
                        .to_string(),
            },
            annual: AnnualLeaveRules {
                clause: "60(1), 60(4)".to_string(),
                first_year_clause: "60(2)".to_string(),
                part_time_clause: "18(3), Enforcement Decree Table 2".to_string(),
                first_year_monthly_cap: 11,
                base_days: 15,
                additional_days_from_year: 3,
                additional_day_interval_years: 2,
                max_days: 25,
                full_time_weekly_hours: Decimal::from(40),
                utilization: UtilizationThresholds {
                    moderate_from_percent: Decimal::from(50),
                    low_from_percent: Decimal::from(80),
                },
            },
            parental: ParentalLeaveRules {
                clause: "19(2)".to_string(),
                standard_cap_months: Decimal::from(12),
                extended_cap_months: Decimal::from(18),
                max_splits: 3,
                split_clause: "19-4(1)".to_string(),
                days_per_month: 30,
            },
        }
    }

    /// Checks the rules for internal consistency.
    ///
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        let annual = &self.annual;
        if annual.max_days < annual.base_days {
            return Err(format!(
                "max_days ({}) is below base_days ({})",
                annual.max_days, annual.base_days
            ));
        }
        if annual.additional_day_interval_years == 0 {
            return Err("additional_day_interval_years must be positive".to_string());
        }
        if annual.full_time_weekly_hours <= Decimal::ZERO {
            return Err("full_time_weekly_hours must be positive".to_string());
        }
        if annual.utilization.low_from_percent < annual.utilization.moderate_from_percent {
            return Err("utilization.low_from_percent is below moderate_from_percent".to_string());
        }

        let parental = &self.parental;
        if parental.standard_cap_months <= Decimal::ZERO {
            return Err("standard_cap_months must be positive".to_string());
        }
        if parental.extended_cap_months < parental.standard_cap_months {
            return Err("extended_cap_months is below standard_cap_months".to_string());
        }
        if parental.max_splits == 0 {
            return Err("max_splits must be positive".to_string());
        }
        if parental.days_per_month == 0 {
            return Err("days_per_month must be positive".to_string());
        }

        Ok(())
    }
}

impl Default for LeaveRules {
    fn default() -> Self {
        Self::statutory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statutory_rules_are_valid() {
        assert_eq!(LeaveRules::statutory().validate(), Ok(()));
    }

    #[test]
    fn test_default_is_statutory() {
        assert_eq!(LeaveRules::default(), LeaveRules::statutory());
    }

    #[test]
    fn test_max_below_base_is_rejected() {
        let mut rules = LeaveRules::statutory();
        rules.annual.max_days = 10;
        let err = rules.validate().unwrap_err();
        assert!(err.contains("max_days"));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let mut rules = LeaveRules::statutory();
        rules.annual.additional_day_interval_years = 0;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_extended_cap_below_standard_is_rejected() {
        let mut rules = LeaveRules::statutory();
        rules.parental.extended_cap_months = Decimal::from(6);
        let err = rules.validate().unwrap_err();
        assert!(err.contains("extended_cap_months"));
    }

    #[test]
    fn test_inverted_utilization_thresholds_are_rejected() {
        let mut rules = LeaveRules::statutory();
        rules.annual.utilization.low_from_percent = Decimal::from(40);
        assert!(rules.validate().is_err());
    }
}
