//! Export records for saving and restoring a calculation.
//!
//! An export mirrors the form inputs plus the last computed results as a
//! flat serde record. Decimal values serialize as strings, so month values
//! such as `2.193` come back with the same scale.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::calculation::{AccrualResult, ParentalUsageResult, UsageLedgerResult};
use crate::error::{EngineError, EngineResult};

use super::{EmploymentProfile, EmploymentType, RawPeriod, RawUsageEntry, UsageEntry};

/// Which calculator produced an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// Annual leave accrual and usage.
    AnnualLeave,
    /// Parental leave usage.
    ParentalLeave,
}

impl std::fmt::Display for CalculationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationType::AnnualLeave => write!(f, "annual_leave"),
            CalculationType::ParentalLeave => write!(f, "parental_leave"),
        }
    }
}

fn parse_record<T: DeserializeOwned>(json: &str) -> EngineResult<T> {
    serde_json::from_str(json).map_err(|e| EngineError::ImportError {
        message: e.to_string(),
    })
}

fn expect_type(found: CalculationType, expected: CalculationType) -> EngineResult<()> {
    if found != expected {
        return Err(EngineError::ImportError {
            message: format!("expected a {} record, found {}", expected, found),
        });
    }
    Ok(())
}

/// A saved annual leave calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveExport {
    /// Always [`CalculationType::AnnualLeave`] for a valid record.
    pub calculation_type: CalculationType,
    /// Unique identifier of this export.
    pub export_id: Uuid,
    /// When the export was created.
    pub calculated_at: DateTime<Utc>,
    /// Hire date as entered.
    pub hire_date: NaiveDate,
    /// Reference date as entered.
    pub reference_date: NaiveDate,
    /// Employment type as entered.
    pub employment_type: EmploymentType,
    /// Weekly hours as entered.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
    /// Completed service years from the last accrual calculation.
    #[serde(default)]
    pub service_years: Option<u32>,
    /// Entitlement from the last accrual calculation.
    #[serde(default)]
    pub total_days: Option<Decimal>,
    /// Validated usage entries from the last ledger calculation.
    #[serde(default)]
    pub usage_entries: Vec<UsageEntry>,
    /// Used days from the last ledger calculation.
    #[serde(default)]
    pub used_days: Option<Decimal>,
    /// Remaining days from the last ledger calculation.
    #[serde(default)]
    pub remaining_days: Option<Decimal>,
}

/// Inputs restored from an [`AnnualLeaveExport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualLeaveInputs {
    /// The validated employment profile.
    pub profile: EmploymentProfile,
    /// Usage rows to put back on the form.
    pub usage_entries: Vec<RawUsageEntry>,
    /// The last computed entitlement, if any.
    pub total_days: Option<Decimal>,
}

impl AnnualLeaveExport {
    /// Creates a record from a profile and whichever results exist.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{AnnualLeaveExport, EmploymentProfile, EmploymentType};
    /// use chrono::NaiveDate;
    ///
    /// let profile = EmploymentProfile::new(
    ///     NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
    ///     EmploymentType::FullTime,
    ///     None,
    /// )
    /// .unwrap();
    ///
    /// let export = AnnualLeaveExport::new(&profile, None, None);
    /// let json = serde_json::to_string(&export).unwrap();
    /// assert!(json.contains("\"calculation_type\":\"annual_leave\""));
    ///
    /// let inputs = AnnualLeaveExport::from_json(&json).unwrap().into_inputs().unwrap();
    /// assert_eq!(inputs.profile, profile);
    /// ```
    pub fn new(
        profile: &EmploymentProfile,
        accrual: Option<&AccrualResult>,
        ledger: Option<&UsageLedgerResult>,
    ) -> Self {
        Self {
            calculation_type: CalculationType::AnnualLeave,
            export_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            hire_date: profile.hire_date,
            reference_date: profile.reference_date,
            employment_type: profile.employment_type,
            weekly_hours: profile.weekly_hours,
            service_years: accrual.map(|a| a.service_years),
            total_days: accrual.map(|a| a.total_days),
            usage_entries: ledger.map(|l| l.entries.clone()).unwrap_or_default(),
            used_days: ledger.map(|l| l.used_days),
            remaining_days: ledger.map(|l| l.remaining_days),
        }
    }

    /// Parses a record from JSON, failing with `ImportError`.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        parse_record(json)
    }

    /// Converts the record back into validated inputs.
    ///
    /// # Errors
    ///
    /// - `ImportError` if the record is not an annual leave record
    /// - `InvalidRange` if the hire date is after the reference date
    pub fn into_inputs(self) -> EngineResult<AnnualLeaveInputs> {
        expect_type(self.calculation_type, CalculationType::AnnualLeave)?;
        let profile = EmploymentProfile::new(
            self.hire_date,
            self.reference_date,
            self.employment_type,
            self.weekly_hours,
        )?;
        Ok(AnnualLeaveInputs {
            profile,
            usage_entries: self.usage_entries.into_iter().map(Into::into).collect(),
            total_days: self.total_days,
        })
    }
}

/// One exported parental leave period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPeriod {
    /// 1-based position on the form.
    pub sequence: usize,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
}

/// A saved parental leave calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalLeaveExport {
    /// Always [`CalculationType::ParentalLeave`] for a valid record.
    pub calculation_type: CalculationType,
    /// Unique identifier of this export.
    pub export_id: Uuid,
    /// When the export was created.
    pub calculated_at: DateTime<Utc>,
    /// Periods with both dates entered.
    pub periods: Vec<ExportedPeriod>,
    /// Total months from the last usage calculation.
    #[serde(default)]
    pub total_used_months: Option<Decimal>,
}

/// Inputs restored from a [`ParentalLeaveExport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentalLeaveInputs {
    /// Period rows in sequence order.
    pub periods: Vec<RawPeriod>,
    /// The last computed total, if any.
    pub total_used_months: Option<Decimal>,
}

impl ParentalLeaveExport {
    /// Creates a record from the period rows and the last usage result.
    ///
    /// Rows missing a date are left out.
    pub fn new(periods: &[RawPeriod], usage: Option<&ParentalUsageResult>) -> Self {
        let periods = periods
            .iter()
            .enumerate()
            .filter_map(|(position, row)| {
                Some(ExportedPeriod {
                    sequence: position + 1,
                    start_date: row.start?,
                    end_date: row.end?,
                })
            })
            .collect();

        Self {
            calculation_type: CalculationType::ParentalLeave,
            export_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            periods,
            total_used_months: usage.map(|u| u.total_months),
        }
    }

    /// Parses a record from JSON, failing with `ImportError`.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        parse_record(json)
    }

    /// Converts the record back into period rows.
    ///
    /// Rows are returned as entered; range validation happens when they are
    /// calculated, as for rows typed into the form.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if the record is not a parental leave record.
    pub fn into_inputs(mut self) -> EngineResult<ParentalLeaveInputs> {
        expect_type(self.calculation_type, CalculationType::ParentalLeave)?;
        self.periods.sort_by_key(|p| p.sequence);
        Ok(ParentalLeaveInputs {
            periods: self
                .periods
                .iter()
                .map(|p| RawPeriod::new(p.start_date, p.end_date))
                .collect(),
            total_used_months: self.total_used_months,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate_parental_usage, calculate_usage_ledger};
    use crate::config::LeaveRules;
    use crate::models::ParentalPeriod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn part_time_profile() -> EmploymentProfile {
        EmploymentProfile::new(
            date(2021, 4, 1),
            date(2024, 4, 1),
            EmploymentType::PartTime,
            Some(dec("24.5")),
        )
        .unwrap()
    }

    #[test]
    fn test_annual_export_round_trip() {
        let rules = LeaveRules::statutory();
        let profile = part_time_profile();
        let entries = vec![
            RawUsageEntry::new(date(2024, 5, 2), dec("0.5"), "dentist"),
            RawUsageEntry::new(date(2024, 4, 10), dec("2"), ""),
        ];
        let ledger = calculate_usage_ledger(dec("9"), &entries, &rules.annual, 1).unwrap();

        let export = AnnualLeaveExport::new(&profile, None, Some(&ledger));
        let json = serde_json::to_string(&export).unwrap();
        let restored = AnnualLeaveExport::from_json(&json).unwrap();
        assert_eq!(restored, export);

        let inputs = restored.into_inputs().unwrap();
        assert_eq!(inputs.profile, profile);
        assert_eq!(inputs.usage_entries.len(), 2);
        assert_eq!(inputs.usage_entries[0].days, Some(dec("2")));
        assert_eq!(inputs.usage_entries[0].memo.as_deref(), Some("No reason given"));
    }

    #[test]
    fn test_decimals_serialize_as_strings() {
        let export = AnnualLeaveExport::new(&part_time_profile(), None, None);
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["weekly_hours"], "24.5");
        assert_eq!(json["calculation_type"], "annual_leave");
    }

    #[test]
    fn test_parental_export_keeps_month_scale() {
        let rules = LeaveRules::statutory();
        let rows = vec![
            RawPeriod::new(date(2024, 1, 15), date(2024, 3, 20)),
            RawPeriod {
                start: Some(date(2024, 6, 1)),
                end: None,
            },
            RawPeriod::new(date(2024, 7, 1), date(2024, 7, 31)),
        ];
        let periods = vec![
            ParentalPeriod::new(1, date(2024, 1, 15), date(2024, 3, 20)).unwrap(),
            ParentalPeriod::new(3, date(2024, 7, 1), date(2024, 7, 31)).unwrap(),
        ];
        let usage = calculate_parental_usage(&periods, &rules.parental, 1).unwrap();

        let export = ParentalLeaveExport::new(&rows, Some(&usage));
        let sequences: Vec<usize> = export.periods.iter().map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![1, 3]);

        let json = serde_json::to_string(&export).unwrap();
        assert!(json.contains("\"total_used_months\":\"3.193\""));

        let inputs = ParentalLeaveExport::from_json(&json)
            .unwrap()
            .into_inputs()
            .unwrap();
        assert_eq!(inputs.total_used_months, Some(dec("3.193")));
        assert_eq!(inputs.periods.len(), 2);
        assert_eq!(inputs.periods[1], rows[2]);
    }

    #[test]
    fn test_wrong_calculation_type_is_rejected() {
        let export = ParentalLeaveExport::new(&[], None);
        let json = serde_json::to_string(&export).unwrap();

        let result = AnnualLeaveExport::from_json(&json);
        assert!(matches!(result, Err(EngineError::ImportError { .. })));

        let mut annual = AnnualLeaveExport::new(&part_time_profile(), None, None);
        annual.calculation_type = CalculationType::ParentalLeave;
        let result = annual.into_inputs();
        assert!(matches!(result, Err(EngineError::ImportError { .. })));
    }

    #[test]
    fn test_malformed_json_is_import_error() {
        let result = ParentalLeaveExport::from_json("{not json");
        assert!(matches!(result, Err(EngineError::ImportError { .. })));
    }

    #[test]
    fn test_inverted_profile_fails_import() {
        let mut export = AnnualLeaveExport::new(&part_time_profile(), None, None);
        export.hire_date = date(2030, 1, 1);
        assert!(matches!(
            export.into_inputs(),
            Err(EngineError::InvalidRange { .. })
        ));
    }
}
