//! Employment profile model and related types.
//!
//! This module defines the [`EmploymentProfile`] struct and [`EmploymentType`]
//! enum describing the worker whose annual leave is calculated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment (the reference week).
    FullTime,
    /// Part-time employment (entitlement prorated by weekly hours).
    PartTime,
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentType::FullTime => write!(f, "full_time"),
            EmploymentType::PartTime => write!(f, "part_time"),
        }
    }
}

/// Represents the employment facts annual leave accrual depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentProfile {
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// The date on which the entitlement is evaluated.
    pub reference_date: NaiveDate,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// Contracted weekly hours. Only meaningful for part-time employees.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
}

impl EmploymentProfile {
    /// Creates a profile, rejecting a hire date after the reference date.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{EmploymentProfile, EmploymentType};
    /// use chrono::NaiveDate;
    ///
    /// let profile = EmploymentProfile::new(
    ///     NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
    ///     NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
    ///     EmploymentType::FullTime,
    ///     None,
    /// );
    /// assert!(profile.is_ok());
    ///
    /// let inverted = EmploymentProfile::new(
    ///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ///     NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
    ///     EmploymentType::FullTime,
    ///     None,
    /// );
    /// assert!(inverted.is_err());
    /// ```
    pub fn new(
        hire_date: NaiveDate,
        reference_date: NaiveDate,
        employment_type: EmploymentType,
        weekly_hours: Option<Decimal>,
    ) -> EngineResult<Self> {
        let profile = Self {
            hire_date,
            reference_date,
            employment_type,
            weekly_hours,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Checks that the hire date does not fall after the reference date.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hire_date > self.reference_date {
            return Err(EngineError::InvalidRange {
                context: "employment".to_string(),
                start: self.hire_date,
                end: self.reference_date,
            });
        }
        Ok(())
    }

    /// Returns true if the employee works part-time.
    pub fn is_part_time(&self) -> bool {
        self.employment_type == EmploymentType::PartTime
    }

    /// Returns the weekly hours to prorate against.
    ///
    /// Absent or non-positive hours fall back to `full_time_hours`, as do
    /// all full-time employees.
    pub fn effective_weekly_hours(&self, full_time_hours: Decimal) -> Decimal {
        match (self.employment_type, self.weekly_hours) {
            (EmploymentType::PartTime, Some(hours)) if hours > Decimal::ZERO => hours,
            _ => full_time_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_profile(employment_type: EmploymentType, hours: Option<Decimal>) -> EmploymentProfile {
        EmploymentProfile {
            hire_date: date(2020, 3, 1),
            reference_date: date(2024, 3, 1),
            employment_type,
            weekly_hours: hours,
        }
    }

    #[test]
    fn test_deserialize_part_time_profile() {
        let json = r#"{
            "hire_date": "2020-03-01",
            "reference_date": "2024-03-01",
            "employment_type": "part_time",
            "weekly_hours": "20"
        }"#;

        let profile: EmploymentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.employment_type, EmploymentType::PartTime);
        assert_eq!(profile.weekly_hours, Some(Decimal::from(20)));
    }

    #[test]
    fn test_deserialize_without_weekly_hours() {
        let json = r#"{
            "hire_date": "2020-03-01",
            "reference_date": "2024-03-01",
            "employment_type": "full_time"
        }"#;

        let profile: EmploymentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.employment_type, EmploymentType::FullTime);
        assert_eq!(profile.weekly_hours, None);
    }

    #[test]
    fn test_new_rejects_hire_after_reference() {
        let result = EmploymentProfile::new(
            date(2024, 3, 2),
            date(2024, 3, 1),
            EmploymentType::FullTime,
            None,
        );
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn test_new_accepts_same_day() {
        let result = EmploymentProfile::new(
            date(2024, 3, 1),
            date(2024, 3, 1),
            EmploymentType::FullTime,
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_effective_hours_for_part_time() {
        let profile = create_test_profile(EmploymentType::PartTime, Some(Decimal::from(20)));
        assert_eq!(profile.effective_weekly_hours(Decimal::from(40)), Decimal::from(20));
    }

    #[test]
    fn test_effective_hours_default_when_missing_or_zero() {
        let missing = create_test_profile(EmploymentType::PartTime, None);
        assert_eq!(missing.effective_weekly_hours(Decimal::from(40)), Decimal::from(40));

        let zero = create_test_profile(EmploymentType::PartTime, Some(Decimal::ZERO));
        assert_eq!(zero.effective_weekly_hours(Decimal::from(40)), Decimal::from(40));
    }

    #[test]
    fn test_full_time_ignores_weekly_hours() {
        let profile = create_test_profile(EmploymentType::FullTime, Some(Decimal::from(20)));
        assert_eq!(profile.effective_weekly_hours(Decimal::from(40)), Decimal::from(40));
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"full_time\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::PartTime).unwrap(),
            "\"part_time\""
        );
    }
}
