//! Annual leave usage models.
//!
//! This module contains the raw form rows ([`RawUsageEntry`]), the validated
//! [`UsageEntry`] records and the [`UtilizationBand`] classification.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Memo recorded when the user left the memo field empty.
pub const DEFAULT_MEMO: &str = "No reason given";

/// One usage row exactly as entered on the form.
///
/// Fields that were left blank or failed to parse are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUsageEntry {
    /// The day leave was taken.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Days of leave taken (half days allowed).
    #[serde(default)]
    pub days: Option<Decimal>,
    /// Optional free-text memo.
    #[serde(default)]
    pub memo: Option<String>,
}

impl RawUsageEntry {
    /// Creates a row with all fields present.
    pub fn new(date: NaiveDate, days: Decimal, memo: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            days: Some(days),
            memo: Some(memo.into()),
        }
    }

    /// Returns the validated entry if the row has a date and a positive day
    /// count, or `None` if the row should be ignored.
    pub fn to_entry(&self) -> Option<UsageEntry> {
        let date = self.date?;
        let days = self.days.filter(|d| *d > Decimal::ZERO)?;
        let memo = match self.memo.as_deref().map(str::trim) {
            Some(memo) if !memo.is_empty() => memo.to_string(),
            _ => DEFAULT_MEMO.to_string(),
        };
        Some(UsageEntry { date, days, memo })
    }
}

/// A validated usage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// The day leave was taken.
    pub date: NaiveDate,
    /// Days of leave taken, always positive.
    pub days: Decimal,
    /// Free-text memo.
    pub memo: String,
}

impl From<UsageEntry> for RawUsageEntry {
    fn from(entry: UsageEntry) -> Self {
        RawUsageEntry::new(entry.date, entry.days, entry.memo)
    }
}

/// Qualitative classification of the used/total leave ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    /// Nothing used yet.
    None,
    /// Less than half used.
    Ample,
    /// Between half and the low threshold used.
    Moderate,
    /// Most of the entitlement used.
    Low,
    /// Entitlement fully used.
    Exhausted,
}

impl UtilizationBand {
    /// Classifies a usage percentage.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::UtilizationBand;
    /// use rust_decimal::Decimal;
    ///
    /// let moderate = Decimal::from(50);
    /// let low = Decimal::from(80);
    ///
    /// assert_eq!(UtilizationBand::classify(Decimal::ZERO, moderate, low), UtilizationBand::None);
    /// assert_eq!(UtilizationBand::classify(Decimal::from(49), moderate, low), UtilizationBand::Ample);
    /// assert_eq!(UtilizationBand::classify(Decimal::from(50), moderate, low), UtilizationBand::Moderate);
    /// assert_eq!(UtilizationBand::classify(Decimal::from(80), moderate, low), UtilizationBand::Low);
    /// assert_eq!(UtilizationBand::classify(Decimal::from(100), moderate, low), UtilizationBand::Exhausted);
    /// ```
    pub fn classify(percent: Decimal, moderate_from: Decimal, low_from: Decimal) -> Self {
        let hundred = Decimal::ONE_HUNDRED;
        if percent <= Decimal::ZERO {
            UtilizationBand::None
        } else if percent < moderate_from {
            UtilizationBand::Ample
        } else if percent < low_from {
            UtilizationBand::Moderate
        } else if percent < hundred {
            UtilizationBand::Low
        } else {
            UtilizationBand::Exhausted
        }
    }
}

impl std::fmt::Display for UtilizationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UtilizationBand::None => write!(f, "none"),
            UtilizationBand::Ample => write!(f, "ample"),
            UtilizationBand::Moderate => write!(f, "moderate"),
            UtilizationBand::Low => write!(f, "low"),
            UtilizationBand::Exhausted => write!(f, "exhausted"),
        }
    }
}
