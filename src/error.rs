//! Error types for the Leave Entitlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during leave calculations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Leave Entitlement Engine.
///
/// Every failure is recoverable: the caller decides how to present it
/// (for example as a toast next to the offending form field).
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::MissingInput {
///     field: "hire_date".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required input: hire_date");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or is inconsistent.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A start date (or hire date) falls after its end date (or reference date).
    #[error("Invalid date range for {context}: {start} is after {end}")]
    InvalidRange {
        /// What the range describes (e.g. "employment", "period 2").
        context: String,
        /// The start of the range.
        start: NaiveDate,
        /// The end of the range.
        end: NaiveDate,
    },

    /// A required input was absent.
    #[error("Missing required input: {field}")]
    MissingInput {
        /// The name of the missing field.
        field: String,
    },

    /// An input was present but unusable (e.g. a non-positive day count).
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A single usage entry exceeds the whole entitlement.
    #[error("Usage entry {position} ({days} days) exceeds the entitlement of {total_days} days")]
    ExceedsEntitlement {
        /// 1-based position of the entry as entered.
        position: usize,
        /// Days recorded on the entry.
        days: Decimal,
        /// The entitlement the entry was checked against.
        total_days: Decimal,
    },

    /// The sum of all usage entries exceeds the entitlement.
    #[error("Total used leave ({used_days} days) exceeds the entitlement of {total_days} days")]
    LedgerOverflow {
        /// Sum of all valid entries.
        used_days: Decimal,
        /// The entitlement the sum was checked against.
        total_days: Decimal,
    },

    /// Two leave periods overlap.
    #[error("Periods {first} and {second} overlap")]
    Overlap {
        /// 1-based index of the earlier-starting period.
        first: usize,
        /// 1-based index of the later-starting period.
        second: usize,
    },

    /// A plan requests more days than remain.
    #[error("Requested {requested_days} days exceeds the remaining balance of {remaining_days} days")]
    InsufficientBalance {
        /// Days requested by the plan.
        requested_days: Decimal,
        /// Days remaining before the plan.
        remaining_days: Decimal,
    },

    /// An export record could not be turned back into inputs.
    #[error("Failed to import record: {message}")]
    ImportError {
        /// A description of the import failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
