//! Core data models for the Leave Entitlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod export;
mod interval;
mod usage;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{EmploymentProfile, EmploymentType};
pub use export::{
    AnnualLeaveExport, AnnualLeaveInputs, CalculationType, ExportedPeriod, ParentalLeaveExport,
    ParentalLeaveInputs,
};
pub use interval::{DateInterval, ParentalPeriod, RawPeriod};
pub use usage::{DEFAULT_MEMO, RawUsageEntry, UsageEntry, UtilizationBand};
