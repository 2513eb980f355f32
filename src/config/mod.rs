//! Configuration loading and management for the Leave Entitlement Engine.
//!
//! This module provides the statutory leave rules, either compiled in via
//! [`LeaveRules::statutory`] or loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr_labor_standards").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnnualLeaveRules, JurisdictionMetadata, LeaveRules, ParentalLeaveRules, UtilizationThresholds,
};
