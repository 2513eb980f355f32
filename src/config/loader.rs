//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! rules from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AnnualLeaveRules, JurisdictionMetadata, LeaveRules, ParentalLeaveRules};

/// Loads and provides access to leave rules.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kr_labor_standards/
/// ├── rules.yaml            # Jurisdiction metadata
/// ├── annual_leave.yaml     # Annual leave accrual constants
/// └── parental_leave.yaml   # Parental leave caps and split limit
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kr_labor_standards").unwrap();
/// println!("Loaded rules: {}", loader.metadata().name);
/// println!("Base days: {}", loader.rules().annual.base_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: LeaveRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or the loaded constants are inconsistent with each other.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use leave_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/kr_labor_standards")?;
    /// # Ok::<(), leave_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("rules.yaml"))?;

        let annual_path = path.join("annual_leave.yaml");
        let annual = Self::load_yaml::<AnnualLeaveRules>(&annual_path)?;

        let parental_path = path.join("parental_leave.yaml");
        let parental = Self::load_yaml::<ParentalLeaveRules>(&parental_path)?;

        let rules = LeaveRules {
            metadata,
            annual,
            parental,
        };

        rules
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message,
            })?;

        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &LeaveRules {
        &self.rules
    }

    /// Consumes the loader, returning the loaded rules.
    pub fn into_rules(self) -> LeaveRules {
        self.rules
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.rules.metadata
    }
}
