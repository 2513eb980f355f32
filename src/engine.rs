//! Application layer for the Leave Entitlement Engine.
//!
//! [`LeaveEngine`] is what a form front end calls. It turns raw field values
//! into validated inputs, sequences the calculation functions, logs each
//! request with a correlation id and notifies an optional
//! [`CalculationObserver`]. The functions in [`crate::calculation`] stay pure
//! and never see the observer.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    AccrualResult, OverlapResult, ParentalSimulation, ParentalUsageResult, UsageLedgerResult,
    VacationPlan, calculate_annual_accrual, calculate_parental_usage, calculate_usage_ledger,
    detect_period_overlap, plan_vacation, simulate_parental_remaining,
};
use crate::config::{ConfigLoader, LeaveRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, EmploymentProfile, ParentalPeriod, RawPeriod, RawUsageEntry};

/// The kind of request an engine call served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    /// [`LeaveEngine::annual_accrual`].
    AnnualAccrual,
    /// [`LeaveEngine::usage_ledger`].
    UsageLedger,
    /// [`LeaveEngine::annual_leave`].
    AnnualLeave,
    /// [`LeaveEngine::parental_usage`].
    ParentalUsage,
    /// [`LeaveEngine::simulate_parental`].
    ParentalSimulation,
    /// [`LeaveEngine::plan_vacation`].
    VacationPlan,
}

impl std::fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationKind::AnnualAccrual => write!(f, "annual_accrual"),
            CalculationKind::UsageLedger => write!(f, "usage_ledger"),
            CalculationKind::AnnualLeave => write!(f, "annual_leave"),
            CalculationKind::ParentalUsage => write!(f, "parental_usage"),
            CalculationKind::ParentalSimulation => write!(f, "parental_simulation"),
            CalculationKind::VacationPlan => write!(f, "vacation_plan"),
        }
    }
}

/// Reported to the observer after every calculation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationEvent {
    /// The id the request was logged under.
    pub correlation_id: Uuid,
    /// What was calculated.
    pub kind: CalculationKind,
    /// Time spent in the calculation, in microseconds.
    pub duration_us: u64,
    /// The failure, if the request failed.
    pub error: Option<EngineError>,
}

impl CalculationEvent {
    /// Whether the request produced a result.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Receives an event for every calculation request, e.g. for analytics.
pub trait CalculationObserver: Send + Sync {
    /// Called once per request, after logging.
    fn on_calculation(&self, event: &CalculationEvent);
}

/// Accrual plus ledger for one annual leave form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveReport {
    /// Correlation id of the request.
    pub calculation_id: Uuid,
    /// The entitlement.
    pub accrual: AccrualResult,
    /// Usage against the entitlement; `None` while nothing has accrued.
    pub ledger: Option<UsageLedgerResult>,
    /// Steps of both calculations in order.
    pub audit_trace: AuditTrace,
}

/// Entry point for the presentation layer.
///
/// Cheap to clone; the rules are shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use leave_engine::engine::LeaveEngine;
/// use leave_engine::models::{EmploymentProfile, EmploymentType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let engine = LeaveEngine::statutory();
/// let profile = EmploymentProfile::new(
///     NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
///     EmploymentType::FullTime,
///     None,
/// )
/// .unwrap();
///
/// let accrual = engine.annual_accrual(&profile).unwrap();
/// assert_eq!(accrual.total_days, Decimal::from(5));
/// ```
#[derive(Clone)]
pub struct LeaveEngine {
    rules: Arc<LeaveRules>,
    observer: Option<Arc<dyn CalculationObserver>>,
}

impl std::fmt::Debug for LeaveEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaveEngine")
            .field("jurisdiction", &self.rules.metadata.code)
            .field("version", &self.rules.metadata.version)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl LeaveEngine {
    /// Creates an engine over the given rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` if the rules fail [`LeaveRules::validate`].
    pub fn new(rules: LeaveRules) -> EngineResult<Self> {
        rules
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: format!("<{}>", rules.metadata.code),
                message,
            })?;
        Ok(Self::with_rules(rules))
    }

    /// Creates an engine over the compiled-in statutory rules.
    pub fn statutory() -> Self {
        Self::with_rules(LeaveRules::statutory())
    }

    fn with_rules(rules: LeaveRules) -> Self {
        Self {
            rules: Arc::new(rules),
            observer: None,
        }
    }

    /// Creates an engine over rules loaded from a configuration directory.
    ///
    /// The loader has already validated the rules.
    pub fn from_config(loader: ConfigLoader) -> Self {
        let rules = loader.into_rules();
        info!(
            jurisdiction = %rules.metadata.code,
            version = %rules.metadata.version,
            "Leave rules loaded"
        );
        Self::with_rules(rules)
    }

    /// Attaches an observer notified after every calculation request.
    pub fn with_observer(mut self, observer: Arc<dyn CalculationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The rules in use.
    pub fn rules(&self) -> &LeaveRules {
        &self.rules
    }

    /// Calculates the annual leave entitlement.
    pub fn annual_accrual(&self, profile: &EmploymentProfile) -> EngineResult<AccrualResult> {
        let correlation_id = Uuid::new_v4();
        debug!(
            correlation_id = %correlation_id,
            hire_date = %profile.hire_date,
            reference_date = %profile.reference_date,
            employment_type = %profile.employment_type,
            "Processing annual accrual request"
        );

        let start_time = Instant::now();
        let result = calculate_annual_accrual(profile, &self.rules.annual, 1);
        let duration_us = start_time.elapsed().as_micros() as u64;

        if let Ok(accrual) = &result {
            info!(
                correlation_id = %correlation_id,
                service_years = accrual.service_years,
                service_months = accrual.service_months,
                total_days = %accrual.total_days,
                duration_us,
                "Annual accrual completed"
            );
        }
        self.finish(CalculationKind::AnnualAccrual, correlation_id, duration_us, &result);
        result
    }

    /// Checks usage rows against an entitlement.
    pub fn usage_ledger(
        &self,
        total_days: Decimal,
        entries: &[RawUsageEntry],
    ) -> EngineResult<UsageLedgerResult> {
        let correlation_id = Uuid::new_v4();
        debug!(
            correlation_id = %correlation_id,
            total_days = %total_days,
            rows = entries.len(),
            "Processing usage ledger request"
        );

        let start_time = Instant::now();
        let result = calculate_usage_ledger(total_days, entries, &self.rules.annual, 1);
        let duration_us = start_time.elapsed().as_micros() as u64;

        if let Ok(ledger) = &result {
            info!(
                correlation_id = %correlation_id,
                used_days = %ledger.used_days,
                remaining_days = %ledger.remaining_days,
                utilization_band = %ledger.utilization_band,
                duration_us,
                "Usage ledger completed"
            );
        }
        self.finish(CalculationKind::UsageLedger, correlation_id, duration_us, &result);
        result
    }

    /// Calculates the entitlement and then the ledger against it.
    ///
    /// The ledger is skipped while the entitlement is zero (the first month
    /// of service), since there is nothing to draw usage from yet.
    pub fn annual_leave(
        &self,
        profile: &EmploymentProfile,
        entries: &[RawUsageEntry],
    ) -> EngineResult<AnnualLeaveReport> {
        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            rows = entries.len(),
            "Processing annual leave request"
        );

        let start_time = Instant::now();
        let result = self.run_annual_leave(correlation_id, profile, entries, start_time);
        let duration_us = start_time.elapsed().as_micros() as u64;

        if let Ok(report) = &result {
            info!(
                correlation_id = %correlation_id,
                total_days = %report.accrual.total_days,
                remaining_days = ?report.ledger.as_ref().map(|l| l.remaining_days),
                steps = report.audit_trace.steps.len(),
                duration_us,
                "Annual leave calculation completed"
            );
        }
        self.finish(CalculationKind::AnnualLeave, correlation_id, duration_us, &result);
        result
    }

    fn run_annual_leave(
        &self,
        correlation_id: Uuid,
        profile: &EmploymentProfile,
        entries: &[RawUsageEntry],
        start_time: Instant,
    ) -> EngineResult<AnnualLeaveReport> {
        let mut steps = Vec::new();
        let mut step_number: u32 = 1;

        let accrual = calculate_annual_accrual(profile, &self.rules.annual, step_number)?;
        steps.push(accrual.audit_step.clone());
        step_number += 1;

        let ledger = if accrual.total_days > Decimal::ZERO {
            let ledger =
                calculate_usage_ledger(accrual.total_days, entries, &self.rules.annual, step_number)?;
            steps.push(ledger.audit_step.clone());
            Some(ledger)
        } else {
            None
        };

        Ok(AnnualLeaveReport {
            calculation_id: correlation_id,
            accrual,
            ledger,
            audit_trace: AuditTrace {
                steps,
                warnings: Vec::new(),
                duration_us: start_time.elapsed().as_micros() as u64,
            },
        })
    }

    /// Real-time overlap check while periods are being entered.
    ///
    /// Incomplete rows and rows whose start falls after their end are
    /// skipped rather than reported.
    pub fn check_overlap(&self, rows: &[RawPeriod]) -> OverlapResult {
        let periods: Vec<ParentalPeriod> = rows
            .iter()
            .enumerate()
            .filter_map(|(position, row)| row.to_period(position + 1)?.ok())
            .collect();
        let result = detect_period_overlap(&periods);
        debug!(
            periods = periods.len(),
            has_overlap = result.has_overlap,
            "Overlap check"
        );
        result
    }

    /// Measures parental leave usage from the period rows on the form.
    ///
    /// Rows missing either date are skipped.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` for the first row whose start falls after its end
    /// - `MissingInput` if no complete row remains
    /// - `Overlap` naming the first conflicting pair
    pub fn parental_usage(&self, rows: &[RawPeriod]) -> EngineResult<ParentalUsageResult> {
        let correlation_id = Uuid::new_v4();
        debug!(
            correlation_id = %correlation_id,
            rows = rows.len(),
            complete_rows = rows.iter().filter(|row| row.is_complete()).count(),
            "Processing parental usage request"
        );

        let start_time = Instant::now();
        let result = self.measure_parental(rows);
        let duration_us = start_time.elapsed().as_micros() as u64;

        if let Ok(usage) = &result {
            info!(
                correlation_id = %correlation_id,
                periods = usage.per_period.len(),
                total_months = %usage.total_months,
                remaining_12 = %usage.remaining_12,
                remaining_18 = %usage.remaining_18,
                duration_us,
                "Parental usage completed"
            );
            for warning in &usage.warnings {
                warn!(
                    correlation_id = %correlation_id,
                    code = %warning.code,
                    "{}",
                    warning.message
                );
            }
        }
        self.finish(CalculationKind::ParentalUsage, correlation_id, duration_us, &result);
        result
    }

    fn measure_parental(&self, rows: &[RawPeriod]) -> EngineResult<ParentalUsageResult> {
        let mut periods = Vec::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            if let Some(period) = row.to_period(position + 1) {
                periods.push(period?);
            }
        }

        if periods.is_empty() {
            return Err(EngineError::MissingInput {
                field: "periods".to_string(),
            });
        }

        if let Some((first, second)) = detect_period_overlap(&periods).first_conflict {
            return Err(EngineError::Overlap { first, second });
        }

        calculate_parental_usage(&periods, &self.rules.parental, 1)
    }

    /// Projects the remaining parental leave from a resumption date.
    pub fn simulate_parental(
        &self,
        total_used_months: Decimal,
        start_date: Option<NaiveDate>,
    ) -> EngineResult<ParentalSimulation> {
        let correlation_id = Uuid::new_v4();
        let start_time = Instant::now();
        let result = simulate_parental_remaining(total_used_months, start_date, &self.rules.parental);
        let duration_us = start_time.elapsed().as_micros() as u64;

        if let Ok(simulation) = &result {
            info!(
                correlation_id = %correlation_id,
                start_date = %simulation.start_date,
                within_12 = ?simulation.within_12,
                within_18 = ?simulation.within_18,
                duration_us,
                "Parental simulation completed"
            );
        }
        self.finish(
            CalculationKind::ParentalSimulation,
            correlation_id,
            duration_us,
            &result,
        );
        result
    }

    /// Plans a vacation against the remaining balance.
    pub fn plan_vacation(
        &self,
        remaining_days: Decimal,
        start_date: Option<NaiveDate>,
        requested_days: Decimal,
    ) -> EngineResult<VacationPlan> {
        let correlation_id = Uuid::new_v4();
        let start_time = Instant::now();
        let result = plan_vacation(remaining_days, start_date, requested_days, 1);
        let duration_us = start_time.elapsed().as_micros() as u64;

        if let Ok(plan) = &result {
            info!(
                correlation_id = %correlation_id,
                start_date = %plan.start_date,
                end_date = %plan.end_date,
                requested_days = %plan.requested_days,
                remaining_after = %plan.remaining_after,
                duration_us,
                "Vacation plan completed"
            );
        }
        self.finish(CalculationKind::VacationPlan, correlation_id, duration_us, &result);
        result
    }

    /// Logs a failure and notifies the observer.
    fn finish<T>(
        &self,
        kind: CalculationKind,
        correlation_id: Uuid,
        duration_us: u64,
        result: &EngineResult<T>,
    ) {
        if let Err(err) = result {
            warn!(
                correlation_id = %correlation_id,
                calculation = %kind,
                error = %err,
                "Calculation failed"
            );
        }

        if let Some(observer) = &self.observer {
            observer.on_calculation(&CalculationEvent {
                correlation_id,
                kind,
                duration_us,
                error: result.as_ref().err().cloned(),
            });
        }
    }
}
