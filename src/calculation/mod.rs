//! Calculation logic for the Leave Entitlement Engine.
//!
//! This module contains the pure calculation functions: calendar arithmetic,
//! annual leave accrual, the usage ledger, parental leave period overlap
//! detection, fractional month durations, vacation planning and the
//! remaining parental leave simulation.

mod annual_accrual;
mod calendar;
mod fractional_duration;
mod parental_simulation;
mod period_overlap;
mod usage_ledger;
mod vacation_planner;

pub use annual_accrual::{
    AccrualOutlook, AccrualResult, calculate_annual_accrual, full_time_entitlement,
};
pub use calendar::{
    add_months, add_working_days, count_working_days, days_between, is_weekend,
    month_length_from, months_between,
};
pub use fractional_duration::{
    FractionalMonths, MONTH_PRECISION, MonthsAndDays, ParentalUsageResult, PeriodUsage,
    calculate_parental_usage, fractional_months, truncate_months,
};
pub use parental_simulation::{ParentalSimulation, simulate_parental_remaining};
pub use period_overlap::{OverlapResult, detect_period_overlap};
pub use usage_ledger::{UsageLedgerResult, calculate_usage_ledger};
pub use vacation_planner::{VacationPlan, plan_vacation};
