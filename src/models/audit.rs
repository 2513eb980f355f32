//! Audit models for the Leave Entitlement Engine.
//!
//! Every core calculation records an [`AuditStep`] describing the rule it
//! applied, so the presentation layer can explain a result without
//! recomputing it.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use leave_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "annual_accrual".to_string(),
///     rule_name: "Annual Leave Accrual".to_string(),
///     clause_ref: "60(1), 60(4)".to_string(),
///     input: serde_json::json!({"service_years": 5}),
///     output: serde_json::json!({"total_days": "17"}),
///     reasoning: "15 base days + 2 additional days = 17 days".to_string(),
/// };
/// assert_eq!(step.rule_id, "annual_accrual");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory clause for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation
/// but should be shown to the user (e.g. more leave splits than the law allows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trail of a multi-step request.
///
/// # Example
///
/// ```
/// use leave_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "usage_ledger".to_string(),
            rule_name: "Usage Ledger".to_string(),
            clause_ref: "60(1), 60(4)".to_string(),
            input: serde_json::json!({"total_days": "15"}),
            output: serde_json::json!({"used_days": "4.5"}),
            reasoning: "4.5 of 15 days used".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":3"));
        assert!(json.contains("\"rule_id\":\"usage_ledger\""));

        let back: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "SPLIT_LIMIT_EXCEEDED".to_string(),
            message: "Period 4 exceeds the statutory split limit of 3".to_string(),
            severity: "medium".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"SPLIT_LIMIT_EXCEEDED\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }
}
