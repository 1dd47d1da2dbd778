use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Pass,
    Fail,
    Partial,
    NotEvaluated,
}

impl ControlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlStatus::Pass => "pass",
            ControlStatus::Fail => "fail",
            ControlStatus::Partial => "partial",
            ControlStatus::NotEvaluated => "not_evaluated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// A compliance framework with its aggregate evaluation scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Framework {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: String,
    pub enabled: bool,
    pub compliance_percentage: f64,
    pub controls_total: i64,
    pub controls_passed: i64,
    pub controls_failed: i64,
    pub controls_partial: i64,
    pub controls_not_evaluated: i64,
    pub last_audit_at: Option<DateTime<Utc>>,
    pub next_audit_at: Option<DateTime<Utc>>,
}

/// A single control. Read-only from the client's perspective; evaluation
/// happens on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub id: i64,
    pub control_id: String,
    pub name: String,
    pub description: String,
    pub frameworks: Vec<String>,
    pub status: ControlStatus,
    pub severity: Severity,
    pub evaluation_method: Option<String>,
    pub evaluated_by: Option<String>,
    pub failure_reason: Option<String>,
    pub failing_asset_count: Option<i64>,
    pub remediation: Option<String>,
}

/// PATCH payload for `/api/compliance/frameworks/{id}/update/`. Only the
/// enabled flag is writable from this client.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworkUpdate {
    pub enabled: bool,
}
