use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A backend API endpoint registered for periodic health checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredEndpoint {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub method: String,
    pub expected_status: u16,
    pub is_active: bool,
    /// Most recent check result, if any check has run yet.
    pub last_check: Option<EndpointCheck>,
}

/// One health-check result. Immutable once created; the backend keeps an
/// append-only history per endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointCheck {
    pub id: i64,
    pub endpoint_id: i64,
    pub status_code: Option<u16>,
    pub response_time_ms: Option<f64>,
    pub success: bool,
    pub error_message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Down,
    Timeout,
    UnexpectedStatus,
    Slow,
    Error,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Down => "down",
            AlertType::Timeout => "timeout",
            AlertType::UnexpectedStatus => "unexpected_status",
            AlertType::Slow => "slow",
            AlertType::Error => "error",
        }
    }
}

/// An alert raised by the backend for a failing endpoint. The only mutation
/// the client can apply is resolving it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub endpoint_id: i64,
    pub alert_type: AlertType,
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    /// Snapshot of the check that triggered the alert.
    pub check: Option<EndpointCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorStats {
    pub total_endpoints: i64,
    pub active_endpoints: i64,
    pub healthy_endpoints: i64,
    pub failing_endpoints: i64,
    pub open_alerts: i64,
    pub avg_response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEndpoint {
    pub name: String,
    pub url: String,
    pub method: String,
    pub expected_status: u16,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Outcome of an endpoint auto-discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub discovered: i64,
    pub created: i64,
}
