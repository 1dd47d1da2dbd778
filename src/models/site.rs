use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Site availability as shown to the user. The backend only ever reports
/// `up` or `down`; `checking` is derived client-side while a re-check is in
/// flight and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Up,
    Down,
    Checking,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Up => "up",
            SiteStatus::Down => "down",
            SiteStatus::Checking => "checking",
        }
    }
}

/// A website monitored for uptime and SSL validity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredSite {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub status: SiteStatus,
    pub uptime_percentage: f64,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub response_time_ms: Option<f64>,
    pub ssl_valid: Option<bool>,
    pub ssl_expires_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSite {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
