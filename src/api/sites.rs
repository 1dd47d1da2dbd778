//! Uptime monitoring of whole sites: `/api/monitor/sites/*`.

use crate::client::{ApiClient, ApiError};
use crate::models::site::{MonitoredSite, NewSite, SiteUpdate};

pub async fn list_sites(client: &ApiClient) -> Result<Vec<MonitoredSite>, ApiError> {
    client.get_json("/api/monitor/sites/").await
}

pub async fn create_site(client: &ApiClient, payload: &NewSite) -> Result<MonitoredSite, ApiError> {
    client.post_json("/api/monitor/sites/", payload).await
}

pub async fn update_site(
    client: &ApiClient,
    id: i64,
    payload: &SiteUpdate,
) -> Result<MonitoredSite, ApiError> {
    client
        .patch_json(&format!("/api/monitor/sites/{id}/"), payload)
        .await
}

pub async fn delete_site(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/monitor/sites/{id}/")).await
}

/// Trigger an immediate re-check. Callers render the `checking` tri-state
/// while this future is in flight; the returned site carries the fresh
/// up/down status.
pub async fn check_site(client: &ApiClient, id: i64) -> Result<MonitoredSite, ApiError> {
    client
        .post_empty(&format!("/api/monitor/sites/{id}/check/"))
        .await
}
