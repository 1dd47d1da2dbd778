//! API endpoint monitoring: `/api/admin-tools/*`.

use crate::client::{ApiClient, ApiError};
use crate::models::monitor::{
    Alert, DiscoveryResult, EndpointCheck, EndpointUpdate, MonitorStats, MonitoredEndpoint,
    NewEndpoint,
};

pub async fn get_stats(client: &ApiClient) -> Result<MonitorStats, ApiError> {
    client.get_json("/api/admin-tools/stats/").await
}

pub async fn list_endpoints(client: &ApiClient) -> Result<Vec<MonitoredEndpoint>, ApiError> {
    client.get_json("/api/admin-tools/endpoints/").await
}

pub async fn create_endpoint(
    client: &ApiClient,
    payload: &NewEndpoint,
) -> Result<MonitoredEndpoint, ApiError> {
    client.post_json("/api/admin-tools/endpoints/", payload).await
}

pub async fn update_endpoint(
    client: &ApiClient,
    id: i64,
    payload: &EndpointUpdate,
) -> Result<MonitoredEndpoint, ApiError> {
    client
        .patch_json(&format!("/api/admin-tools/endpoints/{id}/"), payload)
        .await
}

pub async fn delete_endpoint(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/admin-tools/endpoints/{id}/")).await
}

/// Trigger an immediate check of one endpoint and return its result.
pub async fn test_endpoint(client: &ApiClient, id: i64) -> Result<EndpointCheck, ApiError> {
    client
        .post_empty(&format!("/api/admin-tools/endpoints/{id}/test/"))
        .await
}

/// Ask the backend to scan its URL table and register anything unmonitored.
pub async fn discover_endpoints(client: &ApiClient) -> Result<DiscoveryResult, ApiError> {
    client.post_empty("/api/admin-tools/endpoints/discover/").await
}

pub async fn list_checks(
    client: &ApiClient,
    endpoint_id: Option<i64>,
    limit: Option<u32>,
) -> Result<Vec<EndpointCheck>, ApiError> {
    let mut params = Vec::new();
    if let Some(id) = endpoint_id {
        params.push(format!("endpoint={id}"));
    }
    if let Some(limit) = limit {
        params.push(format!("limit={limit}"));
    }
    let mut path = String::from("/api/admin-tools/checks/");
    if !params.is_empty() {
        path.push('?');
        path.push_str(&params.join("&"));
    }
    client.get_json(&path).await
}

pub async fn list_alerts(
    client: &ApiClient,
    include_resolved: bool,
) -> Result<Vec<Alert>, ApiError> {
    let path = if include_resolved {
        "/api/admin-tools/alerts/".to_string()
    } else {
        "/api/admin-tools/alerts/?resolved=false".to_string()
    };
    client.get_json(&path).await
}

pub async fn resolve_alert(client: &ApiClient, id: i64) -> Result<Alert, ApiError> {
    client
        .post_empty(&format!("/api/admin-tools/alerts/{id}/resolve/"))
        .await
}
