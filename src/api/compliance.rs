//! Compliance frameworks and controls: `/api/compliance/*`. Everything here
//! is read-only except the per-framework enabled flag.

use crate::client::{ApiClient, ApiError};
use crate::models::compliance::{Control, ControlStatus, Framework, FrameworkUpdate, Severity};

#[derive(Debug, Clone, Default)]
pub struct ControlFilter {
    pub framework: Option<String>,
    pub status: Option<ControlStatus>,
    pub severity: Option<Severity>,
}

impl ControlFilter {
    fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(framework) = &self.framework {
            params.push(format!("framework={}", urlencoding::encode(framework)));
        }
        if let Some(status) = self.status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(severity) = self.severity {
            params.push(format!("severity={}", severity.as_str()));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

pub async fn list_frameworks(client: &ApiClient) -> Result<Vec<Framework>, ApiError> {
    client.get_json("/api/compliance/frameworks/").await
}

pub async fn list_controls(
    client: &ApiClient,
    filter: &ControlFilter,
) -> Result<Vec<Control>, ApiError> {
    let path = format!("/api/compliance/controls/{}", filter.to_query());
    client.get_json(&path).await
}

pub async fn update_framework(
    client: &ApiClient,
    id: i64,
    update: &FrameworkUpdate,
) -> Result<Framework, ApiError> {
    client
        .patch_json(&format!("/api/compliance/frameworks/{id}/update/"), update)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_no_query_string() {
        assert_eq!(ControlFilter::default().to_query(), "");
    }

    #[test]
    fn filter_values_are_percent_encoded() {
        let filter = ControlFilter {
            framework: Some("ISO 27001".into()),
            status: Some(ControlStatus::Fail),
            severity: None,
        };
        assert_eq!(filter.to_query(), "?framework=ISO%2027001&status=fail");
    }
}
