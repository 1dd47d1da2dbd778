//! Sidebar permissions matrix: `/api/roles/sidebar-matrix/`.

use crate::client::{ApiClient, ApiError};
use crate::models::roles::{RolePermissionUpdate, SidebarMatrix};

pub async fn get_sidebar_matrix(client: &ApiClient) -> Result<SidebarMatrix, ApiError> {
    client.get_json("/api/roles/sidebar-matrix/").await
}

/// Apply a set of per-role permission changes. Callers are expected to send
/// the minimal diff computed by
/// [`MatrixGrid::diff`](crate::models::roles::MatrixGrid::diff), not the
/// whole grid.
pub async fn update_sidebar_matrix(
    client: &ApiClient,
    updates: &[RolePermissionUpdate],
) -> Result<SidebarMatrix, ApiError> {
    client
        .post_json(
            "/api/roles/sidebar-matrix/update/",
            &serde_json::json!({ "roles": updates }),
        )
        .await
}
