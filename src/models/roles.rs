//! Sidebar permissions matrix and the diffing applied before an update is
//! sent. The backend receives only the roles whose permission sets actually
//! changed, never the full grid.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One sidebar entry that can be granted to a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarItem {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissions {
    pub role_id: i64,
    pub role_name: String,
    pub permissions: Vec<String>,
}

/// `GET /api/roles/sidebar-matrix/` response: the catalogue of sidebar items
/// plus, per role, the permission codes currently granted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarMatrix {
    pub items: Vec<SidebarItem>,
    pub roles: Vec<RolePermissions>,
}

/// Per-role payload for `POST /api/roles/sidebar-matrix/update/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionUpdate {
    pub role_id: i64,
    pub permissions: Vec<String>,
}

/// Editable checkbox-grid state built from a fetched matrix.
#[derive(Debug, Clone)]
pub struct MatrixGrid {
    granted: BTreeMap<i64, BTreeSet<String>>,
}

impl MatrixGrid {
    pub fn from_matrix(matrix: &SidebarMatrix) -> Self {
        let granted = matrix
            .roles
            .iter()
            .map(|role| {
                (
                    role.role_id,
                    role.permissions.iter().cloned().collect::<BTreeSet<_>>(),
                )
            })
            .collect();
        Self { granted }
    }

    pub fn is_granted(&self, role_id: i64, code: &str) -> bool {
        self.granted
            .get(&role_id)
            .is_some_and(|codes| codes.contains(code))
    }

    pub fn set(&mut self, role_id: i64, code: &str, granted: bool) {
        let codes = self.granted.entry(role_id).or_default();
        if granted {
            codes.insert(code.to_string());
        } else {
            codes.remove(code);
        }
    }

    /// Flip one cell and return its new state.
    pub fn toggle(&mut self, role_id: i64, code: &str) -> bool {
        let granted = !self.is_granted(role_id, code);
        self.set(role_id, code, granted);
        granted
    }

    /// Compute the update payload against the matrix the grid was built
    /// from. Only roles whose permission sets differ are included, each with
    /// its complete new permission list in sorted order.
    pub fn diff(&self, baseline: &SidebarMatrix) -> Vec<RolePermissionUpdate> {
        let mut updates = Vec::new();
        for role in &baseline.roles {
            let before: BTreeSet<String> = role.permissions.iter().cloned().collect();
            let after = self.granted.get(&role.role_id).cloned().unwrap_or_default();
            if before != after {
                updates.push(RolePermissionUpdate {
                    role_id: role.role_id,
                    permissions: after.into_iter().collect(),
                });
            }
        }
        updates
    }
}
