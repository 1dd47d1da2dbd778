use clap::Subcommand;

use super::output::{print_json, print_table};
use crate::api::roles;
use crate::client::{ApiClient, ApiError};
use crate::models::roles::{MatrixGrid, SidebarMatrix};

#[derive(Subcommand, Debug)]
pub enum RolesCommand {
    /// Print the sidebar permissions matrix
    Matrix,
    /// Grant a sidebar item to a role
    Grant { role_id: i64, code: String },
    /// Revoke a sidebar item from a role
    Revoke { role_id: i64, code: String },
    /// Apply a batch of grants and revokes as one update
    Apply {
        /// Grant an item, as ROLE_ID:CODE (repeatable)
        #[arg(long = "grant", value_name = "ROLE_ID:CODE")]
        grants: Vec<String>,
        /// Revoke an item, as ROLE_ID:CODE (repeatable)
        #[arg(long = "revoke", value_name = "ROLE_ID:CODE")]
        revokes: Vec<String>,
    },
}

pub async fn run(client: &ApiClient, command: RolesCommand, json: bool) -> Result<(), ApiError> {
    match command {
        RolesCommand::Matrix => {
            let matrix = roles::get_sidebar_matrix(client).await?;
            if json {
                return print_json(&matrix);
            }
            let grid = MatrixGrid::from_matrix(&matrix);
            let mut headers = vec!["item"];
            for role in &matrix.roles {
                headers.push(role.role_name.as_str());
            }
            let rows: Vec<Vec<String>> = matrix
                .items
                .iter()
                .map(|item| {
                    let mut row = vec![format!("{} ({})", item.label, item.code)];
                    for role in &matrix.roles {
                        row.push(
                            if grid.is_granted(role.role_id, &item.code) { "x" } else { "." }
                                .to_string(),
                        );
                    }
                    row
                })
                .collect();
            print_table(&headers, &rows);
        }
        RolesCommand::Grant { role_id, code } => {
            apply_changes(client, &[(role_id, code, true)], json).await?;
        }
        RolesCommand::Revoke { role_id, code } => {
            apply_changes(client, &[(role_id, code, false)], json).await?;
        }
        RolesCommand::Apply { grants, revokes } => {
            let mut changes = Vec::new();
            for value in &grants {
                let (role_id, code) = parse_change(value)?;
                changes.push((role_id, code.to_string(), true));
            }
            for value in &revokes {
                let (role_id, code) = parse_change(value)?;
                changes.push((role_id, code.to_string(), false));
            }
            if changes.is_empty() {
                return Err(ApiError::Config(
                    "nothing to apply; pass --grant and/or --revoke".to_string(),
                ));
            }
            apply_changes(client, &changes, json).await?;
        }
    }
    Ok(())
}

/// One requested cell change, as `ROLE_ID:CODE`.
fn parse_change(value: &str) -> Result<(i64, &str), ApiError> {
    let (role, code) = value
        .split_once(':')
        .ok_or_else(|| ApiError::Config(format!("invalid change '{value}' (expected ROLE_ID:CODE)")))?;
    let role_id = role
        .parse()
        .map_err(|_| ApiError::Config(format!("invalid role id in '{value}'")))?;
    if code.is_empty() {
        return Err(ApiError::Config(format!(
            "missing sidebar item code in '{value}'"
        )));
    }
    Ok((role_id, code))
}

/// Both sides of every change must exist in the fetched matrix; a grant to an
/// unknown role would otherwise vanish from the diff without any error.
fn validate_target(matrix: &SidebarMatrix, role_id: i64, code: &str) -> Result<(), ApiError> {
    if !matrix.roles.iter().any(|role| role.role_id == role_id) {
        return Err(ApiError::Config(format!("unknown role id {role_id}")));
    }
    if !matrix.items.iter().any(|item| item.code == code) {
        return Err(ApiError::Config(format!("unknown sidebar item '{code}'")));
    }
    Ok(())
}

/// Fetch the matrix, apply the requested cell changes and send only the
/// resulting diff. When the grid already has the requested state the backend
/// is not contacted a second time.
async fn apply_changes(
    client: &ApiClient,
    changes: &[(i64, String, bool)],
    json: bool,
) -> Result<(), ApiError> {
    let matrix = roles::get_sidebar_matrix(client).await?;
    let mut grid = MatrixGrid::from_matrix(&matrix);
    for (role_id, code, granted) in changes {
        validate_target(&matrix, *role_id, code)?;
        grid.set(*role_id, code, *granted);
    }

    let updates = grid.diff(&matrix);
    if updates.is_empty() {
        println!("No change: the matrix already has the requested state.");
        return Ok(());
    }
    let updated = roles::update_sidebar_matrix(client, &updates).await?;
    if json {
        return print_json(&updated);
    }
    println!(
        "Applied {} change(s) across {} role(s).",
        changes.len(),
        updates.len()
    );
    Ok(())
}
