use clap::Subcommand;

use super::output::{fmt_opt, fmt_time, print_json, print_table, yes_no};
use crate::api::compliance::{self, ControlFilter};
use crate::client::{ApiClient, ApiError};
use crate::models::compliance::{ControlStatus, FrameworkUpdate, Severity};

#[derive(Subcommand, Debug)]
pub enum ComplianceCommand {
    /// List frameworks with their aggregate scores
    Frameworks,
    /// List controls, optionally filtered
    Controls {
        #[arg(long)]
        framework: Option<String>,
        /// pass, fail, partial or not_evaluated
        #[arg(long)]
        status: Option<String>,
        /// critical, high, medium or low
        #[arg(long)]
        severity: Option<String>,
    },
    /// Enable evaluation for a framework
    Enable { id: i64 },
    /// Disable evaluation for a framework
    Disable { id: i64 },
}

fn parse_status(value: &str) -> Result<ControlStatus, ApiError> {
    match value {
        "pass" => Ok(ControlStatus::Pass),
        "fail" => Ok(ControlStatus::Fail),
        "partial" => Ok(ControlStatus::Partial),
        "not_evaluated" => Ok(ControlStatus::NotEvaluated),
        other => Err(ApiError::Config(format!(
            "unknown control status '{other}' (expected pass, fail, partial or not_evaluated)"
        ))),
    }
}

fn parse_severity(value: &str) -> Result<Severity, ApiError> {
    match value {
        "critical" => Ok(Severity::Critical),
        "high" => Ok(Severity::High),
        "medium" => Ok(Severity::Medium),
        "low" => Ok(Severity::Low),
        other => Err(ApiError::Config(format!(
            "unknown severity '{other}' (expected critical, high, medium or low)"
        ))),
    }
}

pub async fn run(
    client: &ApiClient,
    command: ComplianceCommand,
    json: bool,
) -> Result<(), ApiError> {
    match command {
        ComplianceCommand::Frameworks => {
            let frameworks = compliance::list_frameworks(client).await?;
            if json {
                return print_json(&frameworks);
            }
            let rows: Vec<Vec<String>> = frameworks
                .iter()
                .map(|f| {
                    vec![
                        f.id.to_string(),
                        f.code.clone(),
                        f.category.clone(),
                        yes_no(f.enabled).to_string(),
                        format!("{:.1}%", f.compliance_percentage),
                        format!(
                            "{}/{} pass, {} fail",
                            f.controls_passed, f.controls_total, f.controls_failed
                        ),
                        fmt_time(f.last_audit_at),
                    ]
                })
                .collect();
            print_table(
                &["id", "code", "category", "enabled", "score", "controls", "last audit"],
                &rows,
            );
        }
        ComplianceCommand::Controls {
            framework,
            status,
            severity,
        } => {
            let filter = ControlFilter {
                framework,
                status: status.as_deref().map(parse_status).transpose()?,
                severity: severity.as_deref().map(parse_severity).transpose()?,
            };
            let controls = compliance::list_controls(client, &filter).await?;
            if json {
                return print_json(&controls);
            }
            let rows: Vec<Vec<String>> = controls
                .iter()
                .map(|c| {
                    vec![
                        c.control_id.clone(),
                        c.name.clone(),
                        c.status.as_str().to_string(),
                        c.severity.as_str().to_string(),
                        c.frameworks.join(","),
                        fmt_opt(&c.failing_asset_count),
                        c.failure_reason.clone().unwrap_or_else(|| "-".into()),
                    ]
                })
                .collect();
            print_table(
                &["control", "name", "status", "severity", "frameworks", "failing", "reason"],
                &rows,
            );
        }
        ComplianceCommand::Enable { id } => {
            let framework =
                compliance::update_framework(client, id, &FrameworkUpdate { enabled: true }).await?;
            if json {
                return print_json(&framework);
            }
            println!("Framework {} ({}) enabled.", framework.id, framework.code);
        }
        ComplianceCommand::Disable { id } => {
            let framework =
                compliance::update_framework(client, id, &FrameworkUpdate { enabled: false })
                    .await?;
            if json {
                return print_json(&framework);
            }
            println!("Framework {} ({}) disabled.", framework.id, framework.code);
        }
    }
    Ok(())
}
