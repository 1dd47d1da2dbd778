use clap::Subcommand;

use super::output::{fmt_ms, fmt_time, print_json, print_table, yes_no};
use crate::api::admin_tools;
use crate::client::{ApiClient, ApiError};
use crate::models::monitor::{EndpointCheck, EndpointUpdate, NewEndpoint};

#[derive(Subcommand, Debug)]
pub enum MonitorCommand {
    /// Aggregate monitoring stats
    Stats,
    /// List monitored API endpoints
    Endpoints,
    /// Register an endpoint for monitoring
    Add {
        name: String,
        url: String,
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long, default_value_t = 200)]
        expected_status: u16,
    },
    /// Delete a monitored endpoint
    Rm { id: i64 },
    /// Pause or resume checks for an endpoint
    Toggle {
        id: i64,
        #[arg(long)]
        active: bool,
    },
    /// Run one check immediately and print the result
    Test { id: i64 },
    /// Ask the backend to register unmonitored endpoints
    Discover,
    /// Recent check history
    Checks {
        #[arg(long)]
        endpoint: Option<i64>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// List alerts (unresolved by default)
    Alerts {
        #[arg(long)]
        all: bool,
    },
    /// Mark an alert as resolved
    Resolve { id: i64 },
}

pub async fn run(client: &ApiClient, command: MonitorCommand, json: bool) -> Result<(), ApiError> {
    match command {
        MonitorCommand::Stats => {
            let stats = admin_tools::get_stats(client).await?;
            if json {
                return print_json(&stats);
            }
            println!("endpoints: {} total, {} active", stats.total_endpoints, stats.active_endpoints);
            println!("health:    {} healthy, {} failing", stats.healthy_endpoints, stats.failing_endpoints);
            println!("alerts:    {} open", stats.open_alerts);
            println!("latency:   {}", fmt_ms(stats.avg_response_time_ms));
        }
        MonitorCommand::Endpoints => {
            let endpoints = admin_tools::list_endpoints(client).await?;
            if json {
                return print_json(&endpoints);
            }
            let rows: Vec<Vec<String>> = endpoints
                .iter()
                .map(|e| {
                    let (last_status, last_latency) = match &e.last_check {
                        Some(check) => (
                            check.status_code.map_or_else(|| "-".into(), |s| s.to_string()),
                            fmt_ms(check.response_time_ms),
                        ),
                        None => ("-".to_string(), "-".to_string()),
                    };
                    vec![
                        e.id.to_string(),
                        e.name.clone(),
                        format!("{} {}", e.method, e.url),
                        e.expected_status.to_string(),
                        yes_no(e.is_active).to_string(),
                        last_status,
                        last_latency,
                    ]
                })
                .collect();
            print_table(
                &["id", "name", "target", "expect", "active", "last", "latency"],
                &rows,
            );
        }
        MonitorCommand::Add {
            name,
            url,
            method,
            expected_status,
        } => {
            let endpoint = admin_tools::create_endpoint(
                client,
                &NewEndpoint {
                    name,
                    url,
                    method,
                    expected_status,
                    is_active: true,
                },
            )
            .await?;
            if json {
                return print_json(&endpoint);
            }
            println!("Created endpoint {} ({}).", endpoint.id, endpoint.name);
        }
        MonitorCommand::Rm { id } => {
            admin_tools::delete_endpoint(client, id).await?;
            println!("Deleted endpoint {id}.");
        }
        MonitorCommand::Toggle { id, active } => {
            let update = EndpointUpdate {
                is_active: Some(active),
                ..Default::default()
            };
            let endpoint = admin_tools::update_endpoint(client, id, &update).await?;
            if json {
                return print_json(&endpoint);
            }
            println!(
                "Endpoint {} is now {}.",
                endpoint.id,
                if endpoint.is_active { "active" } else { "paused" }
            );
        }
        MonitorCommand::Test { id } => {
            let check = admin_tools::test_endpoint(client, id).await?;
            if json {
                return print_json(&check);
            }
            print_check(&check);
        }
        MonitorCommand::Discover => {
            let result = admin_tools::discover_endpoints(client).await?;
            if json {
                return print_json(&result);
            }
            println!(
                "Discovered {} endpoints, registered {} new.",
                result.discovered, result.created
            );
        }
        MonitorCommand::Checks { endpoint, limit } => {
            let checks = admin_tools::list_checks(client, endpoint, Some(limit)).await?;
            if json {
                return print_json(&checks);
            }
            let rows: Vec<Vec<String>> = checks
                .iter()
                .map(|c| {
                    vec![
                        c.endpoint_id.to_string(),
                        fmt_time(Some(c.checked_at)),
                        c.status_code.map_or_else(|| "-".into(), |s| s.to_string()),
                        fmt_ms(c.response_time_ms),
                        yes_no(c.success).to_string(),
                        c.error_message.clone().unwrap_or_else(|| "-".into()),
                    ]
                })
                .collect();
            print_table(&["endpoint", "checked at", "status", "latency", "ok", "error"], &rows);
        }
        MonitorCommand::Alerts { all } => {
            let alerts = admin_tools::list_alerts(client, all).await?;
            if json {
                return print_json(&alerts);
            }
            let rows: Vec<Vec<String>> = alerts
                .iter()
                .map(|a| {
                    vec![
                        a.id.to_string(),
                        a.endpoint_id.to_string(),
                        a.alert_type.as_str().to_string(),
                        fmt_time(Some(a.created_at)),
                        yes_no(a.resolved).to_string(),
                        a.message.clone(),
                    ]
                })
                .collect();
            print_table(&["id", "endpoint", "type", "raised at", "resolved", "message"], &rows);
        }
        MonitorCommand::Resolve { id } => {
            let alert = admin_tools::resolve_alert(client, id).await?;
            if json {
                return print_json(&alert);
            }
            println!("Alert {} resolved.", alert.id);
        }
    }
    Ok(())
}

fn print_check(check: &EndpointCheck) {
    println!(
        "endpoint {}: {} at {}",
        check.endpoint_id,
        if check.success { "ok" } else { "FAILED" },
        fmt_time(Some(check.checked_at)),
    );
    println!(
        "  status {}  latency {}",
        check.status_code.map_or_else(|| "-".into(), |s| s.to_string()),
        fmt_ms(check.response_time_ms),
    );
    if let Some(error) = &check.error_message {
        println!("  error: {error}");
    }
}
