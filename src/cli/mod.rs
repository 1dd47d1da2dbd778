//! Command-line surface: one subcommand tree per workspace area.

pub mod compliance;
pub mod databases;
pub mod monitor;
pub mod output;
pub mod roles;
pub mod sites;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use crate::client::{ApiClient, ApiError};
use crate::dashboard;
use output::{fmt_ms, print_json};

#[derive(Parser, Debug)]
#[command(name = "opticini", version, about = "Opticini Studio workspace tools", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Use this access token for a single invocation instead of the stored
    /// credentials (no refresh is possible in this mode)
    #[arg(long)]
    pub token: Option<String>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Obtain and store a token pair
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop stored credentials
    Logout,
    /// Monitoring overview: stats, endpoints, recent checks, open alerts
    Status,
    /// API endpoint monitoring
    #[command(subcommand)]
    Monitor(monitor::MonitorCommand),
    /// Compliance frameworks and controls
    #[command(subcommand)]
    Compliance(compliance::ComplianceCommand),
    /// Saved database connections
    #[command(subcommand)]
    Db(databases::DbCommand),
    /// Site uptime monitoring
    #[command(subcommand)]
    Sites(sites::SitesCommand),
    /// Sidebar permissions matrix
    #[command(subcommand)]
    Roles(roles::RolesCommand),
}

pub async fn run(client: &ApiClient, command: Command, json: bool) -> Result<(), ApiError> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };
            client.login(&username, &password).await?;
            println!("Logged in as {username}.");
            Ok(())
        }
        Command::Logout => {
            client.logout().await?;
            println!("Credentials cleared.");
            Ok(())
        }
        Command::Status => status(client, json).await,
        Command::Monitor(cmd) => monitor::run(client, cmd, json).await,
        Command::Compliance(cmd) => compliance::run(client, cmd, json).await,
        Command::Db(cmd) => databases::run(client, cmd, json).await,
        Command::Sites(cmd) => sites::run(client, cmd, json).await,
        Command::Roles(cmd) => roles::run(client, cmd, json).await,
    }
}

async fn status(client: &ApiClient, json: bool) -> Result<(), ApiError> {
    let overview = dashboard::load_overview(client).await?;
    if json {
        return print_json(&overview);
    }
    let stats = &overview.stats;
    println!(
        "{}/{} endpoints healthy, {} failing, {} open alert(s), avg latency {}",
        stats.healthy_endpoints,
        stats.active_endpoints,
        stats.failing_endpoints,
        stats.open_alerts,
        fmt_ms(stats.avg_response_time_ms),
    );
    for alert in &overview.open_alerts {
        println!(
            "  alert {} [{}] endpoint {}: {}",
            alert.id,
            alert.alert_type.as_str(),
            alert.endpoint_id,
            alert.message
        );
    }
    Ok(())
}

fn prompt_password() -> Result<String, ApiError> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
