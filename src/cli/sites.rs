use clap::Subcommand;

use super::output::{fmt_ms, fmt_time, print_json, print_table};
use crate::api::sites;
use crate::client::{ApiClient, ApiError};
use crate::models::site::{MonitoredSite, NewSite, SiteStatus, SiteUpdate};

#[derive(Subcommand, Debug)]
pub enum SitesCommand {
    /// List monitored sites
    Ls,
    /// Start monitoring a site
    Add {
        url: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Change a site's name or URL
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Stop monitoring a site
    Rm { id: i64 },
    /// Re-check a site now
    Check { id: i64 },
}

fn site_row(site: &MonitoredSite, status: SiteStatus) -> Vec<String> {
    vec![
        site.id.to_string(),
        site.name.clone(),
        site.url.clone(),
        status.as_str().to_string(),
        format!("{:.2}%", site.uptime_percentage),
        fmt_ms(site.response_time_ms),
        match site.ssl_valid {
            Some(true) => format!("valid until {}", fmt_time(site.ssl_expires_at)),
            Some(false) => "INVALID".to_string(),
            None => "-".to_string(),
        },
        fmt_time(site.last_checked_at),
    ]
}

const SITE_HEADERS: [&str; 8] = ["id", "name", "url", "status", "uptime", "latency", "ssl", "checked"];

pub async fn run(client: &ApiClient, command: SitesCommand, json: bool) -> Result<(), ApiError> {
    match command {
        SitesCommand::Ls => {
            let sites = sites::list_sites(client).await?;
            if json {
                return print_json(&sites);
            }
            let rows: Vec<Vec<String>> = sites.iter().map(|s| site_row(s, s.status)).collect();
            print_table(&SITE_HEADERS, &rows);
        }
        SitesCommand::Add { url, name } => {
            let name = name.unwrap_or_else(|| url.clone());
            let site = sites::create_site(client, &NewSite { name, url }).await?;
            if json {
                return print_json(&site);
            }
            println!("Monitoring site {} ({}).", site.id, site.url);
        }
        SitesCommand::Edit { id, name, url } => {
            if name.is_none() && url.is_none() {
                return Err(ApiError::Config(
                    "nothing to update; pass --name and/or --url".to_string(),
                ));
            }
            let site = sites::update_site(client, id, &SiteUpdate { name, url }).await?;
            if json {
                return print_json(&site);
            }
            print_table(&SITE_HEADERS, &[site_row(&site, site.status)]);
        }
        SitesCommand::Rm { id } => {
            sites::delete_site(client, id).await?;
            println!("Stopped monitoring site {id}.");
        }
        SitesCommand::Check { id } => {
            // The backend never reports "checking"; the tri-state exists only
            // while the re-check request is in flight.
            println!("site {id}: {}", SiteStatus::Checking.as_str());
            let site = sites::check_site(client, id).await?;
            if json {
                return print_json(&site);
            }
            print_table(&SITE_HEADERS, &[site_row(&site, site.status)]);
        }
    }
    Ok(())
}
