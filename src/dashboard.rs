//! Concurrent loading of the monitoring overview, plus a fetch-generation
//! guard so a superseded reload can never overwrite the result of a newer
//! one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::api::admin_tools;
use crate::client::{ApiClient, ApiError};
use crate::models::monitor::{Alert, EndpointCheck, MonitorStats, MonitoredEndpoint};

const RECENT_CHECKS_LIMIT: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub stats: MonitorStats,
    pub endpoints: Vec<MonitoredEndpoint>,
    pub recent_checks: Vec<EndpointCheck>,
    pub open_alerts: Vec<Alert>,
}

/// Fetch stats, endpoints, recent checks and unresolved alerts in parallel.
/// Nothing is returned until every request has settled; a single failure
/// fails the whole load.
pub async fn load_overview(client: &ApiClient) -> Result<DashboardOverview, ApiError> {
    let (stats, endpoints, recent_checks, open_alerts) = futures::try_join!(
        admin_tools::get_stats(client),
        admin_tools::list_endpoints(client),
        admin_tools::list_checks(client, None, Some(RECENT_CHECKS_LIMIT)),
        admin_tools::list_alerts(client, false),
    )?;
    Ok(DashboardOverview {
        stats,
        endpoints,
        recent_checks,
        open_alerts,
    })
}

/// Monotonic reload counter. Each logical reload takes a fresh generation;
/// a result is applied only if no newer reload has started in the meantime.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    current: AtomicU64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new reload and invalidate all earlier ones.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::SeqCst) == generation
    }

    /// Run `future` under a fresh generation; returns `None` if a newer
    /// reload began while it was in flight, in which case its result must be
    /// discarded.
    pub async fn run<F, T>(&self, future: F) -> Option<T>
    where
        F: std::future::Future<Output = T>,
    {
        let generation = self.begin();
        let value = future.await;
        if self.is_current(generation) {
            Some(value)
        } else {
            None
        }
    }
}
