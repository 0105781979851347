// crates/portal-client/src/api/dashboard.rs

use crate::client::ResourceClient;
use crate::error::Result;
use portal_types::{QuickStats, StudyProgress, StudySession};
use tracing::debug;

/// Served by both backends
pub const QUICK_STATS_PATH: &str = "/dashboard/quick-stats";
/// Alternate spelling, tried when the first route is missing
pub const QUICK_STATS_LEGACY_PATH: &str = "/dashboard/quick_stats";

/// Quick stats card, retried on the legacy route when the first one is missing
pub async fn quick_stats(client: &ResourceClient) -> Result<QuickStats> {
    match client.get(QUICK_STATS_PATH).await {
        Err(e) if e.status() == Some(404) => {
            debug!(path = QUICK_STATS_LEGACY_PATH, "quick stats not found, trying legacy route");
            client.get(QUICK_STATS_LEGACY_PATH).await
        }
        result => result,
    }
}

pub async fn study_progress(client: &ResourceClient) -> Result<StudyProgress> {
    client.get("/dashboard/study_progress").await
}

/// `None` before the first session was ever recorded
pub async fn last_study_session(client: &ResourceClient) -> Result<Option<StudySession>> {
    client.get("/dashboard/last_study_session").await
}
