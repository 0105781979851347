// crates/portal-client/src/http.rs
// Shared HTTP client for all backend calls

use std::time::Duration;

/// Whole-request timeout; media generation on the haiku service is the slow path
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Built once per process and cloned into every `ResourceClient`; the
/// portal and haiku bindings then share one connection pool.
pub fn create_shared_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .user_agent(concat!("portal/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
