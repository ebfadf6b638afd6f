use std::env;

/// Shared per-process state for the HTTP surface.
///
/// The extraction pipeline itself is request-scoped and stateless; the only
/// things shared across requests are the HTTP client's connection pool and
/// the outbound-concurrency cap.
#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    // Concurrency control for external calls
    pub outbound_limit: std::sync::Arc<tokio::sync::Semaphore>,
}

impl AppState {
    pub fn new(http_client: reqwest::Client) -> Self {
        let outbound_limit = env::var("OUTBOUND_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(32);

        Self {
            http_client,
            outbound_limit: std::sync::Arc::new(tokio::sync::Semaphore::new(outbound_limit)),
        }
    }
}
