use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::core::types::{ScrapeError, ScrapePropertyResponse};
use crate::core::AppState;
use crate::extraction::ExtractionEngine;
use crate::scraping::FetchResolver;

/// Extract a normalized property record from an arbitrary listing URL.
///
/// Retrieval exhaustion is a normal outcome (`showForm: true` in the
/// response); many portals actively block automated retrieval. Only a
/// malformed URL or an internal fault returns `Err`.
pub async fn scrape_property(
    state: &Arc<AppState>,
    raw_url: &str,
) -> Result<ScrapePropertyResponse, ScrapeError> {
    let resolver = FetchResolver::new(state.http_client.clone());
    scrape_property_with_resolver(state, raw_url, &resolver).await
}

/// Same pipeline with an injected resolver (tests stub the relay chain).
pub async fn scrape_property_with_resolver(
    state: &Arc<AppState>,
    raw_url: &str,
    resolver: &FetchResolver,
) -> Result<ScrapePropertyResponse, ScrapeError> {
    info!("Importing listing from URL: {}", raw_url);

    // Validate before any network is touched.
    let url = validate_url(raw_url)?;

    let _permit = state
        .outbound_limit
        .acquire()
        .await
        .expect("semaphore closed");

    match resolver.resolve(&url).await {
        Some(page) => {
            info!("Retrieved {} bytes via {}", page.html.len(), page.via);
            let record = ExtractionEngine::extract(&url, &page.html);
            Ok(ScrapePropertyResponse::extracted(record))
        }
        None => {
            warn!("No retrieval strategy produced usable HTML for {}", url);
            Ok(ScrapePropertyResponse::retrieval_blocked())
        }
    }
}

fn validate_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }
    Ok(url)
}
