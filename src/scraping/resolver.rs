use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::config;
use crate::features::antibot;
use crate::scraping::relay::RelayEndpoint;

/// Raw markup retrieved for one extraction request. Transient: dropped as
/// soon as the extraction engine has run over it.
#[derive(Debug)]
pub struct RawPage {
    pub html: String,
    pub source_url: String,
    /// Name of the strategy that produced the payload (logging only).
    pub via: &'static str,
}

/// Retrieves listing HTML past bot defenses without a browser engine.
///
/// Strategies are tried sequentially (direct fetch with browser-emulating
/// headers, then each public relay in order) and the first payload above
/// the usability threshold wins. Sequential on purpose: racing the relays
/// would multiply load on free third-party services for a flow that backs a
/// manual paste-a-URL action, not a bulk crawl.
pub struct FetchResolver {
    client: Client,
    relays: Vec<RelayEndpoint>,
    min_html_len: usize,
    attempt_timeout: Duration,
}

impl FetchResolver {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            relays: RelayEndpoint::default_chain(),
            min_html_len: config::min_usable_html_len(),
            attempt_timeout: config::fetch_attempt_timeout(),
        }
    }

    /// Builder: replace the relay chain (tests point this at fixture servers).
    pub fn with_relays(mut self, relays: Vec<RelayEndpoint>) -> Self {
        self.relays = relays;
        self
    }

    /// Builder: override the usability threshold.
    pub fn with_min_html_len(mut self, len: usize) -> Self {
        self.min_html_len = len;
        self
    }

    /// Builder: override the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Run the strategy chain. `None` means every strategy failed or came
    /// back unusably short, an expected outcome for heavily defended
    /// portals, answered by the caller with a manual-entry prompt. Transport
    /// errors never escape an individual attempt.
    pub async fn resolve(&self, url: &Url) -> Option<RawPage> {
        match self.attempt_direct(url.as_str()).await {
            Ok(html) if self.usable(&html) => {
                info!("Direct fetch succeeded for {} ({} bytes)", url, html.len());
                return Some(RawPage {
                    html,
                    source_url: url.to_string(),
                    via: "direct",
                });
            }
            Ok(html) => {
                debug!(
                    "Direct fetch returned unusably short body ({} bytes), trying relays",
                    html.len()
                );
            }
            Err(e) => {
                debug!("Direct fetch failed: {}", e);
            }
        }

        for relay in &self.relays {
            match self.attempt_relay(relay, url.as_str()).await {
                Ok(html) if self.usable(&html) => {
                    info!(
                        "Relay {} succeeded for {} ({} bytes)",
                        relay.name,
                        url,
                        html.len()
                    );
                    return Some(RawPage {
                        html,
                        source_url: url.to_string(),
                        via: relay.name,
                    });
                }
                Ok(html) => {
                    debug!(
                        "Relay {} returned unusably short body ({} bytes)",
                        relay.name,
                        html.len()
                    );
                }
                Err(e) => {
                    warn!("Relay {} failed: {}", relay.name, e);
                }
            }
        }

        warn!("All retrieval strategies exhausted for {}", url);
        None
    }

    async fn attempt_direct(&self, url: &str) -> Result<String> {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", antibot::random_user_agent())
            .timeout(self.attempt_timeout);

        for (name, value) in antibot::stealth_headers() {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }
        Ok(response.text().await?)
    }

    async fn attempt_relay(&self, relay: &RelayEndpoint, target: &str) -> Result<String> {
        let response = self
            .client
            .get(relay.request_url(target))
            .header("User-Agent", antibot::random_user_agent())
            .timeout(self.attempt_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }
        Ok(response.text().await?)
    }

    fn usable(&self, body: &str) -> bool {
        body.len() >= self.min_html_len
    }
}
