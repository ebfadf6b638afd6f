use std::time::Duration;

// ---------------------------------------------------------------------------
// Env-var config for the retrieval chain. Missing or malformed values fall
// back to defaults; nothing here is required to start the service.
// ---------------------------------------------------------------------------

pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_MIN_USABLE_HTML_LEN: &str = "MIN_USABLE_HTML_LEN";

/// Per-attempt timeout for each retrieval strategy. A hung strategy must not
/// block the rest of the chain, so this stays in the several-seconds range.
pub fn fetch_attempt_timeout() -> Duration {
    let secs = std::env::var(ENV_FETCH_TIMEOUT_SECS)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(8);
    Duration::from_secs(secs)
}

/// Bodies shorter than this are treated as blocked/placeholder pages (bot
/// walls commonly return a tiny challenge stub with HTTP 200).
pub fn min_usable_html_len() -> usize {
    std::env::var(ENV_MIN_USABLE_HTML_LEN)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(1000)
}
