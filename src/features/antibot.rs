//! Browser-emulation headers for the direct fetch strategy.
//!
//! Listing portals sniff far more than the User-Agent string: missing
//! fetch-metadata or language headers is enough to get served a challenge
//! stub. The direct strategy therefore sends a full navigation-shaped
//! header set with a rotating desktop UA.

pub const USER_AGENTS: &[&str] = &[
    // Chrome Desktop (Windows, macOS, Linux)
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",

    // Firefox Desktop
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",

    // Safari Desktop
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",

    // Edge Desktop
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
];

/// Pick a random user agent for the next outbound attempt.
pub fn random_user_agent() -> &'static str {
    use rand::prelude::*;
    let mut rng = rand::rng();
    let index = rng.random_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Navigation-shaped headers sent alongside the UA. Accept-Language leads
/// with pt-PT; the portals this service targets geo-profile their traffic.
pub fn stealth_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "pt-PT,pt;q=0.9,en;q=0.8"),
        ("Cache-Control", "max-age=0"),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "none"),
        ("Sec-Fetch-User", "?1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        assert!(USER_AGENTS[0].contains("Mozilla"));
        assert!(USER_AGENTS.contains(&random_user_agent()));
    }

    #[test]
    fn test_stealth_headers_shape() {
        let headers = stealth_headers();
        assert!(headers.iter().any(|(k, _)| *k == "Sec-Fetch-Mode"));
        let (_, lang) = headers
            .iter()
            .find(|(k, _)| *k == "Accept-Language")
            .unwrap();
        assert!(lang.starts_with("pt-PT"));
    }
}
