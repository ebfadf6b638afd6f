use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// How a relay expects the target URL to be embedded in its own URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
    /// Percent-encoded into a query parameter (`…?url=<encoded>`).
    QueryEncoded,
    /// Appended verbatim as a path suffix (`…/fetch/<url>`).
    PathAppended,
}

/// A public CORS-unblocking relay that fetches a URL on our behalf.
///
/// These are free third-party services: uptime and rate limits are outside
/// our control, which is exactly why the resolver layers several of them.
/// Kept as plain data so a self-hosted relay is a one-line swap via
/// `FetchResolver::with_relays`.
#[derive(Debug, Clone)]
pub struct RelayEndpoint {
    pub name: &'static str,
    pub base: String,
    pub mode: RelayMode,
}

impl RelayEndpoint {
    pub fn new(name: &'static str, base: impl Into<String>, mode: RelayMode) -> Self {
        Self {
            name,
            base: base.into(),
            mode,
        }
    }

    /// The default chain, in the order attempted.
    pub fn default_chain() -> Vec<RelayEndpoint> {
        vec![
            RelayEndpoint::new(
                "corsproxy",
                "https://corsproxy.io/?url=",
                RelayMode::QueryEncoded,
            ),
            RelayEndpoint::new(
                "codetabs",
                "https://api.codetabs.com/v1/proxy?quest=",
                RelayMode::QueryEncoded,
            ),
            RelayEndpoint::new(
                "thingproxy",
                "https://thingproxy.freeboard.io/fetch/",
                RelayMode::PathAppended,
            ),
        ]
    }

    /// Build the relay request URL for a target listing URL.
    pub fn request_url(&self, target: &str) -> String {
        match self.mode {
            RelayMode::QueryEncoded => format!(
                "{}{}",
                self.base,
                utf8_percent_encode(target, NON_ALPHANUMERIC)
            ),
            RelayMode::PathAppended => format!("{}{}", self.base, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_mode_percent_encodes_the_target() {
        let relay = RelayEndpoint::new("stub", "https://relay.test/?url=", RelayMode::QueryEncoded);
        let built = relay.request_url("https://www.idealista.pt/imovel/123/");
        assert!(built.starts_with("https://relay.test/?url="));
        assert!(built.contains("https%3A%2F%2Fwww%2Eidealista%2Ept"));
        assert!(!built[relay.base.len()..].contains("://"));
    }

    #[test]
    fn path_mode_appends_the_target_verbatim() {
        let relay = RelayEndpoint::new("stub", "https://relay.test/fetch/", RelayMode::PathAppended);
        assert_eq!(
            relay.request_url("https://example.pt/casa"),
            "https://relay.test/fetch/https://example.pt/casa"
        );
    }

    #[test]
    fn default_chain_order_is_fixed() {
        let chain = RelayEndpoint::default_chain();
        let names: Vec<&str> = chain.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["corsproxy", "codetabs", "thingproxy"]);
    }
}
