/// A known listing portal, classified purely from the request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    Idealista,
    Imovirtual,
    CasaSapo,
    Supercasa,
    Remax,
    Era,
    Century21,
    KellerWilliams,
    Generic,
}

/// Fixed-priority domain fragments; first containment match wins.
/// ERA needs the TLD ("era.pt"): the bare word matches half the dictionary.
const CLASSIFIER: &[(&str, Portal)] = &[
    ("idealista", Portal::Idealista),
    ("imovirtual", Portal::Imovirtual),
    ("casa.sapo", Portal::CasaSapo),
    ("supercasa", Portal::Supercasa),
    ("remax", Portal::Remax),
    ("era.pt", Portal::Era),
    ("century21", Portal::Century21),
    ("kwportugal", Portal::KellerWilliams),
    ("kellerwilliams", Portal::KellerWilliams),
];

impl Portal {
    /// Classify a listing URL. Pure function of the URL text; page content
    /// never participates, so this is O(1) and deterministic.
    pub fn classify(url: &str) -> Portal {
        let url = url.to_lowercase();
        for (fragment, portal) in CLASSIFIER {
            if url.contains(fragment) {
                return *portal;
            }
        }
        Portal::Generic
    }

    /// Human-readable source name; `None` for unclassified URLs (the engine
    /// then derives a name from the domain).
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            Portal::Idealista => Some("Idealista"),
            Portal::Imovirtual => Some("Imovirtual"),
            Portal::CasaSapo => Some("Casa Sapo"),
            Portal::Supercasa => Some("Supercasa"),
            Portal::Remax => Some("Remax"),
            Portal::Era => Some("ERA"),
            Portal::Century21 => Some("Century 21"),
            Portal::KellerWilliams => Some("Keller Williams"),
            Portal::Generic => None,
        }
    }
}
