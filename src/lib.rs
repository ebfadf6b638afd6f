pub mod core;
pub mod extraction;
pub mod features;
pub mod scraping;
pub mod tools;

// --- Primary core exports ---
pub use crate::core::types;
pub use crate::core::types::*;
pub use crate::core::AppState;

pub use crate::extraction::{ExtractionEngine, Portal};
pub use crate::features::antibot;
pub use crate::scraping::{FetchResolver, RawPage, RelayEndpoint, RelayMode};
pub use crate::tools::{scrape_property, scrape_property_with_resolver};
