pub mod scrape_property;

pub use scrape_property::{scrape_property, scrape_property_with_resolver};
