pub mod fields;
pub mod generic;
pub mod infer;
pub mod jsonld;
pub mod portal;
pub mod portals;

pub use portal::Portal;

use scraper::Html;
use tracing::info;
use url::Url;

use crate::core::types::ExtractedProperty;

/// Portal-aware field extraction over raw listing HTML.
pub struct ExtractionEngine;

impl ExtractionEngine {
    /// Pure function of (url, html): classify the source, let structured
    /// data claim fields first, run the matching rule table (or the generic
    /// fallback), then infer business and property type.
    ///
    /// Missing page signals leave fields unset; partial records are the
    /// normal output here, and nothing in this path can fail.
    pub fn extract(url: &Url, html: &str) -> ExtractedProperty {
        let portal = Portal::classify(url.as_str());
        info!("Classified {} as {:?}", url, portal);

        let document = Html::parse_document(html);
        let mut record = ExtractedProperty::default();

        jsonld::fill_from_json_ld(&document, &mut record);

        match portals::rules_for(portal) {
            Some(rules) => portals::apply_rules(rules, html, &mut record),
            None => generic::fill_generic(&document, html, &mut record),
        }

        record.tipo_negocio = Some(infer::business_type(url, html).to_string());
        if record.tipo_imovel.is_none() {
            record.tipo_imovel = record
                .titulo
                .as_deref()
                .and_then(infer::property_type)
                .or_else(|| infer::property_type(html))
                .map(str::to_string);
        }
        record.fonte = portal
            .display_name()
            .map(str::to_string)
            .or_else(|| generic::domain_source_name(url));

        record
    }
}
