//! Schema.org pre-pass.
//!
//! Several of the portals ship `RealEstateListing`/`Product` JSON-LD blocks
//! that outlive their CSS class churn, so structured data gets first claim
//! on a field; the regex tables fill whatever it leaves absent.

use scraper::{Html, Selector};
use serde_json::Value;

use crate::core::types::ExtractedProperty;
use crate::extraction::fields;

const LISTING_TYPES: &[&str] = &[
    "RealEstateListing",
    "Product",
    "Offer",
    "Residence",
    "Apartment",
    "House",
    "SingleFamilyResidence",
];

/// Parse every `<script type="application/ld+json">` payload and fill
/// still-absent record fields from recognized listing-shaped nodes.
pub fn fill_from_json_ld(document: &Html, record: &mut ExtractedProperty) {
    let Ok(selector) = Selector::parse("script[type='application/ld+json']") else {
        return;
    };

    for script in document.select(&selector) {
        let json_text = script.inner_html();
        if json_text.trim().is_empty() {
            continue;
        }
        if let Ok(value) = serde_json::from_str::<Value>(&json_text) {
            walk(&value, record);
        }
    }
}

fn walk(value: &Value, record: &mut ExtractedProperty) {
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, record);
            }
        }
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                walk(graph, record);
            }

            let type_val = map.get("@type").and_then(|v| v.as_str()).unwrap_or("");
            if !LISTING_TYPES.contains(&type_val) {
                return;
            }

            if record.titulo.is_none() {
                if let Some(name) = string_of(map.get("name")) {
                    record.titulo = Some(fields::clean_title(&name));
                }
            }
            if record.preco.is_none() {
                record.preco = price_of(map.get("offers"))
                    .or_else(|| price_of(map.get("price")));
            }
            if record.localizacao.is_none() {
                record.localizacao = locality_of(map.get("address"));
            }
            if record.area_util.is_none() {
                record.area_util = map
                    .get("floorSize")
                    .and_then(|v| v.get("value"))
                    .and_then(number_of)
                    .map(|n| n as u32);
            }
            if record.quartos.is_none() {
                record.quartos = map
                    .get("numberOfRooms")
                    .and_then(number_of)
                    .map(|n| n as u32);
            }
            if record.casas_banho.is_none() {
                record.casas_banho = map
                    .get("numberOfBathroomsTotal")
                    .and_then(number_of)
                    .map(|n| n as u32);
            }
        }
        _ => {}
    }
}

fn string_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as u64),
        Value::String(s) => fields::parse_count(s).map(u64::from),
        _ => None,
    }
}

/// Resolve a price from an offer tree: direct number/string, or nested
/// `price`/`lowPrice`/`offers` one level down, arrays element-wise.
fn price_of(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_f64().map(|f| f as u64),
        Value::String(s) => fields::parse_price(s),
        Value::Array(items) => items.iter().find_map(|item| price_of(Some(item))),
        Value::Object(map) => price_of(map.get("price"))
            .or_else(|| price_of(map.get("lowPrice")))
            .or_else(|| price_of(map.get("offers"))),
        _ => None,
    }
}

fn locality_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Object(map) => {
            if let Some(locality) = string_of(map.get("addressLocality")) {
                return Some(locality);
            }
            let parts: Vec<&str> = ["streetAddress", "addressRegion", "postalCode"]
                .iter()
                .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}
