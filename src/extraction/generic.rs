//! Portal-agnostic fallback extractor.
//!
//! No class-name guessing here: only signals that survive on any listing
//! page regardless of platform (Open Graph meta, the `<title>` tag, and
//! the `€`/`m²`/`T3` token conventions of Portuguese listings) plus a
//! domain-derived source name.

use scraper::{Html, Selector};
use url::Url;

use crate::core::types::ExtractedProperty;
use crate::extraction::fields;
use crate::extraction::portals::{AREA_M2, BATHS_PT, PRICE_EUR, ROOMS_PT, TYPOLOGY};

/// Fill still-absent fields from the wide-net signals.
pub fn fill_generic(document: &Html, html: &str, record: &mut ExtractedProperty) {
    if record.titulo.is_none() {
        record.titulo = meta_content(document, r#"meta[property="og:title"]"#)
            .or_else(|| title_tag(document))
            .map(|t| fields::clean_title(&t))
            .filter(|t| !t.is_empty());
    }
    if record.localizacao.is_none() {
        record.localizacao = meta_content(document, r#"meta[property="og:locality"]"#)
            .or_else(|| meta_content(document, r#"meta[property="place:location:locality"]"#));
    }
    if record.preco.is_none() {
        record.preco =
            fields::first_capture(html, &[PRICE_EUR]).and_then(|p| fields::parse_price(&p));
    }
    if record.area_util.is_none() {
        record.area_util =
            fields::first_capture(html, &[AREA_M2]).and_then(|a| fields::parse_area(&a));
    }
    if record.tipologia.is_none() {
        record.tipologia =
            fields::first_capture(html, &[TYPOLOGY]).and_then(|t| fields::normalize_typology(&t));
    }
    if record.quartos.is_none() {
        record.quartos =
            fields::first_capture(html, &[ROOMS_PT]).and_then(|q| fields::parse_count(&q));
    }
    if record.casas_banho.is_none() {
        record.casas_banho =
            fields::first_capture(html, &[BATHS_PT]).and_then(|c| fields::parse_count(&c));
    }
}

/// Best-effort source name for an unclassified URL: host minus `www.`,
/// first label, capitalized ("quintasdominho.com" → "Quintasdominho").
pub fn domain_source_name(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next()?;
    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn title_tag(document: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let element = document.select(&sel).next()?;
    let title = element.text().collect::<String>().trim().to_string();
    (!title.is_empty()).then_some(title)
}
