//! Declarative per-portal extractor tables.
//!
//! One `PortalRules` per known portal: for each record field, an ordered
//! pattern list exploiting that portal's markup conventions (specific CSS
//! classes, embedded state JSON, microdata), ending in the shared
//! wide-net fallbacks. First match wins; no match leaves the field unset.

use crate::core::types::ExtractedProperty;
use crate::extraction::fields;
use crate::extraction::portal::Portal;

// Shared fallback patterns, applicable to any reasonably standard page.
pub(crate) const OG_TITLE: &str = r#"property="og:title"[^>]*content="([^"]+)""#;
pub(crate) const TITLE_TAG: &str = r"(?s)<title[^>]*>(.*?)</title>";
pub(crate) const OG_LOCALITY: &str = r#"property="og:locality"[^>]*content="([^"]+)""#;
pub(crate) const PRICE_EUR: &str = r"(\d{1,3}(?:[.,\s]\d{3})*|\d{4,})\s*€";
pub(crate) const AREA_M2: &str = r"(\d+(?:[.,]\d+)?)\s*m²";
pub(crate) const TYPOLOGY: &str = r"\b([Tt]\d+)\b";
pub(crate) const ROOMS_PT: &str = r"(?i)(\d+)\s*quartos?";
pub(crate) const BATHS_PT: &str = r"(?i)(\d+)\s*casas?\s+de\s+banho";

/// Ordered pattern lists for one portal.
pub struct PortalRules {
    pub titulo: &'static [&'static str],
    pub preco: &'static [&'static str],
    pub tipologia: &'static [&'static str],
    pub area_util: &'static [&'static str],
    pub quartos: &'static [&'static str],
    pub casas_banho: &'static [&'static str],
    pub localizacao: &'static [&'static str],
}

static IDEALISTA: PortalRules = PortalRules {
    titulo: &[
        r#"<span[^>]*class="main-info__title-main"[^>]*>([^<]+)"#,
        r#"<h1[^>]*class="main-info__title[^"]*"[^>]*>\s*([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"class="info-data-price"[^>]*>([^<]*\d[^<]*)<"#,
        r#"class="info-data-price"[^>]*>\s*<span[^>]*>([\d.,]+)"#,
        r#""price"\s*:\s*"?([\d.,]+)"#,
        PRICE_EUR,
    ],
    tipologia: &[
        r#"main-info__title-main"[^>]*>[^<]*\b([Tt]\d+)\b"#,
        TYPOLOGY,
    ],
    area_util: &[
        r#""constructedArea"\s*:\s*"?(\d+)"#,
        r#"(\d+(?:[.,]\d+)?)\s*m²\s*construídos"#,
        AREA_M2,
    ],
    quartos: &[r#""rooms"\s*:\s*"?(\d+)"#, ROOMS_PT],
    casas_banho: &[
        r#""bathNumber"\s*:\s*"?(\d+)"#,
        BATHS_PT,
        r"(?i)(\d+)\s*wc\b",
    ],
    localizacao: &[
        r#"<span[^>]*class="main-info__title-minor"[^>]*>([^<]+)"#,
        r#""addressLocality"\s*:\s*"([^"]+)""#,
        OG_LOCALITY,
    ],
};

static IMOVIRTUAL: PortalRules = PortalRules {
    titulo: &[
        r#"data-cy="adPageAdTitle"[^>]*>([^<]+)"#,
        r#"<h1[^>]*data-cy="adPageAdTitle[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"data-cy="adPageHeaderPrice"[^>]*>([^<]*\d[^<]*)<"#,
        r#""price"\s*:\s*\{\s*"value"\s*:\s*([\d.]+)"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[
        r#"(?i)área\s*(?:útil|bruta)?[^0-9m²]{0,40}(\d+(?:[.,]\d+)?)\s*m²"#,
        AREA_M2,
    ],
    quartos: &[
        r#"(?i)número de quartos[^0-9]{0,40}(\d+)"#,
        r#""roomsNumber"[^0-9]{0,20}(\d+)"#,
        ROOMS_PT,
    ],
    casas_banho: &[
        r#""bathroomsNumber"[^0-9]{0,20}(\d+)"#,
        BATHS_PT,
    ],
    localizacao: &[
        r#""addressLocality"\s*:\s*"([^"]+)""#,
        r#"data-cy="adPageAdLocation"[^>]*>([^<]+)"#,
        OG_LOCALITY,
    ],
};

static CASA_SAPO: PortalRules = PortalRules {
    titulo: &[
        r#"<div[^>]*class="detail-title[^"]*"[^>]*>\s*<h1[^>]*>([^<]+)"#,
        r#"<h1[^>]*class="detail-title[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"class="detail-main-price[^"]*"[^>]*>([^<]*\d[^<]*)<"#,
        r#"class="detail-price[^"]*"[^>]*>([^<]*\d[^<]*)<"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[
        r#"(?i)área útil[^0-9]{0,40}(\d+(?:[.,]\d+)?)"#,
        AREA_M2,
    ],
    quartos: &[ROOMS_PT],
    casas_banho: &[BATHS_PT, r"(?i)(\d+)\s*wc\b"],
    localizacao: &[
        r#"class="detail-location[^"]*"[^>]*>([^<]+)"#,
        OG_LOCALITY,
    ],
};

static SUPERCASA: PortalRules = PortalRules {
    titulo: &[
        r#"<h1[^>]*class="property-title[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"class="property-price[^"]*"[^>]*>\s*<span[^>]*>([^<]*\d[^<]*)<"#,
        r#"class="property-price[^"]*"[^>]*>([^<]*\d[^<]*)<"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[AREA_M2],
    quartos: &[ROOMS_PT],
    casas_banho: &[BATHS_PT],
    localizacao: &[
        r#"class="property-location[^"]*"[^>]*>([^<]+)"#,
        OG_LOCALITY,
    ],
};

static REMAX: PortalRules = PortalRules {
    titulo: &[
        r#""propertyTitle"\s*:\s*"([^"]+)""#,
        r#"<h1[^>]*class="listing-title[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#""listingPrice"\s*:\s*"?([\d.,]+)"#,
        r#"id="listing-price"[^>]*>([^<]*\d[^<]*)<"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[r#""usefulArea"\s*:\s*"?(\d+)"#, AREA_M2],
    quartos: &[r#""bedrooms"\s*:\s*"?(\d+)"#, ROOMS_PT],
    casas_banho: &[r#""bathrooms"\s*:\s*"?(\d+)"#, BATHS_PT],
    localizacao: &[
        r#""regionName"\s*:\s*"([^"]+)""#,
        OG_LOCALITY,
    ],
};

static ERA: PortalRules = PortalRules {
    titulo: &[
        r#"<h1[^>]*class="property-name[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"class="price-value[^"]*"[^>]*>([^<]*\d[^<]*)<"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[AREA_M2],
    quartos: &[ROOMS_PT],
    casas_banho: &[BATHS_PT],
    localizacao: &[
        r#"class="property-address[^"]*"[^>]*>([^<]+)"#,
        OG_LOCALITY,
    ],
};

static CENTURY21: PortalRules = PortalRules {
    titulo: &[
        r#"<h1[^>]*class="c21-property-title[^"]*"[^>]*>([^<]+)"#,
        r#"<h1[^>]*class="property-title[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"class="c21-price[^"]*"[^>]*>([^<]*\d[^<]*)<"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[AREA_M2],
    quartos: &[ROOMS_PT],
    casas_banho: &[BATHS_PT],
    localizacao: &[OG_LOCALITY, r#""addressLocality"\s*:\s*"([^"]+)""#],
};

static KELLER_WILLIAMS: PortalRules = PortalRules {
    titulo: &[
        r#"<h1[^>]*class="listing-title[^"]*"[^>]*>([^<]+)"#,
        OG_TITLE,
        TITLE_TAG,
    ],
    preco: &[
        r#"class="listing-price[^"]*"[^>]*>([^<]*\d[^<]*)<"#,
        PRICE_EUR,
    ],
    tipologia: &[TYPOLOGY],
    area_util: &[AREA_M2],
    quartos: &[ROOMS_PT],
    casas_banho: &[BATHS_PT],
    localizacao: &[OG_LOCALITY, r#""addressLocality"\s*:\s*"([^"]+)""#],
};

/// The table for a classified portal; `None` routes to the generic extractor.
pub fn rules_for(portal: Portal) -> Option<&'static PortalRules> {
    match portal {
        Portal::Idealista => Some(&IDEALISTA),
        Portal::Imovirtual => Some(&IMOVIRTUAL),
        Portal::CasaSapo => Some(&CASA_SAPO),
        Portal::Supercasa => Some(&SUPERCASA),
        Portal::Remax => Some(&REMAX),
        Portal::Era => Some(&ERA),
        Portal::Century21 => Some(&CENTURY21),
        Portal::KellerWilliams => Some(&KELLER_WILLIAMS),
        Portal::Generic => None,
    }
}

/// Run a portal's rule table over the page, filling only absent fields
/// (the JSON-LD pre-pass may already have claimed some).
pub fn apply_rules(rules: &PortalRules, html: &str, record: &mut ExtractedProperty) {
    if record.titulo.is_none() {
        record.titulo = fields::first_capture(html, rules.titulo).map(|t| fields::clean_title(&t));
    }
    if record.preco.is_none() {
        record.preco = fields::first_capture(html, rules.preco).and_then(|p| fields::parse_price(&p));
    }
    if record.tipologia.is_none() {
        record.tipologia =
            fields::first_capture(html, rules.tipologia).and_then(|t| fields::normalize_typology(&t));
    }
    if record.area_util.is_none() {
        record.area_util =
            fields::first_capture(html, rules.area_util).and_then(|a| fields::parse_area(&a));
    }
    if record.quartos.is_none() {
        record.quartos =
            fields::first_capture(html, rules.quartos).and_then(|q| fields::parse_count(&q));
    }
    if record.casas_banho.is_none() {
        record.casas_banho =
            fields::first_capture(html, rules.casas_banho).and_then(|c| fields::parse_count(&c));
    }
    if record.localizacao.is_none() {
        record.localizacao = fields::first_capture(html, rules.localizacao)
            .map(|l| fields::clean_title(&l))
            .filter(|l| !l.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(portal: Portal, html: &str) -> ExtractedProperty {
        let mut record = ExtractedProperty::default();
        apply_rules(rules_for(portal).unwrap(), html, &mut record);
        record
    }

    #[test]
    fn idealista_prefers_its_own_markup_over_fallbacks() {
        let html = r#"
            <title>Casa barata | idealista</title>
            <span class="main-info__title-main">Moradia T4 Cascais</span>
            <span class="main-info__title-minor">Estoril, Cascais</span>
            <span class="info-data-price">895.000 €</span>
            <span>iberian outlier: 1 €</span>
        "#;
        let record = run(Portal::Idealista, html);
        assert_eq!(record.titulo.as_deref(), Some("Moradia T4 Cascais"));
        assert_eq!(record.preco, Some(895_000));
        assert_eq!(record.tipologia.as_deref(), Some("T4"));
        assert_eq!(record.localizacao.as_deref(), Some("Estoril, Cascais"));
    }

    #[test]
    fn idealista_nested_price_span_variant() {
        let html = r#"<span class="info-data-price"><span class="txt-bold">420.000</span> €</span>"#;
        let record = run(Portal::Idealista, html);
        assert_eq!(record.preco, Some(420_000));
    }

    #[test]
    fn imovirtual_reads_embedded_state_values() {
        let html = r#"
            <h1 data-cy="adPageAdTitle">Apartamento T2 em Matosinhos</h1>
            <script>{"price":{"value":215000},"roomsNumber":2,"bathroomsNumber":1}</script>
            <p>Área útil: 84 m²</p>
        "#;
        let record = run(Portal::Imovirtual, html);
        assert_eq!(record.titulo.as_deref(), Some("Apartamento T2 em Matosinhos"));
        assert_eq!(record.preco, Some(215_000));
        assert_eq!(record.quartos, Some(2));
        assert_eq!(record.casas_banho, Some(1));
        assert_eq!(record.area_util, Some(84));
        assert_eq!(record.tipologia.as_deref(), Some("T2"));
    }

    #[test]
    fn supercasa_price_inside_wrapper_span() {
        let html = r#"<div class="property-price"><span>330.000&nbsp;€</span></div>"#;
        let record = run(Portal::Supercasa, html);
        assert_eq!(record.preco, Some(330_000));
    }

    #[test]
    fn missing_signals_leave_fields_unset() {
        let record = run(Portal::Era, "<html><body>página sem dados</body></html>");
        assert_eq!(record, ExtractedProperty::default());
    }

    #[test]
    fn rule_tables_never_overwrite_prefilled_fields() {
        let mut record = ExtractedProperty {
            preco: Some(111_111),
            ..Default::default()
        };
        let html = r#"<span class="info-data-price">250.000 €</span>"#;
        apply_rules(rules_for(Portal::Idealista).unwrap(), html, &mut record);
        assert_eq!(record.preco, Some(111_111));
    }
}
