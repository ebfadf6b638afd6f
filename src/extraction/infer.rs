use regex::Regex;
use url::Url;

/// Rental vs sale. URL path tokens outrank page text; sale is the implicit
/// default for listings that signal nothing either way.
pub fn business_type(url: &Url, html: &str) -> &'static str {
    let path = url.path().to_lowercase();
    if path.contains("arrendar") || path.contains("alugar") {
        return "Arrendamento";
    }
    if html.to_lowercase().contains("arrendamento") {
        return "Arrendamento";
    }
    "Venda"
}

/// Ordered keyword → category rules; first match wins, no match leaves the
/// field unset.
const PROPERTY_TYPES: &[(&str, &str)] = &[
    (r"(?i)moradia|vivenda", "Moradia"),
    (r"(?i)apartamento|\bandar\b|\bflat\b", "Apartamento"),
    (r"(?i)terreno|\blote\b", "Terreno"),
    (r"(?i)\bloja\b|comercial", "Loja"),
    (r"(?i)escrit[óo]rio|\boffice\b", "Escritório"),
    (r"(?i)armaz[ée]m|warehouse", "Armazém"),
    (r"(?i)\bquinta\b|herdade", "Quinta"),
];

pub fn property_type(text: &str) -> Option<&'static str> {
    for (pattern, category) in PROPERTY_TYPES {
        if let Ok(re) = Regex::new(pattern) {
            if re.is_match(text) {
                return Some(category);
            }
        }
    }
    None
}
