use regex::Regex;

/// Try an ordered pattern list against the page; first match wins.
///
/// A pattern with a capture group yields group 1, otherwise the whole
/// match. An unmatchable or invalid pattern simply falls through to the
/// next; "field not found" is the common case here, not a failure.
pub fn first_capture(html: &str, patterns: &[&str]) -> Option<String> {
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(html) {
                if let Some(m) = caps.get(1).or_else(|| caps.get(0)) {
                    let value = m.as_str().trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Portuguese-locale price ("250.000 €", "250,000€") → whole euros.
///
/// Separators and the currency sign are stripped outright before the
/// integer parse. Lossy for the rare sub-unit price; the source data
/// carries integer-level granularity anyway.
pub fn parse_price(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Area figure → whole m².
///
/// Unlike prices, a `.`/`,` here may be a decimal mark ("120,5") or a
/// thousands group ("1.200"): a 3-digit tail folds in, a shorter tail
/// truncates. Folding "120,5" into 1205 would fabricate a value.
pub fn parse_area(raw: &str) -> Option<u32> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut integer = String::new();
    for (i, part) in cleaned.split(['.', ',']).enumerate() {
        if !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if i == 0 {
            integer.push_str(part);
        } else if part.len() == 3 {
            integer.push_str(part);
        } else {
            break;
        }
    }
    if integer.is_empty() {
        return None;
    }
    integer.parse().ok()
}

/// Bedroom/bathroom counts: first integer in the captured fragment.
pub fn parse_count(raw: &str) -> Option<u32> {
    let re = Regex::new(r"\d+").unwrap();
    re.find(raw)?.as_str().parse().ok()
}

/// Typology token: contiguous `T` + digits, uppercased ("t3" → "T3").
/// "t 3" is not a typology and must not normalize into one.
pub fn normalize_typology(raw: &str) -> Option<String> {
    let re = Regex::new(r"[Tt](\d+)").unwrap();
    let caps = re.captures(raw)?;
    Some(format!("T{}", &caps[1]))
}

/// Titles arrive with entity escapes and site-name tails
/// ("Moradia T3 em Braga | idealista"); strip both.
pub fn clean_title(raw: &str) -> String {
    let mut title = decode_entities(raw.trim());
    for separator in [" | ", " – ", " — ", " - ", " :: "] {
        if let Some(idx) = title.rfind(separator) {
            let tail = &title[idx + separator.len()..];
            if looks_like_site_suffix(tail) {
                title.truncate(idx);
            }
        }
    }
    title.trim().to_string()
}

fn looks_like_site_suffix(tail: &str) -> bool {
    const SITE_WORDS: &[&str] = &[
        "idealista",
        "imovirtual",
        "sapo",
        "supercasa",
        "remax",
        "era portugal",
        "era imobiliária",
        "century",
        "keller williams",
        "kw portugal",
        "imobiliária",
        "imobiliaria",
        ".pt",
        ".com",
    ];
    let tail = tail.to_lowercase();
    tail.len() <= 48 && SITE_WORDS.iter().any(|w| tail.contains(w))
}

/// Minimal entity decode for the handful of escapes that show up in
/// `<title>`/meta content. Full HTML unescaping is overkill for titles.
fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&ndash;", "–")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_strips_separators_and_currency() {
        assert_eq!(parse_price("250.000 €"), Some(250_000));
        assert_eq!(parse_price("250,000€"), Some(250_000));
        assert_eq!(parse_price("1.250.000"), Some(1_250_000));
        assert_eq!(parse_price("€"), None);
    }

    #[test]
    fn area_distinguishes_decimals_from_thousands() {
        assert_eq!(parse_area("120"), Some(120));
        assert_eq!(parse_area("120,5"), Some(120));
        assert_eq!(parse_area("120.5"), Some(120));
        assert_eq!(parse_area("1.200"), Some(1_200));
        assert_eq!(parse_area("1.200,75"), Some(1_200));
        assert_eq!(parse_area(""), None);
    }

    #[test]
    fn typology_is_contiguous_and_uppercased() {
        assert_eq!(normalize_typology("t3"), Some("T3".to_string()));
        assert_eq!(normalize_typology("T12"), Some("T12".to_string()));
        assert_eq!(normalize_typology("t 3"), None);
        assert_eq!(normalize_typology("Tx"), None);
    }

    #[test]
    fn first_capture_respects_pattern_priority() {
        let html = r#"<span class="price">100 €</span><span>900 €</span>"#;
        let value = first_capture(
            html,
            &[r#"class="price"[^>]*>([^<]+)<"#, r"(\d+)\s*€"],
        );
        assert_eq!(value.as_deref(), Some("100 €"));
    }

    #[test]
    fn first_capture_falls_through_on_miss() {
        let html = "<p>880 €</p>";
        let value = first_capture(html, &[r#"class="price"[^>]*>([^<]+)<"#, r"(\d+)\s*€"]);
        assert_eq!(value.as_deref(), Some("880"));
        assert_eq!(first_capture(html, &[r"class=.nothing."]), None);
    }

    #[test]
    fn titles_lose_site_suffixes_but_keep_real_dashes() {
        assert_eq!(
            clean_title("Apartamento T2 Lisboa | idealista"),
            "Apartamento T2 Lisboa"
        );
        assert_eq!(
            clean_title("Moradia V4 — Supercasa.pt"),
            "Moradia V4"
        );
        assert_eq!(
            clean_title("Quinta do Lago - vista rio"),
            "Quinta do Lago - vista rio"
        );
        assert_eq!(clean_title("Sal&amp;Mar T1"), "Sal&Mar T1");
    }
}
