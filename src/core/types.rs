use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inbound body of `POST /api/scrape-property`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapePropertyRequest {
    pub url: String,
}

/// Normalized listing record.
///
/// Every field is optional: extraction degrades to partial records, and an
/// absent page signal leaves the field unset, never defaulted to a
/// sentinel. Wire names stay in Portuguese; they are the product's contract
/// with the back-office UI.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ExtractedProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    /// Whole euros; the source data itself carries integer-level granularity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco: Option<u64>,
    /// Uppercase typology code, e.g. "T3".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipologia: Option<String>,
    /// Usable floor area in m².
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_util: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quartos: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casas_banho: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
    /// "Venda" or "Arrendamento".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_negocio: Option<String>,
    /// One of the fixed category set (Moradia, Apartamento, …) or unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_imovel: Option<String>,
    /// Detected portal name, or a domain-derived guess for unknown sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonte: Option<String>,
}

/// Manual-entry prompt shown by the UI when every retrieval strategy failed.
pub const MANUAL_ENTRY_MESSAGE: &str =
    "Não foi possível obter a página do anúncio automaticamente. Preencha os dados do imóvel manualmente.";

/// Wire shape returned to the back-office caller.
///
/// Success: `{ success: true, data: … }`. Retrieval exhaustion:
/// `{ success: false, error: …, showForm: true }`, an expected outcome for
/// heavily defended portals, which the UI answers with its manual-entry
/// form rather than an error page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScrapePropertyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "showForm", default, skip_serializing_if = "is_false")]
    pub show_form: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ScrapePropertyResponse {
    pub fn extracted(data: ExtractedProperty) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            show_form: false,
        }
    }

    pub fn retrieval_blocked() -> Self {
        Self {
            success: false,
            data: None,
            error: Some(MANUAL_ENTRY_MESSAGE.to_string()),
            show_form: true,
        }
    }
}

/// Hard failures only. Retrieval exhaustion is NOT an error; it is the
/// `retrieval_blocked` response value above.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid listing URL: {0}")]
    InvalidUrl(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_omits_failure_fields() {
        let response = ScrapePropertyResponse::extracted(ExtractedProperty {
            titulo: Some("Moradia V3".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["titulo"], "Moradia V3");
        assert!(json.get("error").is_none());
        assert!(json.get("showForm").is_none());
    }

    #[test]
    fn blocked_response_signals_manual_entry() {
        let response = ScrapePropertyResponse::retrieval_blocked();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["showForm"], true);
        assert!(json["error"].as_str().unwrap().contains("manualmente"));
    }

    #[test]
    fn absent_record_fields_are_omitted_from_json() {
        let record = ExtractedProperty {
            preco: Some(250_000),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["preco"], 250_000);
        assert!(json.get("titulo").is_none());
        assert!(json.get("quartos").is_none());
    }
}
