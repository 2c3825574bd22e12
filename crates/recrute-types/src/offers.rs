use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Publication status of a job offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OfferStatus {
    #[default]
    #[serde(rename = "ouverte")]
    Open,
    #[serde(rename = "fermee")]
    Closed,
}

impl OfferStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OfferStatus::Open => "ouverte",
            OfferStatus::Closed => "fermee",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ouverte" | "open" => Ok(OfferStatus::Open),
            "fermee" | "closed" => Ok(OfferStatus::Closed),
            other => Err(format!("unknown offer status '{other}'")),
        }
    }
}

/// Job offer as mirrored from `/offres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOffer {
    pub id: String,
    #[serde(rename = "recruteur_id", default)]
    pub recruiter_id: String,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "localisation", default)]
    pub location: Option<String>,
    #[serde(rename = "type_contrat", default)]
    pub contract_type: Option<String>,
    #[serde(rename = "salaire_min", default)]
    pub salary_min: Option<f64>,
    #[serde(rename = "salaire_max", default)]
    pub salary_max: Option<f64>,
    #[serde(rename = "experience_requise", default)]
    pub experience_required: Option<u32>,
    #[serde(rename = "date_publication", default)]
    pub published_at: String,
    #[serde(rename = "statut", default)]
    pub status: OfferStatus,
    /// Comma-separated skills, as flattened by the API.
    #[serde(rename = "competences_requises", default)]
    pub required_skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_structure: Option<Value>,
}

/// Body of `POST /offres`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewJobOffer {
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "localisation", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type_contrat", skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(rename = "salaire_min", skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(rename = "salaire_max", skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(rename = "experience_requise", skip_serializing_if = "Option::is_none")]
    pub experience_required: Option<u32>,
    #[serde(
        rename = "competences_requises",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_skills: Vec<String>,
}

/// Query string of `GET /offres`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "statut", skip_serializing_if = "Option::is_none")]
    pub status: Option<OfferStatus>,
    #[serde(rename = "localisation", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Restrict to the signed-in recruiter's own offers.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub mine: bool,
}

impl Default for OfferQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            location: None,
            mine: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_tolerates_sparse_records() {
        let offer: JobOffer = serde_json::from_str(
            r#"{"id":"o1","titre":"Data engineer","statut":"fermee","salaire_min":null}"#,
        )
        .unwrap();
        assert_eq!(offer.title, "Data engineer");
        assert_eq!(offer.status, OfferStatus::Closed);
        assert!(offer.salary_min.is_none());
        assert!(offer.location.is_none());
    }

    #[test]
    fn new_offer_skips_empty_fields() {
        let offer = NewJobOffer {
            title: "Backend dev".to_string(),
            description: "Rust services".to_string(),
            required_skills: vec!["rust".to_string()],
            ..NewJobOffer::default()
        };
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["titre"], "Backend dev");
        assert_eq!(json["competences_requises"][0], "rust");
        assert!(json.get("localisation").is_none());
    }
}
