use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One CV/offer matching as scored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingResult {
    #[serde(rename = "score_final")]
    pub final_score: f64,
    /// EXCELLENT, BON, MOYEN or FAIBLE.
    #[serde(rename = "recommandation", default)]
    pub recommendation: String,
    #[serde(default)]
    pub details: Value,
    #[serde(rename = "explications", default, skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<String>,
    #[serde(rename = "offre_id", default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
}

/// Ranked matchings for one CV or one offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingList {
    #[serde(default)]
    pub cv_id: Option<String>,
    #[serde(rename = "offre_id", default)]
    pub offer_id: Option<String>,
    #[serde(default)]
    pub matches: Vec<MatchingResult>,
    #[serde(default)]
    pub total_results: usize,
}
