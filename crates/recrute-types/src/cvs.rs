use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uploaded résumé with its server-side extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cv {
    pub id: String,
    #[serde(rename = "candidat_id", default)]
    pub candidate_id: String,
    #[serde(rename = "nom_fichier", default)]
    pub file_name: String,
    #[serde(rename = "texte_brut", default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_structure: Option<Value>,
    #[serde(rename = "date_upload", default)]
    pub uploaded_at: String,
}
