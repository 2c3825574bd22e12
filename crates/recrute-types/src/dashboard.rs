//! Recruiter dashboard aggregates (`/dashboard`).

use serde::{Deserialize, Serialize};

use crate::candidatures::CandidatureStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "offres_ouvertes", default)]
    pub open_offers: u64,
    #[serde(default)]
    pub total_candidatures: u64,
    #[serde(rename = "candidatures_pending", default)]
    pub pending: u64,
    #[serde(rename = "candidatures_accepted", default)]
    pub accepted: u64,
    /// Applications received during the last seven days.
    #[serde(rename = "candidatures_recentes", default)]
    pub last_week: u64,
}

/// Candidate ranked by average matching score over the recruiter's offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCandidate {
    pub id: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "localisation", default)]
    pub location: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    #[serde(rename = "score_moyen", default)]
    pub average_score: f64,
    #[serde(rename = "nombre_candidatures", default)]
    pub candidature_count: u64,
    #[serde(rename = "meilleur_score", default)]
    pub best_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentCandidature {
    pub id: String,
    #[serde(rename = "candidat_nom", default)]
    pub candidate_name: Option<String>,
    #[serde(rename = "candidat_localisation", default)]
    pub candidate_location: Option<String>,
    #[serde(rename = "offre_titre", default)]
    pub offer_title: String,
    #[serde(rename = "offre_id", default)]
    pub offer_id: String,
    #[serde(rename = "statut", default)]
    pub status: CandidatureStatus,
    #[serde(rename = "score_matching", default)]
    pub matching_score: Option<f64>,
    #[serde(rename = "date_candidature", default)]
    pub applied_at: String,
}

/// One application row of the full candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateListing {
    pub id: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    #[serde(rename = "localisation", default)]
    pub location: Option<String>,
    #[serde(default)]
    pub candidature_id: String,
    #[serde(rename = "statut", default)]
    pub status: CandidatureStatus,
    #[serde(rename = "score_matching", default)]
    pub matching_score: Option<f64>,
    #[serde(rename = "date_candidature", default)]
    pub applied_at: String,
    #[serde(rename = "offre_titre", default)]
    pub offer_title: String,
    #[serde(rename = "offre_id", default)]
    pub offer_id: String,
}

/// Query filters of the candidate list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateFilter {
    #[serde(rename = "offre_id", skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(rename = "statut", skip_serializing_if = "Option::is_none")]
    pub status: Option<CandidatureStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}
