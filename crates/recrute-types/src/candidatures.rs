use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review label a recruiter puts on an application.
///
/// The server accepts any transition between these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidatureStatus {
    #[default]
    Pending,
    Interview,
    Accepted,
    Rejected,
}

impl CandidatureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidatureStatus::Pending => "pending",
            CandidatureStatus::Interview => "interview",
            CandidatureStatus::Accepted => "accepted",
            CandidatureStatus::Rejected => "rejected",
        }
    }

    pub fn all() -> &'static [CandidatureStatus] {
        &[
            CandidatureStatus::Pending,
            CandidatureStatus::Interview,
            CandidatureStatus::Accepted,
            CandidatureStatus::Rejected,
        ]
    }
}

impl fmt::Display for CandidatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidatureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown status '{wanted}' (expected pending, interview, accepted or rejected)")
            })
    }
}

/// Application of a candidate's résumé to a job offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidature {
    pub id: String,
    #[serde(rename = "candidat_id", default)]
    pub candidate_id: String,
    #[serde(rename = "offre_id")]
    pub offer_id: String,
    #[serde(rename = "statut", default)]
    pub status: CandidatureStatus,
    /// Server-computed matching score (0-100).
    #[serde(rename = "score_matching", default)]
    pub matching_score: Option<f64>,
    #[serde(rename = "explication", default)]
    pub explanation: Option<String>,
    #[serde(rename = "date_candidature", default)]
    pub applied_at: String,
}
