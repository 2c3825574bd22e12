use serde::{Deserialize, Serialize};

/// Profile of the signed-in candidate (`/candidats/me`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
    #[serde(rename = "localisation", default)]
    pub location: Option<String>,
    #[serde(rename = "date_naissance", default)]
    pub birth_date: Option<String>,
}

/// Partial update; absent fields are left untouched by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfileUpdate {
    #[serde(rename = "nom", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "localisation", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CandidateProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.location.is_none()
    }
}
