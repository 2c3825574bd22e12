use serde::{Deserialize, Serialize};

/// In-app notification (application accepted, interview, recommended offer...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type_notification", default)]
    pub kind: String,
    #[serde(rename = "titre", default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "reference_id", default)]
    pub reference_id: Option<String>,
    #[serde(rename = "lu", default)]
    pub read: bool,
    #[serde(rename = "date_creation", default)]
    pub created_at: String,
}
