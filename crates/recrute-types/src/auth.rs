use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. Decides which of the two UI surfaces a session may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "candidat")]
    Candidate,
    #[serde(rename = "recruteur")]
    Recruiter,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Candidate => "candidat",
            Role::Recruiter => "recruteur",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidat" | "candidate" => Ok(Role::Candidate),
            "recruteur" | "recruiter" => Ok(Role::Recruiter),
            other => Err(format!(
                "unknown role '{other}' (expected candidat or recruteur)"
            )),
        }
    }
}

/// Profile record returned by `GET /api/auth/me` (and by registration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of a successful `POST /api/auth/login`.
///
/// Some deployments echo the account fields next to the tokens; they are
/// only used when no profile could be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl TokenResponse {
    /// Creates a token response carrying only the two credentials.
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            token_type: None,
            id: None,
            email: None,
            role: None,
        }
    }

    /// Builds a profile from the echoed account fields, if all of them are present.
    pub fn echoed_profile(&self) -> Option<UserProfile> {
        Some(UserProfile {
            id: self.id.clone()?,
            email: self.email.clone()?,
            role: self.role?,
            is_active: None,
        })
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Candidate name or recruiter company name.
    #[serde(rename = "nom", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
