use recrute_types::{CandidateProfile, CandidateProfileUpdate};

use crate::api;
use crate::error::SessionResult;
use crate::session::SessionManager;

const PROFILE_PATH: &str = "/candidats/me";

/// Profile of the signed-in candidate (`/candidats/me`).
pub struct ProfileApi<'a> {
    session: &'a SessionManager,
}

impl<'a> ProfileApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    pub async fn get(&self) -> SessionResult<CandidateProfile> {
        let response = self
            .session
            .send(self.session.api().get(PROFILE_PATH))
            .await?;
        api::decode_json(response).await
    }

    /// Applies a partial update and returns the stored profile.
    pub async fn update(&self, update: &CandidateProfileUpdate) -> SessionResult<CandidateProfile> {
        let request = self.session.api().patch(PROFILE_PATH).json(update);
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }
}
