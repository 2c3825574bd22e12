use recrute_types::{Candidature, CandidatureStatus};
use serde_json::json;

use super::segment;
use crate::api;
use crate::error::SessionResult;
use crate::session::SessionManager;

/// Applications to offers (`/candidatures`).
///
/// Candidates see their own applications; recruiters see the ones sent to
/// their offers. The API filters by the token's owner.
pub struct CandidaturesApi<'a> {
    session: &'a SessionManager,
}

impl<'a> CandidaturesApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    /// Applies to an offer with one of the candidate's CVs.
    pub async fn apply(&self, offer_id: &str, cv_id: &str) -> SessionResult<Candidature> {
        let request = self
            .session
            .api()
            .post("/candidatures")
            .json(&json!({ "offre_id": offer_id, "cv_id": cv_id }));
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }

    pub async fn mine(&self) -> SessionResult<Vec<Candidature>> {
        let response = self
            .session
            .send(self.session.api().get("/candidatures"))
            .await?;
        api::decode_list(response).await
    }

    /// Applications received for one offer (recruiters).
    pub async fn for_offer(&self, offer_id: &str) -> SessionResult<Vec<Candidature>> {
        let request = self
            .session
            .api()
            .get("/candidatures")
            .query(&[("offre_id", offer_id)]);
        let response = self.session.send(request).await?;
        api::decode_list(response).await
    }

    pub async fn get(&self, candidature_id: &str) -> SessionResult<Candidature> {
        let path = format!("/candidatures/{}", segment(candidature_id));
        let response = self.session.send(self.session.api().get(&path)).await?;
        api::decode_json(response).await
    }

    /// Moves an application through the hiring pipeline (recruiters).
    pub async fn update_status(
        &self,
        candidature_id: &str,
        status: CandidatureStatus,
    ) -> SessionResult<Candidature> {
        let path = format!("/candidatures/{}/statut", segment(candidature_id));
        let request = self
            .session
            .api()
            .patch(&path)
            .json(&json!({ "statut": status }));
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }
}
