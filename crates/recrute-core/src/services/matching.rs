use recrute_types::{MatchingList, MatchingResult};
use serde_json::json;

use super::segment;
use crate::api;
use crate::error::SessionResult;
use crate::session::SessionManager;

/// CV/offer scoring (`/matching`).
pub struct MatchingApi<'a> {
    session: &'a SessionManager,
}

impl<'a> MatchingApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    /// Scores one CV against one offer. `explain` asks the server for a
    /// written explanation, which is slower.
    pub async fn score(
        &self,
        cv_id: &str,
        offer_id: &str,
        explain: bool,
    ) -> SessionResult<MatchingResult> {
        let request = self.session.api().post("/matching/score").json(&json!({
            "cv_id": cv_id,
            "offre_id": offer_id,
            "generer_explications": explain,
        }));
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }

    /// Best offers for a CV.
    pub async fn offers_for_cv(&self, cv_id: &str, top_k: u32) -> SessionResult<MatchingList> {
        let request = self
            .session
            .api()
            .post("/matching/search-offres")
            .json(&json!({
                "cv_id": cv_id,
                "top_k": top_k,
                "generer_explications": false,
            }));
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }

    /// Best candidates for an offer, with explanations.
    pub async fn best_candidates(&self, offer_id: &str, top_k: u32) -> SessionResult<MatchingList> {
        let path = format!("/matching/search-candidats/{}", segment(offer_id));
        let top_k = top_k.to_string();
        let request = self
            .session
            .api()
            .post(&path)
            .query(&[("top_k", top_k.as_str()), ("generer_explications", "true")]);
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }
}
