use recrute_types::{
    CandidateFilter, CandidateListing, DashboardStats, RecentCandidature, TopCandidate,
};

use crate::api;
use crate::error::SessionResult;
use crate::session::SessionManager;

/// Recruiter dashboard (`/dashboard`).
pub struct DashboardApi<'a> {
    session: &'a SessionManager,
}

impl<'a> DashboardApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    pub async fn stats(&self) -> SessionResult<DashboardStats> {
        let response = self
            .session
            .send(self.session.api().get("/dashboard/stats"))
            .await?;
        api::decode_json(response).await
    }

    /// Candidates with the best average matching score.
    pub async fn top_candidates(&self, limit: u32) -> SessionResult<Vec<TopCandidate>> {
        let request = self
            .session
            .api()
            .get("/dashboard/top-candidats")
            .query(&[("limit", limit)]);
        let response = self.session.send(request).await?;
        api::decode_list(response).await
    }

    /// Most recent applications, newest first.
    pub async fn latest_candidatures(&self, limit: u32) -> SessionResult<Vec<RecentCandidature>> {
        let request = self
            .session
            .api()
            .get("/dashboard/dernieres-candidatures")
            .query(&[("limit", limit)]);
        let response = self.session.send(request).await?;
        api::decode_list(response).await
    }

    pub async fn candidates(&self, filter: &CandidateFilter) -> SessionResult<Vec<CandidateListing>> {
        let request = self
            .session
            .api()
            .get("/dashboard/liste-candidats")
            .query(filter);
        let response = self.session.send(request).await?;
        api::decode_list(response).await
    }
}
