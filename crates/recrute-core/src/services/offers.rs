use recrute_types::{JobOffer, NewJobOffer, OfferQuery};
use serde_json::{Value, json};

use super::segment;
use crate::api;
use crate::error::SessionResult;
use crate::session::SessionManager;

/// Job offers (`/offres`).
pub struct OffersApi<'a> {
    session: &'a SessionManager,
}

impl<'a> OffersApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    /// Paginated offers. Without a status filter the API lists open offers.
    pub async fn list(&self, query: &OfferQuery) -> SessionResult<Vec<JobOffer>> {
        let request = self.session.api().get("/offres").query(query);
        let response = self.session.send(request).await?;
        api::decode_list(response).await
    }

    /// Offers published by the signed-in recruiter.
    pub async fn mine(&self, page: u32, limit: u32) -> SessionResult<Vec<JobOffer>> {
        self.list(&OfferQuery {
            page,
            limit,
            mine: true,
            ..OfferQuery::default()
        })
        .await
    }

    pub async fn get(&self, offer_id: &str) -> SessionResult<JobOffer> {
        let path = format!("/offres/{}", segment(offer_id));
        let response = self.session.send(self.session.api().get(&path)).await?;
        api::decode_json(response).await
    }

    /// Publishes an offer (recruiters only).
    pub async fn create(&self, offer: &NewJobOffer) -> SessionResult<JobOffer> {
        let request = self.session.api().post("/offres").json(offer);
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }

    /// Semantic search of offers close to a structured CV.
    pub async fn recommended(&self, cv_json: &Value, top_k: u32) -> SessionResult<Value> {
        let request = self
            .session
            .api()
            .post("/cvs/search-offres")
            .json(&json!({ "cv_json": cv_json, "top_k": top_k }));
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use recrute_types::{OfferStatus, Role};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::signed_in;

    #[tokio::test]
    async fn test_list_sends_filters_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/offres"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "5"))
            .and(query_param("statut", "fermee"))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "o1", "titre": "Data engineer", "statut": "fermee"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Candidate);
        let offers = session
            .offers()
            .list(&OfferQuery {
                page: 2,
                limit: 5,
                status: Some(OfferStatus::Closed),
                ..OfferQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].status, OfferStatus::Closed);
    }

    #[tokio::test]
    async fn test_mine_sets_flag_and_tolerates_non_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/offres"))
            .and(query_param("mine", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Recruiter);
        let offers = session.offers().mine(1, 50).await.unwrap();
        assert!(offers.is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_french_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/offres"))
            .and(body_json(json!({
                "titre": "Backend dev",
                "description": "Rust services",
                "localisation": "Lyon"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "o9", "recruteur_id": "r1", "titre": "Backend dev",
                "description": "Rust services", "localisation": "Lyon", "statut": "ouverte"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Recruiter);
        let created = session
            .offers()
            .create(&NewJobOffer {
                title: "Backend dev".to_string(),
                description: "Rust services".to_string(),
                location: Some("Lyon".to_string()),
                ..NewJobOffer::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, "o9");
        assert_eq!(created.status, OfferStatus::Open);
    }
}
