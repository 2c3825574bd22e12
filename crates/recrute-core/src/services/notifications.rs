use recrute_types::Notification;
use tracing::debug;

use super::segment;
use crate::api;
use crate::error::{SessionError, SessionResult};
use crate::session::SessionManager;

/// In-app notifications (`/notifications`).
///
/// The notification feed is best effort: only an expired session is reported,
/// anything else degrades to an empty list or a silent no-op.
pub struct NotificationsApi<'a> {
    session: &'a SessionManager,
}

impl<'a> NotificationsApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    pub async fn list(&self) -> SessionResult<Vec<Notification>> {
        let result = async {
            let response = self
                .session
                .send(self.session.api().get("/notifications"))
                .await?;
            api::decode_list(response).await
        }
        .await;
        match result {
            Err(SessionError::AuthorizationExpired) => Err(SessionError::AuthorizationExpired),
            Err(e) => {
                debug!(error = %e, "notifications unavailable");
                Ok(Vec::new())
            }
            ok => ok,
        }
    }

    pub async fn mark_read(&self, notification_id: &str) -> SessionResult<()> {
        let path = format!("/notifications/{}/read", segment(notification_id));
        match self.session.send(self.session.api().patch(&path)).await {
            Ok(_) => Ok(()),
            Err(SessionError::AuthorizationExpired) => Err(SessionError::AuthorizationExpired),
            Err(e) => {
                debug!(error = %e, id = notification_id, "failed to mark notification read");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use recrute_types::Role;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::signed_in;

    #[tokio::test]
    async fn test_list_decodes_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "n1", "type_notification": "candidature", "titre": "Nouvelle candidature", "lu": false}
            ])))
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Recruiter);
        let feed = session.notifications().list().await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, "candidature");
        assert!(!feed[0].read);
    }

    #[tokio::test]
    async fn test_list_server_error_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Candidate);
        assert!(session.notifications().list().await.unwrap().is_empty());
        assert!(session.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_list_unauthorized_still_drops_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Candidate);
        let err = session.notifications().list().await.unwrap_err();
        assert!(matches!(err, SessionError::AuthorizationExpired));
        assert!(!session.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_mark_read_ignores_failures() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/notifications/n1/read"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let session = signed_in(&server, Role::Candidate);
        session.notifications().mark_read("n1").await.unwrap();
    }
}
