//! Authenticated-user session of the running client.
//!
//! The [`SessionManager`] owns the token pair and the cached profile, mirrors
//! them into a [`SessionStore`], and is the only place credentials are
//! attached to outgoing requests. Views observe transitions through
//! [`SessionManager::subscribe`].
//!
//! States move `Unauthenticated -> Verifying -> Authenticated`, and back to
//! `Unauthenticated` on logout or when a signed request is rejected with 401.
//! `Verifying` is only entered by [`SessionManager::initialize`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use recrute_types::{Registration, TokenResponse, UserProfile};
use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{self, ApiClient};
use crate::error::{SessionError, SessionResult};
use crate::storage::{SessionStore, StorageKey};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const PROFILE_PATH: &str = "/api/auth/me";

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    /// A persisted token is being checked against the API. `cached` is the
    /// last persisted profile and has not been validated.
    Verifying { cached: Option<UserProfile> },
    Authenticated { user: UserProfile },
}

impl SessionState {
    /// Validated user, only present when authenticated.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Verifying { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Verifying { .. } => "verifying",
            SessionState::Authenticated { .. } => "authenticated",
        }
    }
}

/// Masks a token for display: keeps a short prefix only.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() > 16 {
        let prefix: String = token.chars().take(12).collect();
        format!("{prefix}...")
    } else {
        "***".to_string()
    }
}

#[derive(Debug, Default)]
struct Credentials {
    access: Option<String>,
    refresh: Option<String>,
    /// Bumped by every authoritative transition (logout, login, a new
    /// initialize). Outcomes of requests started under an older epoch are
    /// dropped.
    epoch: u64,
}

/// Owner of the client session.
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    credentials: Mutex<Credentials>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Creates an empty, unauthenticated manager. Nothing is read from the
    /// store until [`initialize`](Self::initialize).
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            api,
            store,
            credentials: Mutex::new(Credentials::default()),
            state,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock().access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock().refresh.clone()
    }

    /// Receiver that sees every state transition as soon as it happens.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Credentials> {
        self.credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: SessionState) {
        let name = next.name();
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            info!(state = name, "session transition");
        }
    }

    /// Restores a persisted session.
    ///
    /// Without a persisted token this ends `Unauthenticated` immediately.
    /// Otherwise the manager enters `Verifying` with the cached profile and
    /// checks the token against the profile endpoint: success replaces the
    /// cached profile, any failure (including network errors) drops the
    /// session. A [`logout`](Self::logout) issued meanwhile always wins.
    pub async fn initialize(&self) -> SessionState {
        let access = match self.store.get(StorageKey::AccessToken) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "unreadable persisted session, clearing it");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "failed to clear persisted session");
                }
                None
            }
        };

        let Some(access) = access else {
            let mut creds = self.lock();
            creds.epoch += 1;
            creds.access = None;
            creds.refresh = None;
            self.transition(SessionState::Unauthenticated);
            return SessionState::Unauthenticated;
        };

        let refresh = self.store.get(StorageKey::RefreshToken).ok().flatten();
        let cached = self.load_cached_user();

        let epoch = {
            let mut creds = self.lock();
            creds.epoch += 1;
            creds.access = Some(access.clone());
            creds.refresh = refresh;
            self.transition(SessionState::Verifying { cached });
            creds.epoch
        };

        debug!(token = %mask_token(&access), "verifying persisted session");
        let outcome = self.request_profile(&access).await;

        let mut creds = self.lock();
        if creds.epoch != epoch {
            debug!("verification outcome discarded, session changed meanwhile");
            return self.state();
        }

        match outcome {
            Ok(user) => {
                self.persist_user(&user);
                let next = SessionState::Authenticated { user };
                self.transition(next.clone());
                next
            }
            Err(e) => {
                warn!(error = %e, "session verification failed, dropping session");
                if let Err(e) = self.clear_locked(&mut creds) {
                    warn!(error = %e, "failed to clear persisted session");
                }
                SessionState::Unauthenticated
            }
        }
    }

    /// Exchanges credentials for a token pair. Does not change the session;
    /// callers persist the pair with [`set_tokens`](Self::set_tokens) before
    /// fetching the profile.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<TokenResponse> {
        let response = self
            .api
            .post(LOGIN_PATH)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return api::decode_json(response).await;
        }

        let detail = api::failure_detail(response).await;
        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY => Err(SessionError::InvalidCredentials(detail)),
            _ => Err(SessionError::Api {
                status: status.as_u16(),
                detail,
            }),
        }
    }

    /// Creates an account. Does not authenticate; see [`sign_up`](Self::sign_up).
    pub async fn register(&self, registration: &Registration) -> SessionResult<UserProfile> {
        let response = self
            .api
            .post(REGISTER_PATH)
            .json(registration)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return api::decode_json(response).await;
        }

        let detail = api::failure_detail(response).await;
        match status {
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(SessionError::Validation(detail))
            }
            _ => Err(SessionError::Api {
                status: status.as_u16(),
                detail,
            }),
        }
    }

    /// Persists whichever credentials are given. Absent ones are left alone.
    pub fn set_tokens(&self, access: Option<&str>, refresh: Option<&str>) -> SessionResult<()> {
        let mut creds = self.lock();
        if let Some(access) = access.filter(|t| !t.is_empty()) {
            self.store.set(StorageKey::AccessToken, access)?;
            creds.access = Some(access.to_string());
        }
        if let Some(refresh) = refresh.filter(|t| !t.is_empty()) {
            self.store.set(StorageKey::RefreshToken, refresh)?;
            creds.refresh = Some(refresh.to_string());
        }
        Ok(())
    }

    /// Attaches the current access token as a bearer credential, if any.
    pub fn sign_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a signed request.
    ///
    /// A 401 drops the session (when it was signed with the current token) and
    /// yields [`SessionError::AuthorizationExpired`]. Other failures are
    /// surfaced as [`SessionError::Api`] without touching the session.
    pub async fn send(&self, request: RequestBuilder) -> SessionResult<Response> {
        let token = self.access_token();
        let request = match &token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "api response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.expire(token.as_deref());
            return Err(SessionError::AuthorizationExpired);
        }

        Err(SessionError::Api {
            status: status.as_u16(),
            detail: api::failure_detail(response).await,
        })
    }

    /// Signed `GET /api/auth/me`.
    pub async fn fetch_profile(&self) -> SessionResult<UserProfile> {
        let response = self.send(self.api.get(PROFILE_PATH)).await?;
        api::decode_json(response).await
    }

    /// Completes a manual login: persists the token pair and the profile and
    /// enters `Authenticated`.
    ///
    /// Without an explicit profile the account fields echoed by the login
    /// response are used.
    pub fn login_success(
        &self,
        tokens: &TokenResponse,
        user: Option<UserProfile>,
    ) -> SessionResult<UserProfile> {
        let user = user.or_else(|| tokens.echoed_profile()).ok_or_else(|| {
            SessionError::Decode("login response carries no user profile".to_string())
        })?;

        self.set_tokens(
            Some(tokens.access_token.as_str()),
            tokens.refresh_token.as_deref(),
        )?;

        let raw = serde_json::to_string(&user).map_err(|e| SessionError::Decode(e.to_string()))?;
        let mut creds = self.lock();
        creds.epoch += 1;
        self.store.set(StorageKey::User, &raw)?;
        self.transition(SessionState::Authenticated { user: user.clone() });
        info!(role = %user.role, "logged in");
        Ok(user)
    }

    /// Login page flow: login, persist tokens, fetch the profile, complete.
    ///
    /// A failure after the tokens were persisted drops them again.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<UserProfile> {
        let tokens = self.login(email, password).await?;
        self.set_tokens(
            Some(tokens.access_token.as_str()),
            tokens.refresh_token.as_deref(),
        )?;

        match self.fetch_profile().await {
            Ok(profile) => self.login_success(&tokens, Some(profile)),
            Err(e) => {
                if let Err(clear) = self.logout() {
                    warn!(error = %clear, "failed to clear tokens after login failure");
                }
                Err(e)
            }
        }
    }

    /// Register page flow: create the account, then sign in with it.
    pub async fn sign_up(&self, registration: &Registration) -> SessionResult<UserProfile> {
        self.register(registration).await?;
        self.sign_in(&registration.email, &registration.password)
            .await
    }

    /// Re-fetches the profile of an authenticated session.
    ///
    /// Only the user record changes. A different role drops the session
    /// with [`SessionError::RoleChanged`].
    pub async fn refresh_profile(&self) -> SessionResult<UserProfile> {
        let Some(current) = self.current_user() else {
            return Err(SessionError::AuthorizationExpired);
        };
        let epoch = self.lock().epoch;

        let fresh = self.fetch_profile().await?;

        let mut creds = self.lock();
        if creds.epoch != epoch {
            return self
                .current_user()
                .ok_or(SessionError::AuthorizationExpired);
        }

        if fresh.role != current.role {
            warn!(cached = %current.role, fetched = %fresh.role, "role changed, dropping session");
            self.clear_locked(&mut creds)?;
            return Err(SessionError::RoleChanged);
        }

        self.persist_user(&fresh);
        self.transition(SessionState::Authenticated {
            user: fresh.clone(),
        });
        Ok(fresh)
    }

    /// Drops the session from memory and storage. Idempotent.
    ///
    /// Memory is cleared first, so a storage failure still leaves the manager
    /// `Unauthenticated`.
    pub fn logout(&self) -> SessionResult<()> {
        let mut creds = self.lock();
        self.clear_locked(&mut creds)
    }

    fn clear_locked(&self, creds: &mut Credentials) -> SessionResult<()> {
        creds.epoch += 1;
        creds.access = None;
        creds.refresh = None;
        self.transition(SessionState::Unauthenticated);
        self.store.clear()?;
        Ok(())
    }

    /// Handles a 401 on a request signed with `used`.
    fn expire(&self, used: Option<&str>) {
        let mut creds = self.lock();
        if creds.access.as_deref() != used {
            debug!("ignoring 401 for a token that is no longer current");
            return;
        }
        warn!("access token rejected, dropping session");
        if let Err(e) = self.clear_locked(&mut creds) {
            warn!(error = %e, "failed to clear persisted session");
        }
    }

    async fn request_profile(&self, access: &str) -> SessionResult<UserProfile> {
        let response = self
            .api
            .get(PROFILE_PATH)
            .bearer_auth(access)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SessionError::AuthorizationExpired);
        }
        if !status.is_success() {
            return Err(SessionError::Api {
                status: status.as_u16(),
                detail: api::failure_detail(response).await,
            });
        }
        api::decode_json(response).await
    }

    fn load_cached_user(&self) -> Option<UserProfile> {
        let raw = match self.store.get(StorageKey::User) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read cached user");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .inspect_err(|e| debug!(error = %e, "ignoring malformed cached user"))
            .ok()
    }

    fn persist_user(&self, user: &UserProfile) {
        let result = serde_json::to_string(user)
            .map_err(|e| SessionError::Decode(e.to_string()))
            .and_then(|raw| {
                self.store
                    .set(StorageKey::User, &raw)
                    .map_err(SessionError::from)
            });
        if let Err(e) = result {
            warn!(error = %e, "failed to persist user profile");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use recrute_types::Role;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::guard::{self, Access, Route};
    use crate::storage::{FileStore, MemoryStore};

    fn manager(server: &MockServer, store: Arc<MemoryStore>) -> SessionManager {
        let api = ApiClient::new(server.uri().parse().unwrap());
        SessionManager::new(api, store)
    }

    fn profile(id: &str, role: &str) -> serde_json::Value {
        json!({ "id": id, "email": "a@b.com", "role": role })
    }

    fn stored_user(id: &str, role: Role) -> String {
        serde_json::to_string(&UserProfile {
            id: id.to_string(),
            email: "a@b.com".to_string(),
            role,
            is_active: None,
        })
        .unwrap()
    }

    fn assert_store_empty(store: &MemoryStore) {
        for key in StorageKey::ALL {
            assert!(store.get(key).unwrap().is_none(), "{} still stored", key.as_str());
        }
    }

    #[tokio::test]
    async fn test_initialize_without_token_is_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile("u1", "candidat")))
            .expect(0)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store);

        let state = session.initialize().await;
        assert_eq!(state, SessionState::Unauthenticated);
        assert!(session.current_user().is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_initialize_replaces_stale_cached_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("authorization", "Bearer T0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "u1", "email": "fresh@b.com", "role": "candidat", "is_active": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cached = stored_user("u1", Role::Candidate);
        let store = Arc::new(MemoryStore::with_entries([
            (StorageKey::AccessToken, "T0"),
            (StorageKey::User, cached.as_str()),
        ]));
        let session = manager(&server, store.clone());

        let state = session.initialize().await;
        let user = state.user().unwrap();
        assert_eq!(user.email, "fresh@b.com");
        assert_eq!(session.current_user().unwrap().email, "fresh@b.com");

        let persisted = store.get(StorageKey::User).unwrap().unwrap();
        assert!(persisted.contains("fresh@b.com"));
    }

    #[tokio::test]
    async fn test_initialize_rejected_token_clears_everything() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid authentication"})))
            .mount(&server)
            .await;

        let cached = stored_user("u1", Role::Recruiter);
        let store = Arc::new(MemoryStore::with_entries([
            (StorageKey::AccessToken, "T0"),
            (StorageKey::RefreshToken, "R0"),
            (StorageKey::User, cached.as_str()),
        ]));
        let session = manager(&server, store.clone());

        assert_eq!(session.initialize().await, SessionState::Unauthenticated);
        assert!(session.access_token().is_none());
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_initialize_server_error_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::with_entries([(StorageKey::AccessToken, "T0")]));
        let session = manager(&server, store.clone());

        assert_eq!(session.initialize().await, SessionState::Unauthenticated);
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_initialize_network_error_fails_closed() {
        // discard port, nothing accepts connections there
        let api = ApiClient::new("http://127.0.0.1:9".parse().unwrap());
        let store = Arc::new(MemoryStore::with_entries([(StorageKey::AccessToken, "T0")]));
        let session = SessionManager::new(api, store.clone());

        assert_eq!(session.initialize().await, SessionState::Unauthenticated);
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_corrupt_session_file_is_cleared_and_login_works() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "T1", "token_type": "bearer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile("u1", "candidat")))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("session.json");
        std::fs::write(&file, r#"{"access_token": "T0", trunc"#).unwrap();
        let api = ApiClient::new(server.uri().parse().unwrap());
        let session = SessionManager::new(api, Arc::new(FileStore::new(&file)));

        assert_eq!(session.initialize().await, SessionState::Unauthenticated);
        assert!(!file.exists());

        let user = session.sign_in("a@b.com", "pw").await.unwrap();
        assert_eq!(user.id, "u1");
        let stored = std::fs::read_to_string(&file).unwrap();
        assert!(stored.contains("\"access_token\": \"T1\""));
    }

    #[tokio::test]
    async fn test_verifying_is_observable_before_resolution() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(profile("u1", "candidat"))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let cached = stored_user("u1", Role::Candidate);
        let store = Arc::new(MemoryStore::with_entries([
            (StorageKey::AccessToken, "T0"),
            (StorageKey::User, cached.as_str()),
        ]));
        let session = Arc::new(manager(&server, store));
        let mut states = session.subscribe();

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.initialize().await })
        };

        states.changed().await.unwrap();
        let seen = states.borrow_and_update().clone();
        match seen {
            SessionState::Verifying { cached } => {
                assert_eq!(cached.unwrap().role, Role::Candidate);
            }
            other => panic!("expected verifying, got {other:?}"),
        }
        assert!(session.is_loading());
        // an unvalidated cached profile is never exposed as the current user
        assert!(session.current_user().is_none());

        let end = task.await.unwrap();
        assert!(end.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_during_verification_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(profile("u1", "candidat"))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::with_entries([(StorageKey::AccessToken, "T0")]));
        let session = Arc::new(manager(&server, store.clone()));
        let mut states = session.subscribe();

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.initialize().await })
        };

        states.changed().await.unwrap();
        assert!(states.borrow_and_update().is_loading());
        session.logout().unwrap();

        let end = task.await.unwrap();
        assert_eq!(end, SessionState::Unauthenticated);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_login_then_set_tokens_signs_latest_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "T1", "refresh_token": "R1", "token_type": "bearer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("authorization", "Bearer T2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());

        let tokens = session.login("a@b.com", "pw").await.unwrap();
        assert_eq!(tokens.access_token, "T1");
        // login alone changes nothing
        assert!(session.access_token().is_none());
        assert_eq!(session.state(), SessionState::Unauthenticated);

        session
            .set_tokens(Some(tokens.access_token.as_str()), tokens.refresh_token.as_deref())
            .unwrap();
        assert_eq!(session.access_token().as_deref(), Some("T1"));

        session.set_tokens(Some("T2"), None).unwrap();
        assert_eq!(session.refresh_token().as_deref(), Some("R1"));
        assert_eq!(
            store.get(StorageKey::AccessToken).unwrap().as_deref(),
            Some("T2")
        );

        session.send(session.api().get("/ping")).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsigned_when_no_token() {
        let server = MockServer::start().await;
        let session = manager(&server, Arc::new(MemoryStore::new()));

        let request = session
            .sign_request(session.api().get("/offres"))
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());

        session.set_tokens(Some("T9"), None).unwrap();
        let request = session
            .sign_request(session.api().get("/offres"))
            .build()
            .unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer T9");
    }

    #[tokio::test]
    async fn test_login_rejected_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})))
            .mount(&server)
            .await;

        let session = manager(&server, Arc::new(MemoryStore::new()));
        match session.login("a@b.com", "bad").await {
            Err(SessionError::InvalidCredentials(detail)) => {
                assert_eq!(detail, "Invalid credentials");
            }
            other => panic!("expected invalid credentials, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_failure_keeps_existing_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());
        let tokens = TokenResponse::new("T1", None);
        let user: UserProfile = serde_json::from_value(profile("u1", "recruteur")).unwrap();
        session.login_success(&tokens, Some(user)).unwrap();

        assert!(session.login("a@b.com", "bad").await.is_err());
        assert!(session.state().is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_register_rejection_is_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .and(body_json(json!({
                "email": "a@b.com", "password": "123", "role": "candidat", "nom": "Ada"
            })))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": [{"loc": ["body", "password"], "msg": "String should have at least 6 characters"}]
            })))
            .mount(&server)
            .await;

        let session = manager(&server, Arc::new(MemoryStore::new()));
        let registration = Registration {
            email: "a@b.com".to_string(),
            password: "123".to_string(),
            role: Role::Candidate,
            display_name: Some("Ada".to_string()),
        };
        match session.register(&registration).await {
            Err(SessionError::Validation(detail)) => {
                assert!(detail.contains("at least 6 characters"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());
        let tokens = TokenResponse::new("T1", Some("R1".to_string()));
        let user: UserProfile = serde_json::from_value(profile("u1", "candidat")).unwrap();
        session.login_success(&tokens, Some(user)).unwrap();

        let mut states = session.subscribe();

        session.logout().unwrap();
        let once = (session.state(), session.access_token(), session.refresh_token());
        assert!(states.has_changed().unwrap());
        states.mark_unchanged();

        session.logout().unwrap();
        let twice = (session.state(), session.access_token(), session.refresh_token());

        assert_eq!(once, twice);
        assert_eq!(twice.0, SessionState::Unauthenticated);
        assert!(!states.has_changed().unwrap());
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_expired_token_on_signed_request_logs_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidatures"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());
        let user: UserProfile = serde_json::from_value(profile("u1", "candidat")).unwrap();
        session
            .login_success(&TokenResponse::new("T1", None), Some(user))
            .unwrap();

        let err = session
            .send(session.api().get("/candidatures"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::AuthorizationExpired));
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_forbidden_does_not_log_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cvs/my-cvs"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Forbidden (role)"})))
            .mount(&server)
            .await;

        let session = manager(&server, Arc::new(MemoryStore::new()));
        let user: UserProfile = serde_json::from_value(profile("u1", "recruteur")).unwrap();
        session
            .login_success(&TokenResponse::new("T1", None), Some(user))
            .unwrap();

        let err = session
            .send(session.api().get("/cvs/my-cvs"))
            .await
            .unwrap_err();
        match err {
            SessionError::Api { status, detail } => {
                assert_eq!(status, 403);
                assert_eq!(detail, "Forbidden (role)");
            }
            other => panic!("expected api error, got {other:?}"),
        }
        assert!(session.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_stale_401_does_not_drop_new_session() {
        let server = MockServer::start().await;
        let session = manager(&server, Arc::new(MemoryStore::new()));
        let user: UserProfile = serde_json::from_value(profile("u1", "candidat")).unwrap();
        session
            .login_success(&TokenResponse::new("T-new", None), Some(user))
            .unwrap();

        session.expire(Some("T-old"));
        assert!(session.state().is_authenticated());

        session.expire(Some("T-new"));
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_success_falls_back_to_echoed_fields() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());
        let tokens: TokenResponse = serde_json::from_value(json!({
            "access_token": "T1", "id": "u7", "email": "r@b.com", "role": "recruteur"
        }))
        .unwrap();

        let user = session.login_success(&tokens, None).unwrap();
        assert_eq!(user.id, "u7");
        assert_eq!(user.role, Role::Recruiter);
        assert!(store.get(StorageKey::User).unwrap().unwrap().contains("u7"));

        let bare = TokenResponse::new("T2", None);
        assert!(matches!(
            session.login_success(&bare, None),
            Err(SessionError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_in_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "T1", "role": "candidat"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile("u1", "candidat")))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());

        let user = session.sign_in("a@b.com", "pw").await.unwrap();
        assert_eq!(user.role, Role::Candidate);
        assert_eq!(session.current_user().unwrap().id, "u1");
        assert_eq!(
            store.get(StorageKey::AccessToken).unwrap().as_deref(),
            Some("T1")
        );
        assert!(store.get(StorageKey::RefreshToken).unwrap().is_none());

        let state = session.state();
        assert_eq!(guard::check(&state, Route::CandidateHome), Access::Granted);
        assert_eq!(
            guard::check(&state, Route::RecruiterHome),
            Access::Redirect(Route::CandidateHome)
        );
    }

    #[tokio::test]
    async fn test_sign_in_profile_failure_drops_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "T1"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());

        assert!(session.sign_in("a@b.com", "pw").await.is_err());
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_refresh_profile_role_change_drops_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile("u1", "recruteur")))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let session = manager(&server, store.clone());
        let user: UserProfile = serde_json::from_value(profile("u1", "candidat")).unwrap();
        session
            .login_success(&TokenResponse::new("T1", None), Some(user))
            .unwrap();

        let err = session.refresh_profile().await.unwrap_err();
        assert!(matches!(err, SessionError::RoleChanged));
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_store_empty(&store);
    }

    #[tokio::test]
    async fn test_refresh_profile_updates_user_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "u1", "email": "new@b.com", "role": "candidat"
            })))
            .mount(&server)
            .await;

        let session = manager(&server, Arc::new(MemoryStore::new()));
        let user: UserProfile = serde_json::from_value(profile("u1", "candidat")).unwrap();
        session
            .login_success(&TokenResponse::new("T1", Some("R1".to_string())), Some(user))
            .unwrap();

        let fresh = session.refresh_profile().await.unwrap();
        assert_eq!(fresh.email, "new@b.com");
        assert_eq!(session.current_user().unwrap().email, "new@b.com");
        assert_eq!(session.access_token().as_deref(), Some("T1"));
        assert_eq!(session.refresh_token().as_deref(), Some("R1"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbGciOiJI...");
        assert_eq!(mask_token("short"), "***");
    }
}
