//! Error taxonomy of the session layer.

use std::path::PathBuf;

/// Failure of the durable session store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed session store: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors surfaced by the session manager and the API services.
///
/// `InvalidCredentials` and `Validation` are meant for display to the user and
/// never touch session state. `AuthorizationExpired` means the session has
/// already been dropped.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("rejected: {0}")]
    Validation(String),
    #[error("session expired, please log in again")]
    AuthorizationExpired,
    #[error("account role changed, please log in again")]
    RoleChanged,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Returns true when the error means the user has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            SessionError::AuthorizationExpired | SessionError::RoleChanged
        )
    }
}

/// Result type for session and service operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;
