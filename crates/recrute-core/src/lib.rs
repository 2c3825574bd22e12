//! Session management and typed API access for the recruitment platform.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{SessionError, SessionResult, StorageError};
pub use recrute_types as types;
pub use session::{SessionManager, SessionState, mask_token};
