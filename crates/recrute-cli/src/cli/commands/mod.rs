//! CLI command handlers.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime};
use recrute_core::SessionManager;
use recrute_core::guard::{self, Access, Route};
use recrute_core::types::{Role, UserProfile};

pub mod auth;
pub mod candidatures;
pub mod config;
pub mod cvs;
pub mod dashboard;
pub mod matching;
pub mod notifications;
pub mod offers;
pub mod profile;

/// Restores the stored session and applies the role guard of a command.
///
/// `None` admits any signed-in user.
pub(crate) async fn require(session: &SessionManager, role: Option<Role>) -> Result<UserProfile> {
    let state = session.initialize().await;
    match guard::protected(&state, role) {
        Access::Granted => state.user().cloned().context("session has no user"),
        Access::Redirect(Route::Login) => bail!("Not logged in. Run `recrute login` first."),
        Access::Redirect(home) => {
            let required = role.map(|r| r.to_string()).unwrap_or_default();
            bail!("This command is reserved for {required} accounts (your area is {home})")
        }
        Access::Loading => bail!("Session is still being verified, try again"),
    }
}

/// Formats an API timestamp for display; unparseable values are shown as-is.
pub(crate) fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| raw.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
