//! Typed surfaces of the recruitment API.
//!
//! Every call goes through [`SessionManager::send`], so a rejected token drops
//! the session no matter which screen issued the request.

mod candidatures;
mod cvs;
mod dashboard;
mod matching;
mod notifications;
mod offers;
mod profile;

pub use candidatures::CandidaturesApi;
pub use cvs::{CvsApi, MAX_CV_BYTES};
pub use dashboard::DashboardApi;
pub use matching::MatchingApi;
pub use notifications::NotificationsApi;
pub use offers::OffersApi;
pub use profile::ProfileApi;

use crate::session::SessionManager;

/// Percent-encodes one path segment.
pub(crate) fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes()).collect()
}

impl SessionManager {
    pub fn offers(&self) -> OffersApi<'_> {
        OffersApi::new(self)
    }

    pub fn cvs(&self) -> CvsApi<'_> {
        CvsApi::new(self)
    }

    pub fn candidatures(&self) -> CandidaturesApi<'_> {
        CandidaturesApi::new(self)
    }

    pub fn matching(&self) -> MatchingApi<'_> {
        MatchingApi::new(self)
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }
}
