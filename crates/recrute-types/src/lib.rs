//! Wire records shared between the recruitment client crates.
//!
//! Field names follow the remote API (French) on the wire and English in Rust.

pub mod auth;
pub mod candidatures;
pub mod cvs;
pub mod dashboard;
pub mod matching;
pub mod notifications;
pub mod offers;
pub mod profile;

pub use auth::{Registration, Role, TokenResponse, UserProfile};
pub use candidatures::{Candidature, CandidatureStatus};
pub use cvs::Cv;
pub use dashboard::{
    CandidateFilter, CandidateListing, DashboardStats, RecentCandidature, TopCandidate,
};
pub use matching::{MatchingList, MatchingResult};
pub use notifications::Notification;
pub use offers::{JobOffer, NewJobOffer, OfferQuery, OfferStatus};
pub use profile::{CandidateProfile, CandidateProfileUpdate};
