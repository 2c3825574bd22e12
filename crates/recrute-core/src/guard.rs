//! Role-based navigation guards.
//!
//! Pure decisions over a [`SessionState`]: which screen a user may reach, and
//! where to send them otherwise. `Verifying` always yields [`Access::Loading`]
//! so a reload never flashes the login screen.

use std::fmt;

use recrute_types::Role;

use crate::session::SessionState;

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    CandidateHome,
    RecruiterHome,
    RecruiterCandidatures,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::CandidateHome => "/candidat",
            Route::RecruiterHome => "/recruteur",
            Route::RecruiterCandidatures => "/recruteur/candidatures",
        }
    }

    /// Role a route is reserved for, if any.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Route::CandidateHome => Some(Role::Candidate),
            Route::RecruiterHome | Route::RecruiterCandidatures => Some(Role::Recruiter),
            Route::Home | Route::Login | Route::Register => None,
        }
    }

    /// Login and register are only for signed-out users.
    pub fn is_public_only(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Resolves a path, ignoring sub-paths of the role areas.
    pub fn from_path(path: &str) -> Route {
        let path = path.trim_end_matches('/');
        match path {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/recruteur/candidatures" => Route::RecruiterCandidatures,
            p if p == "/candidat" || p.starts_with("/candidat/") => Route::CandidateHome,
            p if p == "/recruteur" || p.starts_with("/recruteur/") => Route::RecruiterHome,
            _ => Route::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The session is still being verified; render a loading state.
    Loading,
    Granted,
    Redirect(Route),
}

/// Landing screen of a role.
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Candidate => Route::CandidateHome,
        Role::Recruiter => Route::RecruiterHome,
    }
}

/// Guard of an authenticated screen, optionally reserved for one role.
pub fn protected(state: &SessionState, required: Option<Role>) -> Access {
    match state {
        SessionState::Verifying { .. } => Access::Loading,
        SessionState::Unauthenticated => Access::Redirect(Route::Login),
        SessionState::Authenticated { user } => match required {
            Some(role) if role != user.role => Access::Redirect(home_for(user.role)),
            _ => Access::Granted,
        },
    }
}

/// Guard of a signed-out-only screen (login, register).
pub fn public_only(state: &SessionState) -> Access {
    match state {
        SessionState::Verifying { .. } => Access::Loading,
        SessionState::Unauthenticated => Access::Granted,
        SessionState::Authenticated { user } => Access::Redirect(home_for(user.role)),
    }
}

/// Applies the guard matching `route`.
pub fn check(state: &SessionState, route: Route) -> Access {
    if route.is_public_only() {
        return public_only(state);
    }
    match route.required_role() {
        Some(role) => protected(state, Some(role)),
        None => Access::Granted,
    }
}
