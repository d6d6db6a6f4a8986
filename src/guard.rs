//! Route guard
//!
//! Decides whether a protected page renders or the visitor is sent elsewhere.
//! The decision is a plain value; `route_guard` in the crate root turns it into
//! an HTTP response.

use axum::response::{IntoResponse, Redirect, Response};

use crate::{
    display,
    models::{Role, UserRecord},
    session::SessionAccessor,
};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated visitors without the required role are sent.
pub const ROOT_PATH: &str = "/";

/// RouteRequirement
///
/// Metadata attached to a protected route entry. Every protected route needs a
/// session token; `required_role` additionally restricts it to one role.
/// Only `Role::Admin` is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteRequirement {
    pub required_role: Option<Role>,
}

impl RouteRequirement {
    pub const AUTHENTICATED: Self = Self {
        required_role: None,
    };
    pub const ADMIN: Self = Self {
        required_role: Some(Role::Admin),
    };
}

/// The path a visitor was trying to reach, handed to the login page so it can
/// send them back afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnState {
    pub from: String,
}

/// Navigation
///
/// A redirect instruction for the hosting router. `replace` means the guarded
/// URL must not stay in back-history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: &'static str,
    pub state: Option<ReturnState>,
    pub replace: bool,
}

impl Navigation {
    pub fn to_login(requested_path: &str) -> Self {
        Self {
            to: LOGIN_PATH,
            state: Some(ReturnState {
                from: requested_path.to_string(),
            }),
            replace: true,
        }
    }

    pub fn to_root() -> Self {
        Self {
            to: ROOT_PATH,
            state: None,
            replace: true,
        }
    }

    /// location
    ///
    /// The `Location` header value. Return state travels as a `from` query
    /// parameter.
    pub fn location(&self) -> String {
        match &self.state {
            Some(ReturnState { from }) => {
                format!("{}?from={}", self.to, urlencoding::encode(from))
            }
            None => self.to.to_string(),
        }
    }
}

// An HTTP redirect never leaves the redirecting URL in history, so `replace`
// needs no further encoding.
impl IntoResponse for Navigation {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}

/// GuardDecision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision<C> {
    /// Render the protected content exactly as it was handed in.
    Render(C),
    Redirect(Navigation),
}

/// guard
///
/// 1. No token (absent or empty) → login, carrying `requested_path`.
/// 2. Admin required and the user is not an administrator → root. An absent or
///    malformed user counts as not an administrator.
/// 3. Otherwise → render `protected`.
///
/// Token presence is the only authentication check made here. Signature and
/// expiry are left to the backend.
pub fn guard<C>(
    token: Option<&str>,
    current_user: Option<&UserRecord>,
    required_role: Option<Role>,
    requested_path: &str,
    protected: C,
) -> GuardDecision<C> {
    if token.is_none_or(str::is_empty) {
        return GuardDecision::Redirect(Navigation::to_login(requested_path));
    }

    if required_role == Some(Role::Admin) && !display::is_administrator(current_user) {
        return GuardDecision::Redirect(Navigation::to_root());
    }

    GuardDecision::Render(protected)
}

/// Runs `guard` against whatever a session accessor reports.
pub fn guard_session<A, C>(
    session: &A,
    requirement: RouteRequirement,
    requested_path: &str,
    protected: C,
) -> GuardDecision<C>
where
    A: SessionAccessor + ?Sized,
{
    guard(
        session.token(),
        session.current_user(),
        requirement.required_role,
        requested_path,
        protected,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_counts_as_absent() {
        let decision = guard(Some(""), None, None, "/mypage", ());
        assert_eq!(decision, GuardDecision::Redirect(Navigation::to_login("/mypage")));
    }

    #[test]
    fn login_location_encodes_return_path() {
        let nav = Navigation::to_login("/mypage/posts?page=2");
        assert_eq!(nav.location(), "/login?from=%2Fmypage%2Fposts%3Fpage%3D2");
        assert_eq!(Navigation::to_root().location(), "/");
    }

    #[test]
    fn user_role_requirement_is_not_enforced() {
        let decision = guard(Some("t"), None, Some(Role::User), "/x", 7);
        assert_eq!(decision, GuardDecision::Render(7));
    }
}
