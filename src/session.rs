use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::models::UserRecord;

pub const TOKEN_COOKIE: &str = "token";
pub const USER_COOKIE: &str = "user";

/// SessionAccessor
///
/// Read side of the session collaborator. Both reads are synchronous and free
/// of side effects; how the values got there is not this trait's concern.
pub trait SessionAccessor {
    /// The session token, or `None` when unauthenticated.
    fn token(&self) -> Option<&str>;
    /// The decoded user record, or `None` when absent or unreadable.
    fn current_user(&self) -> Option<&UserRecord>;
}

/// Session
///
/// A per-request snapshot of the visitor's session. It is resolved once by the
/// extractor below and passed by value to the guard and display code; nothing
/// reads session state from anywhere else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserRecord>,
}

impl Session {
    pub fn new(token: Option<String>, user: Option<UserRecord>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            user,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// from_headers
    ///
    /// Token: `Authorization: Bearer <token>` first, then the `token` cookie.
    /// User: JSON in the `user` cookie. A user cookie that does not parse is
    /// dropped rather than rejected.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let jar = CookieJar::from_headers(headers);

        let token = bearer_token(headers)
            .or_else(|| jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()));

        let user = jar.get(USER_COOKIE).and_then(|c| decode_user(c.value()));

        Self::new(token, user)
    }
}

impl SessionAccessor for Session {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn current_user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }
}

/// Session Extractor Implementation
///
/// Never rejects: a request without credentials simply yields an anonymous
/// session, and the guard decides what that means for the route.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Session::from_headers(&parts.headers))
    }
}

// The auth scheme is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

// The jar has already percent-decoded the value.
fn decode_user(raw: &str) -> Option<UserRecord> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!(error = %e, "user cookie does not hold a user record");
            None
        }
    }
}

/// JSON form of a user record, as stored in the `user` cookie. Percent-encoding
/// happens when the jar writes the `Set-Cookie` header.
pub fn encode_user(user: &UserRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(user)
}

// --- Cookie Builders ---

/// Create a session cookie. `max_age = None` gives a browser-session cookie
/// that disappears when the browser closes.
pub fn session_cookie(
    name: &'static str,
    value: String,
    max_age: Option<Duration>,
    secure: bool,
) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    if let Some(max_age) = max_age {
        cookie.set_max_age(max_age);
    }

    cookie
}

/// Create removal cookie.
pub fn clear_session_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer from-header"),
            (header::COOKIE, "token=from-cookie"),
        ]);
        assert_eq!(Session::from_headers(&map).token(), Some("from-header"));
    }

    #[test]
    fn bearer_scheme_ignores_case() {
        for value in ["bearer abc", "BEARER abc", "BeArEr abc"] {
            let map = headers(&[(header::AUTHORIZATION, value), (header::COOKIE, "token=c")]);
            assert_eq!(Session::from_headers(&map).token(), Some("abc"), "{value}");
        }

        let basic = headers(&[(header::AUTHORIZATION, "Basic abc"), (header::COOKIE, "token=c")]);
        assert_eq!(Session::from_headers(&basic).token(), Some("c"));
    }

    #[test]
    fn user_cookie_round_trips() {
        let user = UserRecord {
            role: Some(Role::Admin),
            nickname: Some("관리자; x=1".to_string()),
            ..UserRecord::default()
        };
        let encoded = Cookie::new(USER_COOKIE, encode_user(&user).unwrap()).encoded().to_string();
        let cookie = format!("token=t; {encoded}");
        let session = Session::from_headers(&headers(&[(header::COOKIE, &cookie)]));
        assert_eq!(session.current_user(), Some(&user));
    }

    #[test]
    fn garbage_user_cookie_is_dropped() {
        let session = Session::from_headers(&headers(&[(header::COOKIE, "token=t; user=%7Bnope")]));
        assert_eq!(session.token(), Some("t"));
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn remember_me_cookie_has_max_age() {
        let persistent = session_cookie(TOKEN_COOKIE, "t".into(), Some(Duration::days(30)), false);
        assert_eq!(persistent.max_age(), Some(Duration::days(30)));

        let transient = session_cookie(TOKEN_COOKIE, "t".into(), None, false);
        assert_eq!(transient.max_age(), None);
    }
}
