use crate::{AppState, handlers, routes::{Page, RouteEntry}};
use axum::{
    Router,
    routing::{get, post},
};

/// Public pages. Anything not in the table falls through to the not-found
/// handler, which is public too.
pub fn entries() -> Vec<RouteEntry> {
    vec![
        RouteEntry::public("/", Page::Home),
        RouteEntry::public("/login", Page::Login),
        RouteEntry::public("/signup", Page::Signup),
        RouteEntry::public("/forgot-password", Page::ForgotPassword),
        RouteEntry::public("/reset-password", Page::ResetPassword),
        RouteEntry::public("/searchbook", Page::BookSearch),
        RouteEntry::public("/community", Page::Community),
        RouteEntry::public("/community/rank", Page::CommunityRank),
        RouteEntry::public("/community/{id}", Page::CommunityDetail),
        RouteEntry::public("/library/search", Page::LibrarySearch),
        RouteEntry::public("/library/map", Page::LibraryMap),
    ]
}

/// Public Router Module
///
/// Endpoints that need no session: health, display lookups for arbitrary
/// records, and the session lifecycle itself (you cannot require a session to
/// create one).
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        .route("/health", get(|| async { "ok" }))
        // POST /display
        // Display identity for a post or comment author.
        .route("/display", post(handlers::describe_user))
        // POST /session stores token + user, DELETE /session logs out.
        .route(
            "/session",
            post(handlers::create_session).delete(handlers::delete_session),
        )
}
