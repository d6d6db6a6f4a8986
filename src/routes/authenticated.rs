use crate::{
    AppState,
    guard::RouteRequirement,
    handlers,
    routes::{Page, RouteEntry},
};
use axum::{Router, routing::get};

/// Pages that need a session token. Visitors without one are sent to
/// `/login` with the page they asked for as the return path.
pub fn entries() -> Vec<RouteEntry> {
    let auth = RouteRequirement::AUTHENTICATED;
    vec![
        RouteEntry::protected("/community/write", Page::CommunityWrite, auth),
        RouteEntry::protected("/mypage", Page::Profile, auth),
        RouteEntry::protected("/mypage/profile", Page::Profile, auth),
        RouteEntry::protected("/mypage/titles", Page::MyTitles, auth),
        RouteEntry::protected("/mypage/change-password", Page::ChangePassword, auth),
        RouteEntry::protected("/mypage/posts", Page::MyPosts, auth),
        RouteEntry::protected("/mypage/likes", Page::MyLikes, auth),
        RouteEntry::protected("/mypage/bookmarks", Page::MyBookmarks, auth),
        RouteEntry::protected("/mypage/following", Page::MyFollowing, auth),
    ]
}

/// Authenticated Router Module
///
/// API endpoints for a logged-in viewer. The caller wraps this router in the
/// route guard with `RouteRequirement::AUTHENTICATED`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me/display
        // The viewer's own name, badge and avatar for the header.
        .route("/me/display", get(handlers::get_my_display))
}
