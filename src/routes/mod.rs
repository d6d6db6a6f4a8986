//! Router Module Index
//!
//! The page route table, split by who may see each page. Public pages render
//! for anyone; authenticated pages need a session token; admin pages also need
//! the administrator role.

use axum::{
    Json, Router,
    extract::State,
    http::Uri,
    middleware,
    routing::{MethodRouter, get},
};

use crate::{AppState, guard::RouteRequirement, handlers, route_guard, session::Session};

/// Pages and API endpoints open to anonymous visitors.
pub mod public;

/// Pages and API endpoints that need a session token.
pub mod authenticated;

/// Pages restricted to the administrator role.
pub mod admin;

/// Page
///
/// Every page the route table can render. Layout and content belong to the
/// frontend; the server only decides which page, for whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Signup,
    ForgotPassword,
    ResetPassword,
    BookSearch,
    Community,
    CommunityRank,
    CommunityDetail,
    LibrarySearch,
    LibraryMap,
    CommunityWrite,
    Profile,
    MyTitles,
    ChangePassword,
    MyPosts,
    MyLikes,
    MyBookmarks,
    MyFollowing,
    AdminDashboard,
    AdminBooks,
    AdminPosts,
    AdminNotice,
    AdminUsers,
    AdminUserDetail,
    NotFound,
}

impl Page {
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::ForgotPassword => "forgot-password",
            Page::ResetPassword => "reset-password",
            Page::BookSearch => "book-search",
            Page::Community => "community",
            Page::CommunityRank => "community-rank",
            Page::CommunityDetail => "community-detail",
            Page::LibrarySearch => "library-search",
            Page::LibraryMap => "library-map",
            Page::CommunityWrite => "community-write",
            Page::Profile => "mypage-profile",
            Page::MyTitles => "mypage-titles",
            Page::ChangePassword => "mypage-change-password",
            Page::MyPosts => "mypage-posts",
            Page::MyLikes => "mypage-likes",
            Page::MyBookmarks => "mypage-bookmarks",
            Page::MyFollowing => "mypage-following",
            Page::AdminDashboard => "admin-dashboard",
            Page::AdminBooks => "admin-books",
            Page::AdminPosts => "admin-posts",
            Page::AdminNotice => "admin-notice",
            Page::AdminUsers => "admin-users",
            Page::AdminUserDetail => "admin-user-detail",
            Page::NotFound => "not-found",
        }
    }
}

/// RouteEntry
///
/// One row of the route table. `path` is an axum path pattern and may carry
/// `{param}` segments. `requirement = None` means the page is public and the
/// guard is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub requirement: Option<RouteRequirement>,
}

impl RouteEntry {
    pub const fn public(path: &'static str, page: Page) -> Self {
        Self {
            path,
            page,
            requirement: None,
        }
    }

    pub const fn protected(path: &'static str, page: Page, requirement: RouteRequirement) -> Self {
        Self {
            path,
            page,
            requirement: Some(requirement),
        }
    }

    /// The same path with a trailing slash, so `/mypage/` reaches `/mypage`.
    /// The root has none.
    pub fn trailing_slash_alias(&self) -> Option<String> {
        (self.path != "/").then(|| format!("{}/", self.path))
    }
}

/// route_table
///
/// The ordered page table: public, then authenticated, then admin.
pub fn route_table() -> Vec<RouteEntry> {
    public::entries()
        .into_iter()
        .chain(authenticated::entries())
        .chain(admin::entries())
        .collect()
}

/// page_routes
///
/// Registers a GET handler for each entry and its trailing-slash alias.
/// Protected entries get the `route_guard` middleware with their own
/// requirement as its state, so the guard runs once per matched protected
/// entry.
pub fn page_routes(table: &[RouteEntry]) -> Router<AppState> {
    table.iter().fold(Router::new(), |router, entry| {
        let router = router.route(entry.path, page_handler(entry));
        match entry.trailing_slash_alias() {
            Some(alias) => router.route(&alias, page_handler(entry)),
            None => router,
        }
    })
}

fn page_handler(entry: &RouteEntry) -> MethodRouter<AppState> {
    let page = entry.page;
    let handler = get(
        move |State(state): State<AppState>, session: Session, uri: Uri| async move {
            Json(handlers::render_page(page, &state, &session, uri.path()))
        },
    );

    match entry.requirement {
        Some(requirement) => {
            handler.route_layer(middleware::from_fn_with_state(requirement, route_guard))
        }
        None => handler,
    }
}
