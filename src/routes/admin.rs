use crate::{
    guard::RouteRequirement,
    routes::{Page, RouteEntry},
};

/// Admin Route Table
///
/// Pages reserved for the administrator role. A visitor without a token goes
/// to `/login`; a logged-in non-administrator goes to `/`.
pub fn entries() -> Vec<RouteEntry> {
    let admin = RouteRequirement::ADMIN;
    vec![
        RouteEntry::protected("/admin", Page::AdminDashboard, admin),
        RouteEntry::protected("/admin/books", Page::AdminBooks, admin),
        RouteEntry::protected("/admin/posts", Page::AdminPosts, admin),
        RouteEntry::protected("/admin/notice", Page::AdminNotice, admin),
        RouteEntry::protected("/admin/users", Page::AdminUsers, admin),
        RouteEntry::protected("/admin/users/{user_id}", Page::AdminUserDetail, admin),
    ]
}
