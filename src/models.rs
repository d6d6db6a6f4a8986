use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Identity Schemas ---

/// Role
///
/// The RBAC marker carried on every user record. Only `ADMIN` grants elevated
/// display and navigation treatment; every other value collapses into `User`.
/// Matching is exact: `"admin"` is not an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[default]
    #[serde(rename = "USER")]
    #[serde(other)]
    User,
}

/// UserRecord
///
/// Read-only view of a user as the page components receive it. The same shape
/// arrives from two places: the session (`nickname`, `userPhoto`) and nested
/// author objects on comments (`userNickname`, `userProfileImage`). All fields
/// are optional and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // Absent, null and unknown roles all read as a standard user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    // Name field used by comment author objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_photo: Option<String>,
    // Photo field used by comment author objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_image: Option<String>,
}

impl UserRecord {
    /// A record with no derivable fields. Stands in for an absent user.
    pub const ANONYMOUS: UserRecord = UserRecord {
        user_id: None,
        email: None,
        role: None,
        nickname: None,
        user_nickname: None,
        user_photo: None,
        user_profile_image: None,
    };
}

/// IdentityView
///
/// The four display derivations for one user, computed together so a page never
/// sees an administrator name next to a non-administrator badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IdentityView {
    pub is_admin: bool,
    pub display_name: String,
    pub display_name_with_badge: String,
    /// Avatar reference. `None` means the page should draw its placeholder.
    pub photo: Option<String>,
    pub badge: Option<String>,
}

// --- Request Payloads (Input Schemas) ---

/// DisplayRequest
///
/// Input payload for `POST /display`. Used by pages that render someone other
/// than the viewer, e.g. post and comment authors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DisplayRequest {
    #[serde(default)]
    pub user: Option<UserRecord>,
    /// Overrides the configured profile upload base for relative photo paths.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// SessionRequest
///
/// Input payload for `POST /session`. The token has already been issued by the
/// backend login endpoint; this only records it for later requests.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionRequest {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserRecord>,
    /// Persist the session across browser restarts instead of for this visit only.
    #[serde(default)]
    pub remember_me: bool,
}

// --- Output Schemas ---

/// SessionResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionResponse {
    pub remember_me: bool,
    pub viewer: IdentityView,
}

/// PageView
///
/// What a page handler hands to the rendering layer: which page matched, the
/// path it matched on and the viewer's identity (null for anonymous visitors).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PageView {
    pub page: String,
    pub path: String,
    pub viewer: Option<IdentityView>,
}
