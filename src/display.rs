//! Identity display
//!
//! Turns a raw `UserRecord` into the strings a page shows next to a post,
//! comment or header avatar. The administrator account is rendered under a
//! fixed official identity instead of whatever its record says.

use std::borrow::Cow;

use crate::models::{IdentityView, Role, UserRecord};

/// AdminIdentity
///
/// The fixed identity the administrator account is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminIdentity {
    pub nickname: &'static str,
    /// Bundled asset path, served by the frontend. Never joined with an upload base.
    pub photo: &'static str,
    pub badge: &'static str,
}

pub const ADMIN_DISPLAY: AdminIdentity = AdminIdentity {
    nickname: "빌릴수e서울",
    photo: "/assets/image/logo2_nukki.png",
    badge: "👑",
};

/// Shown when a record carries no usable name.
pub const ANONYMOUS_NAME: &str = "익명";

/// Base for relative profile photo paths when the caller gives none.
pub const DEFAULT_PHOTO_BASE_URL: &str = "http://localhost:7878/uploads/profile/";

static NO_USER: UserRecord = UserRecord::ANONYMOUS;

/// Identity
///
/// A user record resolved once into the two shapes the display rules care
/// about. Every derivation below is a single match over this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<'a> {
    Administrator,
    Standard(&'a UserRecord),
}

impl<'a> Identity<'a> {
    /// resolve
    ///
    /// An absent user resolves to a standard identity with no fields, so it
    /// can never be mistaken for the administrator.
    pub fn resolve(user: Option<&'a UserRecord>) -> Self {
        match user {
            Some(record) if record.role == Some(Role::Admin) => Identity::Administrator,
            Some(record) => Identity::Standard(record),
            None => Identity::Standard(&NO_USER),
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Identity::Administrator)
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Identity::Administrator => ADMIN_DISPLAY.nickname,
            Identity::Standard(record) => present(&record.nickname)
                .or_else(|| present(&record.user_nickname))
                .unwrap_or(ANONYMOUS_NAME),
        }
    }

    /// name_with_badge
    ///
    /// Unlike `name`, the standard branch only looks at `nickname`. Comment
    /// author records (which carry `userNickname`) come out anonymous here.
    pub fn name_with_badge(&self) -> Cow<'a, str> {
        match *self {
            Identity::Administrator => {
                Cow::Owned(format!("{} {}", ADMIN_DISPLAY.badge, ADMIN_DISPLAY.nickname))
            }
            Identity::Standard(record) => {
                Cow::Borrowed(present(&record.nickname).unwrap_or(ANONYMOUS_NAME))
            }
        }
    }

    pub fn photo(&self, base_url: &str) -> Option<Cow<'a, str>> {
        match *self {
            Identity::Administrator => Some(Cow::Borrowed(ADMIN_DISPLAY.photo)),
            Identity::Standard(record) => {
                let photo = present(&record.user_photo)
                    .or_else(|| present(&record.user_profile_image))?;
                if photo.starts_with("http") {
                    Some(Cow::Borrowed(photo))
                } else {
                    Some(Cow::Owned(format!("{base_url}{photo}")))
                }
            }
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Identity::Administrator => Some(ADMIN_DISPLAY.badge),
            Identity::Standard(_) => None,
        }
    }

    /// Bundles every derivation for this identity into one view.
    pub fn view(&self, base_url: &str) -> IdentityView {
        IdentityView {
            is_admin: self.is_administrator(),
            display_name: self.name().to_string(),
            display_name_with_badge: self.name_with_badge().into_owned(),
            photo: self.photo(base_url).map(Cow::into_owned),
            badge: self.badge().map(str::to_string),
        }
    }
}

// Empty strings are treated the same as missing fields.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// --- Free-standing derivations ---

pub fn is_administrator(user: Option<&UserRecord>) -> bool {
    Identity::resolve(user).is_administrator()
}

/// display_name
///
/// Administrator → official name. Otherwise `nickname`, then `userNickname`,
/// then the anonymous literal.
pub fn display_name(user: Option<&UserRecord>) -> &str {
    Identity::resolve(user).name()
}

pub fn display_name_with_badge(user: Option<&UserRecord>) -> Cow<'_, str> {
    Identity::resolve(user).name_with_badge()
}

/// display_photo
///
/// Full URLs (anything starting with `http`) pass through untouched; relative
/// paths are appended to `base_url`, or to `DEFAULT_PHOTO_BASE_URL` when the
/// caller passes `None`. Returns `None` when the record has no photo.
pub fn display_photo<'a>(
    user: Option<&'a UserRecord>,
    base_url: Option<&str>,
) -> Option<Cow<'a, str>> {
    Identity::resolve(user).photo(base_url.unwrap_or(DEFAULT_PHOTO_BASE_URL))
}

pub fn admin_badge(user: Option<&UserRecord>) -> Option<&'static str> {
    Identity::resolve(user).badge()
}

pub fn identity_view(user: Option<&UserRecord>, base_url: Option<&str>) -> IdentityView {
    Identity::resolve(user).view(base_url.unwrap_or(DEFAULT_PHOTO_BASE_URL))
}
