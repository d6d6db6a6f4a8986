use crate::{
    AppState,
    display::identity_view,
    models::{DisplayRequest, IdentityView, PageView, SessionRequest, SessionResponse},
    routes::Page,
    session::{
        self, Session, SessionAccessor, TOKEN_COOKIE, USER_COOKIE, clear_session_cookie,
        session_cookie,
    },
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;

// --- Page Handlers ---

/// render_page
///
/// Builds the view for a matched page. Protected pages only get here after the
/// route guard has let the request through.
pub fn render_page(page: Page, state: &AppState, session: &Session, path: &str) -> PageView {
    PageView {
        page: page.slug().to_string(),
        path: path.to_string(),
        viewer: viewer(state, session),
    }
}

/// not_found
///
/// [Public Route] Fallback for any path missing from the route table.
pub async fn not_found(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(render_page(Page::NotFound, &state, &session, uri.path())),
    )
}

// The viewer is only shown once a token is present, matching what the guard
// treats as logged in.
fn viewer(state: &AppState, session: &Session) -> Option<IdentityView> {
    session.token()?;
    Some(identity_view(
        session.current_user(),
        Some(&state.config.upload_base_url),
    ))
}

// --- Display Handlers ---

/// describe_user
///
/// [Public Route] Computes the display identity for an arbitrary user record,
/// e.g. a post or comment author. `baseUrl` in the body overrides the
/// configured upload base for relative photo paths.
#[utoipa::path(
    post,
    path = "/display",
    request_body = DisplayRequest,
    responses((status = 200, description = "Display identity", body = IdentityView))
)]
pub async fn describe_user(
    State(state): State<AppState>,
    Json(payload): Json<DisplayRequest>,
) -> Json<IdentityView> {
    let base_url = payload
        .base_url
        .as_deref()
        .unwrap_or(&state.config.upload_base_url);
    Json(identity_view(payload.user.as_ref(), Some(base_url)))
}

/// get_my_display
///
/// [Authenticated Route] The display identity of the session user. A session
/// with a token but no readable user record gets the anonymous identity.
#[utoipa::path(
    get,
    path = "/me/display",
    responses(
        (status = 200, description = "Viewer identity", body = IdentityView),
        (status = 303, description = "No session; redirected to /login")
    )
)]
pub async fn get_my_display(State(state): State<AppState>, session: Session) -> Json<IdentityView> {
    Json(identity_view(
        session.current_user(),
        Some(&state.config.upload_base_url),
    ))
}

// --- Session Handlers ---

/// create_session
///
/// [Public Route] Records an already-issued token and user record in session
/// cookies. With `rememberMe` the cookies outlive the browser session for
/// `session_ttl_days`; without it they are dropped when the browser closes.
#[utoipa::path(
    post,
    path = "/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session stored", body = SessionResponse),
        (status = 400, description = "Empty token")
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), StatusCode> {
    if payload.token.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let config = &state.config;
    let max_age = payload
        .remember_me
        .then(|| config.session_max_age());

    let jar = jar.add(session_cookie(
        TOKEN_COOKIE,
        payload.token.clone(),
        max_age,
        config.secure_cookies,
    ));

    let jar = match &payload.user {
        Some(user) => {
            let value = session::encode_user(user).map_err(|e| {
                tracing::error!(error = %e, "failed to serialize session user");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            jar.add(session_cookie(USER_COOKIE, value, max_age, config.secure_cookies))
        }
        None => jar.add(clear_session_cookie(USER_COOKIE)),
    };

    tracing::info!(remember_me = payload.remember_me, "session stored");

    let viewer = identity_view(payload.user.as_ref(), Some(&config.upload_base_url));
    Ok((
        jar,
        Json(SessionResponse {
            remember_me: payload.remember_me,
            viewer,
        }),
    ))
}

/// delete_session
///
/// [Public Route] Logs out by expiring both session cookies. Idempotent.
#[utoipa::path(
    delete,
    path = "/session",
    responses((status = 204, description = "Session cleared"))
)]
pub async fn delete_session(jar: CookieJar) -> impl IntoResponse {
    let jar = jar
        .add(clear_session_cookie(TOKEN_COOKIE))
        .add(clear_session_cookie(USER_COOKIE));
    (StatusCode::NO_CONTENT, jar)
}
