use axum::{
    extract::{FromRef, Request, State},
    http::HeaderName,
    Router,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod config;
pub mod display;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod session;

// Route table, split by access tier (Public, Authenticated, Admin).
pub mod routes;
use routes::{authenticated, public};

use guard::{GuardDecision, RouteRequirement, guard_session};
use session::Session;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::ConfigError;

/// ApiDoc
///
/// OpenAPI document for the JSON endpoints, served at `/api-docs/openapi.json`.
/// Page routes return `PageView` and are listed through the schema only.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::describe_user, handlers::get_my_display,
        handlers::create_session, handlers::delete_session
    ),
    components(
        schemas(
            models::Role, models::UserRecord, models::IdentityView, models::DisplayRequest,
            models::SessionRequest, models::SessionResponse, models::PageView,
        )
    ),
    tags(
        (name = "book-portal", description = "Book portal page routing and identity display")
    )
)]
struct ApiDoc;

/// AppState
///
/// The shared, immutable state handed to every handler. Session data is not
/// part of it: each request carries its own `Session`.
#[derive(Clone, Default)]
pub struct AppState {
    pub config: AppConfig,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// route_guard
///
/// Middleware that applies the route guard to a protected route. The
/// requirement arrives as the middleware state, the session through its
/// extractor. On `Render` the inner handler runs with the original request
/// untouched; on `Redirect` it never runs.
pub async fn route_guard(
    State(requirement): State<RouteRequirement>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match guard_session(&session, requirement, &path, (request, next)) {
        GuardDecision::Render((request, next)) => next.run(request).await,
        GuardDecision::Redirect(navigation) => {
            tracing::debug!(
                path = %path,
                to = navigation.to,
                required_role = ?requirement.required_role,
                "route guard redirect"
            );
            navigation.into_response()
        }
    }
}

/// create_router
///
/// Assembles the routing structure, applies the guard to protected routes and
/// wraps everything in the observability layers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let table = routes::route_table();

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public API: no guard.
        .merge(public::public_routes())
        // Authenticated API: token required.
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                RouteRequirement::AUTHENTICATED,
                route_guard,
            )),
        )
        // Pages: each protected entry carries its own guard.
        .merge(routes::page_routes(&table))
        .fallback(handlers::not_found)
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer`: method, URI and the `x-request-id` set above, so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
