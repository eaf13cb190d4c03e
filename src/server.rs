//! HTTP server exposing the catalog, summary, and favorites API.
//!
//! Every handler works against injected state: the two upstream clients and
//! the favorites store all enter through [`AppState`] at startup, so tests
//! can assemble the same router around stub upstreams and a scratch
//! database.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/catalog` | Filtered catalog listing, or one item via `?name=` |
//! | `GET`  | `/reports-summary` | Average review rating per category |
//! | `GET`  | `/favorites` | Stored favorites, newest first |
//! | `POST` | `/favorites` | Validate and store a favorite |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one JSON shape:
//!
//! ```json
//! { "error": { "code": "invalid_input", "message": "invalid input: fruit_name is required" } }
//! ```
//!
//! Error codes: `invalid_input` (400), `not_found` (404),
//! `upstream_unavailable` (502), `store_failure` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser frontends can
//! call the API directly.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::error::Error;
use crate::favorites::{self, FavoriteStore, SqliteFavoriteStore};
use crate::filter::FilterSpec;
use crate::models::{CatalogItem, CategorySummary, FavoriteRecord};
use crate::reports::ReportClient;
use crate::{db, migrate};

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor. Construction is the composition root: nothing below this
/// reaches for a global.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub reports: ReportClient,
    pub favorites: Arc<dyn FavoriteStore>,
}

/// Starts the HTTP server.
///
/// Ensures the favorites schema exists, binds to the address configured in
/// `[server].bind`, and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    migrate::run_migrations(config).await?;
    let pool = db::connect(&config.db.path).await?;

    let state = AppState {
        catalog: CatalogClient::new(&config.upstream)?,
        reports: ReportClient::new(&config.upstream)?,
        favorites: Arc::new(SqliteFavoriteStore::new(pool)),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("fruitstand listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router around an already-assembled [`AppState`].
///
/// Split from [`run_server`] so integration tests can drive the exact
/// production routing without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/catalog", get(handle_catalog))
        .route("/reports-summary", get(handle_reports_summary))
        .route(
            "/favorites",
            get(handle_list_favorites).post(handle_create_favorite),
        )
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            // InvalidItem is recovered during normalization and should never
            // reach the boundary; a leak is an internal error, like a store
            // failure.
            Error::InvalidItem(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

// ============ GET /catalog ============

/// Query parameters for `GET /catalog`. Numeric constraints arrive as raw
/// text so an unparsable value degrades to "no constraint" instead of a 400.
#[derive(Debug, Deserialize)]
struct CatalogParams {
    name: Option<String>,
    #[serde(rename = "minSugar")]
    min_sugar: Option<String>,
    #[serde(rename = "maxCalories")]
    max_calories: Option<String>,
    family: Option<String>,
}

/// JSON response body for a single-item lookup.
#[derive(Serialize)]
struct ItemResponse {
    item: CatalogItem,
}

/// Handler for `GET /catalog`.
///
/// With `?name=` it proxies a single-item lookup; otherwise it returns the
/// filtered listing. `name` takes precedence over any filter parameters.
async fn handle_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Response, Error> {
    if let Some(name) = params.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let item = state.catalog.lookup(name).await?;
        return Ok(Json(ItemResponse { item }).into_response());
    }

    let filters = FilterSpec::from_params(
        params.min_sugar.as_deref(),
        params.max_calories.as_deref(),
        params.family.as_deref(),
    );
    let listing = state.catalog.list(filters).await?;
    Ok(Json(listing).into_response())
}

// ============ GET /reports-summary ============

/// Handler for `GET /reports-summary`.
async fn handle_reports_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategorySummary>>, Error> {
    let summary = state.reports.fetch_summary().await?;
    Ok(Json(summary))
}

// ============ /favorites ============

/// JSON response body for `GET /favorites`.
#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<FavoriteRecord>,
}

/// Handler for `GET /favorites`.
async fn handle_list_favorites(
    State(state): State<AppState>,
) -> Result<Json<FavoritesResponse>, Error> {
    let favorites = favorites::list_favorites(state.favorites.as_ref()).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

/// Request body for `POST /favorites`. A missing `fruit_name` deserializes
/// to the empty string and fails validation downstream, keeping all input
/// errors on one path.
#[derive(Debug, Deserialize)]
struct CreateFavoriteRequest {
    #[serde(default)]
    fruit_name: String,
    notes: Option<String>,
}

/// JSON response body for `POST /favorites`.
#[derive(Serialize)]
struct FavoriteResponse {
    favorite: FavoriteRecord,
}

/// Handler for `POST /favorites`. Returns `201 Created` with the stored
/// record.
async fn handle_create_favorite(
    State(state): State<AppState>,
    Json(req): Json<CreateFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), Error> {
    let favorite = favorites::save_favorite(
        state.favorites.as_ref(),
        &req.fruit_name,
        req.notes.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(FavoriteResponse { favorite })))
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Handler for `GET /health`.
///
/// Used by load balancers and monitoring tools.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
