// Web server: Axum JSON API plus the embedded single-page UI.
//
// The UI is plain HTML/JS under web/static, embedded at compile time via
// include_dir!. All /api/* routes serve JSON; every other path serves the
// UI so it works from any URL.
//
// The recommender is loaded once before the server starts and shared as an
// immutable Arc. Nothing is written after startup.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use include_dir::{include_dir, Dir};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::RecommendError;
use crate::recommend::Recommender;

pub mod handlers;

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web/static");

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(recommender: Recommender, config: Config) -> Self {
        Self {
            recommender: Arc::new(recommender),
            config: Arc::new(config),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.bind, state.config.port);
    let app = build_router(state);

    info!("Matcha listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/items", get(handlers::items::list_items))
        .route("/api/items/{id}", get(handlers::items::get_item))
        .route(
            "/api/items/{id}/similar",
            get(handlers::recommend::similar_to_item),
        )
        .route("/api/recommend", get(handlers::recommend::by_title))
        .route("/api/top", get(handlers::top::configured_countries))
        .route("/api/top/{country}", get(handlers::top::by_country))
        .route("/api/picks", get(handlers::picks::list_picks));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .fallback(serve_spa)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Serve the embedded UI for all non-API paths.
async fn serve_spa(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if path.starts_with("api/") {
        return api_error(StatusCode::NOT_FOUND, "Unknown API route");
    }

    if let Some(file) = ASSETS.get_file(path) {
        return asset_response(file.contents(), path);
    }

    match ASSETS.get_file("index.html") {
        Some(index) => asset_response(index.contents(), "index.html"),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from("Web assets not found"),
        )
            .into_response(),
    }
}

fn asset_response(contents: &'static [u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        let status = match self {
            RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
            RecommendError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        };
        api_error(status, &self.to_string())
    }
}
