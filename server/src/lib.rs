use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use imgsearch_core::{Document, EngineConfig, Hit, QueryEngine, SearchMethod};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_PER_PAGE: usize = 50;

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: usize,
}
fn default_page() -> usize { 1 }

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Optional cut-off; all positive-scoring documents are returned when absent.
    pub k: Option<usize>,
}
fn default_method() -> String { SearchMethod::default().to_string() }

#[derive(Serialize)]
pub struct PageResponse {
    pub page: usize,
    pub per_page: usize,
    pub total_images: usize,
    pub start: usize,
    pub end: usize,
    pub images: Vec<Document>,
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub query: &'a str,
    pub method: SearchMethod,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Hit<'a>>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
    pub per_page: usize,
}

/// Load the corpus at `corpus_path`, build the index and return the router. The index is
/// complete before the router exists, so no request can observe a partial build.
pub fn build_app(corpus_path: &str, config: EngineConfig, per_page: usize) -> Result<Router> {
    let engine = QueryEngine::open(corpus_path, config)?;
    tracing::info!(
        corpus = corpus_path,
        num_docs = engine.all_documents().len(),
        skipped = engine.skipped().len(),
        "engine ready"
    );
    Ok(router(Arc::new(engine), per_page))
}

pub fn router(engine: Arc<QueryEngine>, per_page: usize) -> Router {
    let app_state = AppState { engine, per_page: per_page.max(1) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/images", get(list_handler))
        .route("/image/:filename", get(image_handler))
        .route("/search", get(search_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn list_handler(State(state): State<AppState>, Query(params): Query<PageParams>) -> Json<PageResponse> {
    let all = state.engine.all_documents();
    let page = params.page.max(1);
    let start = (page - 1).saturating_mul(state.per_page).min(all.len());
    let end = start.saturating_add(state.per_page).min(all.len());
    Json(PageResponse {
        page,
        per_page: state.per_page,
        total_images: all.len(),
        start,
        end,
        images: all[start..end].to_vec(),
    })
}

pub async fn image_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<Document>, (StatusCode, String)> {
    match state.engine.document(&filename) {
        Some(doc) => Ok(Json(doc.clone())),
        None => Err((StatusCode::NOT_FOUND, format!("no image named {filename:?}"))),
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let method: SearchMethod = params
        .method
        .parse()
        .map_err(|e: imgsearch_core::EngineError| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut results = state.engine.search(method, &params.query);
    let total_hits = results.len();
    if let Some(k) = params.k {
        results.truncate(k);
    }

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.query, %method, total_hits, "search served");
    // Hits borrow from the engine, so serialize while `state` is still in scope
    let body = SearchResponse { query: &params.query, method, took_s: elapsed.as_secs_f64(), total_hits, results };
    Ok(Json(body).into_response())
}
