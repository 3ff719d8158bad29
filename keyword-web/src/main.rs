//! Axum HTTP server exposing keyword and entity extraction as JSON endpoints.
//!
//! | Method | Route              | Body             | Response                    |
//! |--------|--------------------|------------------|-----------------------------|
//! | POST   | `/extract`         | `{text}`         | nouns + entities            |
//! | POST   | `/keywords`        | `{text}`         | `{keywords}`                |
//! | POST   | `/filename`        | `{filename}`     | `{tokens}`                  |
//! | POST   | `/dictionary`      | `{words}`        | `204`                       |
//! | PUT    | `/dictionary/path` | `{path}`         | `204`                       |
//!
//! Environment: `KEYWORD_WEB_ADDR` (default `0.0.0.0:3000`), `KEYWORD_CONFIG`
//! (optional TOML file, see [`ExtractorConfig`]), `RUST_LOG`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{post, put},
    Router,
};
use keyword_core::{ExtractionResult, ExtractorConfig, KeywordExtractor, ScriptTagger};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Shared application state
struct AppState {
    extractor: KeywordExtractor,
}

#[derive(Deserialize)]
struct TextRequest {
    text: String,
}

#[derive(Deserialize)]
struct FilenameRequest {
    filename: String,
}

#[derive(Deserialize)]
struct DictionaryRequest {
    words: Vec<String>,
}

#[derive(Deserialize)]
struct DictionaryPathRequest {
    path: String,
}

#[derive(Serialize)]
struct KeywordsResponse {
    keywords: Vec<String>,
}

#[derive(Serialize)]
struct TokensResponse {
    tokens: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("KEYWORD_CONFIG") {
        Ok(path) => {
            info!(%path, "loading extractor config");
            ExtractorConfig::from_toml_file(path)?
        }
        Err(_) => ExtractorConfig::default(),
    };
    let extractor = KeywordExtractor::with_config(Arc::new(ScriptTagger::new()), &config)?;
    let state = Arc::new(AppState { extractor });

    let addr = std::env::var("KEYWORD_WEB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("keyword server listening on http://{addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/extract", post(extract_handler))
        .route("/keywords", post(keywords_handler))
        .route("/filename", post(filename_handler))
        .route("/dictionary", post(dictionary_handler))
        .route("/dictionary/path", put(dictionary_path_handler))
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Runs blocking extractor work off the async runtime.
async fn run_blocking<T, F>(state: Arc<AppState>, work: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&KeywordExtractor) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&state.extractor))
        .await
        .map_err(|e| {
            error!(error = %e, "extraction task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "extraction task failed")
        })
}

/// Nouns and entities for one text
async fn extract_handler(State(state): State<Arc<AppState>>, Json(req): Json<TextRequest>) -> Response {
    if req.text.trim().is_empty() {
        return Json(ExtractionResult::empty()).into_response();
    }

    match run_blocking(state, move |extractor| extractor.extract_keywords(&req.text)).await {
        Ok(result) => Json(result).into_response(),
        Err(response) => response,
    }
}

/// Flattened unique keywords for one text
async fn keywords_handler(State(state): State<Arc<AppState>>, Json(req): Json<TextRequest>) -> Response {
    if req.text.trim().is_empty() {
        return Json(KeywordsResponse { keywords: Vec::new() }).into_response();
    }

    match run_blocking(state, move |extractor| extractor.extract_unique_keywords(&req.text)).await {
        Ok(keywords) => Json(KeywordsResponse { keywords }).into_response(),
        Err(response) => response,
    }
}

async fn filename_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FilenameRequest>,
) -> impl IntoResponse {
    Json(TokensResponse {
        tokens: state.extractor.split_filename_to_tokens(&req.filename),
    })
}

async fn dictionary_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DictionaryRequest>,
) -> Response {
    let outcome = run_blocking(state, move |extractor| extractor.add_user_dictionary(&req.words)).await;
    match outcome {
        Ok(Ok(added)) => {
            info!(added, "user dictionary extended");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "user dictionary update failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(response) => response,
    }
}

async fn dictionary_path_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DictionaryPathRequest>,
) -> Response {
    let outcome = run_blocking(state, move |extractor| extractor.set_user_dictionary_path(&req.path)).await;
    match outcome {
        Ok(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(e)) => {
            warn!(error = %e, "user dictionary path rejected");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(response) => response,
    }
}
