//! kino REST API server.
//!
//! Provides HTTP endpoints for the catalog and the bulk-import pipeline.
//!
//! Run with: `cargo run --bin kino-server --features server`
//!
//! Environment variables:
//! - `KINO_PORT` - Port to listen on (default: 8080)
//! - `KINO_HOST` - Host to bind to (default: 0.0.0.0)
//! - `KINO_API_TOKEN` - Bearer token for mutating routes (optional)
//! - `KINO_LIBRARY` - Library file path (default: kino-library.json)
//! - `OMDB_API_KEY` - Metadata lookup key; without it /lookup is disabled

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kino::catalog::entry::EntryDraft;
use kino::catalog::search::{SearchFilter, filter_entries};
use kino::catalog::store::{CatalogStore, JsonFileStore, StoreError};
use kino::import::intake::is_csv_media_type;
use kino::import::runner::run_import;
use kino::lookup::{LookupOutcome, OmdbClient};
use kino::output::json::JsonImport;

/// Server configuration from environment.
#[derive(Clone)]
struct Config {
    port: u16,
    host: String,
    api_token: Option<String>,
    library: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            port: std::env::var("KINO_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            host: std::env::var("KINO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_token: std::env::var("KINO_API_TOKEN").ok().filter(|s| !s.is_empty()),
            library: std::env::var("KINO_LIBRARY")
                .unwrap_or_else(|_| "kino-library.json".to_string()),
        }
    }
}

struct AppState {
    config: Config,
    store: Mutex<JsonFileStore>,
    lookup: Option<OmdbClient>,
}

impl AppState {
    fn store(&self) -> MutexGuard<'_, JsonFileStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kino_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    if config.api_token.is_some() {
        tracing::info!("API token authentication enabled");
    } else {
        tracing::warn!("No KINO_API_TOKEN set - API is unauthenticated");
    }

    let store = JsonFileStore::open(&config.library).expect("library should open");
    let lookup = OmdbClient::from_env();
    if lookup.is_none() {
        tracing::warn!("No OMDB_API_KEY set - /lookup is disabled");
    }

    let state = Arc::new(AppState {
        config,
        store: Mutex::new(store),
        lookup,
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/import", post(import))
        .route("/lookup", post(lookup_title))
        .with_state(state)
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024)) // 50MB max
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("kino-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Check the bearer token if one is configured.
fn authorized(config: &Config, headers: &HeaderMap) -> bool {
    let Some(expected_token) = &config.api_token else {
        return true;
    };
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let provided_token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .unwrap_or("");
    provided_token == *expected_token
}

fn unauthorized() -> axum::response::Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "Invalid or missing bearer token",
    )
}

/// Optional single-valued facets for `GET /entries`.
#[derive(Deserialize, Default)]
struct ListParams {
    q: Option<String>,
    genre: Option<String>,
    decade: Option<String>,
}

/// List entries, optionally filtered.
async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let entries = state.store().list();
    let filter = SearchFilter {
        query: params.q.unwrap_or_default(),
        genres: params.genre.into_iter().collect(),
        decades: params.decade.into_iter().collect(),
    };
    let hits: Vec<_> = filter_entries(&entries, &filter).into_iter().cloned().collect();
    Json(hits).into_response()
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.store().get(id) {
        Some(entry) => Json(entry).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("no entry with id {id}")),
    }
}

/// The mandatory-field gate shared by create and update.
fn validate_draft(draft: &EntryDraft) -> Result<(), axum::response::Response> {
    if draft.name.is_empty() || draft.year == 0 {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Missing required fields (name, year)",
        ));
    }
    Ok(())
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<EntryDraft>,
) -> impl IntoResponse {
    if !authorized(&state.config, &headers) {
        return unauthorized();
    }
    if let Err(response) = validate_draft(&draft) {
        return response;
    }
    match state.store().insert(draft.with_defaults()) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(draft): Json<EntryDraft>,
) -> impl IntoResponse {
    if !authorized(&state.config, &headers) {
        return unauthorized();
    }
    if let Err(response) = validate_draft(&draft) {
        return response;
    }
    match state.store().update(id, draft.with_defaults()) {
        Ok(entry) => Json(entry).into_response(),
        Err(StoreError::Missing { id }) => {
            error_response(StatusCode::NOT_FOUND, format!("no entry with id {id}"))
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&state.config, &headers) {
        return unauthorized();
    }
    match state.store().delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(StoreError::Missing { id }) => {
            error_response(StatusCode::NOT_FOUND, format!("no entry with id {id}"))
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Bulk-import a CSV collection export.
///
/// Accepts multipart form data with a `file` part whose declared content
/// type must be exactly `text/csv`. Anything else is rejected before the
/// parser runs. Returns the per-row import report.
async fn import(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    if !authorized(&state.config, &headers) {
        return unauthorized();
    }

    let mut file_name = String::from("upload.csv");
    let mut text: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            // Ignore unknown fields
            continue;
        }

        let declared = field.content_type().unwrap_or("").to_string();
        if !is_csv_media_type(&declared) {
            return error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Please select a CSV file",
            );
        }
        if let Some(original) = field.file_name() {
            file_name = original.to_string();
        }

        match field.bytes().await {
            Ok(data) => match String::from_utf8(data.to_vec()) {
                Ok(body) => text = Some(body),
                Err(_) => {
                    return error_response(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "Failed to parse CSV file",
                    );
                }
            },
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read 'file': {e}"),
                );
            }
        }
    }

    let Some(text) = text else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required field: 'file' (CSV file)",
        );
    };

    let mut store = state.store();
    match run_import(&text, &mut *store) {
        Ok(report) => Json(JsonImport::from_report(file_name, &report)).into_response(),
        Err(err) => error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
    }
}

#[derive(Deserialize)]
struct LookupRequest {
    query: String,
}

#[derive(Serialize)]
struct LookupResponse {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<EntryDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Resolve a free-text title query against the metadata service.
///
/// Misses and service failures come back as `found: false` with a reason;
/// the endpoint itself only errors when no API key is configured.
async fn lookup_title(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LookupRequest>,
) -> impl IntoResponse {
    if request.query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Search query is required");
    }
    let Some(client) = &state.lookup else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "API key not configured");
    };

    match client.lookup(&request.query).await {
        LookupOutcome::Found(draft) => Json(LookupResponse {
            found: true,
            entry: Some(draft),
            error: None,
        })
        .into_response(),
        LookupOutcome::NotFound { reason } => Json(LookupResponse {
            found: false,
            entry: None,
            error: reason,
        })
        .into_response(),
    }
}
