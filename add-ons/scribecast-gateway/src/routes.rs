//! Routes and handlers. Status codes mirror the original service:
//! one-shot endpoints answer 500 with `{"detail": <message>}` on store
//! faults, the stream endpoint never surfaces an error to the client.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, Response,
    },
    routing::get,
    Json, Router,
};
use futures_util::{Stream, StreamExt};
use scribecast_core::{ObjectStore, ResultEntry, SnapshotFetcher, UpdateNotifier};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Presigned audio links expire after one hour.
const AUDIO_URL_TTL: Duration = Duration::from_secs(3600);

/// Shared handler state. The store is the injected collaborator; everything
/// else is derived from it.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ObjectStore>,
    fetcher: SnapshotFetcher,
    poll_interval: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, poll_interval: Duration) -> Self {
        let fetcher = SnapshotFetcher::new(Arc::clone(&store));
        Self {
            store,
            fetcher,
            poll_interval,
        }
    }
}

#[derive(Serialize)]
struct AudioUrl {
    url: String,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/scripts.js", get(scripts))
        .route("/api/get-initial-data", get(get_initial_data))
        .route("/stream", get(stream))
        .route("/audio/*filename", get(audio_link))
        .route("/health", get(health))
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
}

async fn log_requests(request: Request, next: Next) -> Response {
    tracing::info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

/// GET / – dashboard page, embedded at compile time.
async fn index() -> Html<&'static str> {
    const INDEX: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));
    Html(INDEX)
}

/// GET /static/scripts.js – timeline + EventSource client.
async fn scripts() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    const SCRIPTS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/scripts.js"));
    ([(header::CONTENT_TYPE, "application/javascript")], SCRIPTS)
}

/// GET /api/get-initial-data – today's full sequence. An absent day key is
/// the normal empty state and answers 200 with `[]`.
async fn get_initial_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResultEntry>>, (StatusCode, Json<serde_json::Value>)> {
    match state.fetcher.fetch().await {
        Ok(entries) => Ok(Json(entries)),
        Err(err) => {
            tracing::error!("initial data fetch failed: {err}");
            Err(internal_error(err))
        }
    }
}

/// GET /stream – SSE channel. One notifier task per connection; the task
/// ends when the client disconnects and the receiver stream is dropped.
async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let (tx, rx) = mpsc::channel(16);
    let notifier = UpdateNotifier::new(state.fetcher.clone());
    tokio::spawn(notifier.run(state.poll_interval, tx));

    let stream = ReceiverStream::new(rx).map(|entry: ResultEntry| {
        Ok(Event::default()
            .json_data(&entry)
            .unwrap_or_else(|_| Event::default().data("{}")))
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}

/// GET /audio/*filename – presigned retrieval URL for `audio/{filename}`.
/// The filename passes through as-is; the store's own key rules are the
/// only gate.
async fn audio_link(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<AudioUrl>, (StatusCode, Json<serde_json::Value>)> {
    let key = format!("audio/{filename}");
    match state.store.presigned_get_url(&key, AUDIO_URL_TTL).await {
        Ok(url) => Ok(Json(AudioUrl { url })),
        Err(err) => {
            tracing::error!("presign failed for {key}: {err}");
            Err(internal_error(err))
        }
    }
}

/// GET /health – liveness probe, never touches the store.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "detail": err.to_string() })),
    )
}
