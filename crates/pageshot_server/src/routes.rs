use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use pageshot_core::{FieldErrors, RequestOrigin, ScreenshotDescriptor};
use pageshot_engine::CaptureService;
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::audit::audit;
use crate::error::ApiError;

pub struct AppState {
    service: CaptureService,
    /// Used for hrefs when a request carries no `Host` header.
    fallback_host: String,
}

impl AppState {
    pub fn new(service: CaptureService, fallback_host: impl Into<String>) -> Self {
        Self {
            service,
            fallback_host: fallback_host.into(),
        }
    }
}

pub type SharedState = Arc<AppState>;

pub fn router(state: AppState, audit_requests: bool) -> Router {
    let router = Router::new()
        .route("/devices", get(list_devices))
        .route("/networks", get(list_networks))
        .route("/", get(list_screenshots).post(create_screenshot))
        .route("/{id}", get(get_screenshot).delete(delete_screenshot))
        .with_state(Arc::new(state));

    if audit_requests {
        router.layer(middleware::from_fn(audit))
    } else {
        router
    }
}

async fn create_screenshot(
    State(state): State<SharedState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Vec<ScreenshotDescriptor>>), ApiError> {
    if !is_json(&headers) {
        return Err(ApiError::UnsupportedMediaType);
    }

    let body = parse_body(&body)?;
    let origin = request_origin(&state.fallback_host, &uri, &headers);
    let descriptors = state.service.create(body.as_ref(), &origin).await?;
    Ok((StatusCode::CREATED, Json(descriptors)))
}

async fn list_screenshots(
    State(state): State<SharedState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<Vec<ScreenshotDescriptor>>, ApiError> {
    let origin = request_origin(&state.fallback_host, &uri, &headers);
    let ids = state.service.store().list().await?;
    Ok(Json(ids.into_iter().map(|id| origin.descriptor(id)).collect()))
}

async fn get_screenshot(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = state.service.store().open(&id).await?;
    let body = Body::from_stream(ReaderStream::new(artifact.file));
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, artifact.content_type.to_string()),
            (CONTENT_LENGTH, artifact.len.to_string()),
        ],
        body,
    )
        .into_response())
}

async fn delete_screenshot(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.store().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_devices() -> impl IntoResponse {
    Json(pageshot_core::devices())
}

async fn list_networks() -> impl IntoResponse {
    Json(pageshot_core::networks())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// An empty body is "no job"; anything else must be JSON.
fn parse_body(raw: &[u8]) -> Result<Option<Value>, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(raw).map(Some).map_err(|err| {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), format!("invalid JSON: {err}"));
        ApiError::BadRequest(errors)
    })
}

fn request_origin(fallback_host: &str, uri: &Uri, headers: &HeaderMap) -> RequestOrigin {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(fallback_host);
    RequestOrigin::new(scheme, host, uri.path())
}
