//! HTTP request handlers
//!
//! Implements handlers for all caption endpoints. Every error leaving this
//! layer is a JSON body with an `error` field and a status in {400, 500}.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::CaptionError;
use crate::job;
use crate::state::AppState;

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    InternalError(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<CaptionError> for HttpError {
    fn from(err: CaptionError) -> Self {
        if err.is_client_error() {
            HttpError::BadRequest(err.to_string())
        } else {
            HttpError::InternalError(err.to_string())
        }
    }
}

/// JSON body extractor whose rejection keeps the service's error shape:
/// a missing or malformed body becomes a 400 with an `error` field
/// instead of axum's plain-text 422.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(HttpError::BadRequest(rejection.body_text())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CaptionsRequest {
    pub url: String,
    pub output_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct StorageEvent {
    pub bucket: String,
    pub name: String,
}

fn require_url(query: UrlQuery) -> Result<String, HttpError> {
    query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| HttpError::BadRequest("Valid video url is required".to_string()))
}

/// Health check endpoint
/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

/// Video metadata endpoint
/// GET /v1/metadata?url=<url>
pub async fn get_metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let url = require_url(query)?;
    let meta = state.fetcher.fetch_metadata(&url).await?;

    Ok(Json(serde_json::json!({
        "id": meta.id,
        "title": meta.title,
    })))
}

/// Caption download endpoint (local destination)
/// POST /v1/captions  body: {"url": ..., "output_dir": ...}
pub async fn download_captions(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CaptionsRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let output_dir = PathBuf::from(req.output_dir);
    let caption_path = state
        .fetcher
        .fetch_subtitle_track(&req.url, &output_dir)
        .await?;

    Ok(Json(serde_json::json!({
        "message": format!(
            "Successfully downloaded captions for {} as {}",
            req.url,
            caption_path.display()
        ),
    })))
}

/// Caption fetch-and-publish endpoint
/// POST /v2/captions?url=<url>
pub async fn store_captions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let url = require_url(query)?;
    let file = job::fetch_and_store(&state, &url).await?;

    Ok(Json(serde_json::json!({
        "message": format!("Successfully downloaded and uploaded captions for {url}"),
        "file": file,
    })))
}

/// Storage event endpoint. Always acknowledges with 200: event delivery is
/// at-least-once and fire-and-forget, so processing failures surface in
/// the logs only.
/// POST /events/object-created  body: {"bucket": ..., "name": ...}
pub async fn object_created(
    State(state): State<Arc<AppState>>,
    AppJson(event): AppJson<StorageEvent>,
) -> Json<serde_json::Value> {
    job::process_storage_event(&state, &event.bucket, &event.name).await;

    Json(serde_json::json!({ "status": "accepted" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_url() {
        assert!(require_url(UrlQuery { url: None }).is_err());
        assert!(require_url(UrlQuery {
            url: Some(String::new())
        })
        .is_err());
        assert_eq!(
            require_url(UrlQuery {
                url: Some("https://youtu.be/a".to_string())
            })
            .unwrap(),
            "https://youtu.be/a"
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let err: HttpError = CaptionError::UnsupportedUrl("x".to_string()).into();
        assert!(matches!(err, HttpError::BadRequest(_)));

        let err: HttpError = CaptionError::FetchFailed("x".to_string()).into();
        assert!(matches!(err, HttpError::InternalError(_)));
    }
}
