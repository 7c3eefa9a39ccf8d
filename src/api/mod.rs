//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod openapi;

use std::time::Duration;

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON request body extractor.
///
/// Decodes the raw body whatever the content-type; any failure is reported
/// as `AppError::InvalidJson` with no field-level detail.
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::InvalidJson)?;

        serde_json::from_slice(&bytes)
            .map(JsonPayload)
            .map_err(|_| AppError::InvalidJson)
    }
}

/// JSON response body.
///
/// A value that serializes to `null` produces an empty body; the
/// content-type is `application/json` either way.
pub struct JsonBody<T>(pub T);

impl<T: Serialize> IntoResponse for JsonBody<T> {
    fn into_response(self) -> Response {
        let bytes = match serde_json::to_vec(&self.0) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let body = if bytes == b"null" {
            Body::empty()
        } else {
            Body::from(bytes)
        };

        let mut response = Response::new(body);
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let with_openapi = state.config.server.openapi;

    let mut app = Router::new()
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books", put(books::replace_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id", delete(books::delete_book))
        .with_state(state);

    if with_openapi {
        app = app.merge(openapi::create_openapi_router());
    }

    app.layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
