//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{JsonBody, JsonPayload};
use crate::{error::AppResult, models::Book, AppState};

/// Acknowledgement for writes that return no record
#[derive(Serialize, ToSchema)]
pub struct ResultResponse {
    pub result: String,
}

impl ResultResponse {
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// List all books
///
/// An empty catalog answers 200 with an empty body.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, or an empty body when there are none", body = Vec<Book>),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<JsonBody<Option<Vec<Book>>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(JsonBody((!books.is_empty()).then_some(books)))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "24-character hex book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Invalid ID or ID not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<JsonBody<Book>> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(JsonBody(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid JSON or invalid data", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonPayload(book): JsonPayload<Book>,
) -> AppResult<(StatusCode, JsonBody<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, JsonBody(created)))
}

/// Replace an existing book (the id is taken from the body)
#[utoipa::path(
    put,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 200, description = "Book replaced", body = ResultResponse),
        (status = 400, description = "Invalid JSON or ID not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_book(
    State(state): State<AppState>,
    JsonPayload(book): JsonPayload<Book>,
) -> AppResult<JsonBody<ResultResponse>> {
    state.services.catalog.replace_book(book).await?;
    Ok(JsonBody(ResultResponse::success()))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "24-character hex book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = ResultResponse),
        (status = 400, description = "Invalid ID or ID not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<JsonBody<ResultResponse>> {
    state.services.catalog.delete_book(&id).await?;
    Ok(JsonBody(ResultResponse::success()))
}
