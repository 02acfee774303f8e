//! HTTP handlers for the books module.
//!
//! Each handler extracts path parameters, validates the body where one is
//! expected, calls the store, and maps the outcome to a status code. All
//! failures surface through [`AppError`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use folio_http::error::{AppError, Violation};

use super::models::{Book, BookId};
use super::schemas;
use super::store::BookStore;

/// Build the router for the books module.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{book_id}",
            get(get_book).patch(update_book).delete(delete_book),
        )
        .with_state(store)
}

async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    Json(store.list())
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let request = schemas::validate_create(&read_body(body)?).map_err(AppError::validation)?;
    let book = store.create(request);
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book_id = parse_book_id(&book_id)?;
    store
        .get(book_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Book not found"))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let book_id = parse_book_id(&book_id)?;
    let patch = schemas::validate_update(&read_body(body)?).map_err(AppError::validation)?;
    store
        .update(book_id, patch)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Book not found"))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let book_id = parse_book_id(&book_id)?;
    if store.delete(book_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Book not found"))
    }
}

/// Path ids must parse as integers; anything else is a schema violation,
/// not a missing resource.
fn parse_book_id(raw: &str) -> Result<BookId, AppError> {
    raw.parse().map_err(|_| {
        AppError::validation(vec![Violation::new(
            ["path", "book_id"],
            "value is not a valid integer",
        )])
    })
}

fn read_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::validation(vec![Violation::new(
            ["body"],
            rejection.body_text(),
        )])),
    }
}
