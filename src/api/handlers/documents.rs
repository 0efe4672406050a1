//! Generic document CRUD request handlers.
//!
//! `document_routes::<T>()` is the route factory: it produces the same five
//! endpoints for any collection, so per-collection code is just a call to
//! this function in the router. Handlers resolve id-scoped records through
//! `DocumentService::get`, the explicit shared lookup.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::api::dto::{DocumentResponse, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::Document;
use crate::services::{ProvideCollection, Services};
use crate::state::AppState;

/// Creates the five CRUD routes for one collection.
///
/// Routes:
/// - GET /        - List all records
/// - POST /       - Create a new record
/// - GET /{id}    - Get record by ID
/// - PUT /{id}    - Shallow-merge update by ID
/// - DELETE /{id} - Delete record by ID
pub fn document_routes<T>() -> Router<AppState>
where
    T: Document,
    Services: ProvideCollection<T>,
{
    Router::new()
        .route("/", get(list_documents::<T>).post(create_document::<T>))
        .route(
            "/{id}",
            get(get_document::<T>)
                .put(update_document::<T>)
                .delete(delete_document::<T>),
        )
}

/// Parses the path identifier into a store id.
///
/// A malformed id reports as a store fault (500), not a client error: id
/// format is an internal property of the store, and the contract keeps the
/// same surface for "not a valid id" and "lookup failed".
fn parse_document_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId {
        value: raw.to_string(),
    })
}

/// Unwraps the JSON body, converting rejections into 400 responses.
fn require_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    let Json(body) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    Ok(body)
}

/// GET / - List all records of the collection
async fn list_documents<T>(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DocumentResponse<T>>>>
where
    T: Document,
    Services: ProvideCollection<T>,
{
    let records = state.services.collection().list().await?;
    let responses = records.into_iter().map(DocumentResponse::from).collect();
    Ok(Json(responses))
}

/// GET /{id} - Get a single record
async fn get_document<T>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DocumentResponse<T>>>
where
    T: Document,
    Services: ProvideCollection<T>,
{
    let id = parse_document_id(&id)?;
    let record = state.services.collection().get(id).await?;
    Ok(Json(DocumentResponse::from(record)))
}

/// POST / - Create a new record
///
/// The body may carry any subset of the document's fields; absent fields
/// fall back to defaults. Returns 201 with the persisted record including
/// its generated identifier.
async fn create_document<T>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DocumentResponse<T>>)>
where
    T: Document,
    Services: ProvideCollection<T>,
{
    let doc = require_body(payload)?;
    let record = state.services.collection().create(doc).await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(record))))
}

/// PUT /{id} - Shallow-merge the body onto an existing record
async fn update_document<T>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> AppResult<Json<DocumentResponse<T>>>
where
    T: Document,
    Services: ProvideCollection<T>,
{
    let id = parse_document_id(&id)?;
    let patch = require_body(payload)?;
    let record = state.services.collection().update(id, patch).await?;
    Ok(Json(DocumentResponse::from(record)))
}

/// DELETE /{id} - Delete a record
async fn delete_document<T>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>>
where
    T: Document,
    Services: ProvideCollection<T>,
{
    let id = parse_document_id(&id)?;
    state.services.collection().delete(id).await?;
    Ok(Json(MessageResponse::new(format!("{} deleted", T::NAME))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_document_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_document_id_rejects_malformed() {
        let err = parse_document_id("not-an-id").unwrap_err();
        assert!(matches!(err, AppError::InvalidId { .. }));
    }
}
