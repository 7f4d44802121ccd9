//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/contacts`      | Newest first |
//! | `POST`   | `/contacts`      | Body: `{name, email, subject, message}` |
//! | `GET`    | `/contacts/{id}` | Marks the message read; 404 if not found |
//! | `PATCH`  | `/contacts/{id}` | Body: `{status?, important?}`; 404 if not found |
//! | `DELETE` | `/contacts/{id}` | 200 whether or not it existed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  Collection,
  contact::{ContactMessage, ContactPatch, ContactStatus, NewContactMessage},
  query::{CollectionQuery, fetch_one},
  store::DocumentStore,
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::JsonBody};

const NOT_FOUND: &str = "Contact not found.";

/// Apply `patch` to `current`, writing only if something changes.
async fn apply_patch<S: DocumentStore>(
  store: &S,
  current: ContactMessage,
  patch: ContactPatch,
) -> Result<ContactMessage, ApiError> {
  let changes = patch.changes(&current)?;
  if changes.is_empty() {
    return Ok(current);
  }

  let updated = store
    .update(Collection::Contacts, &current.id, changes)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?;
  Ok(updated.decode()?)
}

async fn find<S: DocumentStore>(store: &S, id: &str) -> Result<ContactMessage, ApiError> {
  fetch_one::<ContactMessage, _>(store, id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

/// `GET /contacts`
pub async fn list<S: DocumentStore>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError> {
  let contacts: Vec<ContactMessage> = CollectionQuery::of::<ContactMessage>()
    .run(store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "success": true, "data": contacts })))
}

/// `POST /contacts`
pub async fn create<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewContactMessage>,
) -> Result<impl IntoResponse, ApiError> {
  let fields = body.into_fields()?;
  let contact: ContactMessage = store
    .create(Collection::Contacts, fields)
    .await
    .map_err(ApiError::store)?
    .decode()?;

  tracing::info!(id = %contact.id, "contact message received");
  Ok((
    StatusCode::CREATED,
    Json(json!({ "success": true, "id": contact.id, "data": contact })),
  ))
}

/// `GET /contacts/{id}`: viewing an unread message marks it read.
pub async fn get_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let mut contact = find(store.as_ref(), &id).await?;
  if contact.status == ContactStatus::Unread {
    contact = apply_patch(store.as_ref(), contact, ContactPatch::mark_read()).await?;
  }
  Ok(Json(json!({ "success": true, "data": contact })))
}

/// `PATCH /contacts/{id}`
pub async fn patch<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(patch): JsonBody<ContactPatch>,
) -> Result<Json<Value>, ApiError> {
  let current = find(store.as_ref(), &id).await?;
  let contact = apply_patch(store.as_ref(), current, patch).await?;
  Ok(Json(json!({
    "success": true,
    "message": "Contact updated successfully.",
    "data": contact,
  })))
}

/// `DELETE /contacts/{id}`
pub async fn delete<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let existed = store
    .delete(Collection::Contacts, &id)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(%id, existed, "contact delete");
  Ok(Json(json!({ "success": true, "message": "Contact deleted successfully." })))
}
