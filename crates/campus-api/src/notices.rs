//! Handlers for `/notices` endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/notices`      | Newest first |
//! | `POST`   | `/notices`      | Category must be one of the board's categories |
//! | `PUT`    | `/notices/{id}` | 404 if not found |
//! | `DELETE` | `/notices/{id}` | 200 whether or not it existed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  Collection,
  notice::{NewNotice, Notice, NoticePatch},
  query::CollectionQuery,
  store::DocumentStore,
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::JsonBody};

/// `GET /notices`
pub async fn list<S: DocumentStore>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError> {
  let notices: Vec<Notice> = CollectionQuery::of::<Notice>()
    .run(store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "notices": notices })))
}

/// `POST /notices`
pub async fn create<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewNotice>,
) -> Result<impl IntoResponse, ApiError> {
  let fields = body.into_fields()?;
  let notice: Notice = store
    .create(Collection::Notices, fields)
    .await
    .map_err(ApiError::store)?
    .decode()?;

  tracing::info!(id = %notice.id, category = %notice.category, "notice posted");
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Notice created.", "id": notice.id, "notice": notice })),
  ))
}

/// `PUT /notices/{id}`
pub async fn update_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(patch): JsonBody<NoticePatch>,
) -> Result<Json<Value>, ApiError> {
  let fields = patch.into_fields()?;
  let notice: Notice = store
    .update(Collection::Notices, &id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Notice not found.".into()))?
    .decode()?;
  Ok(Json(json!({ "message": "Notice updated.", "notice": notice })))
}

/// `DELETE /notices/{id}`
pub async fn delete_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  store
    .delete(Collection::Notices, &id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Notice deleted." })))
}
