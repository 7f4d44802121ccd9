//! Handlers for `/departments` endpoints.
//!
//! | Method   | Path                | Notes |
//! |----------|---------------------|-------|
//! | `GET`    | `/departments`      | Newest first |
//! | `POST`   | `/departments`      | `name` and `shortName` required |
//! | `GET`    | `/departments/{id}` | The department itself, unwrapped; 404 if not found |
//! | `PUT`    | `/departments/{id}` | 404 if not found |
//! | `DELETE` | `/departments/{id}` | 200 whether or not it existed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  Collection,
  department::{Department, DepartmentPatch, NewDepartment},
  query::{CollectionQuery, fetch_one},
  store::DocumentStore,
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::JsonBody};

const NOT_FOUND: &str = "Department not found.";

/// `GET /departments`
pub async fn list<S: DocumentStore>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError> {
  let departments: Vec<Department> = CollectionQuery::of::<Department>()
    .run(store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "departments": departments })))
}

/// `POST /departments`
pub async fn create<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewDepartment>,
) -> Result<impl IntoResponse, ApiError> {
  let fields = body.into_fields()?;
  let department: Department = store
    .create(Collection::Departments, fields)
    .await
    .map_err(ApiError::store)?
    .decode()?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Department created.",
      "id": department.id,
      "department": department,
    })),
  ))
}

/// `GET /departments/{id}`
pub async fn get_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Department>, ApiError> {
  fetch_one::<Department, _>(store.as_ref(), &id)
    .await
    .map_err(ApiError::store)?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))
}

/// `PUT /departments/{id}`
pub async fn update_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(patch): JsonBody<DepartmentPatch>,
) -> Result<Json<Value>, ApiError> {
  let fields = patch.into_fields()?;
  let department: Department = store
    .update(Collection::Departments, &id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?
    .decode()?;
  Ok(Json(json!({
    "message": "Department updated successfully.",
    "department": department,
  })))
}

/// `DELETE /departments/{id}`
pub async fn delete_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  store
    .delete(Collection::Departments, &id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Department deleted successfully." })))
}
