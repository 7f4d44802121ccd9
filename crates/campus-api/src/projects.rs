//! Handlers for `/projects` endpoints.
//!
//! | Method   | Path               | Notes |
//! |----------|--------------------|-------|
//! | `GET`    | `/projects`        | Newest first |
//! | `POST`   | `/projects`        | Validated create; `date` defaults to today |
//! | `PUT`    | `/projects`        | Update with `id` in the body |
//! | `DELETE` | `/projects?id=`    | 400 without `id` |
//! | `PUT`    | `/projects/{id}`   | Validated partial update; 404 if not found |
//! | `DELETE` | `/projects/{id}`   | 200 whether or not it existed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  Collection,
  project::{NewProject, Project, ProjectPatch},
  query::CollectionQuery,
  store::DocumentStore,
  validate::non_blank,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  error::ApiError,
  extract::{JsonBody, QueryParams},
};

const ID_REQUIRED: &str = "Project ID is required.";

/// `GET /projects`
pub async fn list<S: DocumentStore>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError> {
  let projects: Vec<Project> = CollectionQuery::of::<Project>()
    .run(store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "projects": projects })))
}

/// `POST /projects`
pub async fn create<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
  let fields = body.into_fields(Utc::now().date_naive())?;
  let project: Project = store
    .create(Collection::Projects, fields)
    .await
    .map_err(ApiError::store)?
    .decode()?;

  tracing::info!(id = %project.id, title = %project.title, "project created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Project created successfully.",
      "id": project.id,
      "project": project,
    })),
  ))
}

async fn update<S: DocumentStore>(
  store: &S,
  id: &str,
  patch: ProjectPatch,
) -> Result<Json<Value>, ApiError> {
  let fields = patch.into_fields()?;
  let project: Project = store
    .update(Collection::Projects, id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Project not found.".into()))?
    .decode()?;

  Ok(Json(json!({ "message": "Project updated successfully.", "project": project })))
}

/// `PUT /projects/{id}`
pub async fn update_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(patch): JsonBody<ProjectPatch>,
) -> Result<Json<Value>, ApiError> {
  update(store.as_ref(), &id, patch).await
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub id:    Option<String>,
  #[serde(flatten)]
  pub patch: ProjectPatch,
}

/// `PUT /projects`; the body carries the `id`.
pub async fn update_by_body<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<Json<Value>, ApiError> {
  let id = non_blank(body.id).ok_or_else(|| ApiError::BadRequest(ID_REQUIRED.into()))?;
  update(store.as_ref(), &id, body.patch).await
}

async fn remove<S: DocumentStore>(store: &S, id: &str) -> Result<Json<Value>, ApiError> {
  store
    .delete(Collection::Projects, id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Project deleted successfully." })))
}

/// `DELETE /projects/{id}`
pub async fn delete_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  remove(store.as_ref(), &id).await
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
  pub id: Option<String>,
}

/// `DELETE /projects?id=<id>`
pub async fn delete_by_query<S: DocumentStore>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<DeleteParams>,
) -> Result<Json<Value>, ApiError> {
  let id = non_blank(params.id).ok_or_else(|| ApiError::BadRequest(ID_REQUIRED.into()))?;
  remove(store.as_ref(), &id).await
}
