//! Handlers for `/study-materials` endpoints.
//!
//! | Method   | Path                    | Notes |
//! |----------|-------------------------|-------|
//! | `GET`    | `/study-materials`      | Newest first |
//! | `POST`   | `/study-materials`      | Every descriptive field required |
//! | `PUT`    | `/study-materials/{id}` | 404 if not found |
//! | `DELETE` | `/study-materials/{id}` | 200 whether or not it existed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  Collection,
  query::CollectionQuery,
  store::DocumentStore,
  study_material::{NewStudyMaterial, StudyMaterial, StudyMaterialPatch},
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::JsonBody};

/// `GET /study-materials`
pub async fn list<S: DocumentStore>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError> {
  let materials: Vec<StudyMaterial> = CollectionQuery::of::<StudyMaterial>()
    .run(store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "studyMaterials": materials })))
}

/// `POST /study-materials`
pub async fn create<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewStudyMaterial>,
) -> Result<impl IntoResponse, ApiError> {
  let fields = body.into_fields()?;
  let document = store
    .create(Collection::StudyMaterials, fields)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = %document.id, "study material added");
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Study material added.", "id": document.id })),
  ))
}

/// `PUT /study-materials/{id}`
pub async fn update_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(patch): JsonBody<StudyMaterialPatch>,
) -> Result<Json<Value>, ApiError> {
  let fields = patch.into_fields()?;
  let material: StudyMaterial = store
    .update(Collection::StudyMaterials, &id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Study material not found.".into()))?
    .decode()?;
  Ok(Json(json!({ "message": "Study material updated.", "studyMaterial": material })))
}

/// `DELETE /study-materials/{id}`
pub async fn delete_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  store
    .delete(Collection::StudyMaterials, &id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Study material deleted." })))
}
