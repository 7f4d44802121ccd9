//! Handlers for `/academic` endpoints.
//!
//! | Method   | Path                              | Notes |
//! |----------|-----------------------------------|-------|
//! | `GET`    | `/academic`                       | Flat list; optional `?department=&session=&semester=&type=` |
//! | `POST`   | `/academic`                       | Create with placement in the body |
//! | `PATCH`  | `/academic`                       | Batch update; always 501 once the body is valid |
//! | `GET`    | `/academic/{departmentId}`        | `?session=&semester=` required; partitioned by type |
//! | `POST`   | `/academic/{departmentId}`        | `?session=&semester=`; returns the refreshed partition |
//! | `PUT`    | `/academic/resource/{id}`         | 404 if not found; keeps `url`/`pdfLink` in sync |
//! | `DELETE` | `/academic/resource/{id}`         | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use campus_core::{
  Collection,
  academic::{
    AcademicBatchUpdate, AcademicResource, AcademicResourcePatch, DEPARTMENT_ID,
    NewAcademicResource, SEMESTER, SESSION, TYPE,
  },
  classify::{Partition, semester_partition},
  query::CollectionQuery,
  store::{DocumentStore, FieldEq},
  validate::non_blank,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  error::ApiError,
  extract::{JsonBody, QueryParams},
};

const NOT_FOUND: &str = "Resource not found.";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub department:    Option<String>,
  pub session:       Option<String>,
  pub semester:      Option<String>,
  #[serde(rename = "type")]
  pub resource_type: Option<String>,
}

/// `GET /academic`. The department narrows the store read; the other
/// parameters are applied in memory.
pub async fn list<S: DocumentStore>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Value>, ApiError> {
  let mut query = CollectionQuery::of::<AcademicResource>()
    .and_maybe(SESSION, params.session.as_deref())
    .and_maybe(SEMESTER, params.semester.as_deref())
    .and_maybe(TYPE, params.resource_type.as_deref());
  if let Some(department) = non_blank(params.department) {
    query = query.primary(FieldEq::new(DEPARTMENT_ID, department));
  }

  let resources: Vec<AcademicResource> =
    query.run(store.as_ref()).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "resources": resources })))
}

/// `POST /academic`
pub async fn create<S: DocumentStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewAcademicResource>,
) -> Result<impl IntoResponse, ApiError> {
  let resource = insert(store.as_ref(), body).await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Resource created.",
      "id": resource.id,
      "resource": resource,
    })),
  ))
}

/// `PATCH /academic`
pub async fn batch_update(
  JsonBody(body): JsonBody<AcademicBatchUpdate>,
) -> Result<Json<Value>, ApiError> {
  body.validate()?;
  Err(ApiError::NotImplemented("Batch update not implemented.".into()))
}

// ─── Per-department ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SemesterParams {
  pub session:  Option<String>,
  pub semester: Option<String>,
}

async fn partition_for<S: DocumentStore>(
  store: &S,
  department_id: &str,
  session: &str,
  semester: &str,
) -> Result<Partition, ApiError> {
  let partition = semester_partition(store, department_id, session, semester)
    .await
    .map_err(ApiError::store)?;
  if partition.unclassified > 0 {
    tracing::warn!(
      department_id,
      session,
      semester,
      count = partition.unclassified,
      "academic resources with an unknown type left out of the listing"
    );
  }
  Ok(partition)
}

async fn insert<S: DocumentStore>(
  store: &S,
  body: NewAcademicResource,
) -> Result<AcademicResource, ApiError> {
  let fields = body.into_fields()?;
  let resource: AcademicResource = store
    .create(Collection::AcademicResources, fields)
    .await
    .map_err(ApiError::store)?
    .decode()?;
  tracing::info!(
    id = %resource.id,
    department_id = %resource.department_id,
    kind = %resource.resource_type,
    "academic resource created"
  );
  Ok(resource)
}

/// `GET /academic/{departmentId}?session=&semester=`
pub async fn semester<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(department_id): Path<String>,
  QueryParams(params): QueryParams<SemesterParams>,
) -> Result<Json<Partition>, ApiError> {
  let (Some(session), Some(semester)) = (non_blank(params.session), non_blank(params.semester))
  else {
    return Err(ApiError::BadRequest(
      "Missing session or semester query parameters.".into(),
    ));
  };
  let partition = partition_for(store.as_ref(), &department_id, &session, &semester).await?;
  Ok(Json(partition))
}

/// `POST /academic/{departmentId}?session=&semester=`
pub async fn create_in_semester<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(department_id): Path<String>,
  QueryParams(params): QueryParams<SemesterParams>,
  JsonBody(body): JsonBody<NewAcademicResource>,
) -> Result<impl IntoResponse, ApiError> {
  let body = body.placed(&department_id, params.session, params.semester);
  let resource = insert(store.as_ref(), body).await?;
  let partition = partition_for(
    store.as_ref(),
    &department_id,
    &resource.session,
    &resource.semester,
  )
  .await?;

  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Resource created.",
      "id": resource.id,
      "syllabus": partition.syllabus,
      "pyqs": partition.pyqs,
      "additional": partition.additional,
      "tests": partition.tests,
    })),
  ))
}

// ─── Single resource ─────────────────────────────────────────────────────────

/// `PUT /academic/resource/{id}`
pub async fn update_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  JsonBody(patch): JsonBody<AcademicResourcePatch>,
) -> Result<Json<Value>, ApiError> {
  let fields = patch.into_fields()?;
  let resource: AcademicResource = store
    .update(Collection::AcademicResources, &id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND.into()))?
    .decode()?;
  Ok(Json(json!({ "message": "Resource updated.", "resource": resource })))
}

/// `DELETE /academic/resource/{id}`
pub async fn delete_one<S: DocumentStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
  let existed = store
    .delete(Collection::AcademicResources, &id)
    .await
    .map_err(ApiError::store)?;
  if !existed {
    return Err(ApiError::NotFound(NOT_FOUND.into()));
  }
  Ok(Json(json!({ "message": "Resource deleted." })))
}
