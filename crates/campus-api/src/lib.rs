//! JSON REST API for the campus resource service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`campus_core::store::DocumentStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/resources", campus_api::api_router(store.clone()))
//! ```

pub mod academic;
pub mod contacts;
pub mod departments;
pub mod error;
pub mod extract;
pub mod notices;
pub mod projects;
pub mod study_materials;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use campus_core::store::DocumentStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    // Contacts
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .patch(contacts::patch::<S>)
        .delete(contacts::delete::<S>),
    )
    // Projects
    .route(
      "/projects",
      get(projects::list::<S>)
        .post(projects::create::<S>)
        .put(projects::update_by_body::<S>)
        .delete(projects::delete_by_query::<S>),
    )
    .route(
      "/projects/{id}",
      put(projects::update_one::<S>).delete(projects::delete_one::<S>),
    )
    // Academic resources
    .route(
      "/academic",
      get(academic::list::<S>)
        .post(academic::create::<S>)
        .patch(academic::batch_update),
    )
    .route(
      "/academic/{department_id}",
      get(academic::semester::<S>).post(academic::create_in_semester::<S>),
    )
    .route(
      "/academic/resource/{id}",
      put(academic::update_one::<S>).delete(academic::delete_one::<S>),
    )
    // Study materials
    .route(
      "/study-materials",
      get(study_materials::list::<S>).post(study_materials::create::<S>),
    )
    .route(
      "/study-materials/{id}",
      put(study_materials::update_one::<S>).delete(study_materials::delete_one::<S>),
    )
    // Notices
    .route("/notices", get(notices::list::<S>).post(notices::create::<S>))
    .route(
      "/notices/{id}",
      put(notices::update_one::<S>).delete(notices::delete_one::<S>),
    )
    // Departments
    .route(
      "/departments",
      get(departments::list::<S>).post(departments::create::<S>),
    )
    .route(
      "/departments/{id}",
      get(departments::get_one::<S>)
        .put(departments::update_one::<S>)
        .delete(departments::delete_one::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests;
