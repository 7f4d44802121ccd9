//! The `DocumentStore` trait and its single-field equality filter.
//!
//! Backends (e.g. `campus-store-sqlite`) implement the trait. The API and the
//! query layer depend on this abstraction, never on a concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Collection,
  document::{Document, Fields},
};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// `field == value` on a string field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEq {
  pub field: String,
  pub value: String,
}

impl FieldEq {
  pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      value: value.into(),
    }
  }

  /// Non-string and absent fields never match.
  pub fn matches(&self, document: &Document) -> bool {
    document.field_str(&self.field) == Some(self.value.as_str())
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a schemaless document store.
///
/// Ids, `createdAt` and `updatedAt` are owned by the store: any such keys in
/// a caller's field map are discarded. Every write touches one document and is
/// atomic; there are no multi-document transactions.
///
/// All methods return `Send` futures so the trait can be used behind `axum`
/// on a multi-threaded runtime.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  /// Persist a new document with a generated id. Both timestamps are set to
  /// now.
  fn create(
    &self,
    collection: Collection,
    fields: Fields,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + '_;

  fn get<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Shallow-merge `partial` into an existing document and bump `updatedAt`.
  /// Returns `None` if the document does not exist.
  fn update<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
    partial: Fields,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Returns whether a document was removed.
  fn delete<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Every document in the collection, in insertion order.
  fn list_all(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;

  /// Documents whose `filter.field` equals `filter.value`, in insertion order.
  fn list_where<'a>(
    &'a self,
    collection: Collection,
    filter: &'a FieldEq,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;
}
