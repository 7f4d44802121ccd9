//! The collection query layer.
//!
//! A [`CollectionQuery`] fetches once from the store using at most one
//! equality filter, then narrows the result in memory with the rest. Only
//! single-field equality ever reaches the backend, so no compound index is
//! needed. A backend that supports compound filters could push the secondary
//! filters down instead without changing callers.

use std::cmp::Ordering;

use crate::{
  Collection,
  document::{Document, Record},
  pipeline::{Direction, compare_instants},
  store::{DocumentStore, FieldEq},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
  pub collection: Collection,
  /// Sent to the store. `None` fetches the whole collection.
  pub primary:    Option<FieldEq>,
  /// Applied in memory after the fetch.
  pub secondary:  Vec<FieldEq>,
}

impl CollectionQuery {
  pub fn new(collection: Collection) -> Self {
    Self {
      collection,
      primary: None,
      secondary: Vec::new(),
    }
  }

  /// A query over `R`'s collection.
  pub fn of<R: Record>() -> Self { Self::new(R::COLLECTION) }

  pub fn primary(mut self, filter: FieldEq) -> Self {
    self.primary = Some(filter);
    self
  }

  pub fn and(mut self, filter: FieldEq) -> Self {
    self.secondary.push(filter);
    self
  }

  /// Add `field == value` when `value` is present and non-empty.
  pub fn and_maybe(self, field: &str, value: Option<&str>) -> Self {
    match value.filter(|v| !v.is_empty()) {
      Some(value) => self.and(FieldEq::new(field, value)),
      None => self,
    }
  }

  /// Keep the documents satisfying every secondary filter, in order.
  pub fn refine(&self, documents: Vec<Document>) -> Vec<Document> {
    documents
      .into_iter()
      .filter(|d| self.secondary.iter().all(|f| f.matches(d)))
      .collect()
  }

  /// The raw documents, in store order.
  pub async fn fetch<S: DocumentStore>(&self, store: &S) -> Result<Vec<Document>, S::Error> {
    let documents = match &self.primary {
      Some(filter) => store.list_where(self.collection, filter).await?,
      None => store.list_all(self.collection).await?,
    };
    Ok(self.refine(documents))
  }

  /// Fetch, decode and order newest first.
  pub async fn run<R: Record, S: DocumentStore>(&self, store: &S) -> Result<Vec<R>, S::Error> {
    let mut records = self
      .fetch(store)
      .await?
      .into_iter()
      .map(Document::decode::<R>)
      .collect::<Result<Vec<_>, _>>()?;
    records.sort_by(newest_first);
    Ok(records)
  }
}

/// Descending by `createdAt`; records without one keep their relative order
/// after the rest.
pub fn newest_first<R: Record>(a: &R, b: &R) -> Ordering {
  compare_instants(a.created_at(), b.created_at(), Direction::Descending)
}

/// Fetch and decode a single record, `None` if absent.
pub async fn fetch_one<R: Record, S: DocumentStore>(
  store: &S,
  id: &str,
) -> Result<Option<R>, S::Error> {
  match store.get(R::COLLECTION, id).await? {
    Some(document) => Ok(Some(document.decode()?)),
    None => Ok(None),
  }
}
