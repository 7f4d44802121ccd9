//! [`SqliteStore`]: the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use campus_core::{
  Collection, Document, Fields,
  document::{ID, strip_reserved},
  store::{DocumentStore, FieldEq},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawDocument, encode_dt, encode_fields, json_path},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A campus document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` over `documents` with the given tail and parameters,
  /// returning rows in insertion order.
  async fn select(
    &self,
    tail: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<Document>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM documents WHERE {tail} ORDER BY rowid",
          RawDocument::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawDocument::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, collection: Collection, mut fields: Fields) -> Result<Document> {
    strip_reserved(&mut fields);
    let now = Utc::now();
    let document = Document {
      id: Uuid::new_v4().simple().to_string(),
      created_at: Some(now),
      updated_at: Some(now),
      fields,
    };

    let collection_str = collection.as_str();
    let id_str         = document.id.clone();
    let body_str       = encode_fields(&document.fields)?;
    let at_str         = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, doc_id, body, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![collection_str, id_str, body_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(document)
  }

  async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
    let collection_str = collection.as_str();
    let id_str = id.to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM documents WHERE collection = ?1 AND doc_id = ?2",
                RawDocument::COLUMNS
              ),
              rusqlite::params![collection_str, id_str],
              RawDocument::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn update(
    &self,
    collection: Collection,
    id: &str,
    mut partial: Fields,
  ) -> Result<Option<Document>> {
    strip_reserved(&mut partial);
    let Some(mut document) = self.get(collection, id).await? else {
      return Ok(None);
    };

    let now = Utc::now();
    document.fields.extend(partial);
    document.updated_at = Some(now);

    let collection_str = collection.as_str();
    let id_str         = document.id.clone();
    let body_str       = encode_fields(&document.fields)?;
    let at_str         = encode_dt(now);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE documents SET body = ?3, updated_at = ?4
           WHERE collection = ?1 AND doc_id = ?2",
          rusqlite::params![collection_str, id_str, body_str, at_str],
        )?)
      })
      .await?;

    // Deleted between the read and the write.
    Ok((changed > 0).then_some(document))
  }

  async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
    let collection_str = collection.as_str();
    let id_str = id.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2",
          rusqlite::params![collection_str, id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn list_all(&self, collection: Collection) -> Result<Vec<Document>> {
    self
      .select("collection = ?1", vec![collection.as_str().to_owned()])
      .await
  }

  async fn list_where(&self, collection: Collection, filter: &FieldEq) -> Result<Vec<Document>> {
    let collection_str = collection.as_str().to_owned();
    if filter.field == ID {
      return self
        .select("collection = ?1 AND doc_id = ?2", vec![
          collection_str,
          filter.value.clone(),
        ])
        .await;
    }

    self
      .select("collection = ?1 AND json_extract(body, ?2) = ?3", vec![
        collection_str,
        json_path(&filter.field),
        filter.value.clone(),
      ])
      .await
  }
}
