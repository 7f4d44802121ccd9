//! Encoding and decoding between documents and the text columns of the
//! `documents` table.
//!
//! Timestamps are stored as RFC 3339 strings and field maps as compact JSON
//! objects.

use campus_core::{Document, Fields};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Fields ──────────────────────────────────────────────────────────────────

pub fn encode_fields(fields: &Fields) -> Result<String> { Ok(serde_json::to_string(fields)?) }

pub fn decode_fields(s: &str) -> Result<Fields> {
  match serde_json::from_str(s)? {
    Value::Object(map) => Ok(map),
    other => Err(campus_core::Error::NotAnObject(other.to_string()).into()),
  }
}

/// The JSON path addressing a top-level key, quoted so that any key is
/// accepted.
pub fn json_path(field: &str) -> String {
  format!("$.\"{}\"", field.replace('\\', "\\\\").replace('"', "\\\""))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub doc_id:     String,
  pub body:       String,
  pub created_at: Option<String>,
  pub updated_at: Option<String>,
}

impl RawDocument {
  pub const COLUMNS: &'static str = "doc_id, body, created_at, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      doc_id:     row.get(0)?,
      body:       row.get(1)?,
      created_at: row.get(2)?,
      updated_at: row.get(3)?,
    })
  }

  pub fn into_document(self) -> Result<Document> {
    Ok(Document {
      id:         self.doc_id,
      created_at: self.created_at.as_deref().map(decode_dt).transpose()?,
      updated_at: self.updated_at.as_deref().map(decode_dt).transpose()?,
      fields:     decode_fields(&self.body)?,
    })
  }
}
