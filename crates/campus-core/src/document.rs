//! Schemaless documents and the typed records decoded from them.
//!
//! A [`Document`] is what the store hands back: a generated id, the two
//! server-assigned timestamps, and an open map of fields. Each entity type
//! implements [`Record`] to bind itself to a [`Collection`] and decode from a
//! document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Collection, Error, Result};

/// The mutable field map of a document.
pub type Fields = serde_json::Map<String, Value>;

/// Field names owned by the store. Never accepted from callers.
pub const ID: &str = "id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

// ─── Document ────────────────────────────────────────────────────────────────

/// A stored document. `fields` never contains the reserved keys; those live in
/// the typed envelope fields and are flattened back in on serialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  pub id:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
  #[serde(flatten)]
  pub fields:     Fields,
}

impl Document {
  /// The string value of `name`, if present and a string. `"id"` resolves to
  /// the document id.
  pub fn field_str(&self, name: &str) -> Option<&str> {
    match name {
      ID => Some(&self.id),
      _ => self.fields.get(name).and_then(Value::as_str),
    }
  }

  /// Decode into the typed record for its collection.
  pub fn decode<R: Record>(self) -> Result<R> {
    let id = self.id.clone();
    let value = serde_json::to_value(self)?;
    serde_json::from_value(value).map_err(|source| Error::Decode {
      collection: R::COLLECTION,
      id,
      source,
    })
  }
}

/// Remove the store-owned keys from a caller-supplied payload.
pub fn strip_reserved(fields: &mut Fields) {
  for key in [ID, CREATED_AT, UPDATED_AT] {
    fields.remove(key);
  }
}

/// Serialise `value` into a field map. Fails unless it serialises to an object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    other => Err(Error::NotAnObject(other.to_string())),
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A typed entity stored in exactly one collection.
pub trait Record: DeserializeOwned {
  const COLLECTION: Collection;

  fn id(&self) -> &str;

  /// Server-assigned creation time; absent on some legacy documents.
  fn created_at(&self) -> Option<DateTime<Utc>>;
}
