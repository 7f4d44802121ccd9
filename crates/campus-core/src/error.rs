//! Error types for `campus-core`.

use thiserror::Error;

use crate::Collection;

#[derive(Debug, Error)]
pub enum Error {
  /// A submitted payload failed validation. The message is shown to the
  /// caller verbatim.
  #[error("{0}")]
  Validation(String),

  #[error("malformed {collection} document {id}: {source}")]
  Decode {
    collection: Collection,
    id:         String,
    #[source]
    source:     serde_json::Error,
  },

  #[error("expected a JSON object, got {0}")]
  NotAnObject(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
