//! Contact-form messages.
//!
//! A message is created once by the public contact form. Afterwards only its
//! `status` and `important` flag change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
  Collection, Error, Result,
  document::{Fields, Record, to_fields},
  pipeline::{Listable, SortKey},
  validate::{non_blank, word_count},
};

/// Longest accepted message body, in whitespace-delimited words.
pub const MAX_MESSAGE_WORDS: usize = 149;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
  #[default]
  Unread,
  Read,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub subject:    String,
  pub message:    String,
  #[serde(default)]
  pub status:     ContactStatus,
  #[serde(default)]
  pub important:  bool,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl Record for ContactMessage {
  const COLLECTION: Collection = Collection::Contacts;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// Body of a contact-form submission. Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContactMessage {
  pub name:    Option<String>,
  pub email:   Option<String>,
  pub subject: Option<String>,
  pub message: Option<String>,
}

#[derive(Serialize)]
struct ContactDraft {
  name:      String,
  email:     String,
  subject:   String,
  message:   String,
  status:    ContactStatus,
  important: bool,
}

impl NewContactMessage {
  /// Validate the submission and produce the stored fields, with `status`
  /// defaulted to unread and `important` to false.
  pub fn into_fields(self) -> Result<Fields> {
    let (Some(name), Some(email), Some(subject), Some(message)) = (
      non_blank(self.name),
      non_blank(self.email),
      non_blank(self.subject),
      non_blank(self.message),
    ) else {
      return Err(Error::validation("All fields are required."));
    };

    if word_count(&message) > MAX_MESSAGE_WORDS {
      return Err(Error::validation(format!(
        "Message exceeds {MAX_MESSAGE_WORDS} words."
      )));
    }

    to_fields(&ContactDraft {
      name,
      email,
      subject,
      message,
      status: ContactStatus::Unread,
      important: false,
    })
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// The mutable subset of a message. Other keys in a PATCH body are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:    Option<ContactStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub important: Option<bool>,
}

impl ContactPatch {
  pub fn mark_read() -> Self {
    Self {
      status:    Some(ContactStatus::Read),
      important: None,
    }
  }

  /// The fields that would actually change on `current`. Empty when applying
  /// the patch is a no-op.
  pub fn changes(&self, current: &ContactMessage) -> Result<Fields> {
    let effective = Self {
      status:    self.status.filter(|s| *s != current.status),
      important: self.important.filter(|i| *i != current.important),
    };
    to_fields(&effective)
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum ContactFilter {
  Status,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum ContactSort {
  #[default]
  CreatedAt,
  Name,
}

impl Listable for ContactMessage {
  type FilterField = ContactFilter;
  type SortField = ContactSort;

  fn search_fields(&self) -> Vec<&str> {
    vec![
      self.name.as_str(),
      self.email.as_str(),
      self.subject.as_str(),
      self.message.as_str(),
    ]
  }

  fn matches_filter(&self, field: ContactFilter, value: &str) -> bool {
    match field {
      ContactFilter::Status => self.status.as_ref() == value,
    }
  }

  fn sort_key(&self, field: ContactSort) -> SortKey<'_> {
    match field {
      ContactSort::CreatedAt => SortKey::Instant(self.created_at),
      ContactSort::Name => SortKey::Text(&self.name),
    }
  }
}
