//! Notice-board entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Collection, Error, Result,
  document::{Fields, Record, to_fields},
  pipeline::{Listable, SortKey},
  validate::{non_blank, optional_url, patch_text, patch_url},
};

/// Author recorded when a notice does not name one.
pub const DEFAULT_AUTHOR: &str = "admin";

const INVALID_LINK: &str = "Invalid notice link URL.";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum NoticeCategory {
  General,
  Events,
  Exams,
  Urgent,
  Admission,
  #[serde(rename = "admission-opens")]
  #[strum(serialize = "admission-opens")]
  AdmissionOpens,
}

impl NoticeCategory {
  fn parse(value: &str) -> Result<Self> {
    value
      .parse()
      .map_err(|_| Error::validation(format!("Invalid category: {value}.")))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
  pub id:           String,
  pub title:        String,
  pub content:      String,
  pub category:     NoticeCategory,
  #[serde(default)]
  pub is_important: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notice_link:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date:         Option<String>,
  #[serde(default)]
  pub created_by:   String,
  #[serde(default)]
  pub created_at:   Option<DateTime<Utc>>,
}

impl Record for Notice {
  const COLLECTION: Collection = Collection::Notices;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}

/// Split into (important, regular), preserving order within each.
pub fn split_important<'a>(notices: impl IntoIterator<Item = &'a Notice>) -> (Vec<&'a Notice>, Vec<&'a Notice>) {
  notices.into_iter().partition(|n| n.is_important)
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotice {
  pub title:        Option<String>,
  pub content:      Option<String>,
  pub category:     Option<String>,
  pub is_important: Option<bool>,
  pub notice_link:  Option<String>,
  pub date:         Option<String>,
  pub created_by:   Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NoticeDraft {
  title:        String,
  content:      String,
  category:     NoticeCategory,
  is_important: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  notice_link:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  date:         Option<String>,
  created_by:   String,
}

impl NewNotice {
  pub fn into_fields(self) -> Result<Fields> {
    let (Some(title), Some(content), Some(category)) = (
      non_blank(self.title),
      non_blank(self.content),
      non_blank(self.category),
    ) else {
      return Err(Error::validation(
        "Missing required fields: title, content, and category are required.",
      ));
    };

    to_fields(&NoticeDraft {
      title,
      content,
      category: NoticeCategory::parse(&category)?,
      is_important: self.is_important.unwrap_or(false),
      notice_link: optional_url(self.notice_link, INVALID_LINK)?,
      date: non_blank(self.date),
      created_by: non_blank(self.created_by).unwrap_or_else(|| DEFAULT_AUTHOR.to_owned()),
    })
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticePatch {
  pub title:        Option<String>,
  pub content:      Option<String>,
  pub category:     Option<String>,
  pub is_important: Option<bool>,
  pub notice_link:  Option<String>,
  pub date:         Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NoticeChanges {
  #[serde(skip_serializing_if = "Option::is_none")]
  title:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  content:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  category:     Option<NoticeCategory>,
  #[serde(skip_serializing_if = "Option::is_none")]
  is_important: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  notice_link:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  date:         Option<String>,
}

impl NoticePatch {
  pub fn into_fields(self) -> Result<Fields> {
    let category = patch_text(self.category, "Category cannot be empty.")?
      .map(|c| NoticeCategory::parse(&c))
      .transpose()?;

    to_fields(&NoticeChanges {
      title: patch_text(self.title, "Title cannot be empty.")?,
      content: patch_text(self.content, "Content cannot be empty.")?,
      category,
      is_important: self.is_important,
      notice_link: patch_url(self.notice_link, INVALID_LINK)?,
      date: self.date.map(|d| d.trim().to_owned()),
    })
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum NoticeFilter {
  Category,
  /// `"true"` or `"false"`.
  Important,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum NoticeSort {
  #[default]
  CreatedAt,
  Title,
}

impl Listable for Notice {
  type FilterField = NoticeFilter;
  type SortField = NoticeSort;

  fn search_fields(&self) -> Vec<&str> { vec![self.title.as_str(), self.content.as_str()] }

  fn matches_filter(&self, field: NoticeFilter, value: &str) -> bool {
    match field {
      NoticeFilter::Category => self.category.as_ref() == value,
      NoticeFilter::Important => value
        .parse::<bool>()
        .is_ok_and(|wanted| wanted == self.is_important),
    }
  }

  fn sort_key(&self, field: NoticeSort) -> SortKey<'_> {
    match field {
      NoticeSort::CreatedAt => SortKey::Instant(self.created_at),
      NoticeSort::Title => SortKey::Text(&self.title),
    }
  }
}
