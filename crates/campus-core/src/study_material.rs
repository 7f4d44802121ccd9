//! Study materials published per department and semester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{
  Collection, Error, Result,
  document::{Fields, Record, to_fields},
  pipeline::{Listable, SortKey, parse_display_date},
  validate::{non_blank, patch_text},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterial {
  pub id:         String,
  pub title:      String,
  #[serde(default)]
  pub content:    String,
  /// Free-text type label, e.g. "Notes" or "Lab Manual".
  #[serde(default)]
  pub category:   String,
  #[serde(default)]
  pub department: String,
  #[serde(default)]
  pub semester:   String,
  #[serde(default)]
  pub publisher:  String,
  #[serde(default)]
  pub date:       String,
  #[serde(default)]
  pub important:  bool,
  #[serde(default)]
  pub link:       String,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl Record for StudyMaterial {
  const COLLECTION: Collection = Collection::StudyMaterials;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}

impl StudyMaterial {
  /// Creation time, or the display date for records that predate timestamps.
  ///
  /// This is a per-record key. A record with `createdAt` is never re-ranked
  /// by its display date, even against a legacy record that has only a
  /// date; ranking such a pair by both display dates instead would not be a
  /// total order.
  pub fn published_at(&self) -> Option<DateTime<Utc>> {
    self.created_at.or_else(|| parse_display_date(&self.date))
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyMaterial {
  pub title:      Option<String>,
  pub content:    Option<String>,
  pub category:   Option<String>,
  pub department: Option<String>,
  pub semester:   Option<String>,
  pub publisher:  Option<String>,
  pub date:       Option<String>,
  pub important:  Option<bool>,
  pub link:       Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StudyMaterialDraft {
  title:      String,
  content:    String,
  category:   String,
  department: String,
  semester:   String,
  publisher:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  date:       Option<String>,
  important:  bool,
  link:       String,
}

impl NewStudyMaterial {
  pub fn into_fields(self) -> Result<Fields> {
    let (
      Some(title),
      Some(content),
      Some(category),
      Some(department),
      Some(semester),
      Some(publisher),
      Some(link),
    ) = (
      non_blank(self.title),
      non_blank(self.content),
      non_blank(self.category),
      non_blank(self.department),
      non_blank(self.semester),
      non_blank(self.publisher),
      non_blank(self.link),
    )
    else {
      return Err(Error::validation("Missing required fields."));
    };

    to_fields(&StudyMaterialDraft {
      title,
      content,
      category,
      department,
      semester,
      publisher,
      date: non_blank(self.date),
      important: self.important.unwrap_or(false),
      link,
    })
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterialPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semester:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub publisher:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub important:  Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub link:       Option<String>,
}

impl StudyMaterialPatch {
  pub fn into_fields(self) -> Result<Fields> {
    let checked = Self {
      title:      patch_text(self.title, "Title cannot be empty.")?,
      content:    patch_text(self.content, "Content cannot be empty.")?,
      category:   patch_text(self.category, "Category cannot be empty.")?,
      department: patch_text(self.department, "Department cannot be empty.")?,
      semester:   patch_text(self.semester, "Semester cannot be empty.")?,
      publisher:  patch_text(self.publisher, "Publisher cannot be empty.")?,
      date:       self.date.map(|d| d.trim().to_owned()),
      important:  self.important,
      link:       patch_text(self.link, "Link cannot be empty.")?,
    };
    to_fields(&checked)
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum StudyMaterialFilter {
  Department,
  Category,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum StudyMaterialSort {
  /// [`StudyMaterial::published_at`].
  #[default]
  Newest,
  Title,
  Department,
}

impl Listable for StudyMaterial {
  type FilterField = StudyMaterialFilter;
  type SortField = StudyMaterialSort;

  fn search_fields(&self) -> Vec<&str> { vec![self.title.as_str(), self.content.as_str()] }

  fn matches_filter(&self, field: StudyMaterialFilter, value: &str) -> bool {
    match field {
      StudyMaterialFilter::Department => self.department == value,
      StudyMaterialFilter::Category => self.category == value,
    }
  }

  fn sort_key(&self, field: StudyMaterialSort) -> SortKey<'_> {
    match field {
      StudyMaterialSort::Newest => SortKey::Instant(self.published_at()),
      StudyMaterialSort::Title => SortKey::Text(&self.title),
      StudyMaterialSort::Department => SortKey::Text(&self.department),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::pipeline::{ListQuery, SortSpec, apply};

  fn complete() -> NewStudyMaterial {
    NewStudyMaterial {
      title:      Some("Network Theory Notes".into()),
      content:    Some("Unit 1 to 4".into()),
      category:   Some("Notes".into()),
      department: Some("EE".into()),
      semester:   Some("3".into()),
      publisher:  Some("Dept. of EE".into()),
      date:       None,
      important:  None,
      link:       Some("https://drive.example.com/nt".into()),
    }
  }

  #[test]
  fn create_requires_every_descriptive_field() {
    let fields = complete().into_fields().unwrap();
    assert_eq!(fields["important"], false);
    assert!(!fields.contains_key("date"));

    let mut m = complete();
    m.publisher = Some(" ".into());
    assert_eq!(m.into_fields().unwrap_err().to_string(), "Missing required fields.");
  }

  #[test]
  fn patch_rejects_blank_title() {
    let patch = StudyMaterialPatch {
      title: Some("".into()),
      ..Default::default()
    };
    assert!(patch.into_fields().is_err());

    let patch = StudyMaterialPatch {
      important: Some(true),
      ..Default::default()
    };
    let fields = patch.into_fields().unwrap();
    assert_eq!(fields.len(), 1);
  }

  fn material(id: &str, created: Option<u32>, date: &str) -> StudyMaterial {
    StudyMaterial {
      id:         id.into(),
      title:      id.into(),
      content:    String::new(),
      category:   "Notes".into(),
      department: "CST".into(),
      semester:   "1".into(),
      publisher:  String::new(),
      date:       date.into(),
      important:  false,
      link:       String::new(),
      created_at: created.map(|d| Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap()),
    }
  }

  #[test]
  fn newest_falls_back_to_display_date() {
    let all = vec![
      material("old", Some(1), ""),
      material("legacy", None, "2025-03-05"),
      material("undated", None, ""),
      material("new", Some(9), ""),
    ];
    let q = ListQuery::default().sort(SortSpec::new(StudyMaterialSort::Newest));
    let out: Vec<_> = apply(&all, &q).into_iter().map(|m| m.id.as_str()).collect();
    assert_eq!(out, ["new", "legacy", "old", "undated"]);
  }

  #[test]
  fn newest_ranks_mixed_pairs_by_each_records_own_key() {
    let stamped = material("stamped", Some(1), "2025-03-20");
    let legacy = material("legacy", None, "2025-03-10");
    let all = vec![stamped, legacy];

    let q = ListQuery::default().sort(SortSpec::new(StudyMaterialSort::Newest));
    let out: Vec<_> = apply(&all, &q).into_iter().map(|m| m.id.as_str()).collect();
    assert_eq!(out, ["legacy", "stamped"]);
  }
}
