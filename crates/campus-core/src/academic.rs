//! Academic resources: syllabi, previous-year question papers, additional
//! reading and test papers, placed by department, session and semester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{
  Collection, Error, Result,
  classify::ResourceType,
  document::{Fields, Record, to_fields},
  pipeline::{Listable, SortKey},
  validate::{non_blank, patch_text},
};

/// Stored field names the query layer filters on.
pub const DEPARTMENT_ID: &str = "departmentId";
pub const SESSION: &str = "session";
pub const SEMESTER: &str = "semester";
pub const TYPE: &str = "type";

/// Uploader recorded when the department route is not told otherwise.
pub const DEFAULT_UPLOADER: &str = "admin";

const MISSING_FIELDS: &str = "Missing required fields.";
const MISSING_LINK: &str = "Either url or pdfLink is required.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicResource {
  pub id:            String,
  pub title:         String,
  pub session:       String,
  pub semester:      String,
  #[serde(rename = "type")]
  pub resource_type: ResourceType,
  /// Always equal to `pdf_link` for documents written by this service.
  #[serde(default)]
  pub url:           String,
  #[serde(default)]
  pub pdf_link:      String,
  #[serde(default)]
  pub department_id: String,
  #[serde(default)]
  pub uploaded_by:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub year:          Option<String>,
  #[serde(default)]
  pub created_at:    Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at:    Option<DateTime<Utc>>,
}

impl Record for AcademicResource {
  const COLLECTION: Collection = Collection::AcademicResources;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}

/// `pdfLink` wins over `url` when both are given.
fn resolve_link(pdf_link: Option<String>, url: Option<String>) -> Option<String> {
  non_blank(pdf_link).or_else(|| non_blank(url))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAcademicResource {
  pub title:         Option<String>,
  pub session:       Option<String>,
  pub semester:      Option<String>,
  #[serde(rename = "type")]
  pub resource_type: Option<String>,
  pub url:           Option<String>,
  pub pdf_link:      Option<String>,
  pub department_id: Option<String>,
  pub uploaded_by:   Option<String>,
  pub year:          Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcademicDraft {
  title:         String,
  session:       String,
  semester:      String,
  #[serde(rename = "type")]
  resource_type: String,
  url:           String,
  pdf_link:      String,
  uploaded_by:   String,
  department_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  year:          Option<String>,
}

impl NewAcademicResource {
  /// Place a body posted to a department's semester: the department comes
  /// from the path, session and semester from the query string, and the
  /// uploader defaults to [`DEFAULT_UPLOADER`].
  pub fn placed(
    mut self,
    department_id: &str,
    session: Option<String>,
    semester: Option<String>,
  ) -> Self {
    self.department_id = Some(department_id.to_owned());
    self.session = session;
    self.semester = semester;
    self.uploaded_by =
      non_blank(self.uploaded_by).or_else(|| Some(DEFAULT_UPLOADER.to_owned()));
    self
  }

  /// Validate and produce the stored fields. `url` and `pdfLink` are written
  /// with the same value.
  pub fn into_fields(self) -> Result<Fields> {
    let (
      Some(title),
      Some(session),
      Some(semester),
      Some(resource_type),
      Some(uploaded_by),
      Some(department_id),
    ) = (
      non_blank(self.title),
      non_blank(self.session),
      non_blank(self.semester),
      non_blank(self.resource_type),
      non_blank(self.uploaded_by),
      non_blank(self.department_id),
    )
    else {
      return Err(Error::validation(MISSING_FIELDS));
    };

    let link =
      resolve_link(self.pdf_link, self.url).ok_or_else(|| Error::validation(MISSING_LINK))?;

    to_fields(&AcademicDraft {
      title,
      session,
      semester,
      resource_type,
      url: link.clone(),
      pdf_link: link,
      uploaded_by,
      department_id,
      year: non_blank(self.year),
    })
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Body of `PUT /resources/academic/resource/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicResourcePatch {
  pub title:         Option<String>,
  pub session:       Option<String>,
  pub semester:      Option<String>,
  #[serde(rename = "type")]
  pub resource_type: Option<String>,
  pub url:           Option<String>,
  pub pdf_link:      Option<String>,
  pub department_id: Option<String>,
  pub uploaded_by:   Option<String>,
  pub year:          Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcademicChanges {
  #[serde(skip_serializing_if = "Option::is_none")]
  title:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  session:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  semester:      Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  resource_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  url:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pdf_link:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  department_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  uploaded_by:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  year:          Option<String>,
}

impl AcademicResourcePatch {
  /// Validate and produce the changed fields. A new link, given as either
  /// `url` or `pdfLink`, is written to both.
  pub fn into_fields(self) -> Result<Fields> {
    let link_given = self.url.is_some() || self.pdf_link.is_some();
    let link = resolve_link(self.pdf_link, self.url);
    if link_given && link.is_none() {
      return Err(Error::validation(MISSING_LINK));
    }

    to_fields(&AcademicChanges {
      title: patch_text(self.title, "Title cannot be empty.")?,
      session: patch_text(self.session, "Session cannot be empty.")?,
      semester: patch_text(self.semester, "Semester cannot be empty.")?,
      resource_type: patch_text(self.resource_type, "Type cannot be empty.")?,
      url: link.clone(),
      pdf_link: link,
      department_id: patch_text(self.department_id, "Department cannot be empty.")?,
      uploaded_by: patch_text(self.uploaded_by, "Uploader cannot be empty.")?,
      year: self.year.map(|y| y.trim().to_owned()),
    })
  }
}

// ─── Batch ───────────────────────────────────────────────────────────────────

/// Body of the batch-update endpoint. Only its shape is checked; the
/// operation itself is not supported.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicBatchUpdate {
  pub session:       Option<String>,
  pub semester:      Option<String>,
  #[serde(rename = "type")]
  pub resource_type: Option<String>,
  pub department_id: Option<String>,
  pub data:          Option<serde_json::Value>,
}

impl AcademicBatchUpdate {
  pub fn validate(self) -> Result<()> {
    let complete = [
      self.session,
      self.semester,
      self.resource_type,
      self.department_id,
    ]
    .into_iter()
    .all(|v| non_blank(v).is_some())
      && self.data.is_some_and(|d| !d.is_null());

    if complete {
      Ok(())
    } else {
      Err(Error::validation(MISSING_FIELDS))
    }
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum AcademicFilter {
  Type,
  Session,
  Semester,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum AcademicSort {
  #[default]
  CreatedAt,
  Title,
}

impl Listable for AcademicResource {
  type FilterField = AcademicFilter;
  type SortField = AcademicSort;

  fn search_fields(&self) -> Vec<&str> {
    let mut fields = vec![self.title.as_str()];
    fields.extend(self.year.as_deref());
    fields
  }

  fn matches_filter(&self, field: AcademicFilter, value: &str) -> bool {
    match field {
      AcademicFilter::Type => self.resource_type.as_str() == value,
      AcademicFilter::Session => self.session == value,
      AcademicFilter::Semester => self.semester == value,
    }
  }

  fn sort_key(&self, field: AcademicSort) -> SortKey<'_> {
    match field {
      AcademicSort::CreatedAt => SortKey::Instant(self.created_at),
      AcademicSort::Title => SortKey::Text(&self.title),
    }
  }
}
