//! Student projects shown in the public showcase.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Collection, Error, Result,
  document::{Fields, Record, to_fields},
  pipeline::{Listable, SortKey, parse_display_date},
  validate::{clean_list, non_blank, optional_url, patch_text, patch_url},
};

/// The departments a project can belong to.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum DepartmentCode {
  Cst,
  Ee,
  Etce,
}

impl DepartmentCode {
  fn parse(value: &str) -> Result<Self> {
    value
      .parse()
      .map_err(|_| Error::validation(format!("Invalid department: {value}.")))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id:            String,
  pub title:         String,
  pub content:       String,
  #[serde(default)]
  pub category:      Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link:          Option<String>,
  pub department:    DepartmentCode,
  #[serde(default)]
  pub team_members:  Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project_image: Option<String>,
  /// Display date, `YYYY-MM-DD`.
  #[serde(default)]
  pub date:          String,
  #[serde(default)]
  pub important:     bool,
  #[serde(default)]
  pub created_at:    Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at:    Option<DateTime<Utc>>,
}

impl Record for Project {
  const COLLECTION: Collection = Collection::Projects;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}

const CATEGORY_REQUIRED: &str = "At least one category must be selected.";
const INVALID_LINK: &str = "Invalid project link URL.";
const INVALID_IMAGE: &str = "Invalid project image URL.";

fn categories(values: Vec<String>) -> Result<Vec<String>> {
  let values = clean_list(values);
  if values.is_empty() {
    return Err(Error::validation(CATEGORY_REQUIRED));
  }
  Ok(values)
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// Body of `POST /resources/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
  pub title:         Option<String>,
  pub content:       Option<String>,
  pub category:      Option<Vec<String>>,
  pub link:          Option<String>,
  pub department:    Option<String>,
  pub team_members:  Option<Vec<String>>,
  pub project_image: Option<String>,
  pub date:          Option<String>,
  pub important:     Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDraft {
  title:         String,
  content:       String,
  category:      Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  link:          Option<String>,
  department:    DepartmentCode,
  team_members:  Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  project_image: Option<String>,
  date:          String,
  important:     bool,
}

impl NewProject {
  /// Validate and produce the stored fields. `today` fills in a missing
  /// display date.
  pub fn into_fields(self, today: NaiveDate) -> Result<Fields> {
    let (Some(title), Some(content), Some(department)) = (
      non_blank(self.title),
      non_blank(self.content),
      non_blank(self.department),
    ) else {
      return Err(Error::validation(
        "Missing required fields: title, content, and department are required.",
      ));
    };

    let category = categories(self.category.unwrap_or_default())?;
    let link = optional_url(self.link, INVALID_LINK)?;
    let project_image = optional_url(self.project_image, INVALID_IMAGE)?;
    let department = DepartmentCode::parse(&department)?;

    to_fields(&ProjectDraft {
      title,
      content,
      category,
      link,
      department,
      team_members: clean_list(self.team_members.unwrap_or_default()),
      project_image,
      date: non_blank(self.date)
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
      important: self.important.unwrap_or(false),
    })
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Body of `PUT /resources/projects/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
  pub title:         Option<String>,
  pub content:       Option<String>,
  pub category:      Option<Vec<String>>,
  pub link:          Option<String>,
  pub department:    Option<String>,
  pub team_members:  Option<Vec<String>>,
  pub project_image: Option<String>,
  pub date:          Option<String>,
  pub important:     Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectChanges {
  #[serde(skip_serializing_if = "Option::is_none")]
  title:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  content:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  category:      Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  link:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  department:    Option<DepartmentCode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  team_members:  Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  project_image: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  date:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  important:     Option<bool>,
}

impl ProjectPatch {
  pub fn into_fields(self) -> Result<Fields> {
    let department = patch_text(self.department, "Department cannot be empty.")?
      .map(|d| DepartmentCode::parse(&d))
      .transpose()?;

    to_fields(&ProjectChanges {
      title: patch_text(self.title, "Title cannot be empty.")?,
      content: patch_text(self.content, "Content cannot be empty.")?,
      category: self.category.map(categories).transpose()?,
      link: patch_url(self.link, INVALID_LINK)?,
      department,
      team_members: self.team_members.map(clean_list),
      project_image: patch_url(self.project_image, INVALID_IMAGE)?,
      date: patch_text(self.date, "Date cannot be empty.")?,
      important: self.important,
    })
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectFilter {
  Department,
  /// Membership in the project's category list.
  Category,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectSort {
  #[default]
  CreatedAt,
  Title,
  Date,
}

impl Listable for Project {
  type FilterField = ProjectFilter;
  type SortField = ProjectSort;

  fn search_fields(&self) -> Vec<&str> {
    let mut fields = vec![self.title.as_str(), self.content.as_str()];
    fields.extend(self.team_members.iter().map(String::as_str));
    fields
  }

  fn matches_filter(&self, field: ProjectFilter, value: &str) -> bool {
    match field {
      ProjectFilter::Department => self.department.as_ref() == value,
      ProjectFilter::Category => self.category.iter().any(|c| c == value),
    }
  }

  fn sort_key(&self, field: ProjectSort) -> SortKey<'_> {
    match field {
      ProjectSort::CreatedAt => SortKey::Instant(self.created_at),
      ProjectSort::Title => SortKey::Text(&self.title),
      ProjectSort::Date => SortKey::Instant(parse_display_date(&self.date)),
    }
  }
}
