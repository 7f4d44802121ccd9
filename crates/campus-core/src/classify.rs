//! Classification of academic resources into the four per-semester sections.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  academic::{AcademicResource, DEPARTMENT_ID, SEMESTER, SESSION},
  query::CollectionQuery,
  store::{DocumentStore, FieldEq},
};

/// The `type` discriminant of an academic resource. Values outside the four
/// known sections are preserved as [`ResourceType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
  Syllabus,
  Pyq,
  Additional,
  Tests,
  Other(String),
}

impl ResourceType {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Syllabus => "syllabus",
      Self::Pyq => "pyq",
      Self::Additional => "additional",
      Self::Tests => "tests",
      Self::Other(other) => other,
    }
  }

  pub fn is_known(&self) -> bool { !matches!(self, Self::Other(_)) }
}

impl From<String> for ResourceType {
  fn from(value: String) -> Self {
    match value.as_str() {
      "syllabus" => Self::Syllabus,
      "pyq" => Self::Pyq,
      "additional" => Self::Additional,
      "tests" => Self::Tests,
      _ => Self::Other(value),
    }
  }
}

impl From<ResourceType> for String {
  fn from(value: ResourceType) -> Self {
    match value {
      ResourceType::Other(other) => other,
      known => known.as_str().to_owned(),
    }
  }
}

impl fmt::Display for ResourceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.as_str()) }
}

// ─── Partition ───────────────────────────────────────────────────────────────

/// One semester's resources grouped by type. Every record with a known type
/// lands in exactly one bucket; the rest are only counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
  pub syllabus:     Vec<AcademicResource>,
  pub pyqs:         Vec<AcademicResource>,
  pub additional:   Vec<AcademicResource>,
  pub tests:        Vec<AcademicResource>,
  #[serde(skip)]
  pub unclassified: usize,
}

impl Partition {
  /// Number of classified records.
  pub fn len(&self) -> usize {
    self.syllabus.len() + self.pyqs.len() + self.additional.len() + self.tests.len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Split `records` by type, keeping their relative order within each bucket.
pub fn partition(records: impl IntoIterator<Item = AcademicResource>) -> Partition {
  let mut out = Partition::default();
  for record in records {
    let bucket = match record.resource_type {
      ResourceType::Syllabus => &mut out.syllabus,
      ResourceType::Pyq => &mut out.pyqs,
      ResourceType::Additional => &mut out.additional,
      ResourceType::Tests => &mut out.tests,
      ResourceType::Other(_) => {
        out.unclassified += 1;
        continue;
      }
    };
    bucket.push(record);
  }
  out
}

/// Fetch and partition everything filed under one department, session and
/// semester, newest first within each bucket.
pub async fn semester_partition<S: DocumentStore>(
  store: &S,
  department_id: &str,
  session: &str,
  semester: &str,
) -> Result<Partition, S::Error> {
  let records = CollectionQuery::of::<AcademicResource>()
    .primary(FieldEq::new(DEPARTMENT_ID, department_id))
    .and(FieldEq::new(SESSION, session))
    .and(FieldEq::new(SEMESTER, semester))
    .run::<AcademicResource, _>(store)
    .await?;
  Ok(partition(records))
}
