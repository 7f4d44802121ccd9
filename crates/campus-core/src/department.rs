//! Department pages: head of department, faculty and labs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Collection, Error, Result,
  document::{Fields, Record, to_fields},
  validate::{non_blank, patch_text},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faculty {
  pub name:           String,
  pub designation:    String,
  pub qualification:  String,
  pub specialization: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lab {
  pub name:        String,
  pub image:       String,
  pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
  pub id:          String,
  pub name:        String,
  pub short_name:  String,
  #[serde(default)]
  pub hod:         String,
  #[serde(default)]
  pub image:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub faculty:     Vec<Faculty>,
  #[serde(default)]
  pub labs:        Vec<Lab>,
  #[serde(default)]
  pub created_at:  Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at:  Option<DateTime<Utc>>,
}

impl Record for Department {
  const COLLECTION: Collection = Collection::Departments;

  fn id(&self) -> &str { &self.id }

  fn created_at(&self) -> Option<DateTime<Utc>> { self.created_at }
}

/// Faculty and labs without a name are dropped.
fn named_faculty(faculty: Vec<Faculty>) -> Vec<Faculty> {
  faculty.into_iter().filter(|f| !f.name.trim().is_empty()).collect()
}

fn named_labs(labs: Vec<Lab>) -> Vec<Lab> {
  labs.into_iter().filter(|l| !l.name.trim().is_empty()).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
  pub name:        Option<String>,
  pub short_name:  Option<String>,
  pub hod:         Option<String>,
  pub image:       Option<String>,
  pub description: Option<String>,
  pub faculty:     Option<Vec<Faculty>>,
  pub labs:        Option<Vec<Lab>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentDraft {
  name:        String,
  short_name:  String,
  hod:         String,
  image:       String,
  description: String,
  faculty:     Vec<Faculty>,
  labs:        Vec<Lab>,
}

impl NewDepartment {
  pub fn into_fields(self) -> Result<Fields> {
    let (Some(name), Some(short_name)) = (non_blank(self.name), non_blank(self.short_name))
    else {
      return Err(Error::validation(
        "Missing required fields: name and shortName are required.",
      ));
    };

    to_fields(&DepartmentDraft {
      name,
      short_name,
      hod: non_blank(self.hod).unwrap_or_default(),
      image: non_blank(self.image).unwrap_or_default(),
      description: non_blank(self.description).unwrap_or_default(),
      faculty: named_faculty(self.faculty.unwrap_or_default()),
      labs: named_labs(self.labs.unwrap_or_default()),
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPatch {
  pub name:        Option<String>,
  pub short_name:  Option<String>,
  pub hod:         Option<String>,
  pub image:       Option<String>,
  pub description: Option<String>,
  pub faculty:     Option<Vec<Faculty>>,
  pub labs:        Option<Vec<Lab>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentChanges {
  #[serde(skip_serializing_if = "Option::is_none")]
  name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  short_name:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  hod:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  image:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  faculty:     Option<Vec<Faculty>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  labs:        Option<Vec<Lab>>,
}

impl DepartmentPatch {
  pub fn into_fields(self) -> Result<Fields> {
    to_fields(&DepartmentChanges {
      name:        patch_text(self.name, "Name cannot be empty.")?,
      short_name:  patch_text(self.short_name, "Short name cannot be empty.")?,
      hod:         self.hod.map(|v| v.trim().to_owned()),
      image:       self.image.map(|v| v.trim().to_owned()),
      description: self.description.map(|v| v.trim().to_owned()),
      faculty:     self.faculty.map(named_faculty),
      labs:        self.labs.map(named_labs),
    })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn create_requires_names_and_drops_unnamed_entries() {
    let body: NewDepartment = serde_json::from_value(json!({
      "name": "Computer Science & Technology",
      "shortName": "CST",
      "faculty": [
        { "name": "R. Das", "designation": "Lecturer" },
        { "name": "  " }
      ],
    }))
    .unwrap();
    let fields = body.into_fields().unwrap();
    assert_eq!(fields["shortName"], "CST");
    assert_eq!(fields["faculty"].as_array().unwrap().len(), 1);
    assert_eq!(fields["faculty"][0]["qualification"], "");
    assert_eq!(fields["labs"], json!([]));

    let err = NewDepartment::default().into_fields().unwrap_err();
    assert!(err.to_string().contains("shortName"));
  }

  #[test]
  fn patch_allows_clearing_optional_text() {
    let patch = DepartmentPatch {
      hod: Some("".into()),
      ..Default::default()
    };
    let fields = patch.into_fields().unwrap();
    assert_eq!(fields["hod"], "");

    let patch = DepartmentPatch {
      name: Some(" ".into()),
      ..Default::default()
    };
    assert_eq!(patch.into_fields().unwrap_err().to_string(), "Name cannot be empty.");
  }
}
