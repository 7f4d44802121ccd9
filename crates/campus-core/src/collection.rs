//! Named collections in the document store.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A named set of same-shaped documents.
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
  IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Collection {
  Contacts,
  Projects,
  AcademicResources,
  StudyMaterials,
  Notices,
  Departments,
}

impl Collection {
  /// The collection name as stored in the backend.
  pub fn as_str(self) -> &'static str { self.into() }
}
