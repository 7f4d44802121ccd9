//! Small validation helpers shared by the record input types.

use url::Url;

use crate::{Error, Result};

/// Trim `value` and drop it if nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize { text.split_whitespace().count() }

pub fn is_valid_url(candidate: &str) -> bool { Url::parse(candidate).is_ok() }

/// An optional URL: absent or blank is fine, anything else must parse.
pub fn optional_url(value: Option<String>, message: &str) -> Result<Option<String>> {
  match non_blank(value) {
    Some(url) if !is_valid_url(&url) => Err(Error::validation(message)),
    other => Ok(other),
  }
}

/// A field in a partial update. Absent means "leave unchanged"; present but
/// blank is rejected with `message`.
pub fn patch_text(value: Option<String>, message: &str) -> Result<Option<String>> {
  match value {
    None => Ok(None),
    Some(v) => non_blank(Some(v))
      .map(Some)
      .ok_or_else(|| Error::validation(message)),
  }
}

/// A URL in a partial update. Blank clears the field; anything else must
/// parse.
pub fn patch_url(value: Option<String>, message: &str) -> Result<Option<String>> {
  match value {
    None => Ok(None),
    Some(v) => {
      let v = v.trim().to_owned();
      if v.is_empty() || is_valid_url(&v) {
        Ok(Some(v))
      } else {
        Err(Error::validation(message))
      }
    }
  }
}

/// Trim every entry and drop the blank ones.
pub fn clean_list(values: Vec<String>) -> Vec<String> {
  values
    .into_iter()
    .filter_map(|v| non_blank(Some(v)))
    .collect()
}
