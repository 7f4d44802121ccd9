//! Turns command-line listing options into a [`ListQuery`] and renders the
//! pipeline's output as plain text rows.

use std::{fmt::Write as _, str::FromStr};

use anyhow::{Context, Result, anyhow};
use campus_core::{
  academic::AcademicResource,
  classify::Partition,
  contact::{ContactMessage, ContactStatus},
  notice::{Notice, split_important},
  pipeline::{self, FieldFilter, Listable, ListQuery, QueryFor, SortSpec},
  project::Project,
  study_material::StudyMaterial,
};
use chrono::{DateTime, Utc};
use clap::Args;

// ─── Listing options ──────────────────────────────────────────────────────────

/// Search, filter and sort options shared by every listing command.
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
  /// Case-insensitive substring matched against the record's text fields.
  #[arg(short, long)]
  pub search: Option<String>,

  /// `field=value` equality filter; repeatable. A value of `all` is ignored.
  #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
  pub filters: Vec<String>,

  /// Field to sort by (kebab-case, e.g. `created-at`).
  #[arg(long)]
  pub sort: Option<String>,

  /// Sort ascending instead of descending.
  #[arg(long)]
  pub asc: bool,
}

impl ListArgs {
  pub fn query<F, S>(&self) -> Result<ListQuery<F, S>>
  where
    F: FromStr,
    S: FromStr + Copy + Eq + Default,
  {
    let mut query = ListQuery::default();
    if let Some(term) = &self.search {
      query = query.search(term.as_str());
    }
    for raw in &self.filters {
      let FieldFilter { field, value } = parse_filter(raw)?;
      query = query.filter(field, value);
    }

    let field = match &self.sort {
      Some(name) => name
        .parse::<S>()
        .map_err(|_| anyhow!("unknown sort field '{name}'"))?,
      None => S::default(),
    };
    let mut sort = SortSpec::new(field);
    if self.asc {
      sort = sort.toggle(field);
    }
    Ok(query.sort(sort))
  }
}

fn parse_filter<F: FromStr>(raw: &str) -> Result<FieldFilter<F>> {
  let (name, value) = raw
    .split_once('=')
    .with_context(|| format!("filter '{raw}' is not of the form field=value"))?;
  let field = name
    .trim()
    .parse::<F>()
    .map_err(|_| anyhow!("unknown filter field '{}'", name.trim()))?;
  Ok(FieldFilter::new(field, value.trim()))
}

// ─── Rendering ────────────────────────────────────────────────────────────────

/// One line of text per record.
pub trait Row {
  fn row(&self) -> String;
}

fn day(at: Option<DateTime<Utc>>) -> String {
  at.map(|t| t.format("%Y-%m-%d").to_string())
    .unwrap_or_else(|| "----------".to_string())
}

impl Row for ContactMessage {
  fn row(&self) -> String {
    let unread = if self.status == ContactStatus::Unread { "*" } else { " " };
    let flag = if self.important { "!" } else { " " };
    format!(
      "{unread}{flag} {}  {:<24} {:<28} {}",
      day(self.created_at),
      self.name,
      self.email,
      self.subject
    )
  }
}

impl Row for Project {
  fn row(&self) -> String {
    format!(
      "{:<10} {:<5} {}  [{}]",
      self.date,
      self.department,
      self.title,
      self.category.join(", ")
    )
  }
}

impl Row for StudyMaterial {
  fn row(&self) -> String {
    format!(
      "{}  {:<8} {:<14} {}",
      day(self.published_at()),
      self.department,
      self.category,
      self.title
    )
  }
}

impl Row for Notice {
  fn row(&self) -> String {
    format!("{}  {:<16} {}", day(self.created_at), self.category, self.title)
  }
}

impl Row for AcademicResource {
  fn row(&self) -> String {
    format!(
      "{:<8} {:<10} sem {:<3} {:<11} {}",
      self.department_id, self.session, self.semester, self.resource_type, self.title
    )
  }
}

fn footer(out: &mut String, shown: usize, total: usize) {
  let _ = writeln!(out, "Showing {shown} of {total}");
}

/// Run `records` through the pipeline and render the result.
pub fn render_list<R: Listable + Row>(records: &[R], query: &QueryFor<R>) -> String {
  let shown = pipeline::apply(records, query);
  let mut out = String::new();
  for record in &shown {
    let _ = writeln!(out, "{}", record.row());
  }
  footer(&mut out, shown.len(), records.len());
  out
}

/// Like [`render_list`], but important notices are listed in their own
/// section ahead of the rest.
pub fn render_notices(notices: &[Notice], query: &QueryFor<Notice>) -> String {
  let shown = pipeline::apply(notices, query);
  let (important, regular) = split_important(shown.iter().copied());

  let mut out = String::new();
  for (heading, section) in [("Important", &important), ("Notices", &regular)] {
    if section.is_empty() {
      continue;
    }
    let _ = writeln!(out, "── {heading} ──");
    for notice in section.iter() {
      let _ = writeln!(out, "{}", notice.row());
    }
  }
  footer(&mut out, shown.len(), notices.len());
  out
}

pub fn render_partition(partition: &Partition) -> String {
  let mut out = String::new();
  for (heading, bucket) in [
    ("Syllabus", &partition.syllabus),
    ("Previous year questions", &partition.pyqs),
    ("Additional", &partition.additional),
    ("Tests", &partition.tests),
  ] {
    let _ = writeln!(out, "── {heading} ({}) ──", bucket.len());
    for resource in bucket {
      let _ = writeln!(out, "{}  {}", resource.title, resource.pdf_link);
    }
  }
  out
}

/// Full view of a single contact message.
pub fn render_contact(contact: &ContactMessage) -> String {
  format!(
    "From:    {} <{}>\nSubject: {}\nStatus:  {}{}\nSent:    {}\n\n{}\n",
    contact.name,
    contact.email,
    contact.subject,
    contact.status,
    if contact.important { " (important)" } else { "" },
    day(contact.created_at),
    contact.message
  )
}
