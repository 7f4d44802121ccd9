//! The search / filter / sort pipeline used by every listing view.
//!
//! [`apply`] is a pure function of `(records, query)`. The caller owns the
//! [`ListQuery`] (search term, categorical filters, sort spec) and passes it in
//! on every call; nothing is cached here.
//!
//! Each entity opts in by implementing [`Listable`], which names the text
//! fields the search term is matched against, the categorical fields that can
//! be filtered on, and the fields that can be sorted by.

use std::{cmp::Ordering, fmt::Debug};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Filter value meaning "no constraint on this field".
pub const ALL: &str = "all";

// ─── Listable ────────────────────────────────────────────────────────────────

/// A value a record can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
  Text(&'a str),
  /// Absent instants order before every present one.
  Instant(Option<DateTime<Utc>>),
}

/// A record type that can be run through the pipeline.
pub trait Listable {
  type FilterField: Copy + Eq + Debug;
  type SortField: Copy + Eq + Debug + Default;

  /// The text fields a search term is matched against.
  fn search_fields(&self) -> Vec<&str>;

  /// Whether `field` matches `value`. List-valued fields test membership.
  fn matches_filter(&self, field: Self::FilterField, value: &str) -> bool;

  fn sort_key(&self, field: Self::SortField) -> SortKey<'_>;
}

// ─── Query state ─────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum Direction {
  #[serde(rename = "asc")]
  #[strum(serialize = "asc")]
  Ascending,
  #[default]
  #[serde(rename = "desc")]
  #[strum(serialize = "desc")]
  Descending,
}

impl Direction {
  pub fn flipped(self) -> Self {
    match self {
      Self::Ascending => Self::Descending,
      Self::Descending => Self::Ascending,
    }
  }
}

/// Exactly one active sort field and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec<S> {
  pub field:     S,
  #[serde(default)]
  pub direction: Direction,
}

impl<S: Copy + Eq> SortSpec<S> {
  /// Sort by `field`, most recent / last alphabetically first.
  pub fn new(field: S) -> Self {
    Self {
      field,
      direction: Direction::Descending,
    }
  }

  /// Selecting the active field flips its direction; selecting another field
  /// switches to it, descending.
  pub fn toggle(self, field: S) -> Self {
    if field == self.field {
      Self {
        field,
        direction: self.direction.flipped(),
      }
    } else {
      Self::new(field)
    }
  }
}

/// An equality constraint on one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter<F> {
  pub field: F,
  pub value: String,
}

impl<F> FieldFilter<F> {
  pub fn new(field: F, value: impl Into<String>) -> Self {
    Self {
      field,
      value: value.into(),
    }
  }

  /// `false` for the [`ALL`] sentinel.
  pub fn is_active(&self) -> bool { !self.value.eq_ignore_ascii_case(ALL) }
}

/// The complete listing state held by a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery<F, S> {
  #[serde(default)]
  pub search:  String,
  #[serde(default = "Vec::new")]
  pub filters: Vec<FieldFilter<F>>,
  #[serde(default)]
  pub sort:    SortSpec<S>,
}

impl<F, S: Default> Default for ListQuery<F, S> {
  fn default() -> Self {
    Self {
      search:  String::new(),
      filters: Vec::new(),
      sort:    SortSpec::default(),
    }
  }
}

/// The [`ListQuery`] shape for a given record type.
pub type QueryFor<R> =
  ListQuery<<R as Listable>::FilterField, <R as Listable>::SortField>;

impl<F, S: Copy + Eq + Default> ListQuery<F, S> {
  pub fn search(mut self, term: impl Into<String>) -> Self {
    self.search = term.into();
    self
  }

  pub fn filter(mut self, field: F, value: impl Into<String>) -> Self {
    self.filters.push(FieldFilter::new(field, value));
    self
  }

  pub fn sort(mut self, sort: SortSpec<S>) -> Self {
    self.sort = sort;
    self
  }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Narrow `records` by search term and filters, then order by the sort spec.
/// Never fails; no matches yields an empty vector.
pub fn apply<'a, R: Listable>(records: &'a [R], query: &QueryFor<R>) -> Vec<&'a R> {
  let mut out = filter(records, &query.search, &query.filters);
  sort(&mut out, query.sort);
  out
}

/// The search and filter half of [`apply`]; preserves input order.
pub fn filter<'a, R: Listable>(
  records: &'a [R],
  search: &str,
  filters: &[FieldFilter<R::FilterField>],
) -> Vec<&'a R> {
  let term = search.to_lowercase();
  records
    .iter()
    .filter(|r| matches_search(*r, &term))
    .filter(|r| {
      filters
        .iter()
        .filter(|f| f.is_active())
        .all(|f| r.matches_filter(f.field, &f.value))
    })
    .collect()
}

/// Stable sort by one field.
pub fn sort<R: Listable>(records: &mut [&R], spec: SortSpec<R::SortField>) {
  records.sort_by(|a, b| {
    compare_keys(a.sort_key(spec.field), b.sort_key(spec.field), spec.direction)
  });
}

fn matches_search<R: Listable>(record: &R, lowered_term: &str) -> bool {
  lowered_term.is_empty()
    || record
      .search_fields()
      .iter()
      .any(|field| field.to_lowercase().contains(lowered_term))
}

// ─── Comparison ──────────────────────────────────────────────────────────────

/// Compare two keys in `direction`. Mismatched key kinds compare equal.
pub fn compare_keys(a: SortKey<'_>, b: SortKey<'_>, direction: Direction) -> Ordering {
  match (a, b) {
    (SortKey::Text(a), SortKey::Text(b)) => directed(collate(a, b), direction),
    (SortKey::Instant(a), SortKey::Instant(b)) => compare_instants(a, b, direction),
    _ => Ordering::Equal,
  }
}

/// Order two optional instants. An absent instant is earlier than every
/// present one, so it leads ascending and trails descending.
pub fn compare_instants(
  a: Option<DateTime<Utc>>,
  b: Option<DateTime<Utc>>,
  direction: Direction,
) -> Ordering {
  directed(a.cmp(&b), direction)
}

/// Dictionary-style ordering: case-folded first, then lowercase before
/// uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
  a.to_lowercase()
    .cmp(&b.to_lowercase())
    .then_with(|| b.cmp(a))
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
  match direction {
    Direction::Ascending => ordering,
    Direction::Descending => ordering.reverse(),
  }
}

/// Parse a display date, either RFC 3339 or a bare `YYYY-MM-DD`.
pub fn parse_display_date(value: &str) -> Option<DateTime<Utc>> {
  let value = value.trim();
  DateTime::parse_from_rfc3339(value)
    .map(|dt| dt.with_timezone(&Utc))
    .ok()
    .or_else(|| {
      NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
    })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[derive(Debug, PartialEq)]
  struct Row {
    name:  &'static str,
    note:  &'static str,
    tag:   &'static str,
    at:    Option<DateTime<Utc>>,
  }

  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  enum RowFilter {
    Tag,
  }

  #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
  enum RowSort {
    #[default]
    At,
    Name,
  }

  impl Listable for Row {
    type FilterField = RowFilter;
    type SortField = RowSort;

    fn search_fields(&self) -> Vec<&str> { vec![self.name, self.note] }

    fn matches_filter(&self, field: RowFilter, value: &str) -> bool {
      match field {
        RowFilter::Tag => self.tag == value,
      }
    }

    fn sort_key(&self, field: RowSort) -> SortKey<'_> {
      match field {
        RowSort::At => SortKey::Instant(self.at),
        RowSort::Name => SortKey::Text(self.name),
      }
    }
  }

  fn at(day: u32) -> Option<DateTime<Utc>> {
    Some(Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap())
  }

  fn rows() -> Vec<Row> {
    vec![
      Row { name: "banana", note: "Yellow fruit", tag: "fruit", at: at(3) },
      Row { name: "Apple", note: "red", tag: "fruit", at: at(1) },
      Row { name: "carrot", note: "Orange root", tag: "veg", at: None },
      Row { name: "apple", note: "green", tag: "fruit", at: at(2) },
      Row { name: "date", note: "sweet", tag: "fruit", at: None },
    ]
  }

  fn names(out: &[&Row]) -> Vec<&'static str> { out.iter().map(|r| r.name).collect() }

  #[test]
  fn empty_search_keeps_everything_in_order() {
    let rows = rows();
    let out = filter(&rows, "", &[]);
    assert_eq!(out.len(), rows.len());
    assert!(out.iter().zip(rows.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
  }

  #[test]
  fn search_is_case_insensitive_across_fields() {
    let rows = rows();
    let out = filter(&rows, "ORANGE", &[]);
    assert_eq!(names(&out), ["carrot"]);

    let out = filter(&rows, "app", &[]);
    assert_eq!(names(&out), ["Apple", "apple"]);
    for r in &out {
      assert!(r.search_fields().iter().any(|f| f.to_lowercase().contains("app")));
    }
  }

  #[test]
  fn sentinel_filter_is_ignored_and_others_must_match() {
    let rows = rows();
    let all = filter(&rows, "", &[FieldFilter::new(RowFilter::Tag, "All")]);
    assert_eq!(all.len(), rows.len());

    let veg = filter(&rows, "", &[FieldFilter::new(RowFilter::Tag, "veg")]);
    assert_eq!(names(&veg), ["carrot"]);
    assert!(veg.iter().all(|r| r.tag == "veg"));

    let none = filter(&rows, "banana", &[FieldFilter::new(RowFilter::Tag, "veg")]);
    assert!(none.is_empty());
  }

  #[test]
  fn missing_instants_are_earliest() {
    let rows = rows();
    let q = ListQuery::default().sort(SortSpec::new(RowSort::At));
    let out = apply(&rows, &q);
    assert_eq!(names(&out), ["banana", "apple", "Apple", "carrot", "date"]);

    let q = q.sort(SortSpec::new(RowSort::At).toggle(RowSort::At));
    let out = apply(&rows, &q);
    assert_eq!(names(&out), ["carrot", "date", "Apple", "apple", "banana"]);
  }

  #[test]
  fn toggling_reverses_instants_with_one_missing() {
    let rows: Vec<_> = rows().into_iter().filter(|r| r.name != "date").collect();
    let desc = SortSpec::new(RowSort::At);

    let mut a = filter(&rows, "", &[]);
    sort(&mut a, desc);
    let mut b = filter(&rows, "", &[]);
    sort(&mut b, desc.toggle(RowSort::At));
    assert_eq!(names(&a), ["banana", "apple", "Apple", "carrot"]);
    b.reverse();
    assert_eq!(names(&a), names(&b));
  }

  #[test]
  fn text_sort_collates_case_insensitively() {
    let rows = rows();
    let spec = SortSpec {
      field:     RowSort::Name,
      direction: Direction::Ascending,
    };
    let out = apply(&rows, &ListQuery::default().sort(spec));
    assert_eq!(names(&out), ["apple", "Apple", "banana", "carrot", "date"]);
  }

  #[test]
  fn sorting_is_idempotent() {
    let rows = rows();
    let spec = SortSpec::new(RowSort::At);
    let mut once = filter(&rows, "", &[]);
    sort(&mut once, spec);
    let mut twice = once.clone();
    sort(&mut twice, spec);
    assert_eq!(names(&once), names(&twice));
  }

  #[test]
  fn toggling_reverses_distinct_keys() {
    let rows = rows();
    let desc = SortSpec::new(RowSort::Name);
    let asc = desc.toggle(RowSort::Name);
    assert_eq!(asc.direction, Direction::Ascending);

    let mut a = filter(&rows, "", &[]);
    sort(&mut a, desc);
    let mut b = filter(&rows, "", &[]);
    sort(&mut b, asc);
    b.reverse();
    assert_eq!(names(&a), names(&b));
  }

  #[test]
  fn toggle_to_new_field_resets_to_descending() {
    let spec = SortSpec::new(RowSort::At).toggle(RowSort::At);
    assert_eq!(spec.direction, Direction::Ascending);
    let spec = spec.toggle(RowSort::Name);
    assert_eq!(spec.field, RowSort::Name);
    assert_eq!(spec.direction, Direction::Descending);
  }

  #[test]
  fn list_query_serialises() {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    enum Field {
      #[default]
      CreatedAt,
    }

    let q: ListQuery<Field, Field> = ListQuery::default()
      .search("exam")
      .filter(Field::CreatedAt, "x");
    let json = serde_json::to_value(&q).unwrap();
    assert_eq!(json["sort"]["direction"], "desc");
    assert_eq!(json["sort"]["field"], "createdAt");
    let back: ListQuery<Field, Field> = serde_json::from_value(json).unwrap();
    assert_eq!(back, q);
  }

  #[test]
  fn display_dates_parse_both_forms() {
    assert_eq!(
      parse_display_date("2025-05-05"),
      Some(Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap())
    );
    assert!(parse_display_date("2025-05-05T10:00:00+05:30").is_some());
    assert_eq!(parse_display_date("soon"), None);
  }
}
