//! Cross-database reconciliation of activity facts with country attribution.
//!
//! Monthly per-person activity comes from the engagement database; country
//! attribution comes from the identity database. The two stores share no
//! reliable join key — the engagement side carries person identifiers as
//! opaque text, the identity side keys persons numerically — so the join is
//! performed here, in process, on the normalized string form of the
//! identifier.
//!
//! Identifiers with no match in the identity store ("ghosts") are an
//! expected steady state, not a defect: they are grouped under the
//! [`UNKNOWN_COUNTRY`] sentinel and never dropped.

use std::{
  collections::{BTreeSet, HashMap, HashSet},
  future::Future,
};

use chrono::NaiveDate;
use serde::Serialize;

/// Country assigned to persons the identity store cannot attribute.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

// ─── Input / output records ──────────────────────────────────────────────────

/// One month of activity for one person, as produced by the engagement
/// store: the month bucket (first of month), the person identifier in
/// normalized string form, and the per-kind action counts for that month.
///
/// Immutable once read; produced fresh on every query invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyActivity {
  pub month:     NaiveDate,
  pub person_id: String,
  pub posts:     i64,
  pub comments:  i64,
}

/// One reconciled output row per `(month, country)` pair.
///
/// All `*_users` fields are distinct-person cardinalities, never raw row
/// counts: a person appearing in several activity records for the same
/// group is counted once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryActivity {
  pub month:               NaiveDate,
  pub country:             String,
  pub active_users:        u64,
  pub total_posts:         i64,
  pub total_comments:      i64,
  pub users_who_posted:    u64,
  pub users_who_commented: u64,
}

// ─── Directory seam ──────────────────────────────────────────────────────────

/// The identity-store lookup the engine depends on.
///
/// Implementations must scope the query to exactly the given identifier set
/// (never the whole table) and must return an empty map without issuing any
/// query when `person_ids` is empty. Identifiers absent from the identity
/// store are simply absent from the returned map; the engine applies the
/// [`UNKNOWN_COUNTRY`] default on lookup misses.
pub trait CountryDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Map each known person identifier to its country, defaulting the
  /// country to [`UNKNOWN_COUNTRY`] when the person has no location on
  /// file.
  fn countries_for(
    &self,
    person_ids: &[String],
  ) -> impl Future<Output = Result<HashMap<String, String>, Self::Error>> + Send;
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Per-group accumulator. Sets guarantee deduplication regardless of input
/// order; sums and set inserts are commutative, so accumulation is
/// order-independent.
#[derive(Default)]
struct GroupTotals {
  active:         HashSet<String>,
  total_posts:    i64,
  total_comments: i64,
  posters:        HashSet<String>,
  commenters:     HashSet<String>,
}

/// Reconcile monthly activity records with country attribution from
/// `directory` and aggregate them per `(month, country)`.
///
/// Exactly one directory lookup is issued per call, with the deduplicated
/// identifier set — never one lookup per record. An empty input returns an
/// empty result without touching the directory at all. Directory failures
/// propagate unchanged; no partial result is ever emitted.
///
/// The output is sorted by month descending, then `active_users`
/// descending, then country ascending, so equal inputs always produce
/// identical output.
pub async fn monthly_active_by_country<D>(
  directory: &D,
  activity:  Vec<MonthlyActivity>,
) -> Result<Vec<CountryActivity>, D::Error>
where
  D: CountryDirectory + ?Sized,
{
  let distinct_ids: BTreeSet<&str> =
    activity.iter().map(|rec| rec.person_id.as_str()).collect();
  if distinct_ids.is_empty() {
    return Ok(Vec::new());
  }

  let distinct_ids: Vec<String> =
    distinct_ids.into_iter().map(str::to_owned).collect();
  let countries = directory.countries_for(&distinct_ids).await?;

  let mut groups: HashMap<(NaiveDate, String), GroupTotals> = HashMap::new();
  for rec in activity {
    let country = countries
      .get(&rec.person_id)
      .cloned()
      .unwrap_or_else(|| UNKNOWN_COUNTRY.to_owned());

    let totals = groups.entry((rec.month, country)).or_default();
    totals.total_posts += rec.posts;
    totals.total_comments += rec.comments;
    if rec.posts > 0 {
      totals.posters.insert(rec.person_id.clone());
    }
    if rec.comments > 0 {
      totals.commenters.insert(rec.person_id.clone());
    }
    totals.active.insert(rec.person_id);
  }

  let mut rows: Vec<CountryActivity> = groups
    .into_iter()
    .map(|((month, country), totals)| CountryActivity {
      month,
      country,
      active_users: totals.active.len() as u64,
      total_posts: totals.total_posts,
      total_comments: totals.total_comments,
      users_who_posted: totals.posters.len() as u64,
      users_who_commented: totals.commenters.len() as u64,
    })
    .collect();

  rows.sort_by(|a, b| {
    b.month
      .cmp(&a.month)
      .then_with(|| b.active_users.cmp(&a.active_users))
      .then_with(|| a.country.cmp(&b.country))
  });

  Ok(rows)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
