//! Profile-quality metric rows.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Profile completeness for one person: a 0–7 score over the individual
/// setup steps, plus a coarse status classification.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCompletion {
  pub full_name:                  String,
  pub email:                      String,
  pub profile_completeness_score: i64,
  pub experience_count:           i64,
  pub education_count:            i64,
  pub language_count:             i64,
  pub embedding_count:            i64,
  pub has_finder:                 bool,
  pub profile_status:             String,
}

/// How long ago a profile was last touched, bucketed into staleness tiers.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFreshness {
  pub id:                  i64,
  pub name:                String,
  pub last_profile_update: NaiveDateTime,
  pub days_since_update:   i64,
  pub profile_status:      String,
}
