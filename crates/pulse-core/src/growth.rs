//! Growth metric rows: sign-ups, growth rates, and active-user counts.
//!
//! Each struct is the typed result contract of one canned aggregate query.
//! Time buckets are truncated dates (day, ISO week start, first of month)
//! and serialize as ISO date strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One person who signed up today, with profile-depth counters.
#[derive(Debug, Clone, Serialize)]
pub struct NewUserSignup {
  pub id:               i64,
  pub full_name:        String,
  pub email:            String,
  pub has_finder:       bool,
  pub experience_count: i64,
  pub education_count:  i64,
  pub embedding_count:  i64,
  pub created_at:       NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklySignups {
  pub week:      NaiveDate,
  pub new_users: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySignups {
  pub month:     NaiveDate,
  pub new_users: i64,
}

/// Week-over-week sign-up change. `prev_week` and `growth_rate_pct` are
/// absent on the earliest bucket and when the previous bucket was zero.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyGrowthRate {
  pub week:            NaiveDate,
  pub new_users:       i64,
  pub prev_week:       Option<i64>,
  pub growth_rate_pct: Option<f64>,
}

/// Month-over-month sign-up change over the rolling 12-month window.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyGrowthRate {
  pub month:           NaiveDate,
  pub new_users:       i64,
  pub prev_month:      Option<i64>,
  pub growth_rate_pct: Option<f64>,
}

/// Daily active users over the trailing 30 days. The per-kind fields count
/// actions, not persons, matching the dashboard's historical contract.
#[derive(Debug, Clone, Serialize)]
pub struct DailyActiveUsers {
  pub date:                NaiveDate,
  pub active_users:        i64,
  pub users_who_posted:    i64,
  pub users_who_commented: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyActiveUsers {
  pub week:         NaiveDate,
  pub active_users: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyActiveUsers {
  pub month:        NaiveDate,
  pub active_users: i64,
}

/// Year-to-date account-creation funnel: how many accounts cleared each
/// profile-setup step.
#[derive(Debug, Clone, Serialize)]
pub struct AccountCreationFunnel {
  pub total_accounts:      i64,
  pub step_basic_info:     i64,
  pub step_headline:       i64,
  pub step_location:       i64,
  pub step_company:        i64,
  pub step_linkedin:       i64,
  pub step_finder_enabled: i64,
}
