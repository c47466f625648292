//! The `EngagementSource` and `IdentitySource` traits.
//!
//! Implemented by storage backends (e.g. `pulse-store-sqlite`). The API
//! layer depends on these abstractions, not on any concrete backend. Every
//! method runs one parametrized aggregate query and materializes its full
//! (bounded) result set; failures propagate unchanged to the caller.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (tokio with `axum`).

use std::future::Future;

use crate::{
  engagement::{
    ActivePoster, ContentTypeBreakdown, PostEngagementRate, PostFrequency,
    PostReach, SummaryMetric,
  },
  growth::{
    AccountCreationFunnel, DailyActiveUsers, MonthlyActiveUsers,
    MonthlyGrowthRate, MonthlySignups, NewUserSignup, WeeklyActiveUsers,
    WeeklyGrowthRate, WeeklySignups,
  },
  profile::{ProfileCompletion, ProfileFreshness},
  reconcile::{CountryDirectory, MonthlyActivity},
  talent::{
    CompanyPresence, CountryDistribution, DegreeDistribution,
    ProjectPresence, RolePresence,
  },
};

// ─── Engagement database ─────────────────────────────────────────────────────

/// Abstraction over the engagement database (posts, comments, and a thin
/// local persons mirror for author attribution).
pub trait EngagementSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Daily active users over the trailing 30 days.
  fn daily_active_users(
    &self,
  ) -> impl Future<Output = Result<Vec<DailyActiveUsers>, Self::Error>> + Send + '_;

  /// Weekly active users, most recent 12 weeks.
  fn weekly_active_users(
    &self,
  ) -> impl Future<Output = Result<Vec<WeeklyActiveUsers>, Self::Error>> + Send + '_;

  /// Monthly active users, most recent 12 months.
  fn monthly_active_users(
    &self,
  ) -> impl Future<Output = Result<Vec<MonthlyActiveUsers>, Self::Error>> + Send + '_;

  /// The per-(month, person) activity feed consumed by
  /// [`monthly_active_by_country`](crate::monthly_active_by_country):
  /// one row per person per month, carrying per-kind action counts,
  /// soft-deleted rows excluded.
  fn monthly_activity(
    &self,
  ) -> impl Future<Output = Result<Vec<MonthlyActivity>, Self::Error>> + Send + '_;

  /// Daily posting volume over the trailing 30 days.
  fn post_frequency(
    &self,
  ) -> impl Future<Output = Result<Vec<PostFrequency>, Self::Error>> + Send + '_;

  /// Comment engagement per content type over the trailing 30 days.
  fn post_engagement_rate(
    &self,
  ) -> impl Future<Output = Result<Vec<PostEngagementRate>, Self::Error>> + Send + '_;

  /// Volume and shape of each content type across all time.
  fn content_breakdown(
    &self,
  ) -> impl Future<Output = Result<Vec<ContentTypeBreakdown>, Self::Error>> + Send + '_;

  /// Top 20 contributors by weighted engagement score.
  fn active_posters(
    &self,
  ) -> impl Future<Output = Result<Vec<ActivePoster>, Self::Error>> + Send + '_;

  /// Top 20 posts from the trailing 30 days by weighted engagement score.
  fn post_reach(
    &self,
  ) -> impl Future<Output = Result<Vec<PostReach>, Self::Error>> + Send + '_;

  /// The label/value pairs on the summary strip.
  fn summary(
    &self,
  ) -> impl Future<Output = Result<Vec<SummaryMetric>, Self::Error>> + Send + '_;
}

// ─── Identity database ───────────────────────────────────────────────────────

/// Abstraction over the identity database (persons, locations, companies,
/// experiences, education, projects).
///
/// The [`CountryDirectory`] supertrait carries the person-to-country lookup
/// the reconciliation engine depends on; this trait adds the canned
/// single-source aggregates. Both share one error type.
pub trait IdentitySource: CountryDirectory {
  /// Today's sign-ups with per-person profile-depth counters.
  fn new_users_today(
    &self,
  ) -> impl Future<Output = Result<Vec<NewUserSignup>, Self::Error>> + Send + '_;

  /// Sign-ups per week, most recent 12 weeks.
  fn weekly_signups(
    &self,
  ) -> impl Future<Output = Result<Vec<WeeklySignups>, Self::Error>> + Send + '_;

  /// Sign-ups per month over the rolling 12-month window.
  fn monthly_signups(
    &self,
  ) -> impl Future<Output = Result<Vec<MonthlySignups>, Self::Error>> + Send + '_;

  /// Week-over-week sign-up growth, most recent 12 weeks.
  fn weekly_growth_rate(
    &self,
  ) -> impl Future<Output = Result<Vec<WeeklyGrowthRate>, Self::Error>> + Send + '_;

  /// Month-over-month sign-up growth over the rolling 12-month window.
  fn monthly_growth_rate(
    &self,
  ) -> impl Future<Output = Result<Vec<MonthlyGrowthRate>, Self::Error>> + Send + '_;

  /// Profile completeness scores, top 50.
  fn profile_completion(
    &self,
  ) -> impl Future<Output = Result<Vec<ProfileCompletion>, Self::Error>> + Send + '_;

  /// Stalest profiles first, top 50.
  fn profile_freshness(
    &self,
  ) -> impl Future<Output = Result<Vec<ProfileFreshness>, Self::Error>> + Send + '_;

  /// Top 20 companies by distinct employed users.
  fn top_companies(
    &self,
  ) -> impl Future<Output = Result<Vec<CompanyPresence>, Self::Error>> + Send + '_;

  /// Top 20 roles by distinct holders.
  fn top_roles(
    &self,
  ) -> impl Future<Output = Result<Vec<RolePresence>, Self::Error>> + Send + '_;

  /// Degree distribution across all users.
  fn degree_distribution(
    &self,
  ) -> impl Future<Output = Result<Vec<DegreeDistribution>, Self::Error>> + Send + '_;

  /// User distribution by country, top 15.
  fn country_distribution(
    &self,
  ) -> impl Future<Output = Result<Vec<CountryDistribution>, Self::Error>> + Send + '_;

  /// Projects shared by more than one user, top 20.
  fn top_projects(
    &self,
  ) -> impl Future<Output = Result<Vec<ProjectPresence>, Self::Error>> + Send + '_;

  /// Year-to-date account-creation funnel (single row).
  fn account_creation_funnel(
    &self,
  ) -> impl Future<Output = Result<Vec<AccountCreationFunnel>, Self::Error>> + Send + '_;
}
