//! JSON REST API for Pulse.
//!
//! Exposes an axum [`Router`] backed by any pair of
//! [`EngagementSource`] / [`IdentitySource`] implementations. Transport
//! concerns (TLS, CORS, tracing layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pulse_api::api_router(engagement.clone(), identity.clone()))
//! ```

pub mod engagement;
pub mod error;
pub mod growth;
pub mod profile;
pub mod talent;

use std::sync::Arc;

use axum::{Router, routing::get};
use pulse_core::source::{EngagementSource, IdentitySource};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<E, I> {
  pub engagement: Arc<E>,
  pub identity:   Arc<I>,
}

impl<E, I> Clone for AppState<E, I> {
  fn clone(&self) -> Self {
    Self {
      engagement: Arc::clone(&self.engagement),
      identity:   Arc::clone(&self.identity),
    }
  }
}

/// Build a fully-materialised API router for the two stores.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<E, I>(engagement: Arc<E>, identity: Arc<I>) -> Router<()>
where
  E: EngagementSource + 'static,
  I: IdentitySource + 'static,
{
  Router::new()
    // Growth
    .route("/new-users/daily", get(growth::new_users_daily::<E, I>))
    .route("/new-users/weekly", get(growth::new_users_weekly::<E, I>))
    .route("/new-users/monthly", get(growth::new_users_monthly::<E, I>))
    .route("/growth-rate/weekly", get(growth::growth_rate_weekly::<E, I>))
    .route("/growth-rate/monthly", get(growth::growth_rate_monthly::<E, I>))
    .route("/active-users/daily", get(growth::active_users_daily::<E, I>))
    .route("/active-users/weekly", get(growth::active_users_weekly::<E, I>))
    .route(
      "/active-users/monthly",
      get(growth::active_users_monthly::<E, I>),
    )
    .route(
      "/active-users/monthly-by-country",
      get(growth::active_users_monthly_by_country::<E, I>),
    )
    .route(
      "/funnel/account-creation",
      get(growth::account_creation_funnel::<E, I>),
    )
    // Engagement
    .route(
      "/engagement/post-frequency",
      get(engagement::post_frequency::<E, I>),
    )
    .route(
      "/engagement/post-engagement-rate",
      get(engagement::post_engagement_rate::<E, I>),
    )
    .route(
      "/engagement/content-analysis",
      get(engagement::content_analysis::<E, I>),
    )
    .route(
      "/engagement/active-posters",
      get(engagement::active_posters::<E, I>),
    )
    .route("/engagement/post-reach", get(engagement::post_reach::<E, I>))
    .route("/engagement/summary", get(engagement::summary::<E, I>))
    // Profile
    .route(
      "/profile/completion-rate",
      get(profile::completion_rate::<E, I>),
    )
    .route(
      "/profile/update-frequency",
      get(profile::update_frequency::<E, I>),
    )
    // Talent
    .route("/talent/top-companies", get(talent::top_companies::<E, I>))
    .route("/talent/top-roles", get(talent::top_roles::<E, I>))
    .route(
      "/talent/education-distribution",
      get(talent::education_distribution::<E, I>),
    )
    .route(
      "/talent/geographic-distribution",
      get(talent::geographic_distribution::<E, I>),
    )
    .route(
      "/talent/top-skills-projects",
      get(talent::top_skills_projects::<E, I>),
    )
    .with_state(AppState { engagement, identity })
}
