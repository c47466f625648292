//! Handlers for `/talent/*` endpoints, served by the identity store.

use axum::{Json, extract::State};
use pulse_core::{
  source::{EngagementSource, IdentitySource},
  talent::{
    CompanyPresence, CountryDistribution, DegreeDistribution,
    ProjectPresence, RolePresence,
  },
};

use crate::{AppState, error::ApiError};

/// `GET /talent/top-companies`
pub async fn top_companies<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<CompanyPresence>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .top_companies()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /talent/top-roles`
pub async fn top_roles<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<RolePresence>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state.identity.top_roles().await.map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /talent/education-distribution`
pub async fn education_distribution<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<DegreeDistribution>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .degree_distribution()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /talent/geographic-distribution`
pub async fn geographic_distribution<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<CountryDistribution>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .country_distribution()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /talent/top-skills-projects`
pub async fn top_skills_projects<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<ProjectPresence>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .top_projects()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}
