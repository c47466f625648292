//! Handlers for `/engagement/*` endpoints, all served by the engagement
//! store.

use axum::{Json, extract::State};
use pulse_core::{
  engagement::{
    ActivePoster, ContentTypeBreakdown, PostEngagementRate, PostFrequency,
    PostReach, SummaryMetric,
  },
  source::{EngagementSource, IdentitySource},
};

use crate::{AppState, error::ApiError};

/// `GET /engagement/post-frequency`
pub async fn post_frequency<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<PostFrequency>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .post_frequency()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /engagement/post-engagement-rate`
pub async fn post_engagement_rate<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<PostEngagementRate>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .post_engagement_rate()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /engagement/content-analysis`
pub async fn content_analysis<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<ContentTypeBreakdown>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .content_breakdown()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /engagement/active-posters`
pub async fn active_posters<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<ActivePoster>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .active_posters()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /engagement/post-reach`
pub async fn post_reach<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<PostReach>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .post_reach()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /engagement/summary`
pub async fn summary<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<SummaryMetric>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state.engagement.summary().await.map_err(ApiError::source)?;
  Ok(Json(rows))
}
