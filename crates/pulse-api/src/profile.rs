//! Handlers for `/profile/*` endpoints, served by the identity store.

use axum::{Json, extract::State};
use pulse_core::{
  profile::{ProfileCompletion, ProfileFreshness},
  source::{EngagementSource, IdentitySource},
};

use crate::{AppState, error::ApiError};

/// `GET /profile/completion-rate`
pub async fn completion_rate<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<ProfileCompletion>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .profile_completion()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /profile/update-frequency`
pub async fn update_frequency<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<ProfileFreshness>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .profile_freshness()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}
