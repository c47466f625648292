//! Handlers for growth metrics.
//!
//! | Path | Source |
//! |------|--------|
//! | `/new-users/*`, `/growth-rate/*`, `/funnel/account-creation` | identity |
//! | `/active-users/daily\|weekly\|monthly` | engagement |
//! | `/active-users/monthly-by-country` | both, reconciled in process |

use axum::{Json, extract::State};
use pulse_core::{
  growth::{
    AccountCreationFunnel, DailyActiveUsers, MonthlyActiveUsers,
    MonthlyGrowthRate, MonthlySignups, NewUserSignup, WeeklyActiveUsers,
    WeeklyGrowthRate, WeeklySignups,
  },
  monthly_active_by_country,
  reconcile::CountryActivity,
  source::{EngagementSource, IdentitySource},
};

use crate::{AppState, error::ApiError};

/// `GET /new-users/daily`
pub async fn new_users_daily<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<NewUserSignup>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .new_users_today()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /new-users/weekly`
pub async fn new_users_weekly<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<WeeklySignups>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .weekly_signups()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /new-users/monthly`
pub async fn new_users_monthly<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<MonthlySignups>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .monthly_signups()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /growth-rate/weekly`
pub async fn growth_rate_weekly<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<WeeklyGrowthRate>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .weekly_growth_rate()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /growth-rate/monthly`
pub async fn growth_rate_monthly<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<MonthlyGrowthRate>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .monthly_growth_rate()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /active-users/daily`
pub async fn active_users_daily<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<DailyActiveUsers>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .daily_active_users()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /active-users/weekly`
pub async fn active_users_weekly<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<WeeklyActiveUsers>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .weekly_active_users()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /active-users/monthly`
pub async fn active_users_monthly<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<MonthlyActiveUsers>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .engagement
    .monthly_active_users()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /active-users/monthly-by-country`
///
/// The cross-database join: per-person monthly activity from the
/// engagement store, country attribution from the identity store,
/// reconciled in process by
/// [`monthly_active_by_country`]. Both fetches are sequential — the
/// identity lookup depends on the activity result.
pub async fn active_users_monthly_by_country<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<CountryActivity>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let activity = state
    .engagement
    .monthly_activity()
    .await
    .map_err(ApiError::source)?;
  let rows = monthly_active_by_country(state.identity.as_ref(), activity)
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}

/// `GET /funnel/account-creation`
pub async fn account_creation_funnel<E, I>(
  State(state): State<AppState<E, I>>,
) -> Result<Json<Vec<AccountCreationFunnel>>, ApiError>
where
  E: EngagementSource,
  I: IdentitySource,
{
  let rows = state
    .identity
    .account_creation_funnel()
    .await
    .map_err(ApiError::source)?;
  Ok(Json(rows))
}
