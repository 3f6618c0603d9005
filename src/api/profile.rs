//! Profile page endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::Profile;
use crate::AppState;

/// GET /api/profile - Profile header and stats.
pub async fn get_profile(State(state): State<AppState>) -> ApiResult<Profile> {
    success(state.repo.get_profile()?.clone())
}
