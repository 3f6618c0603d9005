//! Datastore API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::DatasetInfo;
use crate::AppState;

/// GET /api/datastore - Summary of the loaded dataset.
pub async fn get_datastore(State(state): State<AppState>) -> ApiResult<DatasetInfo> {
    success(state.repo.info())
}
