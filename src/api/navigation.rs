//! Route progress endpoints.

use axum::extract::State;
use serde::Deserialize;
use url::Url;

use super::{success, ApiJson, ApiResult};
use crate::errors::AppError;
use crate::navigation::{ClickOutcome, LinkClick, ProgressSnapshot};
use crate::AppState;

/// A link click plus the page it happened on.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickReport {
    pub current_url: String,
    #[serde(flatten)]
    pub click: LinkClick,
}

/// POST /api/navigation/click - Report a link click.
pub async fn report_link_click(
    State(state): State<AppState>,
    ApiJson(report): ApiJson<ClickReport>,
) -> ApiResult<ClickOutcome> {
    let current = Url::parse(&report.current_url)
        .map_err(|e| AppError::BadRequest(format!("Invalid currentUrl: {}", e)))?;
    success(state.progress.on_link_click(&report.click, &current))
}

/// POST /api/navigation/settled - The new route finished rendering.
pub async fn report_route_settled(State(state): State<AppState>) -> ApiResult<ProgressSnapshot> {
    state.progress.on_route_settled();
    success(state.progress.snapshot())
}

/// GET /api/navigation - Current progress state.
pub async fn get_navigation(State(state): State<AppState>) -> ApiResult<ProgressSnapshot> {
    success(state.progress.snapshot())
}
