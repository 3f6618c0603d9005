//! Member API endpoints.

use axum::extract::State;
use serde::Deserialize;

use super::{success, ApiPath, ApiQuery, ApiResult};
use crate::listing::sort::{columns, SortDescriptor, SortDirection};
use crate::listing::Listing;
use crate::models::Member;
use crate::AppState;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListMembersQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
    /// Column id (default: numeroSocio).
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
    /// 1-based page, clamped to the pages that exist.
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

/// GET /api/members - Filter, sort and paginate the member list.
pub async fn list_members(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListMembersQuery>,
) -> ApiResult<Listing> {
    let column = params
        .sort
        .unwrap_or_else(|| columns::MEMBERSHIP_NUMBER.to_string());
    let sort = SortDescriptor::new(column, params.direction);

    let listing = state
        .repo
        .list_members(&params.q, &sort, params.page, state.config.page_size)?;
    success(listing)
}

/// GET /api/members/:username - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Member> {
    success(state.repo.get_member(&username)?.clone())
}
