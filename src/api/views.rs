//! View session endpoints.
//!
//! A view is the state of one mounted member table. Every endpoint applies a
//! single transition and answers with the resulting page and dialog.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{success, ApiJson, ApiPath, ApiResult};
use crate::errors::AppError;
use crate::listing::delete::{DeleteDialog, DeleteIntent};
use crate::listing::sort::SortDescriptor;
use crate::listing::{ListView, Listing};
use crate::AppState;

/// Rendered state of a view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub view_id: Uuid,
    pub listing: Listing,
    pub delete_dialog: DeleteDialog,
}

fn render(view_id: Uuid, view: &mut ListView) -> Result<ViewState, AppError> {
    Ok(ViewState {
        view_id,
        listing: view.listing()?,
        delete_dialog: view.delete_dialog(),
    })
}

#[derive(Debug, Deserialize)]
pub struct QueryChange {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PageChange {
    pub page: usize,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub username: String,
}

/// Result of confirming a removal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmed {
    /// What was handed to the delete sink, `None` if nothing was pending.
    pub requested: Option<DeleteIntent>,
    pub view: ViewState,
}

/// POST /api/views - Mount a new member table.
pub async fn create_view(State(state): State<AppState>) -> ApiResult<ViewState> {
    let view = state.repo.open_view(state.config.page_size);
    let id = state.views.mount(view).await;
    success(state.views.with_view(id, |view| render(id, view)).await?)
}

/// GET /api/views/:id - Current page and dialog.
pub async fn get_view(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ViewState> {
    success(state.views.with_view(id, |view| render(id, view)).await?)
}

/// DELETE /api/views/:id - Unmount a table.
pub async fn delete_view(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<()> {
    state.views.unmount(id).await?;
    tracing::debug!("{} views still mounted", state.views.mounted().await);
    success(())
}

/// PUT /api/views/:id/query - Search box changed.
pub async fn set_view_query(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(change): ApiJson<QueryChange>,
) -> ApiResult<ViewState> {
    let rendered = state
        .views
        .with_view(id, move |view| {
            view.set_query(change.query);
            render(id, view)
        })
        .await?;
    success(rendered)
}

/// PUT /api/views/:id/sort - Sortable column header clicked.
pub async fn set_view_sort(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(sort): ApiJson<SortDescriptor>,
) -> ApiResult<ViewState> {
    let rendered = state
        .views
        .with_view(id, move |view| {
            view.set_sort(sort)?;
            render(id, view)
        })
        .await?;
    success(rendered)
}

/// PUT /api/views/:id/page - Pagination control clicked.
pub async fn set_view_page(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(change): ApiJson<PageChange>,
) -> ApiResult<ViewState> {
    let rendered = state
        .views
        .with_view(id, |view| {
            view.set_page(change.page)?;
            render(id, view)
        })
        .await?;
    success(rendered)
}

/// POST /api/views/:id/delete - "Remover" picked in a row menu.
pub async fn request_view_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<DeleteRequest>,
) -> ApiResult<ViewState> {
    let rendered = state
        .views
        .with_view(id, |view| {
            view.request_delete(&request.username)?;
            render(id, view)
        })
        .await?;
    success(rendered)
}

/// POST /api/views/:id/delete/confirm - Removal confirmed in the dialog.
pub async fn confirm_view_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteConfirmed> {
    let sink = state.delete_sink.clone();
    let confirmed = state
        .views
        .with_view(id, |view| {
            let requested = view.confirm_delete(sink.as_ref())?;
            Ok(DeleteConfirmed {
                requested,
                view: render(id, view)?,
            })
        })
        .await?;
    success(confirmed)
}

/// POST /api/views/:id/delete/cancel - "Cancelar" clicked.
pub async fn cancel_view_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ViewState> {
    let rendered = state
        .views
        .with_view(id, |view| {
            view.cancel_delete();
            render(id, view)
        })
        .await?;
    success(rendered)
}

/// POST /api/views/:id/delete/dismiss - Dialog closed by outside click or escape.
pub async fn dismiss_view_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ViewState> {
    let rendered = state
        .views
        .with_view(id, |view| {
            view.dismiss_delete();
            render(id, view)
        })
        .await?;
    success(rendered)
}
