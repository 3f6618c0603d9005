//! View state of one mounted member table.

use std::sync::Arc;

use super::delete::{DeleteConfirmation, DeleteDialog, DeleteIntent, DeleteSink};
use super::paginate::{clamp_page, total_pages};
use super::sort::{ComparatorRegistry, SortDescriptor};
use super::{ordered_positions, Listing};
use crate::errors::AppError;
use crate::models::Member;
use crate::store::Dataset;

/// Filtered and sorted positions for one (query, sort) pair.
struct OrderedCache {
    query: String,
    sort: SortDescriptor,
    positions: Vec<usize>,
}

/// Search text, sort, page and delete dialog state of one table.
///
/// Search and sort changes send the table back to page 1. The filtered and
/// sorted order is recomputed only when the query or sort changes.
pub struct ListView {
    dataset: Arc<Dataset>,
    comparators: Arc<ComparatorRegistry>,
    page_size: usize,
    query: String,
    sort: SortDescriptor,
    page: usize,
    delete: DeleteConfirmation,
    cache: Option<OrderedCache>,
    pipeline_runs: usize,
}

impl ListView {
    pub fn new(
        dataset: Arc<Dataset>,
        comparators: Arc<ComparatorRegistry>,
        page_size: usize,
    ) -> Self {
        Self {
            dataset,
            comparators,
            page_size: page_size.max(1),
            query: String::new(),
            sort: SortDescriptor::default(),
            page: 1,
            delete: DeleteConfirmation::Idle,
            cache: None,
            pipeline_runs: 0,
        }
    }

    /// Number of times filter + sort actually ran.
    #[cfg(test)]
    pub fn pipeline_runs(&self) -> usize {
        self.pipeline_runs
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Change the sort. Unsortable columns are rejected and leave the state untouched.
    pub fn set_sort(&mut self, sort: SortDescriptor) -> Result<(), AppError> {
        if !self.comparators.is_sortable(&sort.column) {
            return Err(AppError::BadRequest(format!(
                "Column {} is not sortable",
                sort.column
            )));
        }
        self.sort = sort;
        self.page = 1;
        Ok(())
    }

    /// Move to `page`, clamped to the pages that exist. Returns the page kept.
    pub fn set_page(&mut self, page: usize) -> Result<usize, AppError> {
        let total = total_pages(self.ordered()?.len(), self.page_size);
        self.page = clamp_page(page, total);
        Ok(self.page)
    }

    /// Page actually shown.
    pub fn current_page(&mut self) -> Result<usize, AppError> {
        let total = total_pages(self.ordered()?.len(), self.page_size);
        Ok(clamp_page(self.page, total))
    }

    /// Render the current page.
    pub fn listing(&mut self) -> Result<Listing, AppError> {
        let page = self.current_page()?;
        let members = self.dataset.members();
        let ordered: Vec<&Member> = self
            .cache
            .as_ref()
            .map(|cache| cache.positions.iter().map(|&p| &members[p]).collect())
            .unwrap_or_default();

        Ok(Listing::build(
            &ordered,
            self.dataset.tracked_years(),
            &self.query,
            &self.sort,
            page,
            self.page_size,
        ))
    }

    /// Open the delete dialog for `username`.
    pub fn request_delete(&mut self, username: &str) -> Result<&DeleteIntent, AppError> {
        let member = self
            .dataset
            .member(username)
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", username)))?;
        self.delete.request(member);

        self.delete
            .pending()
            .ok_or_else(|| AppError::Internal("Delete request was not recorded".to_string()))
    }

    pub fn confirm_delete(&mut self, sink: &dyn DeleteSink) -> Result<Option<DeleteIntent>, AppError> {
        self.delete.confirm(sink)
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn dismiss_delete(&mut self) {
        self.delete.dismiss();
    }

    pub fn delete_dialog(&self) -> DeleteDialog {
        self.delete.dialog()
    }

    fn ordered(&mut self) -> Result<&[usize], AppError> {
        self.refresh()?;
        Ok(self
            .cache
            .as_ref()
            .map(|cache| cache.positions.as_slice())
            .unwrap_or_default())
    }

    fn refresh(&mut self) -> Result<(), AppError> {
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|cache| cache.query == self.query && cache.sort == self.sort);
        if fresh {
            return Ok(());
        }

        let positions = ordered_positions(
            self.dataset.members(),
            &self.comparators,
            &self.query,
            &self.sort,
        )?;
        self.pipeline_runs += 1;
        tracing::debug!(
            runs = self.pipeline_runs,
            query = %self.query,
            column = %self.sort.column,
            matches = positions.len(),
            "Member list recomputed"
        );

        self.cache = Some(OrderedCache {
            query: self.query.clone(),
            sort: self.sort.clone(),
            positions,
        });
        Ok(())
    }
}
