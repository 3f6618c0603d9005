//! Read-only access to the loaded member dataset.

use std::sync::Arc;

use super::Dataset;
use crate::errors::AppError;
use crate::listing::filter::filter_members;
use crate::listing::sort::{sort_members, ComparatorRegistry, SortDescriptor};
use crate::listing::{ListView, Listing};
use crate::models::{DatasetInfo, Member, Profile};

/// Repository over the immutable dataset and its column comparators.
#[derive(Clone)]
pub struct Repository {
    dataset: Arc<Dataset>,
    comparators: Arc<ComparatorRegistry>,
}

impl Repository {
    pub fn new(dataset: Dataset) -> Self {
        let comparators = ComparatorRegistry::for_members(dataset.tracked_years());
        Self {
            dataset: Arc::new(dataset),
            comparators: Arc::new(comparators),
        }
    }

    /// Summary of what was loaded.
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            member_count: self.dataset.members().len(),
            tracked_years: self.dataset.tracked_years().to_vec(),
            sortable_columns: self.comparators.columns().to_vec(),
            has_profile: self.dataset.profile().is_some(),
            loaded_at: self.dataset.loaded_at().to_rfc3339(),
        }
    }

    /// Get a member by username.
    pub fn get_member(&self, username: &str) -> Result<&Member, AppError> {
        self.dataset
            .member(username)
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", username)))
    }

    pub fn get_profile(&self) -> Result<&Profile, AppError> {
        self.dataset
            .profile()
            .ok_or_else(|| AppError::NotFound("No profile configured".to_string()))
    }

    /// Run the list pipeline once, without keeping any view state.
    pub fn list_members(
        &self,
        query: &str,
        sort: &SortDescriptor,
        page: usize,
        page_size: usize,
    ) -> Result<Listing, AppError> {
        let mut ordered = filter_members(self.dataset.members(), query);
        sort_members(&mut ordered, &self.comparators, sort)?;
        Ok(Listing::build(
            &ordered,
            self.dataset.tracked_years(),
            query,
            sort,
            page,
            page_size,
        ))
    }

    /// Fresh view state for a newly mounted table.
    pub fn open_view(&self, page_size: usize) -> ListView {
        ListView::new(self.dataset.clone(), self.comparators.clone(), page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::sort::SortDirection;

    fn repo() -> Repository {
        let dataset = Dataset::parse(
            r#"{ "items": [
                { "username": "@b", "numeroSocio": 2, "name": "Bruno", "status": "Atraso", "quota2025Paga": true },
                { "username": "@a", "numeroSocio": 1, "name": "Ana", "status": "Regularizado" }
            ] }"#,
        )
        .unwrap();
        Repository::new(dataset)
    }

    #[test]
    fn test_info() {
        let info = repo().info();
        assert_eq!(info.member_count, 2);
        assert_eq!(info.tracked_years, vec![2025]);
        assert!(info.sortable_columns.contains(&"quota2025Paga".to_string()));
        assert!(!info.has_profile);
    }

    #[test]
    fn test_get_member_and_profile() {
        let repo = repo();
        assert_eq!(repo.get_member("@a").unwrap().name, "Ana");
        assert_eq!(repo.get_member("@z").unwrap_err().error_code(), "NOT_FOUND");
        assert_eq!(repo.get_profile().unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_list_members_default_sort() {
        let listing = repo()
            .list_members("", &SortDescriptor::default(), 1, 30)
            .unwrap();
        let ids: Vec<_> = listing.rows.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["@a", "@b"]);
    }

    #[test]
    fn test_list_members_rejects_unknown_column() {
        let sort = SortDescriptor::new("avatarUrl", SortDirection::Ascending);
        let err = repo().list_members("", &sort, 1, 30).unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
