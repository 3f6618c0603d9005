//! The member list pipeline: search filter, column sort, pagination and the
//! delete confirmation flow, plus the per-table view state that drives them.
//!
//! Everything here is synchronous and pure apart from [`ListView`], which owns
//! the mutable view state of one mounted table.

pub mod delete;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod row;
pub mod sessions;
pub mod sort;
mod view;

pub use view::ListView;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::Member;
use paginate::{paginate, Page};
use row::MemberRow;
use sort::{ComparatorRegistry, SortDescriptor};

/// Filter then stable-sort, returning dataset positions in display order.
pub fn ordered_positions(
    members: &[Member],
    comparators: &ComparatorRegistry,
    query: &str,
    sort: &SortDescriptor,
) -> Result<Vec<usize>, AppError> {
    let comparator = comparators.resolve(sort)?;
    let mut positions = filter::matching_positions(members, query);
    positions.sort_by(|&a, &b| comparator.compare(&members[a], &members[b]));
    Ok(positions)
}

/// One rendered page of the member table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub query: String,
    pub sort: SortDescriptor,
    pub tracked_years: Vec<u16>,
    pub rows: Page<MemberRow>,
}

impl Listing {
    /// Render page `page` of members already in display order.
    pub fn build(
        ordered: &[&Member],
        tracked_years: &[u16],
        query: &str,
        sort: &SortDescriptor,
        page: usize,
        page_size: usize,
    ) -> Self {
        let rows = paginate(ordered, page_size, page)
            .map(|member| MemberRow::from_member(member, tracked_years));

        Self {
            query: query.to_string(),
            sort: sort.clone(),
            tracked_years: tracked_years.to_vec(),
            rows,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::sort::SortDirection;
    use crate::store::Dataset;
    use serde_json::json;

    fn dataset() -> Dataset {
        let records = vec![
            json!({ "username": "@3", "numeroSocio": 3, "name": "Carla", "status": "Atraso", "kitEntregue": true }),
            json!({ "username": "@1", "numeroSocio": 1, "name": "Ana", "status": "Atraso", "kitEntregue": false }),
            json!({ "username": "@2", "numeroSocio": 2, "name": "Bruno", "status": "Expulso", "kitEntregue": true }),
        ];
        Dataset::from_records(records, None).unwrap()
    }

    #[test]
    fn test_ordered_positions_filters_then_sorts() {
        let dataset = dataset();
        let registry = ComparatorRegistry::for_members(dataset.tracked_years());

        let all = ordered_positions(dataset.members(), &registry, "", &SortDescriptor::default()).unwrap();
        assert_eq!(all, vec![1, 2, 0]);

        let late = ordered_positions(
            dataset.members(),
            &registry,
            "atraso",
            &SortDescriptor::new("numeroSocio", SortDirection::Descending),
        )
        .unwrap();
        assert_eq!(late, vec![0, 1]);
    }

    #[test]
    fn test_ties_keep_filter_order() {
        let dataset = dataset();
        let registry = ComparatorRegistry::for_members(dataset.tracked_years());
        let sort = SortDescriptor::new("kitEntregue", SortDirection::Descending);

        let positions = ordered_positions(dataset.members(), &registry, "", &sort).unwrap();
        assert_eq!(positions, vec![0, 2, 1]);
    }

    #[test]
    fn test_listing_build() {
        let dataset = dataset();
        let members = dataset.members();
        let ordered = [&members[1], &members[2], &members[0]];
        let listing = Listing::build(
            &ordered,
            dataset.tracked_years(),
            "",
            &SortDescriptor::default(),
            2,
            2,
        );

        assert_eq!(listing.rows.page, 2);
        assert_eq!(listing.rows.total_pages, 2);
        assert_eq!(listing.rows.total_items, 3);
        assert_eq!(listing.rows.items.len(), 1);
        assert_eq!(listing.rows.items[0].id, "@3");
    }
}
