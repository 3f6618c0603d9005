//! Fixed-size pagination with clamping.

use serde::Serialize;

/// One page of an ordered result set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually served, after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Size of the whole (filtered) result set.
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Slice out the requested page; out-of-range requests land on the nearest valid page.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, requested: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(requested, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start.min(end)..end].to_vec(),
        page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 30), 1);
        assert_eq!(total_pages(30, 30), 1);
        assert_eq!(total_pages(31, 30), 2);
        assert_eq!(total_pages(45, 30), 2);
        assert_eq!(total_pages(61, 30), 3);
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=45).collect();

        let first = paginate(&items, 30, 0);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 30);
        assert_eq!(first.items[0], 1);

        let last = paginate(&items, 30, 9999);
        assert_eq!(last.page, 2);
        assert_eq!(last.items, (31..=45).collect::<Vec<_>>());
        assert_eq!(last.total_pages, 2);
        assert_eq!(last.total_items, 45);
    }

    #[test]
    fn test_pages_cover_the_sequence_exactly_once() {
        let items: Vec<u32> = (0..95).collect();
        let pages = total_pages(items.len(), 30);

        let joined: Vec<u32> = (1..=pages)
            .flat_map(|page| paginate(&items, 30, page).items)
            .collect();
        assert_eq!(joined, items);
    }

    #[test]
    fn test_empty_sequence_has_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 30, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = paginate(&[1, 2, 3], 2, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 2);
    }
}
