//! Client-side pagination over in-memory collections
//!
//! List endpoints load the filtered record set and slice it here instead of
//! pushing LIMIT/OFFSET into the query. The record sets of a small workshop
//! stay comfortably in memory and this keeps search + pagination semantics
//! identical across every entity.

/// Page size used when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One computed page of an ordered collection, with navigation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// Items on this page (may be empty when the page is out of range).
    pub page_items: Vec<T>,
    /// The 1-based page that was computed.
    pub current_page: usize,
    /// Total number of pages; 0 when the collection is empty.
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Length of the full collection, across all pages.
    pub total_items: usize,
    /// 1-based index of the first item on this page, for "showing X-Y of Z"
    /// text. 0 when the collection is empty.
    pub display_start_index: usize,
    /// 1-based index of the last item on this page.
    pub display_end_index: usize,
}

fn total_pages_for(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size)
}

/// Slice `items` into the requested page.
///
/// All inputs are tolerated rather than rejected: a `page_size` of 0 falls
/// back to [`DEFAULT_PAGE_SIZE`], a `current_page` of 0 is treated as 1, and
/// a page past the end yields an empty `page_items` instead of an error. A
/// page index can legitimately go stale between requests (the underlying
/// list shrinks after a delete), so that case must degrade gracefully.
pub fn compute<T: Clone>(items: &[T], page_size: usize, current_page: usize) -> PageResult<T> {
    let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
    let current_page = current_page.max(1);

    let total_items = items.len();
    let total_pages = total_pages_for(total_items, page_size);

    let start_index = (current_page - 1) * page_size;
    let end_index = (start_index + page_size).min(total_items);

    let page_items = if start_index >= total_items {
        Vec::new()
    } else {
        items[start_index..end_index].to_vec()
    };

    PageResult {
        page_items,
        current_page,
        total_pages,
        has_next_page: current_page < total_pages,
        has_previous_page: current_page > 1,
        total_items,
        display_start_index: if total_items == 0 { 0 } else { start_index + 1 },
        display_end_index: (current_page * page_size).min(total_items),
    }
}

/// Stateful page cursor for one list view.
///
/// Holds nothing but the page size and the current page; everything else is
/// recomputed from the live collection on every [`Paginator::page_of`] call,
/// so the cursor can never desynchronize from its data source. Each
/// independent list needs its own instance.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Compute the current page of `items`.
    ///
    /// If the collection shrank since the last call and `current_page` now
    /// points past the end, it is first clamped into `[1, max(1, total_pages)]`
    /// so the caller sees the nearest real page instead of an empty one.
    pub fn page_of<T: Clone>(&mut self, items: &[T]) -> PageResult<T> {
        let total_pages = total_pages_for(items.len(), self.page_size);
        self.current_page = self.current_page.min(total_pages.max(1));
        compute(items, self.page_size, self.current_page)
    }

    /// Jump to `target`. Out-of-bounds targets are ignored and the current
    /// page is left unchanged.
    pub fn go_to_page(&mut self, target: usize, total_pages: usize) -> usize {
        if target >= 1 && target <= total_pages {
            self.current_page = target;
        }
        self.current_page
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) -> usize {
        if self.current_page < total_pages {
            self.current_page += 1;
        }
        self.current_page
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(&mut self) -> usize {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
        self.current_page
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let page = compute::<usize>(&[], 10, 1);
        assert!(page.page_items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
        assert!(!page.has_next_page);
        assert!(!page.has_previous_page);
        assert_eq!(page.display_start_index, 0);
        assert_eq!(page.display_end_index, 0);
    }

    #[test]
    fn pages_partition_the_collection() {
        let all = items(23);
        let sizes: Vec<usize> = (1..=3)
            .map(|p| compute(&all, 10, p).page_items.len())
            .collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(sizes.iter().sum::<usize>(), all.len());
    }

    #[test]
    fn total_pages_is_ceiling_of_count_over_size() {
        assert_eq!(compute(&items(23), 10, 1).total_pages, 3);
        assert_eq!(compute(&items(20), 10, 1).total_pages, 2);
        assert_eq!(compute(&items(1), 10, 1).total_pages, 1);
        assert_eq!(compute(&items(9), 3, 1).total_pages, 3);
    }

    #[test]
    fn display_indices_for_middle_and_last_page() {
        let all = items(23);

        let page2 = compute(&all, 10, 2);
        assert_eq!(page2.display_start_index, 11);
        assert_eq!(page2.display_end_index, 20);

        let page3 = compute(&all, 10, 3);
        assert_eq!(page3.display_start_index, 21);
        assert_eq!(page3.display_end_index, 23);
        assert_eq!(page3.page_items, vec![21, 22, 23]);
    }

    #[test]
    fn navigation_flags() {
        let all = items(23);
        let page1 = compute(&all, 10, 1);
        assert!(page1.has_next_page);
        assert!(!page1.has_previous_page);

        let page3 = compute(&all, 10, 3);
        assert!(!page3.has_next_page);
        assert!(page3.has_previous_page);
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let page = compute(&items(5), 10, 7);
        assert!(page.page_items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 7);
    }

    #[test]
    fn compute_is_idempotent() {
        let all = items(23);
        assert_eq!(compute(&all, 10, 2), compute(&all, 10, 2));
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let page = compute(&items(25), 0, 1);
        assert_eq!(page.page_items.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn go_to_page_ignores_out_of_bounds_targets() {
        let mut p = Paginator::new(10);
        p.go_to_page(2, 3);
        assert_eq!(p.current_page(), 2);
        p.go_to_page(0, 3);
        assert_eq!(p.current_page(), 2);
        p.go_to_page(4, 3);
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn next_and_previous_stop_at_the_boundaries() {
        let mut p = Paginator::new(10);
        assert_eq!(p.previous_page(), 1);
        assert_eq!(p.next_page(2), 2);
        assert_eq!(p.next_page(2), 2);
        assert_eq!(p.previous_page(), 1);
    }

    #[test]
    fn stale_page_is_clamped_when_the_collection_shrinks() {
        let mut p = Paginator::new(10);
        p.go_to_page(3, 3);
        assert_eq!(p.page_of(&items(23)).page_items.len(), 3);

        // 20 items deleted since the last render: page 3 no longer exists
        let page = p.page_of(&items(3));
        assert_eq!(p.current_page(), 1);
        assert_eq!(page.page_items.len(), 3);
    }

    #[test]
    fn stale_page_on_empty_collection_resets_to_one() {
        let mut p = Paginator::new(10);
        p.go_to_page(2, 5);
        let page = p.page_of::<usize>(&[]);
        assert_eq!(p.current_page(), 1);
        assert!(page.page_items.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
