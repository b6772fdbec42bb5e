//! Page arithmetic shared by the listing endpoints.

/// Resolved page window for a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number after clamping
    pub number: i64,
    /// Grand total of rows across all pages
    pub total: i64,
    /// Number of pages; never below 1, so an empty listing still has one page
    pub total_page: i64,
    /// Row offset of the first item on this page
    pub offset: i64,
    /// Page size
    pub limit: i64,
}

/// Resolve a requested page number against the grand total.
///
/// A missing page resolves to the first page; a number past the end clamps to
/// the last page.
pub fn resolve(total: i64, per_page: i64, requested: Option<i64>) -> Page {
    let total_page = ((total + per_page - 1) / per_page).max(1);
    let number = requested.unwrap_or(1).clamp(1, total_page);

    Page {
        number,
        total,
        total_page,
        offset: (number - 1) * per_page,
        limit: per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_one_page() {
        let page = resolve(0, 10, None);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_page, 1);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn partial_last_page_counts() {
        let page = resolve(11, 10, Some(2));
        assert_eq!(page.total_page, 2);
        assert_eq!(page.offset, 10);
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let page = resolve(20, 10, Some(2));
        assert_eq!(page.total_page, 2);
        assert_eq!(page.number, 2);
    }

    #[test]
    fn past_the_end_clamps_to_last_page() {
        let page = resolve(11, 10, Some(99));
        assert_eq!(page.number, 2);
        assert_eq!(page.offset, 10);
    }

    #[test]
    fn zero_and_negative_clamp_to_first_page() {
        assert_eq!(resolve(30, 4, Some(0)).number, 1);
        assert_eq!(resolve(30, 4, Some(-3)).number, 1);
    }
}
