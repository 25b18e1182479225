//! Page-range input parsing
//!
//! The page count used for validation is supplied by the user (the split
//! flow starts from [`DEFAULT_PAGE_COUNT`]); nothing here reads the PDF.

use shared_types::PageRange;
use std::collections::BTreeSet;

/// Starting page count offered by the split flow
pub const DEFAULT_PAGE_COUNT: u32 = 5;

/// Parse range input like "1-3, 5, 8-10" into ranges, in input order.
///
/// Tokens are comma separated and trimmed. `N` is the range `N-N`. A token
/// is dropped when it is not an integer or `A-B` pair, or when the range
/// falls outside `1..=page_count` or is reversed. Dropped tokens are not
/// reported; an empty result is the caller's signal.
///
/// # Examples
/// ```
/// use shared_types::PageRange;
/// use transform_core::ranges::parse_page_ranges;
///
/// assert_eq!(
///     parse_page_ranges("1-3, 5, 10-12", 10),
///     vec![PageRange::new(1, 3), PageRange::single(5)]
/// );
/// ```
pub fn parse_page_ranges(input: &str, page_count: u32) -> Vec<PageRange> {
    input
        .split(',')
        .filter_map(|token| parse_token(token.trim()))
        .filter(|range| range.fits(page_count))
        .collect()
}

fn parse_token(token: &str) -> Option<PageRange> {
    if token.is_empty() {
        return None;
    }

    match token.split_once('-') {
        Some((start, end)) => {
            let start = start.trim().parse::<u32>().ok()?;
            let end = end.trim().parse::<u32>().ok()?;
            Some(PageRange::new(start, end))
        }
        None => token.parse::<u32>().ok().map(PageRange::single),
    }
}

/// Sorted, de-duplicated page numbers; page 0 is dropped
pub fn normalize_pages(pages: &[u32]) -> Vec<u32> {
    pages
        .iter()
        .copied()
        .filter(|&page| page >= 1)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
