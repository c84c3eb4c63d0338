//! Compact page-number windows for the pagination bar.
//!
//! The window always shows the first and last page, a small neighbourhood
//! around the current page, and an ellipsis wherever pages are skipped. It
//! never grows beyond seven tokens, however many pages there are.

use std::fmt;

/// One slot in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages needed for `total_items` at `page_size` per page.
///
/// A page size of zero yields zero pages.
#[must_use]
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let size = u64::from(page_size);
    let pages = total_items / size + u64::from(total_items % size != 0);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Computes the window of page tokens for `current` out of `total` pages.
///
/// `total == 0` yields an empty window. A `current` outside `1..=total` is
/// clamped into range first.
///
/// # Example
///
/// ```
/// use paperfeed::pagination::{window, PageToken::{Ellipsis, Page}};
///
/// assert_eq!(
///     window(10, 20),
///     vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
/// );
/// ```
#[must_use]
pub fn window(current: u32, total: u32) -> Vec<PageToken> {
    use PageToken::{Ellipsis, Page};

    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }

    if current <= 4 {
        let mut tokens: Vec<_> = (1..=5).map(Page).collect();
        tokens.extend([Ellipsis, Page(total)]);
        return tokens;
    }

    if current >= total - 3 {
        let mut tokens = vec![Page(1), Ellipsis];
        tokens.extend((total - 4..=total).map(Page));
        return tokens;
    }

    vec![
        Page(1),
        Ellipsis,
        Page(current - 1),
        Page(current),
        Page(current + 1),
        Ellipsis,
        Page(total),
    ]
}

#[cfg(test)]
mod tests {
    use super::PageToken::{Ellipsis, Page};
    use super::*;

    fn pages(range: std::ops::RangeInclusive<u32>) -> Vec<PageToken> {
        range.map(Page).collect()
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(window(3, 5), pages(1..=5));
        assert_eq!(window(7, 7), pages(1..=7));
        assert_eq!(window(1, 1), vec![Page(1)]);
    }

    #[test]
    fn near_the_start() {
        assert_eq!(
            window(1, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
        assert_eq!(window(4, 20), window(1, 20));
    }

    #[test]
    fn near_the_end() {
        assert_eq!(
            window(18, 20),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
        assert_eq!(window(17, 20), window(20, 20));
    }

    #[test]
    fn in_the_middle() {
        assert_eq!(
            window(10, 20),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
        assert_eq!(
            window(5, 20),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn eight_pages_take_the_start_branch_first() {
        assert_eq!(
            window(4, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(8)]
        );
        assert_eq!(
            window(5, 8),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn empty_and_out_of_range() {
        assert!(window(1, 0).is_empty());
        assert_eq!(window(0, 20), window(1, 20));
        assert_eq!(window(99, 20), window(20, 20));
    }

    #[test]
    fn window_is_bounded() {
        for total in 1..60 {
            for current in 1..=total {
                assert!(window(current, total).len() <= 7);
            }
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 15), 0);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
        assert_eq!(total_pages(10, 0), 0);
        assert_eq!(total_pages(u64::MAX, 2), u32::MAX);
        assert_eq!(total_pages(u64::from(u32::MAX) * 3 - 1, 3), u32::MAX);
    }

    #[test]
    fn ellipsis_renders_as_single_glyph() {
        assert_eq!(Ellipsis.to_string(), "…");
        assert_eq!(Page(7).to_string(), "7");
    }
}
