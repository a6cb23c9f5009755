// src/pagination/range.rs
// =============================================================================
// Page-range calculation: turns (current page, total pages, delta) into the
// short strip of page markers that the pagination control shows.
//
// Example with current = 25, total = 50, delta = 2:
//
//   1  …  23  24  25  26  27  …  50
//
// The strip always starts at page 1 and ends at the last page. Between them
// sits a window of `delta` pages on each side of the current page, with an
// ellipsis wherever pages were skipped. However large the result set is, the
// strip never grows beyond `2 * delta + 5` markers.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

// GitHub's search API refuses to page past the first 1000 results, so by
// default the strip never offers more than 1000 pages. Callers can pass a
// different cap (see AppConfig::max_pages).
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// One entry in the rendered pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl PageMarker {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageMarker::Page(n) => Some(*n),
            PageMarker::Ellipsis => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("items per page must be at least 1")]
    ZeroItemsPerPage,
}

// Number of pages for a result set, capped at `max_pages`.
//
//   total_pages = min(ceil(total_items / items_per_page), max_pages)
//
// A zero page size has no meaningful answer, so it is rejected instead of
// producing a division by zero.
pub fn total_pages(
    total_items: u64,
    items_per_page: u32,
    max_pages: u32,
) -> Result<u32, PaginationError> {
    if items_per_page == 0 {
        return Err(PaginationError::ZeroItemsPerPage);
    }

    let pages = total_items.div_ceil(u64::from(items_per_page));
    Ok(pages.min(u64::from(max_pages)) as u32)
}

// Pulls an arbitrary page number into [1, total_pages].
// With no pages at all the result is 1.
pub fn clamp_page(current_page: u32, total_pages: u32) -> u32 {
    current_page.clamp(1, total_pages.max(1))
}

// Computes the visible page markers.
//
// Returns an empty Vec when there is at most one page: the control is
// hidden entirely in that case. Out-of-range `current_page` values are
// clamped first so the window is always anchored inside the valid range.
pub fn compute_visible_pages(current_page: u32, total_pages: u32, delta: u32) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return Vec::new();
    }

    // Signed arithmetic keeps `current - delta` honest near page 1
    let current = i64::from(clamp_page(current_page, total_pages));
    let total = i64::from(total_pages);
    let delta = i64::from(delta);

    // The strip can never hold more markers than there are pages
    let capacity = (delta as usize).saturating_mul(2).saturating_add(5).min(total_pages as usize);
    let mut markers = Vec::with_capacity(capacity);
    markers.push(PageMarker::Page(1));

    if current - delta > 2 {
        markers.push(PageMarker::Ellipsis);
    }

    let window_start = (current - delta).max(2);
    let window_end = (current + delta).min(total - 1);
    for page in window_start..=window_end {
        markers.push(PageMarker::Page(page as u32));
    }

    if current + delta < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total_pages));
    markers
}
