// src/pagination/mod.rs
// =============================================================================
// Pagination for search results.
//
// Submodules:
// - range: pure page-marker calculation (1 … 23 24 25 26 27 … 50)
// - control: buttons, labels, and click handling built on top of range
// =============================================================================

mod control;
mod range;

pub use control::{Affordance, LayoutClass, PaginationControl, PaginationProps, PaginationView};

#[cfg(test)]
pub use control::Layout;
pub use range::DEFAULT_MAX_PAGES;
