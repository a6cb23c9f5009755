// src/view/mod.rs
// =============================================================================
// Terminal views. Pure functions from data to styled text.
// =============================================================================

mod cards;
mod messages;

pub use cards::{detail_header, search_results, stats_block};
pub use messages::{error_block, home_banner, loading, NO_README};
