// src/search/mod.rs
// =============================================================================
// Repository search: the parameters of a search and the orchestrator that
// owns them, issues requests, and feeds results back into pagination.
// =============================================================================

mod orchestrator;
mod params;

pub use orchestrator::{RepositorySearch, SearchOrchestrator, SearchState};
pub use params::{Order, PerPage, SearchParams, Sort};
