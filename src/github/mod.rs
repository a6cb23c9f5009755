// src/github/mod.rs
// =============================================================================
// Everything that talks to the GitHub REST API.
//
// - client: the HTTP client (search, repository detail, README)
// - models: serde shapes of the JSON responses
// - cache: short-lived response memoization used by the client
// - target: parsing "owner/repo" and GitHub URLs typed by the user
// =============================================================================

mod cache;
mod client;
mod models;
mod target;

pub use client::GitHubClient;
pub use models::{Readme, Repository, SearchResponse};
pub use target::{parse_repo_target, validate_owner, validate_repo_name};

#[cfg(test)]
pub(crate) use models::fixtures;
