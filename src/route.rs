// src/route.rs
// =============================================================================
// Application routes. There are two pages:
//
//   /                          -> Home (search)
//   /repository/{owner}/{repo} -> Repository detail
//
// A trailing slash is accepted. Anything else is rejected as invalid input.
// =============================================================================

use std::fmt;

use crate::error::{AppError, Result};
use crate::github::{validate_owner, validate_repo_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Repository { owner: String, repo: String },
}

impl Route {
    pub fn parse(path: &str) -> Result<Route> {
        let segments: Vec<&str> = path
            .trim()
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] if path.trim().starts_with('/') => Ok(Route::Home),
            ["repository", owner, repo] => {
                validate_owner(owner)?;
                validate_repo_name(repo)?;
                Ok(Route::Repository {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(AppError::InvalidInput(format!("Unknown route: {}", path.trim()))),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Repository { owner, repo } => format!("/repository/{}/{}", owner, repo),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::Home.path(), "/");
    }

    #[test]
    fn test_repository_route() {
        let route = Route::parse("/repository/rust-lang/rust").unwrap();
        assert_eq!(
            route,
            Route::Repository {
                owner: "rust-lang".to_string(),
                repo: "rust".to_string()
            }
        );
        assert_eq!(route.path(), "/repository/rust-lang/rust");
        assert_eq!(Route::parse("/repository/serde-rs/serde.rs/").unwrap().path(), "/repository/serde-rs/serde.rs");
    }

    #[test]
    fn test_unknown_routes() {
        assert!(Route::parse("").is_err());
        assert!(Route::parse("/search").is_err());
        assert!(Route::parse("/repository/only-owner").is_err());
        assert!(Route::parse("/repository/a/b/c").is_err());
        assert!(Route::parse("/repository/bad.owner/repo").is_err());
        assert!(Route::parse("/repository/owner/..").is_err());
    }
}
