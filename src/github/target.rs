// src/github/target.rs
// =============================================================================
// Turns what the user typed into an (owner, repo) pair.
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main   (extra path segments are ignored)
//
// Route paths (/repository/owner/repo) are handled by route.rs, which calls
// into this module for the final validation.
// =============================================================================

use crate::error::{AppError, Result};

pub fn parse_repo_target(target: &str) -> Result<(String, String)> {
    let trimmed = target.trim();
    let has_scheme = trimmed.contains("://");

    // Remove common prefixes
    let stripped = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let path = if let Some(rest) = stripped.strip_prefix("github.com/") {
        rest
    } else if has_scheme || stripped.starts_with("github.com") {
        return Err(AppError::InvalidInput(format!("Not a GitHub URL: {}", trimmed)));
    } else {
        stripped
    };

    let mut parts = path.split('/').filter(|p| !p.is_empty());
    let owner = parts.next();
    let repo = parts.next();

    match (owner, repo) {
        (Some(owner), Some(repo)) => {
            let repo = repo.trim_end_matches(".git");
            validate_owner(owner)?;
            validate_repo_name(repo)?;
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(AppError::InvalidInput(format!(
            "Expected owner/repo, got: {}",
            trimmed
        ))),
    }
}

// User and organisation logins: alphanumerics and '-'
pub fn validate_owner(owner: &str) -> Result<()> {
    let valid = !owner.is_empty() && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!("Invalid owner name: {}", owner)))
    }
}

// Repository names: alphanumerics, '-', '_' and '.'
pub fn validate_repo_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!("Invalid repository name: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_slash_repo() {
        let (owner, repo) = parse_repo_target("rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url() {
        let (owner, repo) = parse_repo_target("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let (owner, repo) = parse_repo_target("https://github.com/user/repo.git").unwrap();
        assert_eq!(owner, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_url_with_extra_segments() {
        let (owner, repo) = parse_repo_target("www.github.com/tokio-rs/tokio/tree/master").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("tokio-rs", "tokio"));
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(parse_repo_target("https://gitlab.com/user/repo").is_err());
        assert!(parse_repo_target("just-a-name").is_err());
        assert!(parse_repo_target("owner/re po").is_err());
        assert!(parse_repo_target("../etc").is_err());
        assert!(parse_repo_target("gitlab.com/user/repo").is_err());
    }
}
