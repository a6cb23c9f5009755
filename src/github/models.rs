// src/github/models.rs
// =============================================================================
// Read-only shapes of the GitHub REST API responses we use.
//
// Only the fields the views need are declared; serde ignores the rest of
// the (large) payloads. Nullable API fields are Option<T>.
// =============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

// Used both for search result items and for the detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub updated_at: String,
    pub created_at: String,
    pub default_branch: String,
    pub language: Option<String>,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readme {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    pub url: String,
    pub html_url: String,
    pub git_url: String,
    pub download_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub encoding: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn repository(owner: &str, name: &str) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            description: Some("A test repository".to_string()),
            html_url: format!("https://github.com/{}/{}", owner, name),
            stargazers_count: 1234,
            watchers_count: 56,
            forks_count: 7,
            open_issues_count: 3,
            updated_at: "2024-01-05T10:20:30Z".to_string(),
            created_at: "2020-03-01T00:00:00Z".to_string(),
            default_branch: "main".to_string(),
            language: Some("Rust".to_string()),
            owner: Owner {
                login: owner.to_string(),
                avatar_url: format!("https://avatars.githubusercontent.com/{}", owner),
                html_url: format!("https://github.com/{}", owner),
            },
        }
    }

    pub fn search_response(total_count: u64, names: &[&str]) -> SearchResponse {
        SearchResponse {
            total_count,
            incomplete_results: false,
            items: names.iter().map(|n| repository("octocat", n)).collect(),
        }
    }

    pub fn readme(content: &str, encoding: &str) -> Readme {
        Readme {
            name: "README.md".to_string(),
            path: "README.md".to_string(),
            sha: "abc123".to_string(),
            size: content.len() as u64,
            url: "https://api.github.com/repos/octocat/hello/readme".to_string(),
            html_url: "https://github.com/octocat/hello/blob/main/README.md".to_string(),
            git_url: "https://api.github.com/repos/octocat/hello/git/blobs/abc123".to_string(),
            download_url: Some("https://raw.githubusercontent.com/octocat/hello/main/README.md".to_string()),
            kind: "file".to_string(),
            content: content.to_string(),
            encoding: encoding.to_string(),
        }
    }
}
