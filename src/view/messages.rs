// src/view/messages.rs
// =============================================================================
// Status lines shown around the results: loading, empty, summary and error
// blocks, plus the home banner for the "/" route.
// =============================================================================

use crate::error::AppError;
use crate::format::format_thousands;
use crate::theme::Palette;

pub const LOADING: &str = "Searching repositories...";
pub const NO_RESULTS: &str = "No repositories found. Try adjusting your search terms.";
pub const NO_README: &str = "No README found for this repository.";

pub fn loading(palette: &Palette) -> String {
    palette.muted(LOADING).to_string()
}

pub fn no_results(palette: &Palette) -> String {
    palette.muted(NO_RESULTS).to_string()
}

// "Found 1,234 repositories"
pub fn results_summary(total_count: u64, palette: &Palette) -> String {
    format!("Found {} repositories", palette.stat(&format_thousands(total_count)))
}

// A failed request, with a hint pointing back at the search when there is one
pub fn error_block(title: &str, error: &AppError, palette: &Palette) -> String {
    let mut out = format!("{} {}\n", palette.error("✖"), palette.error(title));
    out.push_str(&format!("  {}\n", error));

    if let AppError::Api { status: 403, .. } = error {
        out.push_str(&palette.muted("  The GitHub API rate limit may have been reached. Try again in a minute.").to_string());
        out.push('\n');
    }

    out
}

pub fn home_banner(palette: &Palette) -> String {
    let mut out = palette.title("GitHub Repository Search").to_string();
    out.push('\n');
    out.push_str(&palette.muted("Search for repositories by name, description, or topics.").to_string());
    out.push_str("\n\n");
    out.push_str("  repo-finder search <QUERY>    one page of results\n");
    out.push_str("  repo-finder browse <QUERY>    page through results interactively\n");
    out.push_str("  repo-finder repo owner/name   repository details and README\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn plain() -> Palette {
        colored::control::set_override(false);
        Palette::new(Theme::Light)
    }

    #[test]
    fn test_messages() {
        let palette = plain();
        assert_eq!(loading(&palette), "Searching repositories...");
        assert_eq!(no_results(&palette), "No repositories found. Try adjusting your search terms.");
        assert_eq!(results_summary(1_234_567, &palette), "Found 1,234,567 repositories");
    }

    #[test]
    fn test_error_block() {
        let error = AppError::Api {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(
            error_block("Error loading repositories", &error, &plain()),
            "✖ Error loading repositories\n  GitHub API error: 500 Internal Server Error\n"
        );
    }

    #[test]
    fn test_rate_limit_hint() {
        let error = AppError::Api {
            status: 403,
            status_text: "Forbidden".to_string(),
        };
        assert!(error_block("Error loading repositories", &error, &plain()).contains("rate limit"));
    }

    #[test]
    fn test_home_banner_mentions_commands() {
        let banner = home_banner(&plain());
        assert!(banner.starts_with("GitHub Repository Search\n"));
        assert!(banner.contains("repo-finder browse <QUERY>"));
    }
}
