// src/view/cards.rs
// =============================================================================
// Repository views: the search result card, the detail header and the
// statistics block of the detail page.
//
// Everything here returns a String and never prints, so the command
// handlers decide where output goes and tests can compare text directly.
// =============================================================================

use crate::format::{format_count, format_date_long, format_date_short, format_thousands};
use crate::github::{Repository, SearchResponse};
use crate::route::Route;
use crate::theme::Palette;
use super::messages::{no_results, results_summary};

// One search result:
//
//   rust-lang/rust
//   by rust-lang
//   Empowering everyone to build reliable and efficient software.
//   ⭐ 95.2k  🍴 12.3k  👀 1.5k  Rust  Updated Jan 5, 2024
//   → /repository/rust-lang/rust
pub fn repository_card(repo: &Repository, palette: &Palette) -> String {
    let mut lines = Vec::with_capacity(5);

    lines.push(palette.title(&repo.name).to_string());
    lines.push(palette.muted(&format!("by {}", repo.owner.login)).to_string());

    if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(description.trim().to_string());
    }

    let mut stats = vec![
        format!("⭐ {}", palette.stat(&format_count(repo.stargazers_count))),
        format!("🍴 {}", palette.stat(&format_count(repo.forks_count))),
        format!("👀 {}", palette.stat(&format_count(repo.watchers_count))),
    ];
    if let Some(language) = &repo.language {
        stats.push(language.clone());
    }
    stats.push(format!("Updated {}", format_date_short(&repo.updated_at)));
    lines.push(stats.join("  "));

    let route = Route::Repository {
        owner: repo.owner.login.clone(),
        repo: repo.name.clone(),
    };
    lines.push(palette.link(&format!("→ {}", route.path())).to_string());

    lines.join("\n")
}

// The summary line always comes first, then either the cards or the
// empty-state message
pub fn search_results(response: &SearchResponse, palette: &Palette) -> String {
    let mut out = results_summary(response.total_count, palette);

    if response.items.is_empty() {
        out.push('\n');
        out.push_str(&no_results(palette));
        return out;
    }

    for repo in &response.items {
        out.push_str("\n\n");
        out.push_str(&repository_card(repo, palette));
    }
    out
}

pub fn detail_header(repo: &Repository, palette: &Palette) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} / {}\n",
        palette.muted(&repo.owner.login),
        palette.title(&repo.name)
    ));
    if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_str(description.trim());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("{}\n", repo.full_name));
    out.push_str(&format!("Repository: {}\n", palette.link(&repo.html_url)));
    out.push_str(&format!("Owner:      {}\n", palette.link(&repo.owner.html_url)));

    out
}

// Exact numbers here, unlike the abbreviated counts on cards
pub fn stats_block(repo: &Repository, palette: &Palette) -> String {
    let rows = [
        ("Stars", format_thousands(repo.stargazers_count)),
        ("Forks", format_thousands(repo.forks_count)),
        ("Watchers", format_thousands(repo.watchers_count)),
        ("Open Issues", format_thousands(repo.open_issues_count)),
        ("Default Branch", repo.default_branch.clone()),
        ("Last Updated", format_date_long(&repo.updated_at)),
    ];

    let mut out = palette.heading("Statistics").to_string();
    out.push('\n');
    for (label, value) in rows {
        out.push_str(&format!("  {:<16}{}\n", label, palette.stat(&value)));
    }
    out
}
