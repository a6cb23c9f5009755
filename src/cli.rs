// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described with structs and
// enums, and clap generates the parsing, validation and --help output.
//
// Commands:
//   search <QUERY>   one page of results, printed once
//   browse <QUERY>   interactive paging through results
//   repo <TARGET>    details and README of one repository
//   open <PATH>      show the page for an application route
//   theme [ACTION]   show or change the saved colour theme
// =============================================================================

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pagination::LayoutClass;
use crate::readme::ReadmeMode;
use crate::search::{Order, PerPage, Sort};

#[derive(Parser, Debug)]
#[command(
    name = "repo-finder",
    version,
    about = "Search GitHub repositories and read their READMEs from the terminal",
    long_about = "repo-finder searches public GitHub repositories through the REST API, \
                  pages through the results, and shows repository details with the README \
                  rendered for the terminal."
)]
pub struct Cli {
    /// Configuration file (default: <config dir>/repo-finder/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repositories and print one page of results
    ///
    /// Example: repo-finder search "web framework" --sort forks --per-page 10
    Search {
        #[command(flatten)]
        search: SearchArgs,

        /// Page of results to show
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Print the raw search response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search repositories and page through the results interactively
    ///
    /// Type n/p/f/l or a page number to move, s <query> to search again, q to quit.
    Browse {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Show a repository's details and README
    ///
    /// Example: repo-finder repo rust-lang/rust --readme raw
    Repo {
        /// owner/repo, /repository/owner/repo, or https://github.com/owner/repo
        target: String,

        /// How to show the README
        #[arg(long, value_enum, default_value_t = ReadmeMode::Rendered)]
        readme: ReadmeMode,

        /// Print the repository metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the page for an application route
    ///
    /// Example: repo-finder open /repository/tokio-rs/tokio
    Open {
        /// "/" or "/repository/{owner}/{repo}"
        path: String,
    },

    /// Show or change the colour theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

// Search form fields shared by `search` and `browse`
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search terms (name, description, topics, or GitHub qualifiers)
    pub query: String,

    #[arg(long, value_enum, default_value_t = Sort::Stars)]
    pub sort: Sort,

    #[arg(long, value_enum, default_value_t = Order::Desc)]
    pub order: Order,

    /// Results per page
    #[arg(long, value_enum, default_value_t = PerPage::TwentyFive)]
    pub per_page: PerPage,

    /// Pagination strip layout
    #[arg(long, value_enum, default_value_t = LayoutChoice::Auto)]
    pub layout: LayoutChoice,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChoice {
    /// Pick from the terminal width
    Auto,
    Compact,
    Expanded,
}

impl LayoutChoice {
    pub fn resolve(self) -> LayoutClass {
        match self {
            LayoutChoice::Auto => LayoutClass::detect(),
            LayoutChoice::Compact => LayoutClass::Compact,
            LayoutChoice::Expanded => LayoutClass::Expanded,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Light,
    Dark,
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["repo-finder", "search", "tokio"]).unwrap();
        match cli.command {
            Commands::Search { search, page, json } => {
                assert_eq!(search.query, "tokio");
                assert_eq!(search.sort, Sort::Stars);
                assert_eq!(search.order, Order::Desc);
                assert_eq!(search.per_page, PerPage::TwentyFive);
                assert_eq!(search.layout, LayoutChoice::Auto);
                assert_eq!(page, 1);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_options() {
        let cli = Cli::try_parse_from([
            "repo-finder", "search", "web framework", "--sort", "updated", "--order", "asc",
            "--per-page", "50", "--page", "3", "--layout", "compact", "--json", "--no-color",
        ])
        .unwrap();

        assert!(cli.no_color);
        match cli.command {
            Commands::Search { search, page, json } => {
                assert_eq!(search.sort, Sort::Updated);
                assert_eq!(search.order, Order::Asc);
                assert_eq!(search.per_page, PerPage::Fifty);
                assert_eq!(search.layout.resolve(), LayoutClass::Compact);
                assert_eq!(page, 3);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_per_page_domain() {
        assert!(Cli::try_parse_from(["repo-finder", "search", "x", "--per-page", "30"]).is_err());
    }

    #[test]
    fn test_repo_and_theme() {
        let cli = Cli::try_parse_from(["repo-finder", "repo", "rust-lang/rust", "--readme", "none"]).unwrap();
        assert!(matches!(cli.command, Commands::Repo { readme: ReadmeMode::None, .. }));

        let cli = Cli::try_parse_from(["repo-finder", "theme"]).unwrap();
        assert!(matches!(cli.command, Commands::Theme { action: ThemeAction::Show }));

        let cli = Cli::try_parse_from(["repo-finder", "--config", "/tmp/c.toml", "theme", "toggle"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Theme { action: ThemeAction::Toggle }));
    }
}
