// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging, parse command-line arguments, load configuration
// 2. Pick the colour palette from the saved theme
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = failure shown to the user,
//    2 = unexpected error)
//
// Rust concepts used:
// - async/await: the GitHub requests and the interactive stdin loop
// - Result<T, E> with anyhow: `?` plus .context() for readable errors
// - match: pattern matching on subcommands and on search state
// =============================================================================

// Module declarations - tells Rust about our other source files
mod browse;     // src/browse.rs - commands typed at the browse prompt
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - config.toml and defaults
mod error;      // src/error.rs - typed errors
mod format;     // src/format.rs - numbers and dates for humans
mod github;     // src/github/ - GitHub REST API client
mod logging;    // src/logging.rs - tracing subscriber
mod pagination; // src/pagination/ - page markers and the pagination strip
mod readme;     // src/readme/ - README decoding and rendering
mod route;      // src/route.rs - "/" and "/repository/{owner}/{repo}"
mod search;     // src/search/ - search parameters and orchestrator
mod theme;      // src/theme.rs - light/dark theme and palette
mod view;       // src/view/ - terminal views

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use browse::BrowseCommand;
use cli::{Cli, Commands, SearchArgs, ThemeAction};
use config::AppConfig;
use github::{GitHubClient, Readme, Repository};
use pagination::{Affordance, LayoutClass, PaginationControl, PaginationView};
use readme::{ReadmeMode, RenderOptions};
use route::Route;
use search::{SearchOrchestrator, SearchParams, SearchState};
use theme::{FileThemeStore, Palette, Theme, ThemeStore};

#[tokio::main]
async fn main() {
    logging::init_logging();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error: print the whole context chain and exit with 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = success
//   Ok(1) = a request failed and the error was shown
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let store = theme_store(&config);
    let palette = Palette::new(store.load());
    debug!(theme = %palette.theme(), "palette selected");

    match cli.command {
        Commands::Search { search, page, json } => handle_search(&config, &palette, &search, page, json).await,
        Commands::Browse { search } => handle_browse(&config, &palette, &search).await,
        Commands::Repo { target, readme, json } => {
            let (owner, repo) = parse_target(&target)?;
            handle_repo(&config, &palette, &owner, &repo, readme, json).await
        }
        Commands::Open { path } => match Route::parse(&path)? {
            Route::Home => {
                println!("{}", view::home_banner(&palette));
                Ok(0)
            }
            Route::Repository { owner, repo } => {
                handle_repo(&config, &palette, &owner, &repo, ReadmeMode::Rendered, false).await
            }
        },
        Commands::Theme { action } => handle_theme(&store, action),
    }
}

fn theme_store(config: &AppConfig) -> FileThemeStore {
    match &config.theme_file {
        Some(path) => FileThemeStore::new(path.clone()),
        None => FileThemeStore::default_location(),
    }
}

// `repo` accepts route paths as well as owner/repo and GitHub URLs
fn parse_target(target: &str) -> Result<(String, String)> {
    if target.trim().starts_with("/repository/") {
        return match Route::parse(target)? {
            Route::Repository { owner, repo } => Ok((owner, repo)),
            Route::Home => anyhow::bail!("Not a repository route: {}", target),
        };
    }
    Ok(github::parse_repo_target(target)?)
}

fn search_params(args: &SearchArgs) -> Result<SearchParams> {
    Ok(SearchParams::new(&args.query, args.sort, args.order, args.per_page)?)
}

// Handles the 'search' subcommand: one request, one page printed
async fn handle_search(
    config: &AppConfig,
    palette: &Palette,
    args: &SearchArgs,
    page: u32,
    json: bool,
) -> Result<i32> {
    let client = GitHubClient::new(config).context("Failed to create GitHub client")?;
    let layout = args.layout.resolve();

    let mut orchestrator = SearchOrchestrator::new(config.max_pages);
    orchestrator.submit(search_params(args)?);
    if page > 1 {
        // Only the latest request is run, so this replaces the page-1 request
        orchestrator.change_page(page);
    }

    if !json {
        eprintln!("{}", view::loading(palette));
    }
    orchestrator.run(&client).await;

    print_search_state(&orchestrator, layout, palette, json)
}

// Handles the 'browse' subcommand: the orchestrator lives for the whole
// session and every line typed on stdin is a click on the pagination strip
async fn handle_browse(config: &AppConfig, palette: &Palette, args: &SearchArgs) -> Result<i32> {
    let client = GitHubClient::new(config).context("Failed to create GitHub client")?;
    let layout = args.layout.resolve();

    let mut orchestrator = SearchOrchestrator::new(config.max_pages);
    orchestrator.submit(search_params(args)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if orchestrator.pending().is_some() {
            eprintln!("{}", view::loading(palette));
            orchestrator.run(&client).await;
            print_search_state(&orchestrator, layout, palette, false)?;
            eprintln!("{}", palette.muted(browse::HELP));
        }

        let strip = pagination_strip(&orchestrator, layout);

        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };

        match BrowseCommand::parse(&line) {
            None => continue,
            Some(BrowseCommand::Quit) => break,
            Some(BrowseCommand::Help) => eprintln!("{}", palette.muted(browse::HELP)),
            Some(BrowseCommand::Search(query)) => {
                let Some(current) = orchestrator.params().cloned() else {
                    continue;
                };
                match SearchParams::new(&query, current.sort, current.order, current.per_page) {
                    Ok(params) => {
                        orchestrator.submit(params);
                    }
                    Err(e) => eprintln!("{}", palette.error(&e.to_string())),
                }
            }
            Some(BrowseCommand::Click(affordance)) => {
                let issued = strip
                    .as_ref()
                    .and_then(|view| orchestrator.handle_click(view, affordance));

                if issued.is_none() {
                    eprintln!("{}", palette.muted(&unavailable_message(affordance, strip.as_ref())));
                }
            }
        }
    }

    Ok(0)
}

fn unavailable_message(affordance: Affordance, strip: Option<&PaginationView>) -> String {
    match (affordance, strip) {
        (Affordance::Page(page), Some(strip)) => {
            let shown: Vec<String> = strip.visible_pages().iter().map(u32::to_string).collect();
            format!("Page {} is not in the strip (pages shown: {})", page, shown.join(", "))
        }
        _ => "Not available on this page".to_string(),
    }
}

// Both layouts are built from the same props; the terminal's class picks one
fn pagination_strip(orchestrator: &SearchOrchestrator, layout: LayoutClass) -> Option<PaginationView> {
    let props = orchestrator.pagination_props()?;
    let (compact, expanded) = PaginationControl::render_both(&props)?;
    Some(match layout {
        LayoutClass::Compact => compact,
        LayoutClass::Expanded => expanded,
    })
}

// Prints whatever the orchestrator currently displays and returns the exit code
fn print_search_state(
    orchestrator: &SearchOrchestrator,
    layout: LayoutClass,
    palette: &Palette,
    json: bool,
) -> Result<i32> {
    match orchestrator.state() {
        SearchState::Loaded(response) => {
            if json {
                println!("{}", serde_json::to_string_pretty(response)?);
                return Ok(0);
            }

            println!("{}", view::search_results(response, palette));

            if let Some(strip) = pagination_strip(orchestrator, layout) {
                println!();
                println!("{}", strip.to_line(palette));
            }
            Ok(0)
        }
        SearchState::Failed(e) => {
            eprint!("{}", view::error_block("Error loading repositories", e, palette));
            Ok(1)
        }
        SearchState::Idle | SearchState::Loading => Ok(0),
    }
}

// Handles the 'repo' subcommand (and 'open' for repository routes)
async fn handle_repo(
    config: &AppConfig,
    palette: &Palette,
    owner: &str,
    repo: &str,
    mode: ReadmeMode,
    json: bool,
) -> Result<i32> {
    let client = GitHubClient::new(config).context("Failed to create GitHub client")?;
    let want_readme = mode != ReadmeMode::None && !json;

    // Both requests go out at once
    let (repository, readme_result) = futures::join!(client.get_repository(owner, repo), async {
        if want_readme {
            Some(client.get_readme(owner, repo).await)
        } else {
            None
        }
    });

    let repository = match repository {
        Ok(repository) => repository,
        Err(e) => {
            let title = if e.is_not_found() {
                "Repository not found"
            } else {
                "Error loading repository"
            };
            eprint!("{}", view::error_block(title, &e, palette));
            return Ok(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&repository)?);
        return Ok(0);
    }

    println!("{}", view::detail_header(&repository, palette));
    println!("{}", view::stats_block(&repository, palette));

    match readme_result {
        None => Ok(0),
        Some(Ok(readme)) => Ok(print_readme(&repository, &readme, mode, palette)),
        Some(Err(e)) if e.is_not_found() => {
            println!("{}", palette.muted(view::NO_README));
            println!("View the repository on GitHub: {}", palette.link(&readme::fallback_url(&repository)));
            Ok(0)
        }
        Some(Err(e)) => {
            eprint!("{}", view::error_block("Error loading README", &e, palette));
            eprintln!("View it on GitHub: {}", palette.link(&readme::fallback_url(&repository)));
            Ok(1)
        }
    }
}

fn print_readme(repository: &Repository, readme: &Readme, mode: ReadmeMode, palette: &Palette) -> i32 {
    let content = readme::decode_content(readme);

    println!(
        "{} {}",
        palette.heading(&readme.name),
        palette.muted(&format!("({} KB)", readme::size_kb(&content)))
    );
    println!("{}\n", palette.link(&readme::blob_url(repository)));

    if content == readme::DECODE_ERROR_PLACEHOLDER {
        eprintln!("{}", palette.error(&content));
        eprintln!("View it on GitHub: {}", palette.link(&readme::fallback_url(repository)));
        return 1;
    }

    match mode {
        ReadmeMode::Rendered => print!("{}", readme::render_terminal(&content, palette)),
        ReadmeMode::Raw => println!("{}", content),
        ReadmeMode::Html => {
            let options = RenderOptions::for_repository(&repository.html_url);
            println!("{}", readme::render_html(&content, &options));
        }
        ReadmeMode::None => {}
    }
    0
}

// Handles the 'theme' subcommand
fn handle_theme(store: &FileThemeStore, action: ThemeAction) -> Result<i32> {
    let theme = match action {
        ThemeAction::Show => store.load(),
        ThemeAction::Light => save_theme(store, Theme::Light)?,
        ThemeAction::Dark => save_theme(store, Theme::Dark)?,
        ThemeAction::Toggle => theme::toggle_theme(store).context("Failed to save theme")?,
    };

    let palette = Palette::new(theme);
    println!("Theme: {}", palette.heading(theme.as_str()));
    if action != ThemeAction::Show {
        println!("{}", palette.muted(&format!("Saved to {}", store.path().display())));
    }
    Ok(0)
}

fn save_theme(store: &FileThemeStore, theme: Theme) -> Result<Theme> {
    store.save(theme).context("Failed to save theme")?;
    Ok(theme)
}
