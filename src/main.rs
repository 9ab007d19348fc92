//! ghmarks: search GitHub repositories and users, keep bookmarks
//!
//! Usage:
//!   ghmarks                          - Start the GUI
//!   ghmarks search <repos|users> <term>  - One-shot search, printed to stdout
//!   ghmarks help                     - Show help

mod app;
mod backend;
mod bookmarks;
mod config;
mod presenter;
mod search;
mod ui;

use app::GhMarks;
use backend::api::GitHubClient;
use backend::types::SearchKind;
use config::Config;
use iced::{window, Size, Task};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // RUST_LOG controls verbosity
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env();

    if args.len() > 1 {
        handle_cli_command(&args[1], &args[2..], &config);
        return Ok(());
    }

    start_gui(config)
}

fn handle_cli_command(cmd: &str, rest: &[String], config: &Config) {
    match cmd {
        "search" | "s" => {
            let Some((kind, words)) = rest.split_first() else {
                eprintln!("Usage: ghmarks search <repos|users> <term>");
                return;
            };
            let kind: SearchKind = match kind.parse() {
                Ok(kind) => kind,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return;
                }
            };
            let term = words.join(" ");
            if term.is_empty() {
                println!("Search for something!");
                return;
            }
            run_search(config, kind, &term);
        }
        "help" | "--help" | "-h" => {
            println!("ghmarks - GitHub search and bookmarks\n");
            println!("Usage: ghmarks [command]\n");
            println!("Commands:");
            println!("  (none)                        Start the GUI");
            println!("  search <repos|users> <term>   Search once and print the results");
            println!("  help                          Show this help message");
            println!("\nEnvironment:");
            println!("  GHMARKS_API_BASE      API base URL (default {})", config::DEFAULT_API_BASE);
            println!("  GHMARKS_DEBOUNCE_MS   Quiet period before a search (default {})", config::DEFAULT_DEBOUNCE_MS);
            println!("  GHMARKS_TIMEOUT_SECS  Request timeout (default {})", config::DEFAULT_TIMEOUT_SECS);
            println!("  GHMARKS_USER_AGENT    User-Agent header");
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run 'ghmarks help' for usage");
        }
    }
}

fn run_search(config: &Config, kind: SearchKind, term: &str) {
    let client = match GitHubClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return;
        }
    };

    match rt.block_on(client.search(kind, term)) {
        Ok(items) if items.is_empty() => println!("No Results for \"{}\"", term),
        Ok(items) => {
            println!("Search results for \"{}\"\n", term);
            for item in &items {
                println!("{}\n", presenter::present(item, false));
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn start_gui(config: Config) -> iced::Result {
    let client = match GitHubClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Cannot start: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting ghmarks against {}", config.api_base);

    iced::application("GitHub Bookmarks", GhMarks::update, GhMarks::view)
        .theme(GhMarks::theme)
        .window(window::Settings {
            size: Size::new(760.0, 640.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || (GhMarks::new(&config, client), Task::none()))
}
