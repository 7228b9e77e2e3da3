//! Bookshow CLI
//!
//! Interactive catalog browser plus one-shot search and export commands.

use bookshow::{AppConfig, BookshowError, CatalogClient, DEFAULT_QUERY};
use clap::{Parser, Subcommand};
use console::style;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use indicatif::HumanDuration;
use ratatui::prelude::*;
use std::io::Write;
use std::time::Instant;

/// Bookshow - browse a public book catalog from the terminal
///
/// Searches the Google Books volumes endpoint and renders results as a
/// paginated card grid.
#[derive(Parser)]
#[command(name = "bookshow")]
#[command(author = "Bookshow Contributors")]
#[command(version)]
#[command(about = "Terminal book catalog browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively with live search
    Browse {
        /// Query issued before any input (default: "best sellers")
        #[arg(short, long)]
        query: Option<String>,

        /// Catalog API key (falls back to BOOKSHOW_API_KEY)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Search once and print the normalized results
    Search {
        /// Free-text query
        query: String,

        /// Maximum results to print
        #[arg(short, long, default_value = "10")]
        max: usize,

        /// Catalog API key (falls back to BOOKSHOW_API_KEY)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Export normalized search results
    Export {
        /// Free-text query
        query: String,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Format (json)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Catalog API key (falls back to BOOKSHOW_API_KEY)
        #[arg(short, long)]
        key: Option<String>,
    },
}

fn main() {
    bookshow::logging::init();
    bookshow::logging::info("MAIN", "Bookshow starting up");

    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_browse(None, None),
        Some(Commands::Browse { query, key }) => cmd_browse(query, key),
        Some(Commands::Search { query, max, key }) => cmd_search(&query, max, key),
        Some(Commands::Export {
            query,
            output,
            format,
            key,
        }) => cmd_export(&query, &output, &format, key),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Interactive browse command implementation
fn cmd_browse(query: Option<String>, key: Option<String>) -> bookshow::Result<()> {
    let config = AppConfig {
        api_key: AppConfig::resolve_key(key),
        initial_query: query.unwrap_or_else(|| DEFAULT_QUERY.to_string()),
    };

    let client = CatalogClient::new(config.api_key.clone())?;
    let mut app = bookshow::tui::App::new(client, &config.initial_query);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// One-shot search command implementation
fn cmd_search(query: &str, max_results: usize, key: Option<String>) -> bookshow::Result<()> {
    println!(
        "{} Searching catalog for '{}'",
        style("→").cyan().bold(),
        style(query).yellow()
    );

    let start = Instant::now();
    let client = CatalogClient::new(AppConfig::resolve_key(key))?;
    let records = client.search(query)?;

    println!();
    println!(
        "Found {} results in {}:",
        style(records.len()).green(),
        style(HumanDuration(start.elapsed())).cyan()
    );
    println!();

    for (i, book) in records.iter().take(max_results).enumerate() {
        println!(
            "{:3}. {} {} {}",
            i + 1,
            style(&book.title).cyan().bold(),
            style(format!("by {}", book.authors)).dim(),
            style(format!(
                "[{} | {} pages | {} ratings]",
                book.rating_display(),
                book.page_count_display(),
                book.ratings_count
            ))
            .dim()
        );
        if !book.categories.is_empty() {
            println!("      {}", style(book.category_tags().join(", ")).magenta());
        }
    }

    Ok(())
}

/// Export command implementation
fn cmd_export(query: &str, output: &str, format: &str, key: Option<String>) -> bookshow::Result<()> {
    if format != "json" {
        return Err(BookshowError::UnsupportedFormat(format.to_string()));
    }

    let client = CatalogClient::new(AppConfig::resolve_key(key))?;
    let records = client.search(query)?;

    let exported: Vec<serde_json::Value> = records
        .iter()
        .map(|book| {
            let mut value = serde_json::to_value(book).unwrap_or_default();
            if let Some(map) = value.as_object_mut() {
                // Resolve missing cover art to the generated placeholder.
                map.insert(
                    "coverSource".to_string(),
                    serde_json::Value::String(book.cover_source()),
                );
            }
            value
        })
        .collect();

    let payload = serde_json::json!({
        "query": query,
        "count": records.len(),
        "books": exported,
    });

    let mut file = std::fs::File::create(output)?;
    file.write_all(serde_json::to_string_pretty(&payload)?.as_bytes())?;

    println!(
        "{} Exported {} records to {}",
        style("✓").green().bold(),
        style(records.len()).green(),
        style(output).yellow()
    );

    Ok(())
}
