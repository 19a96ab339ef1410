//! CLI administration tool for shortlink-registry.
//!
//! Works directly against the file-backed store, so links created here are
//! served by a server started with the same `DATA_DIR` and `STORAGE_KEY`.
//!
//! # Usage
//!
//! ```bash
//! # Create a link valid for 60 minutes with a custom code
//! cargo run --bin admin -- create https://example.com --validity 60 --code abc123
//!
//! # List all links
//! cargo run --bin admin -- list
//!
//! # Show one link with its click history
//! cargo run --bin admin -- show abc123
//!
//! # Resolve a code (records a click)
//! cargo run --bin admin -- resolve abc123 --source cli
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_DIR`: store directory (default: `./data`)
//! - `STORAGE_KEY`: key holding the collection (default: `urlData`)
//! - `LOG_SINK_URL` / `LOG_SINK_TOKEN` / `LOG_SINK_STACK`: forward events remotely

use shortlink_registry::application::services::{EventReporter, LinkRegistry};
use shortlink_registry::domain::entities::{ClickContext, LinkRecord, LinkStatus, NewLink};
use shortlink_registry::domain::log_event::Package;
use shortlink_registry::domain::repositories::KeyValueStore;
use shortlink_registry::error::{RegistryError, ResolveError};
use shortlink_registry::infrastructure::log_sink::HttpLogSink;
use shortlink_registry::infrastructure::persistence::FileStore;
use shortlink_registry::{config, utils::validators::parse_validity};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// CLI tool for managing shortlink-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store directory (overrides DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// URL to shorten (http or https)
        url: String,

        /// Validity in minutes (default: DEFAULT_VALIDITY_MINUTES or 30)
        #[arg(short, long)]
        validity: Option<String>,

        /// Custom short code (3-10 letters or digits)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List all links
    List,

    /// Show one link with its click history
    Show {
        code: String,
    },

    /// Resolve a short code, recording a click
    Resolve {
        code: String,

        /// Click source (default: Direct)
        #[arg(short, long)]
        source: Option<String>,

        /// Click location (default: Unknown Location)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Show registry statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let data_dir = cli
        .data_dir
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("./data"));
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&data_dir)
            .await
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?,
    );

    let stack = config.sink_stack()?;
    let (reporter, worker) = match &config.log_sink_url {
        Some(raw) => {
            let endpoint = Url::parse(raw).context("Invalid LOG_SINK_URL")?;
            let sink = Arc::new(HttpLogSink::new(endpoint, config.log_sink_token.clone()));
            let (reporter, handle) =
                EventReporter::spawn(stack, sink, config.log_queue_capacity);
            (reporter, Some(handle))
        }
        None => (EventReporter::disabled(stack), None),
    };

    let registry = LinkRegistry::new(store, config.storage_key.clone(), reporter)
        .with_default_validity(config.default_validity_minutes);
    let base_url = config.base_url.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Create {
            url,
            validity,
            code,
        } => create_link(&registry, &base_url, url, validity, code).await,
        Commands::List => list_links(&registry).await,
        Commands::Show { code } => show_link(&registry, &base_url, &code).await,
        Commands::Resolve {
            code,
            source,
            location,
        } => resolve_link(&registry, &code, source, location).await,
        Commands::Stats => handle_stats(&registry).await,
    };

    // Dropping the registry closes the queue so the worker can flush.
    drop(registry);
    if let Some(handle) = worker
        && let Err(e) = handle.await
    {
        eprintln!("{} {}", "⚠️  Log worker ended abnormally:".yellow(), e);
    }

    result
}

async fn create_link(
    registry: &LinkRegistry,
    base_url: &str,
    url: String,
    validity: Option<String>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let mut new_link = NewLink::new(url);
    if let Some(raw) = validity.as_deref().filter(|v| !v.trim().is_empty()) {
        match parse_validity(raw) {
            Ok(minutes) => new_link = new_link.with_validity(minutes),
            Err(e) => {
                registry
                    .reporter()
                    .warn(Package::Handler, format!("Validation failed: {e}"));
                println!("{} {}", "❌".red(), e.to_string().red());
                return Ok(());
            }
        }
    }
    if let Some(code) = code {
        new_link = new_link.with_custom_code(code);
    }

    let record = match registry.create(new_link, Utc::now()).await {
        Ok(record) => record,
        Err(RegistryError::Validation(e)) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to create link"),
    };

    println!("{}", "✅ Link created".green().bold());
    println!();
    print_record(&record, base_url);
    println!();

    Ok(())
}

/// Lists every link with its status.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code        Status    Clicks  Expires              URL
///   ───────────────────────────────────────────────────────────────────────────
///   abc123      ACTIVE    3       2025-03-01 13:00     https://example.com
/// ```
async fn list_links(registry: &LinkRegistry) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let records = registry
        .list_all()
        .await
        .context("Failed to load links")?;

    if records.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<11} {:<9} {:<7} {:<20} {}",
        "Code".bright_white().bold(),
        "Status".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Expires".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for record in &records {
        println!(
            "  {:<11} {:<9} {:<7} {:<20} {}",
            record.short_code.cyan(),
            status_label(record.status_at(now)),
            record.click_count(),
            record
                .expires_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_link(registry: &LinkRegistry, base_url: &str, code: &str) -> Result<()> {
    let record = registry
        .find(code)
        .await
        .context("Failed to load links")?
        .with_context(|| format!("No link with code '{code}'"))?;

    print_record(&record, base_url);
    println!(
        "  Status:    {}",
        status_label(record.status_at(Utc::now()))
    );
    println!();

    if record.clicks.is_empty() {
        println!("{}", "  No clicks yet".yellow());
    } else {
        println!(
            "  {:<20} {:<25} {}",
            "Time".bright_white().bold(),
            "Source".bright_white().bold(),
            "Location".bright_white().bold()
        );
        println!("  {}", "─".repeat(60).bright_black());
        for click in &record.clicks {
            println!(
                "  {:<20} {:<25} {}",
                click.timestamp.format("%Y-%m-%d %H:%M:%S"),
                click.source,
                click.location
            );
        }
    }
    println!();

    Ok(())
}

async fn resolve_link(
    registry: &LinkRegistry,
    code: &str,
    source: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let context = ClickContext::new(source.as_deref(), location.as_deref());

    match registry.resolve(code, Utc::now(), &context).await {
        Ok(target) => {
            println!("  {} {}", "→".green().bold(), target.url.bright_white());
            println!(
                "  Clicks: {}",
                target.click_count.to_string().bright_green().bold()
            );
        }
        Err(ResolveError::NotFound { code }) => {
            println!("{}", format!("❌ No link with code '{code}'").red());
        }
        Err(ResolveError::Expired { code, expires_at }) => {
            println!(
                "{}",
                format!("⌛ Link '{code}' expired at {expires_at}").yellow()
            );
        }
        Err(e) => return Err(e).context("Failed to resolve link"),
    }

    Ok(())
}

/// Displays registry statistics.
async fn handle_stats(registry: &LinkRegistry) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = registry
        .summarize(Utc::now())
        .await
        .context("Failed to load links")?;

    println!(
        "  Links:         {}",
        summary.total_links.to_string().bright_green().bold()
    );
    println!(
        "  Active:        {}",
        summary.active_links.to_string().bright_green().bold()
    );
    println!(
        "  Expired:       {}",
        summary.expired_links.to_string().bright_black().bold()
    );
    println!(
        "  Clicks:        {}",
        summary.total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

fn print_record(record: &LinkRecord, base_url: &str) {
    println!(
        "  Short URL: {}",
        format!("{}/{}", base_url, record.short_code)
            .bright_yellow()
            .bold()
    );
    println!("  Target:    {}", record.original_url.cyan());
    println!(
        "  Created:   {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Expires:   {} ({} min)",
        record.expires_at.format("%Y-%m-%d %H:%M:%S"),
        record.validity_minutes
    );
}

fn status_label(status: LinkStatus) -> ColoredString {
    match status {
        LinkStatus::Active => "ACTIVE".green(),
        LinkStatus::Expired => "EXPIRED".red(),
    }
}
