//! SEO Scout main entry point
//!
//! This is the command-line front end: it renders session snapshots as plain
//! text and drives the session controller.

use anyhow::Context;
use clap::{Parser, Subcommand};
use seo_scout::config::{load_config, Config};
use seo_scout::credentials::open_store;
use seo_scout::output::{format_notification, format_progress, print_results};
use seo_scout::{
    HttpBackend, SessionController, SessionSettings, SessionSnapshot, SqliteCredentialStore,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

type Controller = SessionController<HttpBackend, SqliteCredentialStore>;

/// SEO Scout: crawl a site and get an AI-written SEO report
///
/// The crawl and the report are produced by a remote backend; this tool
/// submits the crawl, follows its progress and shows the report.
#[derive(Parser, Debug)]
#[command(name = "seo-scout")]
#[command(version)]
#[command(about = "Crawl a website and generate an AI SEO report", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site, then generate the report and clear the backend data
    Crawl {
        /// Absolute URL of the site to crawl
        url: String,

        /// Maximum pages to crawl (1-100)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
        max_pages: Option<u32>,

        /// Directory to save the report into
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// Generate a report from data the backend already holds
    Report {
        /// Directory to save the report into
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// Delete all analysis data on the backend
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Save the OpenAI API key used for report generation
    SetKey {
        /// The API key
        key: String,
    },

    /// Show the per-page analysis results held by the backend
    Results,

    /// Print the effective configuration and exit
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::ShowConfig => {
            handle_show_config(&config);
            Ok(())
        }
        Command::Crawl {
            url,
            max_pages,
            export,
        } => {
            let max_pages = max_pages.unwrap_or(config.crawl.default_max_pages);
            let controller = build_controller(&config)?;
            handle_crawl(controller, &url, max_pages, export.as_deref(), cli.quiet).await
        }
        Command::Report { export } => {
            let controller = build_controller(&config)?;
            handle_report(controller, export.as_deref(), cli.quiet).await
        }
        Command::Clear { yes } => {
            let controller = build_controller(&config)?;
            handle_clear(controller, yes, cli.quiet).await
        }
        Command::SetKey { key } => {
            let mut controller = build_controller(&config)?;
            controller.save_credential(&key)?;
            if !cli.quiet {
                println!("✓ API key saved to {}", config.credentials.store_path);
            }
            Ok(())
        }
        Command::Results => {
            let mut controller = build_controller(&config)?;
            controller.fetch_results().await?;
            print_results(&controller.snapshot().results);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_scout=info,warn"),
            1 => EnvFilter::new("seo_scout=debug,info"),
            2 => EnvFilter::new("seo_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = seo_scout::config::load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => Ok(load_config(None)?),
    }
}

fn build_controller(config: &Config) -> anyhow::Result<Controller> {
    let backend = HttpBackend::from_config(&config.backend)?;
    tracing::debug!("Backend: {}", backend.base_url());

    let store = open_store(Path::new(&config.credentials.store_path)).with_context(|| {
        format!(
            "failed to open credential store {}",
            config.credentials.store_path
        )
    })?;

    Ok(SessionController::new(
        backend,
        store,
        SessionSettings::from(config),
    )?)
}

/// Prints progress lines and notifications as snapshots arrive
///
/// Ends once the controller (and with it the sender) is dropped.
fn spawn_renderer(mut rx: watch::Receiver<SessionSnapshot>, quiet: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_progress = None;
        let mut last_notification = None;

        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();

            if let Some(task) = &snapshot.task {
                let line = format_progress(task);
                if !quiet && last_progress.as_ref() != Some(&line) {
                    println!("{}", line);
                    last_progress = Some(line);
                }
            }

            if let Some(notification) = snapshot.visible_notification().cloned() {
                if last_notification.as_ref() != Some(&notification) {
                    if !quiet || notification.is_error() {
                        eprintln!("{}", format_notification(&notification));
                    }
                    last_notification = Some(notification);
                }
            }

            if snapshot.credential_prompt && !quiet {
                eprintln!("Run `seo-scout set-key <KEY>` to save your OpenAI API key.");
            }
        }
    })
}

/// Handles `crawl`: the full crawl → report → clear flow
async fn handle_crawl(
    mut controller: Controller,
    url: &str,
    max_pages: u32,
    export: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let renderer = spawn_renderer(controller.subscribe(), quiet);

    let outcome = tokio::select! {
        result = controller.submit_crawl(url, max_pages) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    let outcome = match outcome {
        Some(result) => result,
        None => {
            controller.reset();
            drop(controller);
            let _ = renderer.await;
            anyhow::bail!("interrupted; the crawl may still be running on the backend");
        }
    };

    let exported = match (&outcome, export) {
        (Ok(_), Some(dir)) => Some(controller.export_report(dir)?),
        _ => None,
    };

    drop(controller);
    let _ = renderer.await;

    let report = outcome?;
    println!("\n=== SEO Report ===\n");
    println!("{}", report.text);
    if let Some(path) = exported {
        println!("\n✓ Report saved to {}", path.display());
    }

    Ok(())
}

/// Handles `report`: manual report generation
async fn handle_report(
    mut controller: Controller,
    export: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let renderer = spawn_renderer(controller.subscribe(), quiet);

    let outcome = controller.generate_report().await;
    let exported = match (&outcome, export) {
        (Ok(_), Some(dir)) => Some(controller.export_report(dir)?),
        _ => None,
    };

    drop(controller);
    let _ = renderer.await;

    let report = outcome?;
    println!("\n=== SEO Report ===\n");
    println!("{}", report.text);
    if let Some(path) = exported {
        println!("\n✓ Report saved to {}", path.display());
    }

    Ok(())
}

/// Handles `clear`: asks for confirmation, then clears backend data
async fn handle_clear(mut controller: Controller, yes: bool, quiet: bool) -> anyhow::Result<()> {
    if !yes && !confirm("Delete all analysis data on the backend? This cannot be undone.")? {
        println!("Cancelled");
        return Ok(());
    }

    let renderer = spawn_renderer(controller.subscribe(), quiet);
    let outcome = controller.clear_remote_data().await;

    drop(controller);
    let _ = renderer.await;

    Ok(outcome?)
}

/// Handles `show-config`: prints the effective configuration
fn handle_show_config(config: &Config) {
    println!("=== SEO Scout Configuration ===\n");

    println!("Backend:");
    println!("  Base URL: {}", config.backend.base_url);
    println!(
        "  Connect timeout: {}s",
        config.backend.connect_timeout_secs
    );

    println!("\nPolling:");
    println!("  Interval: {}ms", config.polling.interval_ms);

    println!("\nNotifications:");
    println!("  Visible for: {}ms", config.notifications.ttl_ms);

    println!("\nCredentials:");
    println!("  Store: {}", config.credentials.store_path);
    println!("  Key: {}", config.credentials.key);

    println!("\nCrawl:");
    println!("  Default max pages: {}", config.crawl.default_max_pages);
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
