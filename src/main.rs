#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tablesum::commands;
use tablesum::commands::run::RunOverrides;
use tablesum::types::OutputFormat;
use tablesum::webdriver::BrowserType;
use tablesum::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "tablesum")]
#[command(about = "Sum the numbers in report tables across a list of seeds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Visit every seed's report page and total its table values
    Run {
        /// JSON config file (missing keys use defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seeds to visit, in order (e.g. 89,90,91)
        #[arg(long, value_delimiter = ',')]
        seeds: Option<Vec<u32>>,

        /// Report URL containing a {seed} placeholder
        #[arg(long)]
        url_template: Option<String>,

        /// Browser to use
        #[arg(short, long, value_enum)]
        browser: Option<BrowserType>,

        /// Run browser in visible mode (disables headless)
        #[arg(long = "no-headless")]
        no_headless: bool,

        /// Set viewport size (WIDTHxHEIGHT, e.g., 1920x1080)
        #[arg(long)]
        viewport: Option<String>,

        /// User agent sent with every page request
        #[arg(long)]
        user_agent: Option<String>,

        /// Pause after each extracted seed, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Navigation plus network-idle budget, in milliseconds
        #[arg(long)]
        nav_timeout_ms: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "simple")]
        format: OutputFormat,
    },

    /// Show what the extractor makes of literal cell texts
    Parse {
        /// Cell texts, treated as one table
        #[arg(required = true, allow_hyphen_values = true)]
        texts: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "simple")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Always clean up WebDriver processes before exiting
    GLOBAL_WEBDRIVER_MANAGER.stop_all();

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so report output on stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablesum=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seeds,
            url_template,
            browser,
            no_headless,
            viewport,
            user_agent,
            delay_ms,
            nav_timeout_ms,
            format,
        } => {
            let overrides = RunOverrides {
                config,
                seeds,
                url_template,
                browser,
                no_headless,
                viewport,
                user_agent,
                delay_ms,
                nav_timeout_ms,
            };
            commands::run::handle_run(overrides, format).await?
        }
        Commands::Parse { texts, format } => commands::parse::handle_parse(texts, format).await?,
        Commands::Version => commands::version::handle_version().await?,
    }

    Ok(())
}
