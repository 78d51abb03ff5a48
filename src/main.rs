// Copyright 2026 ReefGuard Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_imports)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod bounds;
mod cli;
mod config;
mod error;
mod events;
mod grid;
mod remote;
mod session;

use bounds::{BoundingBox, DEFAULT_VIEWPORT};

#[derive(Parser)]
#[command(
    name = "reefguard",
    about = "ReefGuard — ocean health grid scanner and restoration planner",
    version,
    after_help = "Run 'reefguard <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Viewport bounds shared by the scan and rank commands. The scanned area is
/// always a fixed-span box centered on this viewport.
#[derive(Args)]
struct ViewportArgs {
    /// Southern edge of the viewport, degrees latitude
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VIEWPORT.min_lat)]
    min_lat: f64,

    /// Northern edge of the viewport, degrees latitude
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VIEWPORT.max_lat)]
    max_lat: f64,

    /// Western edge of the viewport, degrees longitude
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VIEWPORT.min_lon)]
    min_lon: f64,

    /// Eastern edge of the viewport, degrees longitude
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VIEWPORT.max_lon)]
    max_lon: f64,
}

impl ViewportArgs {
    fn to_bbox(&self) -> Result<BoundingBox> {
        Ok(BoundingBox::new(
            self.min_lat,
            self.max_lat,
            self.min_lon,
            self.max_lon,
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the viewport's fixed-span area and report sector health
    Scan {
        #[command(flatten)]
        viewport: ViewportArgs,
        /// Also compute the 3x3 neighborhood-average overlay
        #[arg(long)]
        smooth: bool,
        /// Write the health map to a file
        #[arg(long, num_args = 0..=1, default_missing_value = "reef_health_map.txt")]
        export: Option<std::path::PathBuf>,
        /// Base URL of the ocean data services
        #[arg(long)]
        service_url: Option<String>,
        /// Request timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Scan, then fetch the restoration priority roadmap for the scanned area
    Rank {
        #[command(flatten)]
        viewport: ViewportArgs,
        /// Number of priority sectors to display
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Write the roadmap CSV to a file
        #[arg(long, num_args = 0..=1, default_missing_value = "restoration_priority.csv")]
        export: Option<std::path::PathBuf>,
        /// Base URL of the ocean data services
        #[arg(long)]
        service_url: Option<String>,
        /// Request timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("REEFGUARD_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("REEFGUARD_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("REEFGUARD_VERBOSE", "1");
    }

    let directive = if cli.verbose {
        "reefguard=debug"
    } else {
        "reefguard=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Scan {
            viewport,
            smooth,
            export,
            service_url,
            timeout,
        } => match viewport.to_bbox() {
            Ok(bbox) => {
                cli::scan_cmd::run(bbox, smooth, export, service_url.as_deref(), timeout).await
            }
            Err(e) => Err(e),
        },
        Commands::Rank {
            viewport,
            top,
            export,
            service_url,
            timeout,
        } => match viewport.to_bbox() {
            Ok(bbox) => {
                cli::rank_cmd::run(bbox, top, export, service_url.as_deref(), timeout).await
            }
            Err(e) => Err(e),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "reefguard", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
