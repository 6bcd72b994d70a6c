//! Medley operator console.
//!
//! Command-line surface for the media-indexing backend.
//!
//! # Commands
//!
//! - `status` - Backend status snapshot
//! - `health` - Dependency health
//! - `libraries` - Manage configured scan roots
//! - `scan` - Start, stop and observe scans
//! - `stats` - File statistics
//! - `duplicates` - Duplicate detection and results
//! - `watch` - Live scan dashboard

mod commands;

use clap::{Parser, Subcommand};
use medley_client::{ClientConfig, HttpResourceClient};
use medley_sync::{LogNotifier, SyncEngine};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Medley media-indexing console.
#[derive(Parser)]
#[command(name = "medley")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(global = true, long, default_value = "http://localhost:8000")]
    server: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend status
    Status {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show dependency health
    Health,

    /// Manage configured library paths
    Libraries {
        #[command(subcommand)]
        command: LibraryCommands,
    },

    /// Start, stop and observe scan operations
    Scan {
        #[command(subcommand)]
        command: ScanCommands,
    },

    /// Show file statistics
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Duplicate detection and results
    Duplicates {
        #[command(subcommand)]
        command: DuplicateCommands,
    },

    /// Poll status and scan progress until interrupted
    Watch,
}

#[derive(Subcommand)]
enum LibraryCommands {
    /// List configured library paths
    List,

    /// Add a library path
    Add {
        /// Filesystem path of the scan root
        path: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Re-read files that are already indexed
        #[arg(long)]
        deep_scan: bool,

        /// Content category (album, compilation, recent, general)
        #[arg(long)]
        path_type: Option<String>,
    },

    /// Update a library path
    Update {
        /// Server-assigned library id
        id: u64,

        /// New filesystem path
        #[arg(long)]
        path: Option<String>,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// Enable or disable scanning (true, false)
        #[arg(long)]
        scan_enabled: Option<bool>,

        /// Enable or disable deep scanning (true, false)
        #[arg(long)]
        deep_scan: Option<bool>,

        /// Quality score below which files become deletion candidates
        #[arg(long)]
        quality_threshold: Option<f64>,

        /// Deletion priority, 0-100
        #[arg(long)]
        deletion_priority: Option<u32>,
    },

    /// Remove a library path
    Remove {
        /// Server-assigned library id
        id: u64,
    },
}

#[derive(Subcommand)]
enum ScanCommands {
    /// Start scanning; all configured libraries unless a path is given
    Start {
        /// Scan only this path
        path: Option<String>,

        /// Re-read files that are already indexed
        #[arg(long)]
        deep: bool,
    },

    /// Stop all scan operations
    Stop,

    /// Show scan operations
    Status,
}

#[derive(Subcommand)]
enum DuplicateCommands {
    /// Show duplicate statistics
    Stats,

    /// Start duplicate detection
    Detect {
        /// Also mark deletion candidates
        #[arg(long)]
        auto_mark: bool,
    },

    /// Show files marked for deletion
    Candidates {
        /// Maximum number of candidates
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Show duplicate groups
    Groups {
        /// Grouping method (fingerprint, hash)
        #[arg(long, default_value = "fingerprint")]
        method: String,

        /// Maximum number of groups
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = HttpResourceClient::new(ClientConfig::new(&cli.server))
        .map_err(|e| format!("failed to build client: {e}"))?;
    let engine = SyncEngine::new(client, Arc::new(LogNotifier));

    match cli.command {
        Commands::Status { format } => commands::status::run(&engine, &format).await?,
        Commands::Health => commands::health::run(&engine).await?,
        Commands::Libraries { command } => match command {
            LibraryCommands::List => commands::libraries::list(&engine).await?,
            LibraryCommands::Add {
                path,
                name,
                deep_scan,
                path_type,
            } => commands::libraries::add(&engine, path, name, deep_scan, path_type).await?,
            LibraryCommands::Update {
                id,
                path,
                name,
                scan_enabled,
                deep_scan,
                quality_threshold,
                deletion_priority,
            } => {
                commands::libraries::update(
                    &engine,
                    id,
                    path,
                    name,
                    scan_enabled,
                    deep_scan,
                    quality_threshold,
                    deletion_priority,
                )
                .await?
            }
            LibraryCommands::Remove { id } => commands::libraries::remove(&engine, id).await?,
        },
        Commands::Scan { command } => match command {
            ScanCommands::Start { path, deep } => commands::scan::start(&engine, path, deep).await?,
            ScanCommands::Stop => commands::scan::stop(&engine).await?,
            ScanCommands::Status => commands::scan::status(&engine).await?,
        },
        Commands::Stats { format } => commands::stats::run(&engine, &format).await?,
        Commands::Duplicates { command } => match command {
            DuplicateCommands::Stats => commands::duplicates::stats(&engine).await?,
            DuplicateCommands::Detect { auto_mark } => {
                commands::duplicates::detect(&engine, auto_mark).await?
            }
            DuplicateCommands::Candidates { limit } => {
                commands::duplicates::candidates(&engine, limit).await?
            }
            DuplicateCommands::Groups { method, limit } => {
                commands::duplicates::groups(&engine, &method, limit).await?
            }
        },
        Commands::Watch => commands::watch::run(&engine).await?,
    }

    Ok(())
}
