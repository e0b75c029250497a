//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Portfolio CMS client
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and FOLIO_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token for authenticated resources
    #[arg(long, global = true, env = "FOLIO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configured resources
    Resources,

    /// Fetch a page of a resource
    List {
        /// Resource name (see `resources`)
        resource: String,

        /// Page to start from
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size (defaults to the resource's)
        #[arg(long)]
        limit: Option<u32>,

        /// Load up to this many further pages
        #[arg(long, default_value = "0")]
        more: u32,
    },

    /// Show the most recent testimonials
    Recent {
        /// Number of testimonials
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one project
    Project {
        /// Project id
        id: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document)
    Json,
    /// Human-readable output
    Pretty,
}
