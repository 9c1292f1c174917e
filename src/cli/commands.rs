//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ThreatExchange command-line client
#[derive(Parser, Debug)]
#[command(name = "threatexchange")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Graph API access token (`app_id|app_secret` or a user token)
    #[arg(long, global = true, env = "THREATEXCHANGE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// App id, needed for app-scoped calls
    #[arg(long, global = true, env = "THREATEXCHANGE_APP_ID")]
    pub app_id: Option<String>,

    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Graph API version, e.g. v19.0
    #[arg(long, global = true)]
    pub api_version: Option<String>,

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
    /// Show the app and token the client authenticates as
    Whoami,

    /// Search threat descriptors
    Descriptors {
        /// Text to search for
        #[arg(long)]
        text: Option<String>,

        /// Indicator type, e.g. DOMAIN
        #[arg(long = "type")]
        descriptor_type: Option<String>,

        /// MALICIOUS, NON_MALICIOUS, SUSPICIOUS or UNKNOWN
        #[arg(long)]
        status: Option<String>,

        /// WHITE, GREEN, AMBER or RED
        #[arg(long)]
        share_level: Option<String>,

        /// Owner app id
        #[arg(long)]
        owner: Option<String>,

        /// Tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Unix timestamp lower bound
        #[arg(long)]
        since: Option<i64>,

        /// Unix timestamp upper bound
        #[arg(long)]
        until: Option<i64>,

        /// Exact text match
        #[arg(long)]
        strict_text: bool,

        /// Fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Maximum results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search threat indicators
    Indicators {
        #[arg(long)]
        text: Option<String>,

        /// Indicator type, e.g. HASH_MD5
        #[arg(long = "type")]
        indicator_type: Option<String>,

        #[arg(long)]
        since: Option<i64>,

        #[arg(long)]
        until: Option<i64>,

        #[arg(long)]
        strict_text: bool,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search threat tags
    Tags {
        /// Tag text to search for
        text: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// List ThreatExchange members
    Members {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch updates for a privacy group
    Updates {
        /// Privacy group id
        privacy_group_id: String,

        #[arg(long)]
        since: Option<i64>,

        #[arg(long)]
        until: Option<i64>,

        /// Object types (comma-separated), e.g. THREAT_DESCRIPTOR
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Human-readable output
    Pretty,
}
