//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Exhibit example catalog CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Catalog directory path (relative to project root)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Config file name (default: exhibit.toml)
    #[arg(short = 'C', long, default_value = "exhibit.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the catalog over HTTP, scanning on each request
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scan the catalog once and print the result as JSON
    Scan {
        /// Language to resolve variants for (two-letter code)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Drive the picker client against a running catalog server
    Pick {
        /// Catalog server base URL
        #[arg(short, long)]
        base_url: Option<String>,

        /// Callback URL that receives the selected source
        #[arg(long)]
        callback: Option<String>,

        /// Tags to pre-select (comma separated)
        #[arg(short, long)]
        tags: Option<String>,

        /// UI language, e.g. "fr" or "fr-FR"
        #[arg(short, long)]
        lang: Option<String>,

        /// Toggle a tag filter after loading (repeatable)
        #[arg(long = "toggle")]
        toggles: Vec<String>,

        /// Origin of the example to select
        #[arg(short, long)]
        select: Option<String>,

        /// Launch the selected example after loading
        #[arg(short = 'u', long)]
        use_example: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_scan(&self) -> bool {
        matches!(self.command, Commands::Scan { .. })
    }
    pub const fn is_pick(&self) -> bool {
        matches!(self.command, Commands::Pick { .. })
    }
}
