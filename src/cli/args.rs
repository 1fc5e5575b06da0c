//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Catalog browser for the PokeAPI: paged listing, name search, and evolution lineage
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (overrides global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Catalog API root (overrides config)
    #[arg(long, global = true, env = "POKEDEX_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entries page by page
    List {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
        /// Entries per page (default: config page_size)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Search entries by name across the full listing
    Search {
        /// Name fragment (case-insensitive)
        query: String,
        /// Show at most N results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search-as-you-type: one query per stdin line, debounced
    Suggest {
        /// One-shot query instead of reading stdin
        query: Option<String>,
    },

    /// Show details of an entry
    Show {
        /// Entry id
        id: u32,
    },

    /// Show the evolution lineage of an entry
    Lineage {
        /// Entry id
        id: u32,
        /// Render as a tree instead of a flat chain
        #[arg(short, long)]
        tree: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config path
    Path,
}
