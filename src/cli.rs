use crate::loader::DataSource;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "soundsite")]
#[command(about = "Browse and search a music-discovery site catalog", long_about = None)]
pub struct Cli {
    /// Directory or base URL containing catalog.json and links.json
    #[arg(long, env = "SOUNDSITE_DATA", default_value = "data")]
    pub data: DataSource,
    /// Directory for the session cache (defaults to the platform cache dir)
    #[arg(long, env = "SOUNDSITE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
    /// Always fetch fresh data
    #[arg(long)]
    pub no_cache: bool,
    /// Origin that relative page links resolve against
    #[arg(long, default_value = crate::config::DEFAULT_ORIGIN)]
    pub origin: String,
    /// Tracks per discover page
    #[arg(long, default_value = "24")]
    pub page_size: usize,
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Full search results page
    Search {
        query: String,
        /// Maximum tracks and albums (default: 50 each)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Search-box dropdown, typing the query one character at a time
    Suggest {
        query: String,
        /// Quiet period before the search runs (default: 200)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Track listing
    Discover {
        #[arg(short, long)]
        sort: Option<String>,
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long)]
        page: Option<usize>,
    },
    Track {
        id: String,
    },
    Album {
        id: String,
    },
    Uzt,
    /// Show how a URL is routed
    Route {
        url: String,
    },
}
