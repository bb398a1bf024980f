//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query Wikipedia from the command line
#[derive(Parser, Debug)]
#[command(name = "wikiquery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Language code, overrides the config file
    #[arg(short, long, global = true)]
    pub language: Option<String>,

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
    /// List the languages the site is available in
    Languages,

    /// Full-text search for page titles
    Search {
        /// Search terms
        query: String,
    },

    /// Titles of pages near a coordinate
    Geosearch {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search radius in metres (10 to 10000)
        #[arg(long, default_value = "1000")]
        radius: u32,
    },

    /// Titles of random articles
    Random {
        /// Number of titles (1 to 500)
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Query a single page
    Page {
        /// Page title, or page id with --id
        name: String,

        /// Treat NAME as a page id
        #[arg(long)]
        id: bool,

        #[command(subcommand)]
        what: PageCommand,
    },
}

/// What to fetch about a page
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// Page id
    Id,
    /// Canonical title
    Title,
    /// Plain-text content
    Content,
    /// HTML content
    Html,
    /// Plain-text introduction
    Summary,
    /// Images used on the page
    Images,
    /// External links
    References,
    /// Links to other articles
    Links,
    /// Categories
    Categories,
    /// Section headings
    Sections,
    /// Text of one section
    Section {
        /// Section heading
        heading: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable JSON
    Pretty,
}
