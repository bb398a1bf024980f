//! CLI module
//!
//! Command-line interface over the [`Wikipedia`](crate::Wikipedia) client.
//!
//! # Commands
//!
//! - `languages` - List the languages the site is available in
//! - `search` - Full-text search
//! - `geosearch` - Pages near a coordinate
//! - `random` - Random articles
//! - `page` - Accessors of a single page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageCommand};
pub use runner::Runner;
