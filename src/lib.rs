// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # wikiquery
//!
//! An async client for the Wikipedia (MediaWiki) query API.
//!
//! ## Features
//!
//! - **Redirect Resolution**: single-page accessors follow redirects to the
//!   canonical page, with a hop limit
//! - **Transparent Pagination**: list accessors return lazy streams that
//!   follow the server's continuation tokens
//! - **Cancellation**: dropping a stream stops further requests
//! - **YAML Configuration**: language, endpoint template and page sizes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use wikiquery::{Result, Wikipedia};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let wiki = Wikipedia::new()?;
//!     let page = wiki.page("Bikeshedding");
//!
//!     // Follows the redirect to "Law of triviality"
//!     println!("{}", page.title().await?);
//!
//!     let mut links = page.links();
//!     while let Some(link) = links.next().await {
//!         println!("{}", link?.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              Wikipedia (site)  /  Page (entity)          │
//! └──────────────────────────────────────────────────────────┘
//!               │                              │
//! ┌─────────────┴────────────┐   ┌─────────────┴────────────┐
//! │ RedirectResolver         │   │ paginate (continuation)  │
//! └─────────────┬────────────┘   └─────────────┬────────────┘
//!               └──────────────┬───────────────┘
//!                ┌─────────────┴────────────┐
//!                │ QueryExecutor → Transport│
//!                └──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Item records and page references
pub mod types;

/// Defensive JSON navigation
pub mod json;

/// HTTP transport
pub mod http;

/// Parameter sets and the query executor
pub mod query;

/// Redirect resolution for single-page accessors
pub mod redirect;

/// Continuation-driven streams
pub mod pagination;

/// Page accessors
pub mod page;

/// Site accessors
pub mod wikipedia;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use config::{load_config, load_config_from_str, ClientConfig};
pub use page::Page;
pub use pagination::ItemStream;
pub use wikipedia::Wikipedia;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
