//! Pagination module
//!
//! Drives one logical "list all X" request across as many API calls as the
//! server's continuation tokens require.
//!
//! # Overview
//!
//! - `Continuation` - the opaque `continue` parameter set of a response
//! - `PaginationState` - the `Start -> Fetching -> Done | Failed` machine
//! - `ItemExtractor` - per-operation item and continuation extraction
//! - `paginate` - spawns the producer task and returns a lazy `ItemStream`

mod engine;
mod types;

pub use engine::{paginate, ItemStream};
pub use types::{Continuation, ItemExtractor, NextPage, PaginationState, Phase};
