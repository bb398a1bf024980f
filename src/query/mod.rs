//! Query module
//!
//! Parameter sets and the executor that turns them into API calls.
//!
//! # Overview
//!
//! - `QueryParams` - ordered name to values mapping, merged fresh per call
//! - `QueryExecutor` - one parameter set in, one decoded JSON tree out

mod executor;
mod params;

pub use executor::QueryExecutor;
pub use params::QueryParams;
