//! HTTP module
//!
//! The transport capability the query executor depends on, and its reqwest
//! implementation.
//!
//! # Features
//!
//! - **Transport trait**: parameters in, decoded JSON tree out
//! - **HttpClient**: single GET per call, no retries, no rate limiting
//! - **Error classification**: transport, status and decode failures map to
//!   response errors

mod client;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::Transport;
