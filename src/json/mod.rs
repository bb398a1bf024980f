//! JSON navigation module
//!
//! Defensive descent into untyped API responses.
//!
//! # Overview
//!
//! MediaWiki replies are loosely typed: fields are optional, and their shape
//! varies between format versions. Every lookup here reports a missing or
//! mistyped node as `None` rather than failing, so callers can treat "the
//! server omitted field X" as ordinary data.

mod navigator;

pub use navigator::{
    dotted, lookup, lookup_array, lookup_object, lookup_scalar, lookup_str, scalar_to_string,
    Step,
};
