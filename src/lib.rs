//! # casecmp
//!
//! Case-insensitive string comparison, as an API.
//!
//! A tiny HTTP service that answers one question: are `a` and `b` equal when
//! letter case is ignored? Input arrives as query parameters, form fields or a
//! JSON body; the answer is `0`/`1` or `{"result":0|1}`.
//!
//! ## Example
//!
//! ```rust
//! use casecmp::core::compare::{equal_fold, ComparisonRequest};
//!
//! assert!(equal_fold("Foo Bar", "FOO BAR"));
//! assert!(!ComparisonRequest::new("Foo", "Bar").is_match());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Case folding and content negotiation
//! - [`config`]: Immutable server configuration resolved from flags and environment
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP routes, input extraction and the server

pub mod cli;
pub mod config;
pub mod core;
pub mod web;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use crate::core::compare::{equal_fold, ComparisonRequest, ComparisonResult};
pub use crate::core::media::{BodyFormat, ResponseFormat};
