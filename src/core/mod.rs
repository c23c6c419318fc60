//! Core comparison logic, independent of HTTP.
//!
//! - [`compare`]: simple Unicode case-fold equality and the request/result types
//! - [`media`]: content negotiation between request/response representations

pub mod compare;
pub mod media;
