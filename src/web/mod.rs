//! HTTP service for case-insensitive string comparison.
//!
//! All behaviour hangs off a single path; the method, query string and
//! `Content-Type`/`Accept` headers pick what happens.
//!
//! ## Endpoints
//!
//! - `GET /` without a query string - usage text with example commands
//! - `GET /?a=..&b=..` - compare query values
//! - `POST /` - compare form, multipart or JSON body values
//! - `GET /about` - name, version and project URL
//! - anything else - `404 page not found`
//!
//! Results are `0`/`1` as plain text, or `{"result":0|1}` when the client
//! sends `Accept: application/json`.

pub mod handlers;
pub mod input;
pub mod server;
