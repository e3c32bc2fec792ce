//! Remote boundary of the expense tracker.
//!
//! Fetches, reviews and submits records against the PHP backend, and drives
//! per-screen list state containers from the results.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod metrics;
pub mod review;
pub mod screen;
pub mod session;
pub mod source;
pub mod submit;

pub use error::ClientError;
