//! Domain layer for the expense tracker.
//!
//! This crate contains:
//! - Raw record schemas as delivered by the remote API, and their view models
//! - Status and type lookup tables for the expense and requisition domains
//! - The list pipeline: transformer, filter/search engine, list-state reducer
//! - Review (approve/reject) and expense submission models

pub mod models;
pub mod services;
