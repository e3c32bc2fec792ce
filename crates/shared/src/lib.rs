//! Shared utilities and common types for the expense tracker.
//!
//! This crate provides framework-free helpers used by the other crates:
//! - Page-number pagination over in-memory collections
//! - Display-date parsing and formatting
//! - Common validation logic

pub mod dates;
pub mod pagination;
pub mod validation;
