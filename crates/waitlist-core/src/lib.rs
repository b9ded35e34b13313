//! Core types and trait definitions for the waitlist.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod entry;
pub mod error;
pub mod export;
pub mod store;

pub use error::{Error, Result};
