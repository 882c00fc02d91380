//! Core building blocks for gotool
//!
//! - **config**: gotool.toml parsing, search order, and validation
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod error;
