//! # gotool
//!
//! Drive the Go build toolchain from Rust: a thin wrapper around `go build`
//! and `go install` that turns a flat options record into a deterministic
//! command line, runs it synchronously, and reports the packages the
//! toolchain rebuilt.
//!
//! ## Architecture
//!
//! - [`tool`]: The invocation core. [`tool::BuildOptions`] maps options to a
//!   fixed-order argument vector, `tool::resolver` locates the go binary
//!   (explicit override, else a memoized PATH lookup).
//! - [`commands`]: CLI entry points (init, build, install, doctor).
//! - [`core`]: Ambient plumbing shared by everything above: error types with
//!   exit codes and help text, and gotool.toml configuration.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use gotool::tool::BuildOptions;
//!
//! let opts = BuildOptions {
//!   import_paths: vec!["./...".to_string()],
//!   verbose: true,
//!   ..Default::default()
//! };
//!
//! // Runs `go build -v ./...` and returns the rebuilt import paths.
//! let affected = opts.run("build")?;
//! ```
//!
//! Failures carry the full command line and both captured streams, so callers
//! can log exactly what ran and what the toolchain said.

pub mod commands;
pub mod core;
pub mod tool;
