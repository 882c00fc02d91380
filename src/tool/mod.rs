//! Go toolchain invocation
//!
//! The whole crate reduces to this module: translate `BuildOptions` into a
//! flat argument vector, resolve the go binary, run it synchronously, and
//! report the affected import paths parsed from the tool's verbose stream.
//!
//! - **options**: `BuildOptions` and the deterministic argument vector it produces
//! - **resolver**: go binary discovery with a process-lifetime cache
//!
//! One quirk is deliberate and load-bearing: on success the go tool's *stderr*
//! is the data channel. Under `-v` the tool prints one import path per line to
//! stderr for every package it rebuilds, and on failure it prints compiler
//! diagnostics to the same stream with a non-zero exit. Both behaviors are the
//! wrapped tool's own contract, so the success path parses stderr rather than
//! stdout.

pub mod options;
pub mod resolver;

pub use options::BuildOptions;
pub use resolver::{GoResolver, ToolchainVersion};
