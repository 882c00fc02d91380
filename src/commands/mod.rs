//! CLI commands for gotool
//!
//! This module contains all user-facing command implementations:
//!
//! ## Setup & Inspection
//! - **init**: Scaffold a gotool.toml configuration
//! - **doctor**: Run toolchain health checks and validation
//!
//! ## Invocation
//! - **build**: Run `go build` and report the affected packages
//! - **install**: Run `go install` and report the affected packages
//!
//! Build and install share their flag surface and config merging; each one
//! resolves the go binary, runs it synchronously, and reports the packages
//! the toolchain said it rebuilt.

pub mod build;
pub mod doctor;
pub mod init;
pub mod install;

pub use build::run_build;
pub use doctor::run_doctor;
pub use init::run_init;
pub use install::run_install;
