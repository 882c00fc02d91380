//! Error types for gotool with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Command failures keep the full command line
//! and both captured streams so diagnostics can be rendered without re-running
//! anything.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for gotool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (toolchain discovery, subprocess, I/O)
  System = 2,
  /// Validation failure (doctor checks failed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for gotool
#[derive(Debug)]
pub enum GoError {
  /// Configuration errors
  Config(ConfigError),

  /// The go executable could not be located
  Discovery { message: String },

  /// The go tool ran and failed, or could not be started
  Command(CommandError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl GoError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GoError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GoError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GoError::Message { message, context, help } => GoError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GoError::Config(_) => ExitCode::User,
      GoError::Discovery { .. } => ExitCode::System,
      GoError::Command(_) => ExitCode::System,
      GoError::Io(_) => ExitCode::System,
      GoError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GoError::Config(e) => e.help_message(),
      GoError::Discovery { .. } => Some(
        "Install Go from https://go.dev/dl/, or point gotool at the binary with --go-bin or [toolchain] go_bin."
          .to_string(),
      ),
      GoError::Command(e) => e.help_message(),
      GoError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for GoError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GoError::Config(e) => write!(f, "{}", e),
      GoError::Discovery { message } => write!(f, "Error finding go binary: {}", message),
      GoError::Command(e) => write!(f, "{}", e),
      GoError::Io(e) => write!(f, "I/O error: {}", e),
      GoError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GoError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GoError::Io(e) => Some(e),
      GoError::Command(e) => e.cause.as_ref().map(|c| c as &(dyn std::error::Error + 'static)),
      _ => None,
    }
  }
}

impl From<io::Error> for GoError {
  fn from(err: io::Error) -> Self {
    GoError::Io(err)
  }
}

impl From<String> for GoError {
  fn from(msg: String) -> Self {
    GoError::message(msg)
  }
}

impl From<&str> for GoError {
  fn from(msg: &str) -> Self {
    GoError::message(msg)
  }
}

impl From<toml_edit::TomlError> for GoError {
  fn from(err: toml_edit::TomlError) -> Self {
    GoError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for GoError {
  fn from(err: toml_edit::de::Error) -> Self {
    GoError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for GoError {
  fn from(err: toml_edit::ser::Error) -> Self {
    GoError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for GoError {
  fn from(err: serde_json::Error) -> Self {
    GoError::message(format!("JSON error: {}", err))
  }
}

impl From<semver::Error> for GoError {
  fn from(err: semver::Error) -> Self {
    GoError::message(format!("Version parse error: {}", err))
  }
}

impl From<std::str::Utf8Error> for GoError {
  fn from(err: std::str::Utf8Error) -> Self {
    GoError::message(format!("UTF-8 error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for GoError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    GoError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::env::VarError> for GoError {
  fn from(err: std::env::VarError) -> Self {
    GoError::message(format!("Environment variable error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// gotool.toml not found in any search location
  NotFound { search_root: PathBuf },

  /// A field holds a value the go tool would reject
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create a gotool.toml next to your Go module, or rely on command-line flags alone.".to_string())
      }
      ConfigError::Invalid { field, .. } => Some(format!("Fix the '{}' entry in gotool.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No gotool configuration found.\nSearched under: {}",
          search_root.display()
        )
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config field '{}': {}", field, reason)
      }
    }
  }
}

/// A go tool invocation that exited non-zero or could not be started
///
/// Carries the exact command line and the raw captured streams so callers can
/// render complete diagnostics without re-running the build.
#[derive(Debug)]
pub struct CommandError {
  command: String,
  stdout: Vec<u8>,
  stderr: Vec<u8>,
  cause: Option<io::Error>,
}

impl CommandError {
  /// A command that ran and exited non-zero
  pub fn exited(command: String, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
    Self {
      command,
      stdout,
      stderr,
      cause: None,
    }
  }

  /// A command the OS failed to start (both streams empty)
  pub fn spawn_failed(command: String, cause: io::Error) -> Self {
    Self {
      command,
      stdout: Vec::new(),
      stderr: Vec::new(),
      cause: Some(cause),
    }
  }

  /// The full command line, binary and arguments joined by single spaces
  pub fn command_line(&self) -> &str {
    &self.command
  }

  /// Raw captured standard output
  pub fn stdout(&self) -> &[u8] {
    &self.stdout
  }

  /// Raw captured standard error
  pub fn stderr(&self) -> &[u8] {
    &self.stderr
  }

  fn help_message(&self) -> Option<String> {
    let stderr = String::from_utf8_lossy(&self.stderr);
    if stderr.contains("cannot find package") || stderr.contains("no required module provides package") {
      Some("Run `go mod tidy` in the module, or check the import paths you passed.".to_string())
    } else if self.cause.is_some() {
      Some("Check that the resolved go binary exists and is executable.".to_string())
    } else {
      None
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "error executing: {}", self.command)?;
    if let Some(cause) = &self.cause {
      write!(f, "\n{}", cause)?;
    }
    let stderr = String::from_utf8_lossy(&self.stderr);
    if !stderr.is_empty() {
      write!(f, "\n{}", stderr)?;
    }
    let stdout = String::from_utf8_lossy(&self.stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
      write!(f, "\n{}", stdout)?;
    }
    Ok(())
  }
}

/// Result type alias for gotool
pub type GoResult<T> = Result<T, GoError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GoResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GoResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GoError>,
{
  fn context(self, ctx: impl Into<String>) -> GoResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GoResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GoError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Convert anyhow::Error to GoError (for checks that use anyhow internally)
impl From<anyhow::Error> for GoError {
  fn from(err: anyhow::Error) -> Self {
    GoError::message(err.to_string())
  }
}
