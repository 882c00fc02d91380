//! Locating the go binary
//!
//! The fallback PATH lookup is memoized for the process lifetime in an owned,
//! thread-safe cell: the first successful lookup wins and is never refreshed,
//! even if the environment changes mid-run. An explicit override is used
//! verbatim, never validated, and never cached; an empty override counts as
//! unset and falls through to the lookup. A failed lookup caches nothing, so
//! a later call gets to retry.

use crate::core::error::{CommandError, GoError, GoResult};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// Name looked up on PATH when no override is configured
pub const DEFAULT_TOOL: &str = "go";

/// Process-wide resolver consulted by `BuildOptions::run`
static RESOLVER: GoResolver = GoResolver::new();

/// Lazily-initialized, process-lifetime cache of the discovered go path
///
/// Owned instances exist so the cache discipline is visible (and testable) at
/// the call site; library entry points share the process-wide `static`.
pub struct GoResolver {
  cache: OnceLock<PathBuf>,
}

impl GoResolver {
  /// Create a resolver with an empty cache
  pub const fn new() -> Self {
    Self { cache: OnceLock::new() }
  }

  /// Resolve the go binary: explicit non-empty override verbatim, else cached
  /// PATH lookup
  pub fn resolve(&self, explicit: Option<&Path>) -> GoResult<PathBuf> {
    self.resolve_with(explicit, || which::which(DEFAULT_TOOL))
  }

  /// Resolution with an injectable lookup, so cache discipline can be observed
  fn resolve_with<F>(&self, explicit: Option<&Path>, lookup: F) -> GoResult<PathBuf>
  where
    F: FnOnce() -> Result<PathBuf, which::Error>,
  {
    // Empty means unset, the config zero value rather than a binary named ""
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
      return Ok(path.to_path_buf());
    }

    if let Some(cached) = self.cache.get() {
      return Ok(cached.clone());
    }

    let found = lookup().map_err(|err| GoError::Discovery {
      message: err.to_string(),
    })?;

    // Two racing first calls may both run the lookup; the first set wins and
    // every caller observes the same path from then on.
    Ok(self.cache.get_or_init(|| found).clone())
  }
}

impl Default for GoResolver {
  fn default() -> Self {
    Self::new()
  }
}

/// Resolve against the process-wide cache
pub fn go_bin(explicit: Option<&Path>) -> GoResult<PathBuf> {
  RESOLVER.resolve(explicit)
}

/// Result of probing `go version`
#[derive(Debug, Clone)]
pub struct ToolchainVersion {
  /// First line of `go version` output, verbatim
  pub raw: String,
  /// Release number, when the toolchain is a numbered release
  pub release: Option<semver::Version>,
}

/// Run `go version` against a resolved binary and parse the release
///
/// Development builds of the toolchain report no release number; those probe
/// fine but come back with `release: None`.
pub fn probe_version(bin: &Path) -> GoResult<ToolchainVersion> {
  let args = vec!["version".to_string()];
  let rendered = super::options::full_command(bin, &args);

  let output = match Command::new(bin).arg("version").output() {
    Ok(output) => output,
    Err(err) => return Err(GoError::Command(CommandError::spawn_failed(rendered, err))),
  };

  if !output.status.success() {
    return Err(GoError::Command(CommandError::exited(
      rendered,
      output.stdout,
      output.stderr,
    )));
  }

  let stdout = String::from_utf8_lossy(&output.stdout);
  let raw = stdout.lines().next().unwrap_or("").trim().to_string();
  let release = parse_go_release(&raw);

  Ok(ToolchainVersion { raw, release })
}

/// Extract a release number from a go version string
///
/// Accepts full `go version go1.22.3 linux/amd64` lines as well as bare
/// `go1.22.3`, `1.22.3` and two-part `1.21` forms (patch defaults to zero).
pub fn parse_go_release(text: &str) -> Option<semver::Version> {
  for token in text.split_whitespace() {
    let candidate = token.strip_prefix("go").unwrap_or(token);
    if !candidate.starts_with(|c: char| c.is_ascii_digit()) {
      continue;
    }
    if let Ok(version) = semver::Version::parse(candidate) {
      return Some(version);
    }
    if let Ok(version) = semver::Version::parse(&format!("{}.0", candidate)) {
      return Some(version);
    }
  }
  None
}
