//! Health check command for diagnosing toolchain issues
//!
//! The doctor command verifies that gotool can actually drive a go toolchain
//! from the current directory: the config parses, the binary resolves, and the
//! toolchain answers `go version`. With `--thorough` it also probes `go env`.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::config::GoToolConfig;
use crate::core::error::{ExitCode, GoResult};
use crate::tool::resolver::{self, ToolchainVersion};
use serde::Serialize;

/// Result of running a single health check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  /// Name of the check that ran
  pub check_name: String,
  /// Whether the check passed
  pub passed: bool,
  /// Human-readable message
  pub message: String,
  /// Optional suggested fix
  #[serde(skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
}

impl CheckResult {
  /// Create a passing check result
  fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: true,
      message: message.into(),
      suggestion: None,
    }
  }

  /// Create a failing check result with a suggested fix
  fn fail(
    check_name: impl Into<String>,
    message: impl Into<String>,
    suggestion: impl Into<String>,
  ) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      message: message.into(),
      suggestion: Some(suggestion.into()),
    }
  }
}

/// Run the doctor command to diagnose issues
///
/// Returns Ok(()) if all checks pass, or exits with error code if checks fail
pub fn run_doctor(thorough: bool, json: bool) -> GoResult<()> {
  let current_dir = env::current_dir()?;
  let results = run_checks(&current_dir, thorough);

  if json {
    // JSON output for CI/automation
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    // Human-readable output
    println!("🏥 Running health checks...\n");

    let mut has_failures = false;

    for result in &results {
      let icon = if result.passed { "✅" } else { "❌" };
      println!("{} {}: {}", icon, result.check_name, result.message);

      if !result.passed {
        if let Some(ref suggestion) = result.suggestion {
          println!("   💡 Fix: {}", suggestion);
        }
        has_failures = true;
      }
      println!();
    }

    // Summary
    let passed_count = results.iter().filter(|r| r.passed).count();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Summary: {}/{} checks passed", passed_count, results.len());

    if has_failures {
      println!("\n⚠️  Issues found. Please fix them before building.");
      std::process::exit(ExitCode::Validation.as_i32());
    } else {
      println!("\n✨ All checks passed! Your setup looks healthy.");
    }
  }

  Ok(())
}

/// Run every health check, in dependency order
///
/// Later checks need a resolved go binary, so when config loading or binary
/// resolution fails the remaining probes are skipped instead of piling on
/// extra failures.
fn run_checks(current_dir: &Path, thorough: bool) -> Vec<CheckResult> {
  let mut results = Vec::new();

  let Some(config) = check_config(current_dir, &mut results) else {
    return results;
  };

  let Some(bin) = check_binary(&config, &mut results) else {
    return results;
  };

  check_version(&config, &bin, &mut results);

  if thorough {
    check_environment(&bin, &mut results);
  }

  results
}

/// Config check: absence is fine, an unreadable or invalid file is not
fn check_config(current_dir: &Path, results: &mut Vec<CheckResult>) -> Option<GoToolConfig> {
  match GoToolConfig::find_config_path(current_dir) {
    None => {
      results.push(CheckResult::pass("config", "no gotool.toml found (defaults in effect)"));
      Some(GoToolConfig::default())
    }
    Some(config_path) => match GoToolConfig::load(current_dir) {
      Ok(config) => {
        results.push(CheckResult::pass("config", format!("loaded {}", config_path.display())));
        Some(config)
      }
      Err(err) => {
        results.push(CheckResult::fail(
          "config",
          format!("{} is invalid: {}", config_path.display(), err),
          "Fix the reported field, or delete the file to fall back to defaults",
        ));
        None
      }
    },
  }
}

/// Binary check: the configured override or a PATH lookup must resolve
fn check_binary(config: &GoToolConfig, results: &mut Vec<CheckResult>) -> Option<PathBuf> {
  match resolver::go_bin(config.toolchain.go_bin.as_deref()) {
    Ok(bin) => {
      results.push(CheckResult::pass("go-binary", format!("using {}", bin.display())));
      Some(bin)
    }
    Err(err) => {
      results.push(CheckResult::fail(
        "go-binary",
        err.to_string(),
        "Install Go (https://go.dev/dl/) or set toolchain.go_bin in gotool.toml",
      ));
      None
    }
  }
}

/// Version check: the toolchain must answer `go version`, and when a minimum
/// release is configured the reported release must meet it
fn check_version(config: &GoToolConfig, bin: &Path, results: &mut Vec<CheckResult>) {
  match resolver::probe_version(bin) {
    Ok(version) => results.push(version_verdict(config.minimum_release(), &version)),
    Err(err) => {
      results.push(CheckResult::fail(
        "go-version",
        format!("{} did not answer `go version`: {}", bin.display(), err),
        "Check that toolchain.go_bin points at a go toolchain binary",
      ));
    }
  }
}

/// Compare a probed toolchain against the configured minimum release
///
/// Development builds report no release number; those pass with a note since
/// there is nothing to compare.
fn version_verdict(minimum: Option<semver::Version>, version: &ToolchainVersion) -> CheckResult {
  match (minimum, &version.release) {
    (Some(minimum), Some(release)) if *release < minimum => CheckResult::fail(
      "go-version",
      format!("{} is older than the configured minimum {}", version.raw, minimum),
      "Upgrade the toolchain or lower toolchain.minimum_version in gotool.toml",
    ),
    (Some(minimum), None) => CheckResult::pass(
      "go-version",
      format!("{} (no release number to compare against minimum {})", version.raw, minimum),
    ),
    _ => CheckResult::pass("go-version", version.raw.clone()),
  }
}

/// Environment probe (thorough mode only): `go env GOROOT GOPATH` must answer
fn check_environment(bin: &Path, results: &mut Vec<CheckResult>) {
  let output = match Command::new(bin).args(["env", "GOROOT", "GOPATH"]).output() {
    Ok(output) => output,
    Err(err) => {
      results.push(CheckResult::fail(
        "go-env",
        format!("failed to run `go env`: {}", err),
        "Check that the go binary is executable",
      ));
      return;
    }
  };

  if !output.status.success() {
    results.push(CheckResult::fail(
      "go-env",
      format!("`go env` exited with {}", output.status),
      "Run `go env` by hand to see the full diagnostics",
    ));
    return;
  }

  let stdout = String::from_utf8_lossy(&output.stdout);
  let mut lines = stdout.lines();
  let goroot = lines.next().unwrap_or("").trim().to_string();
  let gopath = lines.next().unwrap_or("").trim().to_string();

  results.push(CheckResult::pass("go-env", format!("GOROOT={} GOPATH={}", goroot, gopath)));
}
