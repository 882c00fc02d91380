//! `gotool install` - Compile and install packages, reporting what was rebuilt
//!
//! Wraps `go install` with the same flag merging as `gotool build`. The one
//! difference is `-o`: the go tool rejects it for install, so any configured
//! output path is dropped before the invocation.
//!
//! Supports:
//! - `--dry-run` to show the exact go command without executing
//! - `--json` to emit the affected paths as a JSON array

use crate::core::config::GoToolConfig;
use crate::core::error::GoResult;
use crate::tool::BuildOptions;
use std::env;

/// Run the install command
pub fn run_install(cli: BuildOptions, json: bool, dry_run: bool) -> GoResult<()> {
  let current_dir = env::current_dir()?;
  let config = GoToolConfig::load_or_default(&current_dir)?;
  let mut opts = config.merged_build(cli);
  // go install rejects -o; a [build] output default must not leak in here
  opts.output = None;

  if dry_run {
    println!("DRY RUN: Would execute:");
    println!("  {}", opts.command_line("install")?);
    return Ok(());
  }

  let affected = opts.run("install")?;
  report_affected(&affected, json)
}

/// Print the affected import paths
fn report_affected(affected: &[String], json: bool) -> GoResult<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(&affected)?);
    return Ok(());
  }

  for path in affected {
    println!("📦 {}", path);
  }
  println!("✅ install succeeded ({} package(s) affected)", affected.len());

  Ok(())
}
