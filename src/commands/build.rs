//! `gotool build` - Compile packages and report what was rebuilt
//!
//! Wraps `go build`: command-line flags are merged over `[build]` defaults
//! from gotool.toml (flags win), the go binary is resolved once per process,
//! and the affected import paths the toolchain reports are printed on stdout.
//!
//! Supports:
//! - `--dry-run` to show the exact go command without executing
//! - `--json` to emit the affected paths as a JSON array

use crate::core::config::GoToolConfig;
use crate::core::error::GoResult;
use crate::tool::BuildOptions;
use std::env;

/// Run the build command
pub fn run_build(cli: BuildOptions, json: bool, dry_run: bool) -> GoResult<()> {
  let current_dir = env::current_dir()?;
  let config = GoToolConfig::load_or_default(&current_dir)?;
  let opts = config.merged_build(cli);

  if dry_run {
    println!("DRY RUN: Would execute:");
    println!("  {}", opts.command_line("build")?);
    return Ok(());
  }

  let affected = opts.run("build")?;
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
  println!("✅ build succeeded ({} package(s) affected)", affected.len());

  Ok(())
}
