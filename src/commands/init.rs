//! `gotool init` - Scaffold a starter gotool.toml
//!
//! Writes a starter configuration into the current directory. An existing
//! config (under any of the searched names) is never overwritten unless
//! `--force` is given.

use std::env;

use crate::core::config::GoToolConfig;
use crate::core::error::{GoError, GoResult};

/// Run the init command to scaffold a gotool.toml
pub fn run_init(force: bool) -> GoResult<()> {
  let current_dir = env::current_dir()?;

  if GoToolConfig::exists(&current_dir) && !force {
    return Err(GoError::with_help(
      "configuration already exists in this directory",
      "Pass --force to overwrite it, or edit the existing file",
    ));
  }

  GoToolConfig::starter().save(&current_dir)?;

  println!("✅ Wrote gotool.toml");
  println!("\n🚀 Next steps:");
  println!("   1. Adjust the [build] defaults (tags, ldflags, import paths)");
  println!("   2. Pin a toolchain with toolchain.minimum_version");
  println!("   3. Run: gotool build");

  Ok(())
}
