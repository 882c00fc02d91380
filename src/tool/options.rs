//! Build options and the deterministic go invocation they produce
//!
//! A flat `BuildOptions` record maps to exactly one argument vector in a fixed
//! field order, and `run` executes the resolved go binary with it. The go tool
//! reports the packages it rebuilt on stderr when `-v` is set, so on success
//! that stream is parsed as the affected-package list. On failure the same
//! stream carries compiler diagnostics and travels inside the error instead.

use crate::core::error::{CommandError, GoError, GoResult};
use crate::tool::resolver;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Options for a go build/install invocation
///
/// Every field is optional: `None`, `false`, empty strings and zero all mean
/// "omit this flag". No field constrains another, and nothing here is
/// validated; the go tool owns its own CLI contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
  /// Explicit go binary, used verbatim when non-empty (bypasses the PATH
  /// lookup and cache)
  #[serde(skip)]
  pub go_bin: Option<PathBuf>,

  /// Import paths handed to the go tool, appended after all flags
  pub import_paths: Vec<String>,

  /// `-o`: output file or directory
  pub output: Option<String>,

  /// `-a`: force rebuilding of packages that are already up-to-date
  pub force_all: bool,

  /// `-p`: number of builds that can be run in parallel
  pub parallel: Option<u32>,

  /// `-compiler`: name of compiler to use (gc or gccgo)
  pub compiler: Option<String>,

  /// `-gccgoflags`: arguments to pass on each gccgo invocation
  #[serde(alias = "gccgoflags")]
  pub gccgo_flags: Option<String>,

  /// `-gcflags`: arguments to pass on each compile invocation
  #[serde(alias = "gcflags")]
  pub gc_flags: Option<String>,

  /// `-ldflags`: arguments to pass on each link invocation
  #[serde(alias = "ldflags")]
  pub ld_flags: Option<String>,

  /// `-tags`: build tags to consider satisfied
  pub tags: Option<String>,

  /// `-v`: print the names of packages as they are built
  ///
  /// The affected-package report on the success path comes from this stream,
  /// so most callers want it on.
  pub verbose: bool,
}

impl BuildOptions {
  /// Build the argument vector for a go subcommand ("build", "install", ...)
  ///
  /// Field order is a contract: output, force, parallel, compiler, gccgoflags,
  /// gcflags, ldflags, tags, verbose, then import paths in the order given.
  /// Identical options always produce byte-identical vectors.
  pub fn to_args(&self, command: &str) -> Vec<String> {
    let mut args = vec![command.to_string()];

    if let Some(output) = set(&self.output) {
      args.push("-o".to_string());
      args.push(output.to_string());
    }
    if self.force_all {
      args.push("-a".to_string());
    }
    if let Some(parallel) = self.parallel.filter(|p| *p != 0) {
      args.push("-p".to_string());
      args.push(parallel.to_string());
    }
    if let Some(compiler) = set(&self.compiler) {
      args.push("-compiler".to_string());
      args.push(compiler.to_string());
    }
    if let Some(flags) = set(&self.gccgo_flags) {
      args.push("-gccgoflags".to_string());
      args.push(flags.to_string());
    }
    if let Some(flags) = set(&self.gc_flags) {
      args.push("-gcflags".to_string());
      args.push(flags.to_string());
    }
    if let Some(flags) = set(&self.ld_flags) {
      args.push("-ldflags".to_string());
      args.push(flags.to_string());
    }
    if let Some(tags) = set(&self.tags) {
      args.push("-tags".to_string());
      args.push(tags.to_string());
    }
    if self.verbose {
      args.push("-v".to_string());
    }

    args.extend(self.import_paths.iter().cloned());
    args
  }

  /// Run `go <command>` with these options and report affected import paths
  ///
  /// Blocks until the subprocess exits; stdout and stderr are fully captured
  /// on every exit path. On exit 0 the stderr stream is split into one import
  /// path per non-empty line, in produced order. On non-zero exit or spawn
  /// failure the full command line and both raw streams travel in the error.
  pub fn run(&self, command: &str) -> GoResult<Vec<String>> {
    let bin = resolver::go_bin(self.go_bin.as_deref())?;
    run_resolved(&bin, &self.to_args(command))
  }

  /// The exact command line `run` would execute, without spawning anything
  pub fn command_line(&self, command: &str) -> GoResult<String> {
    let bin = resolver::go_bin(self.go_bin.as_deref())?;
    Ok(full_command(&bin, &self.to_args(command)))
  }
}

/// A string field counts as set only when present and non-empty
fn set(field: &Option<String>) -> Option<&str> {
  field.as_deref().filter(|s| !s.is_empty())
}

/// Execute an already-resolved binary with an already-built argument vector
pub(crate) fn run_resolved(bin: &Path, args: &[String]) -> GoResult<Vec<String>> {
  let rendered = full_command(bin, args);

  let output = match Command::new(bin).args(args).output() {
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

  Ok(parse_affected(&output.stderr))
}

/// Join a binary path and argument vector with single spaces, as executed
pub(crate) fn full_command(bin: &Path, args: &[String]) -> String {
  let mut rendered = bin.display().to_string();
  for arg in args {
    rendered.push(' ');
    rendered.push_str(arg);
  }
  rendered
}

/// Split a captured stderr stream into affected import paths
///
/// One path per line, blank lines dropped, order preserved. Lines are not
/// trimmed: the go tool emits bare import paths, and anything else on the
/// stream (cgo warnings under -v) is the caller's to recognize.
fn parse_affected(stderr: &[u8]) -> Vec<String> {
  String::from_utf8_lossy(stderr)
    .split('\n')
    .filter(|line| !line.is_empty())
    .map(|line| line.to_string())
    .collect()
}
