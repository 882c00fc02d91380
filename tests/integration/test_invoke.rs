//! Integration tests for the invocation pipeline, run against scripted go binaries

use crate::helpers::{FakeToolchain, TestProject};
use anyhow::Result;
use gotool::core::error::GoError;
use gotool::tool::{BuildOptions, resolver};
use std::path::PathBuf;

fn with_bin(fake: &FakeToolchain) -> BuildOptions {
  BuildOptions {
    go_bin: Some(fake.bin.clone()),
    ..Default::default()
  }
}

#[test]
fn test_run_parses_affected_from_stderr() -> Result<()> {
  // The go tool names rebuilt packages on stderr; stdout is not the report
  let fake = FakeToolchain::scripted("unrelated stdout", "pkg/a\npkg/b\n\n", 0)?;
  let mut opts = with_bin(&fake);
  opts.import_paths = vec!["./...".to_string()];
  opts.verbose = true;

  let affected = opts.run("build")?;
  assert_eq!(affected, vec!["pkg/a", "pkg/b"]);

  Ok(())
}

#[test]
fn test_run_with_silent_toolchain_reports_nothing_affected() -> Result<()> {
  let fake = FakeToolchain::scripted("", "", 0)?;
  let affected = with_bin(&fake).run("build")?;
  assert!(affected.is_empty());

  Ok(())
}

#[test]
fn test_run_failure_carries_command_and_streams() -> Result<()> {
  let fake = FakeToolchain::scripted("partial object listing", "undefined: Foo\n", 1)?;
  let mut opts = with_bin(&fake);
  opts.import_paths = vec!["./cmd".to_string()];

  let err = opts.run("build").unwrap_err();
  match err {
    GoError::Command(cmd) => {
      assert_eq!(cmd.command_line(), format!("{} build ./cmd", fake.bin.display()));
      assert_eq!(cmd.stderr(), b"undefined: Foo\n");
      assert_eq!(cmd.stdout(), b"partial object listing");
    }
    other => panic!("expected a command error, got: {}", other),
  }

  Ok(())
}

#[test]
fn test_spawn_failure_reports_the_command_it_tried() {
  let opts = BuildOptions {
    go_bin: Some(PathBuf::from("/nonexistent/toolchain/go")),
    import_paths: vec!["./...".to_string()],
    ..Default::default()
  };

  let err = opts.run("build").unwrap_err();
  match err {
    GoError::Command(cmd) => {
      assert_eq!(cmd.command_line(), "/nonexistent/toolchain/go build ./...");
      assert!(cmd.stdout().is_empty());
      assert!(cmd.stderr().is_empty());
    }
    other => panic!("expected a command error, got: {}", other),
  }
}

#[test]
fn test_run_passes_the_exact_argument_vector() -> Result<()> {
  let project = TestProject::new()?;
  let log = project.path.join("argv.log");
  let fake = FakeToolchain::logging_args(&log)?;

  let opts = BuildOptions {
    go_bin: Some(fake.bin.clone()),
    import_paths: vec!["pkg/one".to_string(), "pkg/two".to_string()],
    output: Some("bin/app".to_string()),
    force_all: true,
    parallel: Some(4),
    tags: Some("netgo".to_string()),
    verbose: true,
    ..Default::default()
  };
  opts.run("build")?;

  let argv: Vec<String> = std::fs::read_to_string(&log)?.lines().map(String::from).collect();
  assert_eq!(
    argv,
    vec!["build", "-o", "bin/app", "-a", "-p", "4", "-tags", "netgo", "-v", "pkg/one", "pkg/two"]
  );

  Ok(())
}

#[test]
fn test_probe_version_reports_the_toolchain_release() -> Result<()> {
  let fake = FakeToolchain::versioned("go version go1.22.3 linux/amd64")?;

  let version = resolver::probe_version(&fake.bin)?;
  assert_eq!(version.raw, "go version go1.22.3 linux/amd64");
  assert_eq!(version.release, Some(semver::Version::new(1, 22, 3)));

  Ok(())
}
