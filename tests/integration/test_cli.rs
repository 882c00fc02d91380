//! Integration tests for the gotool CLI surface

use crate::helpers::{FakeToolchain, TestProject, run_gotool, run_gotool_unchecked};
use anyhow::Result;

#[test]
fn test_build_dry_run_shows_the_exact_command() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "", 0)?;

  let output = run_gotool(
    &project.path,
    &["build", "--dry-run", "--go-bin", fake.bin_str(), "-a", "-v", "pkg/x"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("DRY RUN: Would execute:"));
  assert!(stdout.contains(&format!("{} build -a -v pkg/x", fake.bin_str())));

  Ok(())
}

#[test]
fn test_build_reports_affected_packages() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "example.com/app\nexample.com/dep\n", 0)?;

  let output = run_gotool(&project.path, &["build", "--go-bin", fake.bin_str(), "-v", "./..."])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("📦 example.com/app"));
  assert!(stdout.contains("📦 example.com/dep"));
  assert!(stdout.contains("✅ build succeeded (2 package(s) affected)"));

  Ok(())
}

#[test]
fn test_build_json_output_is_parseable() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "example.com/app\n", 0)?;

  let output = run_gotool(&project.path, &["build", "--json", "--go-bin", fake.bin_str(), "./..."])?;

  let affected: Vec<String> = serde_json::from_slice(&output.stdout)?;
  assert_eq!(affected, vec!["example.com/app"]);

  Ok(())
}

#[test]
fn test_build_failure_surfaces_toolchain_diagnostics() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "pkg/main.go:4: undefined: Foo\n", 1)?;

  let output = run_gotool_unchecked(&project.path, &["build", "--go-bin", fake.bin_str(), "./cmd"])?;

  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("error executing:"));
  assert!(stderr.contains("build ./cmd"));
  assert!(stderr.contains("undefined: Foo"));

  Ok(())
}

#[test]
fn test_build_failure_suggests_go_mod_tidy_for_missing_packages() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "main.go:3: cannot find package \"left.out/dep\"\n", 1)?;

  let output = run_gotool_unchecked(&project.path, &["build", "--go-bin", fake.bin_str(), "."])?;

  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("go mod tidy"));

  Ok(())
}

#[test]
fn test_config_defaults_fill_unset_flags() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "", 0)?;
  project.write_config(
    r#"[build]
import_paths = ["./..."]
tags = "netgo"
verbose = true
"#,
  )?;

  let output = run_gotool(&project.path, &["build", "--dry-run", "--go-bin", fake.bin_str()])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains(&format!("{} build -tags netgo -v ./...", fake.bin_str())));

  Ok(())
}

#[test]
fn test_config_accepts_go_flag_spellings() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "", 0)?;
  project.write_config(
    r#"[build]
import_paths = ["./..."]
gcflags = "-N -l"
ldflags = "-s -w"
"#,
  )?;

  let output = run_gotool(&project.path, &["build", "--dry-run", "--go-bin", fake.bin_str()])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains(&format!("{} build -gcflags -N -l -ldflags -s -w ./...", fake.bin_str())));

  Ok(())
}

#[test]
fn test_cli_flags_override_config_defaults() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "", 0)?;
  project.write_config(
    r#"[build]
import_paths = ["./..."]
tags = "netgo"
"#,
  )?;

  let output = run_gotool(
    &project.path,
    &["build", "--dry-run", "--go-bin", fake.bin_str(), "--tags", "sqlite", "pkg/only"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("-tags sqlite"));
  assert!(!stdout.contains("netgo"));
  assert!(stdout.contains("pkg/only"));
  assert!(!stdout.contains("./..."));

  Ok(())
}

#[test]
fn test_install_drops_configured_output() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::scripted("", "", 0)?;
  project.write_config(
    r#"[build]
import_paths = ["./cmd/app"]
output = "bin/app"
"#,
  )?;

  let build = run_gotool(&project.path, &["build", "--dry-run", "--go-bin", fake.bin_str()])?;
  assert!(String::from_utf8_lossy(&build.stdout).contains("-o bin/app"));

  let install = run_gotool(&project.path, &["install", "--dry-run", "--go-bin", fake.bin_str()])?;
  let stdout = String::from_utf8_lossy(&install.stdout);
  assert!(stdout.contains("install ./cmd/app"));
  assert!(!stdout.contains("-o"));

  Ok(())
}

#[test]
fn test_init_scaffolds_config() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_gotool(&project.path, &["init"])?;
  assert!(String::from_utf8_lossy(&output.stdout).contains("✅ Wrote gotool.toml"));

  assert!(project.file_exists("gotool.toml"));
  let contents = project.read_file("gotool.toml")?;
  assert!(contents.contains("[build]"));
  assert!(contents.contains("import_paths"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite_without_force() -> Result<()> {
  let project = TestProject::new()?;
  run_gotool(&project.path, &["init"])?;

  let output = run_gotool_unchecked(&project.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

  // --force overwrites
  run_gotool(&project.path, &["init", "--force"])?;

  Ok(())
}

#[test]
fn test_doctor_fails_when_the_toolchain_cannot_run() -> Result<()> {
  let project = TestProject::new()?;
  project.write_config(
    r#"[toolchain]
go_bin = "/nonexistent/toolchain/go"
"#,
  )?;

  let output = run_gotool_unchecked(&project.path, &["doctor"])?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("❌ go-version"));
  assert!(stdout.contains("💡 Fix:"));

  Ok(())
}

#[test]
fn test_doctor_passes_with_healthy_toolchain() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::versioned("go version go1.22.3 linux/amd64")?;
  project.write_config(&format!(
    r#"[toolchain]
go_bin = "{}"
minimum_version = "1.21"
"#,
    fake.bin_str()
  ))?;

  let output = run_gotool(&project.path, &["doctor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("✅ go-version: go version go1.22.3 linux/amd64"));
  assert!(stdout.contains("Summary: 3/3 checks passed"));
  assert!(stdout.contains("✨ All checks passed!"));

  Ok(())
}

#[test]
fn test_doctor_flags_toolchain_below_minimum_version() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::versioned("go version go1.20.1 linux/amd64")?;
  project.write_config(&format!(
    r#"[toolchain]
go_bin = "{}"
minimum_version = "1.21"
"#,
    fake.bin_str()
  ))?;

  let output = run_gotool_unchecked(&project.path, &["doctor"])?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("older than the configured minimum 1.21.0"));

  Ok(())
}

#[test]
fn test_doctor_json_lists_every_check() -> Result<()> {
  let project = TestProject::new()?;
  let fake = FakeToolchain::versioned("go version go1.22.3 linux/amd64")?;
  project.write_config(&format!(
    r#"[toolchain]
go_bin = "{}"
"#,
    fake.bin_str()
  ))?;

  let output = run_gotool(&project.path, &["doctor", "--json"])?;

  let results: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let names: Vec<&str> = results
    .as_array()
    .expect("doctor --json emits an array")
    .iter()
    .map(|r| r["check_name"].as_str().unwrap())
    .collect();
  assert_eq!(names, vec!["config", "go-binary", "go-version"]);
  assert!(results.as_array().unwrap().iter().all(|r| r["passed"] == true));

  Ok(())
}

#[test]
fn test_thorough_doctor_probes_go_env() -> Result<()> {
  let project = TestProject::new()?;
  // `go env GOROOT GOPATH` answers one value per line
  let fake = FakeToolchain::scripted("/fake/goroot\n/fake/gopath\n", "", 0)?;
  project.write_config(&format!(
    r#"[toolchain]
go_bin = "{}"
"#,
    fake.bin_str()
  ))?;

  let output = run_gotool(&project.path, &["doctor", "--thorough"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("GOROOT=/fake/goroot"));
  assert!(stdout.contains("GOPATH=/fake/gopath"));
  assert!(stdout.contains("Summary: 4/4 checks passed"));

  Ok(())
}
