//! gotool configuration (gotool.toml) parsing and validation

use crate::core::error::{ConfigError, GoError, GoResult, ResultExt};
use crate::tool::BuildOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for gotool
/// Searched in order: gotool.toml, .gotool.toml, .config/gotool.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoToolConfig {
  #[serde(default)]
  pub toolchain: ToolchainConfig,

  /// Default build options, merged under command-line flags (flags win)
  #[serde(default)]
  pub build: BuildOptions,
}

/// Toolchain selection and requirements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolchainConfig {
  /// Explicit go binary path (default: PATH lookup for `go`)
  #[serde(default)]
  pub go_bin: Option<PathBuf>,

  /// Oldest go release `gotool doctor` accepts (e.g. "1.21" or "1.21.3")
  #[serde(default)]
  pub minimum_version: Option<String>,
}

impl GoToolConfig {
  /// Find config file in search order: gotool.toml, .gotool.toml, .config/gotool.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("gotool.toml"),
      path.join(".gotool.toml"),
      path.join(".config").join("gotool.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, failing when no file exists in any search location
  pub fn load(path: &Path) -> GoResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      GoError::Config(ConfigError::NotFound {
        search_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: GoToolConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Load config when present, fall back to defaults when absent
  ///
  /// Build and install work without any config file; only a file that exists
  /// but fails to parse or validate is an error.
  pub fn load_or_default(path: &Path) -> GoResult<Self> {
    match Self::find_config_path(path) {
      Some(_) => Self::load(path),
      None => Ok(Self::default()),
    }
  }

  /// Save config to gotool.toml (default location)
  pub fn save(&self, path: &Path) -> GoResult<()> {
    let config_path = path.join("gotool.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Validate configuration fields
  pub fn validate(&self) -> GoResult<()> {
    if let Some(ref minimum) = self.toolchain.minimum_version
      && parse_version_field(minimum).is_none()
    {
      return Err(GoError::Config(ConfigError::Invalid {
        field: "toolchain.minimum_version".to_string(),
        reason: format!("'{}' is not a go release number (expected e.g. '1.21' or '1.21.3')", minimum),
      }));
    }

    if let Some(ref compiler) = self.build.compiler
      && !compiler.is_empty()
    {
      match compiler.as_str() {
        "gc" | "gccgo" => {}
        _ => {
          return Err(GoError::Config(ConfigError::Invalid {
            field: "build.compiler".to_string(),
            reason: format!("'{}' is not a go compiler (expected 'gc' or 'gccgo')", compiler),
          }));
        }
      }
    }

    Ok(())
  }

  /// The minimum toolchain release, parsed
  pub fn minimum_release(&self) -> Option<semver::Version> {
    self
      .toolchain
      .minimum_version
      .as_deref()
      .and_then(parse_version_field)
  }

  /// Merge file defaults under command-line options (command line wins)
  ///
  /// Field-by-field: an option the command line left unset is filled from the
  /// `[build]` section; boolean flags combine with OR (a flag enabled in the
  /// config cannot be disabled from the command line); import paths fall back
  /// to the config list only when none were given.
  pub fn merged_build(&self, cli: BuildOptions) -> BuildOptions {
    let defaults = &self.build;

    BuildOptions {
      go_bin: cli.go_bin.or_else(|| self.toolchain.go_bin.clone()),
      import_paths: if cli.import_paths.is_empty() {
        defaults.import_paths.clone()
      } else {
        cli.import_paths
      },
      output: cli.output.or_else(|| defaults.output.clone()),
      force_all: cli.force_all || defaults.force_all,
      parallel: cli.parallel.or(defaults.parallel),
      compiler: cli.compiler.or_else(|| defaults.compiler.clone()),
      gccgo_flags: cli.gccgo_flags.or_else(|| defaults.gccgo_flags.clone()),
      gc_flags: cli.gc_flags.or_else(|| defaults.gc_flags.clone()),
      ld_flags: cli.ld_flags.or_else(|| defaults.ld_flags.clone()),
      tags: cli.tags.or_else(|| defaults.tags.clone()),
      verbose: cli.verbose || defaults.verbose,
    }
  }

  /// A starter configuration for `gotool init`
  pub fn starter() -> Self {
    Self {
      toolchain: ToolchainConfig::default(),
      build: BuildOptions {
        import_paths: vec!["./...".to_string()],
        verbose: true,
        ..Default::default()
      },
    }
  }
}

/// Parse a version field, accepting "1.21" and "1.21.3" forms
fn parse_version_field(value: &str) -> Option<semver::Version> {
  semver::Version::parse(value)
    .or_else(|_| semver::Version::parse(&format!("{}.0", value)))
    .ok()
}
