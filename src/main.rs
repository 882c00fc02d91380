use clap::{Parser, Subcommand};
use gotool::commands;
use gotool::core::error::{GoError, print_error};
use gotool::tool::BuildOptions;
use std::path::PathBuf;

/// Drive the Go build toolchain: build and install with affected-package reporting
#[derive(Parser)]
#[command(name = "gotool")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct GoToolCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Initialize gotool configuration for a project
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  /// Run toolchain health checks and diagnostics
  Doctor {
    /// Run thorough checks (includes go env probes)
    #[arg(long)]
    thorough: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Invocation
  // ============================================================================
  /// Compile packages and report what was rebuilt
  Build {
    /// Import paths to build (defaults come from gotool.toml)
    import_paths: Vec<String>,
    /// Write the resulting binary to this file or directory
    #[arg(short, long)]
    output: Option<String>,
    /// Force rebuilding of packages that are already up-to-date
    #[arg(short = 'a', long)]
    force_all: bool,
    /// Number of builds that can be run in parallel
    #[arg(short, long)]
    parallel: Option<u32>,
    /// Compiler to use (gc or gccgo)
    #[arg(long)]
    compiler: Option<String>,
    /// Arguments to pass on each gccgo invocation
    #[arg(long)]
    gccgoflags: Option<String>,
    /// Arguments to pass on each compile invocation
    #[arg(long)]
    gcflags: Option<String>,
    /// Arguments to pass on each link invocation
    #[arg(long)]
    ldflags: Option<String>,
    /// Build tags to consider satisfied
    #[arg(long)]
    tags: Option<String>,
    /// Print the names of packages as they are built
    #[arg(short, long)]
    verbose: bool,
    /// Explicit go binary to run (skips the PATH lookup)
    #[arg(long, value_name = "PATH")]
    go_bin: Option<PathBuf>,
    /// Output the affected packages in JSON format
    #[arg(long)]
    json: bool,
    /// Show the go command without executing it
    #[arg(long)]
    dry_run: bool,
  },

  /// Compile and install packages, reporting what was rebuilt
  Install {
    /// Import paths to install (defaults come from gotool.toml)
    import_paths: Vec<String>,
    /// Force rebuilding of packages that are already up-to-date
    #[arg(short = 'a', long)]
    force_all: bool,
    /// Number of builds that can be run in parallel
    #[arg(short, long)]
    parallel: Option<u32>,
    /// Compiler to use (gc or gccgo)
    #[arg(long)]
    compiler: Option<String>,
    /// Arguments to pass on each gccgo invocation
    #[arg(long)]
    gccgoflags: Option<String>,
    /// Arguments to pass on each compile invocation
    #[arg(long)]
    gcflags: Option<String>,
    /// Arguments to pass on each link invocation
    #[arg(long)]
    ldflags: Option<String>,
    /// Build tags to consider satisfied
    #[arg(long)]
    tags: Option<String>,
    /// Print the names of packages as they are built
    #[arg(short, long)]
    verbose: bool,
    /// Explicit go binary to run (skips the PATH lookup)
    #[arg(long, value_name = "PATH")]
    go_bin: Option<PathBuf>,
    /// Output the affected packages in JSON format
    #[arg(long)]
    json: bool,
    /// Show the go command without executing it
    #[arg(long)]
    dry_run: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = GoToolCli::parse();

  let result = match cli.command {
    // Setup & Inspection
    Commands::Init { force } => commands::run_init(force),
    Commands::Doctor { thorough, json } => commands::run_doctor(thorough, json),

    // Invocation
    Commands::Build {
      import_paths,
      output,
      force_all,
      parallel,
      compiler,
      gccgoflags,
      gcflags,
      ldflags,
      tags,
      verbose,
      go_bin,
      json,
      dry_run,
    } => {
      let cli_opts = BuildOptions {
        go_bin,
        import_paths,
        output,
        force_all,
        parallel,
        compiler,
        gccgo_flags: gccgoflags,
        gc_flags: gcflags,
        ld_flags: ldflags,
        tags,
        verbose,
      };
      commands::run_build(cli_opts, json, dry_run)
    }
    Commands::Install {
      import_paths,
      force_all,
      parallel,
      compiler,
      gccgoflags,
      gcflags,
      ldflags,
      tags,
      verbose,
      go_bin,
      json,
      dry_run,
    } => {
      let cli_opts = BuildOptions {
        go_bin,
        import_paths,
        output: None,
        force_all,
        parallel,
        compiler,
        gccgo_flags: gccgoflags,
        gc_flags: gcflags,
        ld_flags: ldflags,
        tags,
        verbose,
      };
      commands::run_install(cli_opts, json, dry_run)
    }
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GoError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
