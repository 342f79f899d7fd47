use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use binsmith_lib::{BuildRequest, Platform, PyInstaller, build, clean};

mod output;

use output::{format_bytes, format_duration, print_error, print_info, print_stat, print_success, print_warning};

/// binsmith - Build standalone binaries from scripts
#[derive(Parser)]
#[command(name = "binsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the script to package
  script: PathBuf,

  /// Output directory for the binary
  #[arg(long, default_value = "./bin")]
  output_dir: PathBuf,

  /// Binary name (default: script name)
  #[arg(long)]
  name: Option<String>,

  /// Build as one-folder instead of one-file
  #[arg(long)]
  one_folder: bool,

  /// Build as a windowed app (no console)
  #[arg(long)]
  windowed: bool,

  /// Path to icon file (.ico for Windows, .icns for Mac)
  #[arg(long)]
  icon: Option<PathBuf>,

  /// Remove packager build artifacts after a successful build
  #[arg(long)]
  clean: bool,
}

fn main() -> ExitCode {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let mut request = BuildRequest::new(&cli.script, &cli.output_dir, cli.name.clone());
  request.one_file = !cli.one_folder;
  request.console = !cli.windowed;
  request.icon = cli.icon.clone();

  debug!(
    script = %request.script.display(),
    name = %request.binary_name,
    one_file = request.one_file,
    console = request.console,
    "parsed build request"
  );

  let platform = Platform::current();
  print_info(&format!("Building binary for {}", cli.script.display()));
  print_stat("Platform", platform.os_str());
  print_stat("Architecture", &platform.arch);

  let outcome = build(&request, &PyInstaller::new())?;

  print_success("Build successful!");
  match &outcome.artifact {
    Some(artifact) => {
      print_stat("Binary", &artifact.display().to_string());
      if let Ok(metadata) = artifact.metadata()
        && metadata.is_file()
      {
        print_stat("Size", &format_bytes(metadata.len()));
      }
      if let Some(record) = &outcome.record {
        print_stat("Version info", &record.display().to_string());
      }
    }
    None => print_warning("Could not find the built binary under dist; nothing was installed"),
  }
  print_stat("Duration", &format_duration(outcome.elapsed));

  if cli.clean {
    let removed = clean(Path::new(".")).context("Failed to clean build artifacts")?;
    for path in &removed {
      print_info(&format!("Removed {}", path.display()));
    }
    print_success("Clean complete!");
  }

  Ok(())
}
