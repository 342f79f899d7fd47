//! Seam over the external script-to-executable packager.
//!
//! The packager is consumed as an opaque child process; this module only
//! depends on its documented flags and on its convention of leaving
//! artifacts under a `dist` directory.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::error::PackagerError;
use crate::request::BuildRequest;

/// Hidden-import hints passed on every build.
///
/// Static allow-list of common third-party libraries the packager cannot
/// always detect through static analysis.
pub const HIDDEN_IMPORTS: [&str; 8] = [
  "pandas",
  "numpy",
  "requests",
  "cryptography",
  "boto3",
  "paramiko",
  "yaml",
  "json",
];

/// Name of the directory the packager leaves its artifacts in.
pub(crate) const DIST_DIR: &str = "dist";

/// Name of the packager's intermediate build directory.
pub(crate) const BUILD_DIR: &str = "build";

/// A script-to-executable packager.
///
/// `PyInstaller` is the production implementation; tests substitute fakes.
pub trait Packager {
  /// Run the packager with the given arguments, blocking until it exits.
  fn package(&self, args: &[String]) -> Result<(), PackagerError>;

  /// Directory the packager leaves finished artifacts in.
  fn dist_dir(&self) -> PathBuf;
}

/// Drives the `pyinstaller` executable as a child process.
#[derive(Debug, Clone)]
pub struct PyInstaller {
  program: String,
  work_dir: PathBuf,
}

impl PyInstaller {
  /// Packager resolved from `PATH`, working in the current directory.
  pub fn new() -> Self {
    Self {
      program: "pyinstaller".to_string(),
      work_dir: PathBuf::from("."),
    }
  }

  /// Override the executable name or path (useful for tests and wrappers).
  pub fn with_program(mut self, program: impl Into<String>) -> Self {
    self.program = program.into();
    self
  }

  /// Override the directory the packager runs in.
  pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
    self.work_dir = work_dir.into();
    self
  }
}

impl Default for PyInstaller {
  fn default() -> Self {
    Self::new()
  }
}

impl Packager for PyInstaller {
  fn package(&self, args: &[String]) -> Result<(), PackagerError> {
    info!(program = %self.program, "running packager");
    debug!(args = ?args, "packager arguments");

    let output = Command::new(&self.program)
      .args(args)
      .current_dir(&self.work_dir)
      .output()
      .map_err(|source| PackagerError::Spawn {
        program: self.program.clone(),
        source,
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
      return Err(PackagerError::Failed {
        code: output.status.code(),
        stderr,
      });
    }

    Ok(())
  }

  fn dist_dir(&self) -> PathBuf {
    self.work_dir.join(DIST_DIR)
  }
}

/// Compose the packager argument list for a request.
///
/// `final_name` is the binary name with the platform suffix already applied.
/// The icon flag is only emitted when the icon path exists, matching the
/// packager's hard failure on a missing icon file.
pub fn compose_args(request: &BuildRequest, final_name: &str) -> Vec<String> {
  let mut args = vec!["--clean".to_string(), "--noconfirm".to_string()];

  if request.one_file {
    args.push("--onefile".to_string());
  } else {
    args.push("--onedir".to_string());
  }

  if request.console {
    args.push("--console".to_string());
  } else {
    args.push("--windowed".to_string());
  }

  if let Some(icon) = &request.icon
    && icon.exists()
  {
    args.push("--icon".to_string());
    args.push(icon.display().to_string());
  }

  for import in HIDDEN_IMPORTS {
    args.push("--hidden-import".to_string());
    args.push(import.to_string());
  }

  args.push("--name".to_string());
  args.push(final_name.to_string());

  args.push(request.script.display().to_string());

  args
}

/// A packager that runs nothing, for exercising the install path in tests.
#[cfg(test)]
pub(crate) struct FakePackager {
  pub dist: PathBuf,
  pub fail: bool,
}

#[cfg(test)]
impl Packager for FakePackager {
  fn package(&self, _args: &[String]) -> Result<(), PackagerError> {
    if self.fail {
      return Err(PackagerError::Failed {
        code: Some(1),
        stderr: "boom".to_string(),
      });
    }
    Ok(())
  }

  fn dist_dir(&self) -> PathBuf {
    self.dist.clone()
  }
}
