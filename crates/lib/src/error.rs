//! Error types for binsmith-lib.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving the external packager.
#[derive(Debug, Error)]
pub enum PackagerError {
  /// The packager executable could not be started (usually: not installed).
  #[error("failed to start packager `{program}`: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The packager ran but exited with a non-zero status. Carries the
  /// captured stderr so the diagnostic reaches the user.
  #[error("packager failed with exit code {code:?}: {stderr}")]
  Failed { code: Option<i32>, stderr: String },
}

/// Errors that can occur during a build.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The source script does not exist. Checked before the packager is invoked.
  #[error("script not found: {0}")]
  ScriptNotFound(PathBuf),

  /// The external packager failed.
  #[error(transparent)]
  Packager(#[from] PackagerError),

  /// I/O error while installing the artifact or writing the build record.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The build record could not be serialized.
  #[error("failed to serialize build record: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Errors that can occur while cleaning build artifacts.
#[derive(Debug, Error)]
pub enum CleanError {
  #[error("failed to remove {path}: {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
