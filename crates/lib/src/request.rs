//! Build request: what to package and how.

use std::path::{Path, PathBuf};

/// A single packaging request, created from command-line input.
///
/// Lives only for the duration of one `build` invocation and is never
/// persisted.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  /// Path to the script to package.
  pub script: PathBuf,

  /// Directory the final artifact is installed into.
  pub output_dir: PathBuf,

  /// Base name of the produced binary, before the platform suffix.
  pub binary_name: String,

  /// Bundle everything into a single file (true) or a directory (false).
  pub one_file: bool,

  /// Keep a console window attached (true) or build a windowed app (false).
  pub console: bool,

  /// Optional icon file. Only passed to the packager if the path exists.
  pub icon: Option<PathBuf>,
}

impl BuildRequest {
  /// Create a request with the default one-file, console-mode settings.
  ///
  /// `binary_name` defaults to the script's file stem when `None`.
  pub fn new(script: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, binary_name: Option<String>) -> Self {
    let script = script.into();
    let binary_name = binary_name.unwrap_or_else(|| default_binary_name(&script));
    Self {
      script,
      output_dir: output_dir.into(),
      binary_name,
      one_file: true,
      console: true,
      icon: None,
    }
  }
}

/// Derive the default binary name from the script path (its file stem).
fn default_binary_name(script: &Path) -> String {
  script
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| "binary".to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn name_defaults_to_script_stem() {
    let request = BuildRequest::new("tools/nexus_etl.py", "./bin", None);
    assert_eq!(request.binary_name, "nexus_etl");
  }

  #[test]
  fn explicit_name_wins() {
    let request = BuildRequest::new("tools/nexus_etl.py", "./bin", Some("nexus-etl".to_string()));
    assert_eq!(request.binary_name, "nexus-etl");
  }

  #[test]
  fn defaults_are_one_file_console() {
    let request = BuildRequest::new("script.py", "./bin", None);
    assert!(request.one_file);
    assert!(request.console);
    assert!(request.icon.is_none());
  }
}
