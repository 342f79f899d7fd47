//! Build record: the `version.json` side-file written after a build.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BuildError;
use crate::platform::Platform;
use crate::request::BuildRequest;

/// File name of the record, written beside the installed artifact.
pub const RECORD_FILENAME: &str = "version.json";

/// Metadata describing one successful build.
///
/// Written once per build, never read back by this tool; purely
/// informational for humans and release tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
  pub binary_name: String,
  pub script: String,
  pub platform: String,
  pub architecture: String,
  pub build_date: String,
}

impl BuildRecord {
  /// Build a record for the given request on the given platform,
  /// timestamped with the current local time.
  pub fn new(request: &BuildRequest, platform: &Platform) -> Self {
    Self {
      binary_name: request.binary_name.clone(),
      script: request.script.display().to_string(),
      platform: platform.os_str().to_string(),
      architecture: platform.arch.clone(),
      build_date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
  }

  /// Write the record as pretty-printed JSON into `dir`.
  ///
  /// Uses atomic write (write to temp, then rename) to never leave a
  /// half-written record behind. Returns the path of the written file.
  pub fn write(&self, dir: &Path) -> Result<PathBuf, BuildError> {
    let path = dir.join(RECORD_FILENAME);
    let temp_path = dir.join(format!("{RECORD_FILENAME}.tmp"));

    let content = serde_json::to_string_pretty(self)?;
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, &path)?;

    debug!(path = %path.display(), "wrote build record");
    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::os::Os;
  use tempfile::TempDir;

  fn record() -> BuildRecord {
    let request = BuildRequest::new("tools/etl.py", "./bin", Some("etl".to_string()));
    let platform = Platform::new(Some(Os::Linux), "x86_64");
    BuildRecord::new(&request, &platform)
  }

  #[test]
  fn record_captures_request_and_platform() {
    let r = record();
    assert_eq!(r.binary_name, "etl");
    assert_eq!(r.script, "tools/etl.py");
    assert_eq!(r.platform, "linux");
    assert_eq!(r.architecture, "x86_64");
  }

  #[test]
  fn build_date_is_well_formed() {
    let r = record();
    // YYYY-MM-DD HH:MM:SS
    assert_eq!(r.build_date.len(), 19);
    assert_eq!(&r.build_date[4..5], "-");
    assert_eq!(&r.build_date[10..11], " ");
    assert_eq!(&r.build_date[13..14], ":");
  }

  #[test]
  fn write_and_read_back_roundtrip() {
    let temp = TempDir::new().unwrap();
    let r = record();

    let path = r.write(temp.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), RECORD_FILENAME);

    let content = fs::read_to_string(&path).unwrap();
    let loaded: BuildRecord = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded, r);
  }

  #[test]
  fn write_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    record().write(temp.path()).unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
  }

  #[test]
  fn record_has_five_fields() {
    let value = serde_json::to_value(record()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 5);
    for field in ["binary_name", "script", "platform", "architecture", "build_date"] {
      assert!(object.contains_key(field), "missing {field}");
    }
  }
}
