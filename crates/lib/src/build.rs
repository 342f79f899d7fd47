//! Build orchestration: run the packager, install the artifact, write the
//! build record.
//!
//! A build is a linear, non-resumable procedure. The only suspension point
//! is the blocking wait on the external packager process.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::BuildError;
use crate::packager::{Packager, compose_args};
use crate::platform::Platform;
use crate::record::BuildRecord;
use crate::request::BuildRequest;

/// What a completed build produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
  /// Binary name with the platform suffix applied.
  pub final_name: String,

  /// Where the artifact was installed. `None` when the packager succeeded
  /// but left nothing at the expected paths (reported as a warning).
  pub artifact: Option<PathBuf>,

  /// Where the build record was written, if the artifact was installed.
  pub record: Option<PathBuf>,

  /// Wall time of the whole build.
  pub elapsed: Duration,
}

/// Package `request.script` into a standalone executable.
///
/// Fails fast if the source script does not exist, before the packager is
/// invoked. A missing artifact after a successful packager run is not a
/// failure: the outcome simply carries no artifact path.
pub fn build(request: &BuildRequest, packager: &dyn Packager) -> Result<BuildOutcome, BuildError> {
  let start = Instant::now();

  if !request.script.exists() {
    return Err(BuildError::ScriptNotFound(request.script.clone()));
  }

  let platform = Platform::current();
  let final_name = format!("{}{}", request.binary_name, platform.binary_suffix());

  info!(
    script = %request.script.display(),
    platform = %platform.os_str(),
    arch = %platform.arch,
    name = %final_name,
    "building binary"
  );

  let args = compose_args(request, &final_name);
  packager.package(&args)?;

  let artifact = install_artifact(request, &final_name, &packager.dist_dir())?;

  let record = match &artifact {
    Some(path) => {
      let dir = path.parent().unwrap_or(request.output_dir.as_path());
      Some(BuildRecord::new(request, &platform).write(dir)?)
    }
    None => None,
  };

  Ok(BuildOutcome {
    final_name,
    artifact,
    record,
    elapsed: start.elapsed(),
  })
}

/// Locate the packager's artifact and copy it into the output directory.
///
/// Tries the suffixed name first, then the bare binary name. Returns
/// `Ok(None)` when neither exists.
fn install_artifact(
  request: &BuildRequest,
  final_name: &str,
  dist_dir: &Path,
) -> Result<Option<PathBuf>, BuildError> {
  let candidates = [dist_dir.join(final_name), dist_dir.join(&request.binary_name)];
  let Some(source) = candidates.iter().find(|p| p.exists()) else {
    warn!(
      expected = %candidates[0].display(),
      "packager succeeded but no artifact was found; skipping install"
    );
    return Ok(None);
  };

  fs::create_dir_all(&request.output_dir)?;
  let dest = request.output_dir.join(final_name);

  if source.is_file() {
    fs::copy(source, &dest)?;
    set_executable(&dest)?;
  } else {
    // One-folder mode: replace any previous install wholesale
    if dest.exists() {
      fs::remove_dir_all(&dest)?;
    }
    copy_dir(source, &dest)?;
  }

  info!(dest = %dest.display(), "installed binary");
  Ok(Some(dest))
}

/// Recursively copy `source` into `dest`, preserving layout.
///
/// Symlinks are recreated rather than followed; onedir artifacts routinely
/// contain library-version links.
fn copy_dir(source: &Path, dest: &Path) -> Result<(), BuildError> {
  for entry in WalkDir::new(source) {
    let entry = entry.map_err(std::io::Error::from)?;
    let relative = entry
      .path()
      .strip_prefix(source)
      .expect("walkdir entries live under the walk root");
    let target = dest.join(relative);

    if entry.file_type().is_symlink() {
      copy_symlink(entry.path(), &target)?;
    } else if entry.file_type().is_dir() {
      fs::create_dir_all(&target)?;
    } else {
      fs::copy(entry.path(), &target)?;
    }
  }

  debug!(source = %source.display(), dest = %dest.display(), "copied directory");
  Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> Result<(), BuildError> {
  let link = fs::read_link(source)?;
  std::os::unix::fs::symlink(link, dest)?;
  Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, dest: &Path) -> Result<(), BuildError> {
  // No portable link recreation; copy the resolved target instead
  let resolved = fs::canonicalize(source)?;
  if resolved.is_dir() {
    copy_dir(&resolved, dest)
  } else {
    fs::copy(&resolved, dest)?;
    Ok(())
  }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), BuildError> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
  Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), BuildError> {
  Ok(())
}
