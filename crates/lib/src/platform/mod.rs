pub mod arch;
pub mod os;

use std::fmt;

use arch::arch;
use os::Os;

/// Host platform: OS variant plus raw machine architecture (e.g., "x86_64").
///
/// The OS is optional because unknown hosts are still buildable; they just
/// get no binary suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
  pub os: Option<Os>,
  pub arch: String,
}

impl Platform {
  /// Create a platform identifier from explicit parts.
  pub fn new(os: Option<Os>, arch: impl Into<String>) -> Self {
    Self {
      os,
      arch: arch.into(),
    }
  }

  /// Detect the current platform at runtime.
  pub fn current() -> Self {
    Self {
      os: Os::current(),
      arch: arch().to_string(),
    }
  }

  /// Lowercase OS identifier, "unknown" if the OS is unsupported.
  pub fn os_str(&self) -> &str {
    self.os.map(|os| os.as_str()).unwrap_or("unknown")
  }

  /// Platform-specific suffix appended to the binary name.
  ///
  /// Windows binaries get `.exe`, macOS `-macos`, Linux `-linux-<arch>`.
  /// Anything else gets no suffix.
  pub fn binary_suffix(&self) -> String {
    match self.os {
      Some(Os::Windows) => ".exe".to_string(),
      Some(Os::MacOs) => "-macos".to_string(),
      Some(Os::Linux) => format!("-linux-{}", self.arch),
      None => String::new(),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.arch, self.os_str())
  }
}
