//! binsmith-lib: Core logic for the binsmith packaging orchestrator
//!
//! This crate turns a script into a standalone executable by driving an
//! external ahead-of-time packager:
//! - `BuildRequest`: what to package and how
//! - `Packager`: narrow seam over the external packaging tool
//! - `build`: run the packager, install the artifact, write a build record
//! - `clean`: remove the packager's transient build directories

pub mod build;
pub mod clean;
pub mod error;
pub mod packager;
pub mod platform;
pub mod record;
pub mod request;

pub use build::{BuildOutcome, build};
pub use clean::clean;
pub use error::{BuildError, CleanError, PackagerError};
pub use packager::{HIDDEN_IMPORTS, Packager, PyInstaller};
pub use platform::Platform;
pub use record::BuildRecord;
pub use request::BuildRequest;
