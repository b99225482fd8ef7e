//! repo-sbom - consolidated SBOM generation for multi-repository directories
//!
//! This library scans the immediate subdirectories of a root path, detects
//! per-repository dependency manifests (pip `requirements.txt`, npm
//! `package.json` / `package-lock.json`), extracts one normalized record per
//! repository, and writes the collected set as `sbom.csv` and `sbom.json`
//! into the root path.
//!
//! # Example
//!
//! ```no_run
//! use repo_sbom::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let report = repo_sbom::scan::run(Path::new("/path/to/repos"))?;
//! println!("{} records, {} skipped", report.records.len(), report.skipped.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod record;
pub mod scan;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{ExitCode, Result, SbomError};
    pub use crate::extract::{extract, ManifestKind};
    pub use crate::formatters::{to_csv, to_json};
    pub use crate::record::{Dependencies, ManifestType, SbomRecord};
    pub use crate::scan::{scan, ScanReport};
}
