use crate::error::{Result, SbomError};
use crate::extract::extract;
use crate::formatters::{to_csv, to_json};
use crate::record::SbomRecord;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the CSV output written into the root directory.
pub const CSV_FILE_NAME: &str = "sbom.csv";
/// File name of the JSON output written into the root directory.
pub const JSON_FILE_NAME: &str = "sbom.json";

/// Outcome of a scan pass: the extracted records in enumeration order, plus
/// the repositories that were skipped for lack of a recognized manifest.
#[derive(Debug)]
pub struct ScanReport {
    pub records: Vec<SbomRecord>,
    pub skipped: Vec<PathBuf>,
}

/// Scans the immediate subdirectories of `root` and collects one record per
/// repository with a recognized manifest.
///
/// Repositories without a recognized manifest are skipped with a warning on
/// stderr; the scan continues. Manifest read or parse failures abort the
/// whole scan. Records keep directory-enumeration order; no sort is applied.
pub fn scan(root: &Path) -> Result<ScanReport> {
    validate_root(root)?;

    let repositories = list_repositories(root)?;
    println!(
        "Found {} repositories in '{}'",
        repositories.len(),
        root.display()
    );

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for repository in repositories {
        match extract(&repository)? {
            Some(record) => records.push(record),
            None => {
                eprintln!(
                    "⚠️  No recognized manifest in '{}', skipping",
                    repository.display()
                );
                skipped.push(repository);
            }
        }
    }

    Ok(ScanReport { records, skipped })
}

/// Scans `root` and writes `sbom.csv` and `sbom.json` into it, overwriting
/// any previous output. Returns the report for the caller's summary line.
pub fn run(root: &Path) -> Result<ScanReport> {
    let report = scan(root)?;

    let csv_path = root.join(CSV_FILE_NAME);
    write_output(&csv_path, &to_csv(&report.records)?)?;

    let json_path = root.join(JSON_FILE_NAME);
    write_output(&json_path, &to_json(&report.records)?)?;

    Ok(report)
}

fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(SbomError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }
    if !root.is_dir() {
        return Err(SbomError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Immediate child directories of the root, in enumeration order. Plain
/// files at the root (including previous sbom.* outputs) are ignored.
fn list_repositories(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to list root directory '{}'", root.display()))?;

    let mut repositories = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in '{}'", root.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to inspect '{}'", entry.path().display()))?;
        if file_type.is_dir() {
            repositories.push(entry.path());
        }
    }
    Ok(repositories)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| SbomError::FileWriteError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    println!("✅ Wrote {}", path.display());
    Ok(())
}
