use crate::error::{Result, SbomError};
use crate::record::{Dependencies, ManifestType, SbomRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The closed set of manifest kinds the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PipRequirements,
    NpmPackage,
    NpmLockfile,
}

impl ManifestKind {
    /// Probe order when a repository contains more than one recognized
    /// manifest. First match wins.
    pub const DETECTION_ORDER: [ManifestKind; 3] = [
        ManifestKind::PipRequirements,
        ManifestKind::NpmPackage,
        ManifestKind::NpmLockfile,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::PipRequirements => "requirements.txt",
            ManifestKind::NpmPackage => "package.json",
            ManifestKind::NpmLockfile => "package-lock.json",
        }
    }
}

/// Extracts one normalized record from a repository directory.
///
/// Probes for recognized manifests in priority order and parses the first one
/// found. Returns `Ok(None)` when the repository has no recognized manifest;
/// absence is a policy decision for the caller, not an error. Unreadable or
/// malformed manifests fail the call.
pub fn extract(repo_dir: &Path) -> Result<Option<SbomRecord>> {
    for kind in ManifestKind::DETECTION_ORDER {
        let candidate = repo_dir.join(kind.file_name());
        if !candidate.is_file() {
            continue;
        }
        let manifest_path = candidate.canonicalize().map_err(|e| SbomError::FileReadError {
            path: candidate.clone(),
            details: e.to_string(),
        })?;
        let content = fs::read_to_string(&manifest_path).map_err(|e| SbomError::FileReadError {
            path: manifest_path.clone(),
            details: e.to_string(),
        })?;
        let record = match kind {
            ManifestKind::PipRequirements => parse_requirements(manifest_path, &content),
            ManifestKind::NpmPackage => parse_package_json(manifest_path, &content)?,
            ManifestKind::NpmLockfile => parse_package_lock(manifest_path, &content)?,
        };
        return Ok(Some(record));
    }
    Ok(None)
}

/// Parses a pip `requirements.txt` under the line-list policy.
///
/// Requirements files do not self-declare a package name, so `name` is the
/// repository's absolute path and `version` is left empty. The requirement
/// lines are carried verbatim, minus blanks and `#` comments.
fn parse_requirements(manifest_path: PathBuf, content: &str) -> SbomRecord {
    let repo_name = manifest_path
        .parent()
        .unwrap_or(&manifest_path)
        .display()
        .to_string();
    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    let mut record = SbomRecord::new(repo_name, String::new(), ManifestType::Pip, manifest_path);
    record.dependencies = Some(Dependencies::Lines(lines));
    record
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    license: Option<Value>,
    #[serde(default)]
    author: Option<Value>,
    #[serde(default)]
    engines: Option<BTreeMap<String, String>>,
    #[serde(default)]
    dependencies: Option<BTreeMap<String, String>>,
}

/// Parses an npm `package.json` under the lenient policy: missing `name` and
/// `version` default to empty strings rather than failing the scan.
fn parse_package_json(manifest_path: PathBuf, content: &str) -> Result<SbomRecord> {
    let manifest: PackageJson =
        serde_json::from_str(content).map_err(|e| SbomError::ManifestParseError {
            path: manifest_path.clone(),
            details: e.to_string(),
        })?;

    let engine = manifest
        .engines
        .as_ref()
        .and_then(|engines| engines.get("npm"))
        .cloned();

    let mut record = SbomRecord::new(
        manifest.name,
        manifest.version,
        ManifestType::Npm { engine },
        manifest_path,
    );
    record.description = manifest.description;
    record.license = manifest.license.as_ref().and_then(normalize_license);
    record.author = manifest.author.as_ref().and_then(normalize_author);
    record.engines = manifest.engines;
    record.dependencies = manifest.dependencies.map(Dependencies::Ranges);
    Ok(record)
}

#[derive(Debug, Deserialize)]
struct PackageLockJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(rename = "lockfileVersion", default)]
    lockfile_version: Option<u64>,
}

fn parse_package_lock(manifest_path: PathBuf, content: &str) -> Result<SbomRecord> {
    let manifest: PackageLockJson =
        serde_json::from_str(content).map_err(|e| SbomError::ManifestParseError {
            path: manifest_path.clone(),
            details: e.to_string(),
        })?;

    let mut record = SbomRecord::new(
        manifest.name,
        manifest.version,
        ManifestType::npm(),
        manifest_path,
    );
    record.lockfile_version = manifest.lockfile_version;
    Ok(record)
}

/// npm allows `license` as either an SPDX string or the legacy
/// `{"type": ..., "url": ...}` object form.
fn normalize_license(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// npm allows `author` as either a free-form string or a
/// `{"name": ..., "email": ...}` object.
fn normalize_author(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let name = map.get("name").and_then(Value::as_str)?;
            match map.get("email").and_then(Value::as_str) {
                Some(email) => Some(format!("{} <{}>", name, email)),
                None => Some(name.to_string()),
            }
        }
        _ => None,
    }
}
