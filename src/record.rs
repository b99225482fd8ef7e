use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Ecosystem of the manifest a record was extracted from.
///
/// Serialized as a plain string: `"pip"`, `"npm"`, or `"npm: <range>"` when
/// the manifest declares an npm engine requirement via `engines.npm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestType {
    Pip,
    Npm { engine: Option<String> },
}

impl ManifestType {
    pub fn npm() -> Self {
        ManifestType::Npm { engine: None }
    }
}

impl fmt::Display for ManifestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestType::Pip => write!(f, "pip"),
            ManifestType::Npm { engine: None } => write!(f, "npm"),
            ManifestType::Npm { engine: Some(range) } => write!(f, "npm: {}", range),
        }
    }
}

impl FromStr for ManifestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pip" => Ok(ManifestType::Pip),
            "npm" => Ok(ManifestType::npm()),
            other => match other.strip_prefix("npm: ") {
                Some(range) => Ok(ManifestType::Npm {
                    engine: Some(range.to_string()),
                }),
                None => Err(format!("Unknown manifest type: {}", other)),
            },
        }
    }
}

impl Serialize for ManifestType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ManifestType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Dependency payload of a record.
///
/// Pip manifests yield the ordered requirement lines; npm manifests yield the
/// declared name-to-version-range mapping, ranges preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependencies {
    Ranges(BTreeMap<String, String>),
    Lines(Vec<String>),
}

/// One normalized SBOM entry for a single scanned repository.
///
/// `name`, `version`, `type` and `path` are always present; the remaining
/// fields depend on the manifest kind and are omitted from JSON output when
/// absent. `path` is the absolute path of the manifest file that was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomRecord {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub manifest_type: ManifestType,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
    #[serde(
        rename = "lockfileVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lockfile_version: Option<u64>,
}

impl SbomRecord {
    /// Creates a record with only the identity fields populated.
    pub fn new(name: String, version: String, manifest_type: ManifestType, path: PathBuf) -> Self {
        Self {
            name,
            version,
            manifest_type,
            path,
            description: None,
            license: None,
            author: None,
            engines: None,
            dependencies: None,
            lockfile_version: None,
        }
    }
}
