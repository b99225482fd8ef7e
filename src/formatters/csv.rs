use crate::error::Result;
use crate::record::{Dependencies, SbomRecord};
use anyhow::Context;

/// Fixed column order for `sbom.csv`. Every recognized field is always a
/// column; records that never populate a field leave the cell empty.
const HEADER: [&str; 10] = [
    "name",
    "version",
    "type",
    "path",
    "description",
    "license",
    "author",
    "engines",
    "dependencies",
    "lockfileVersion",
];

/// Renders the record set as CSV: one header row plus one row per record, in
/// input order. Structured fields (`engines`, `dependencies`) are
/// JSON-encoded into their cell so the flat file stays deterministic and
/// machine-recoverable.
pub fn to_csv(records: &[SbomRecord]) -> Result<String> {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');

    for record in records {
        let engines = match &record.engines {
            Some(engines) => serde_json::to_string(engines)
                .context("Failed to encode engines field for CSV output")?,
            None => String::new(),
        };
        let dependencies = match &record.dependencies {
            Some(Dependencies::Lines(lines)) => serde_json::to_string(lines)
                .context("Failed to encode dependency lines for CSV output")?,
            Some(Dependencies::Ranges(ranges)) => serde_json::to_string(ranges)
                .context("Failed to encode dependency ranges for CSV output")?,
            None => String::new(),
        };
        let lockfile_version = record
            .lockfile_version
            .map(|v| v.to_string())
            .unwrap_or_default();
        let manifest_type = record.manifest_type.to_string();
        let path = record.path.display().to_string();

        let cells = [
            record.name.as_str(),
            record.version.as_str(),
            manifest_type.as_str(),
            path.as_str(),
            record.description.as_deref().unwrap_or(""),
            record.license.as_deref().unwrap_or(""),
            record.author.as_deref().unwrap_or(""),
            engines.as_str(),
            dependencies.as_str(),
            lockfile_version.as_str(),
        ];
        let row: Vec<String> = cells.iter().map(|cell| escape_cell(cell)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// RFC 4180 quoting: cells containing a comma, quote, or line break are
/// wrapped in double quotes with embedded quotes doubled.
fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
