use crate::error::Result;
use crate::record::SbomRecord;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Renders the record set as a pretty-printed JSON array with 4-space
/// indentation. Nested fields stay structured, unlike the CSV flattening.
pub fn to_json(records: &[SbomRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .context("Failed to serialize SBOM records to JSON")?;
    let mut out = String::from_utf8(buf).context("SBOM JSON output was not valid UTF-8")?;
    out.push('\n');
    Ok(out)
}
