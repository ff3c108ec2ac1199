//! Loading `UserAssist` registry dumps.
//!
//! A dump is a JSON export of the `UserAssist` key, one entry per category
//! GUID, each value carrying its name and hex-encoded data:
//!
//! ```json
//! { "{CEBFF5CD-ACE2-4F4F-9178-9926F41749EA}": [ { "name": "HRZR_PGYFRFFVBA", "data": "0000..." } ] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use ua_core::{GuidBucket, RawValue, rot13};

/// A registry value as exported.
#[derive(Debug, Deserialize)]
struct DumpValue {
    name: String,
    /// Hex-encoded value data.
    data: String,
}

/// Reads and parses a dump file.
pub fn load(path: &Path, decode_names: bool) -> Result<Vec<GuidBucket>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dump: {}", path.display()))?;
    parse(&content, decode_names).with_context(|| format!("invalid dump: {}", path.display()))
}

/// Parses dump JSON into GUID buckets, ordered by GUID.
///
/// Buckets without values are dropped.
pub fn parse(content: &str, decode_names: bool) -> Result<Vec<GuidBucket>> {
    let dump: BTreeMap<String, Vec<DumpValue>> =
        serde_json::from_str(content).context("failed to parse dump JSON")?;

    let mut buckets = Vec::with_capacity(dump.len());
    for (guid, values) in dump {
        if values.is_empty() {
            tracing::debug!(guid = %guid, "skipping bucket without values");
            continue;
        }

        let values = values
            .into_iter()
            .map(|value| -> Result<RawValue> {
                let data = hex::decode(value.data.trim())
                    .with_context(|| format!("invalid hex data for {} in {guid}", value.name))?;
                let name = if decode_names {
                    rot13::decode(&value.name)
                } else {
                    value.name
                };
                Ok(RawValue::new(name, data))
            })
            .collect::<Result<Vec<_>>>()?;

        buckets.push(GuidBucket { guid, values });
    }

    Ok(buckets)
}
