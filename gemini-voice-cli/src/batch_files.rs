//! Batch input and output files.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use gemini_voice_types::{InputItem, OutputRecord};

pub const OUTPUT_FILE: &str = "output.json";

/// Read input items from a JSON array, a single JSON object, or JSON lines.
pub fn read_items(path: &Path) -> Result<Vec<InputItem>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    let is_jsonl = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

    if is_jsonl {
        return content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_no, line)| {
                serde_json::from_str::<Value>(line)
                    .map(InputItem::from_value)
                    .with_context(|| format!("Invalid JSON on line {}", line_no + 1))
            })
            .collect();
    }

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(match value {
        Value::Array(values) => values.into_iter().map(InputItem::from_value).collect(),
        other => vec![InputItem::from_value(other)],
    })
}

/// Write `output.json` plus one file per binary attachment. Returns the written paths.
pub fn write_outputs(output_dir: &Path, records: &[OutputRecord]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::new();

    let output_path = output_dir.join(OUTPUT_FILE);
    fs::write(&output_path, serde_json::to_string_pretty(records)?)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    written.push(output_path);

    for record in records {
        let Some(binary) = &record.binary else {
            continue;
        };
        for descriptor in binary.values() {
            let bytes = descriptor.decode().with_context(|| {
                format!("Attachment of item {} is not valid base64", record.item_index())
            })?;
            let path =
                output_dir.join(format!("item-{}-{}", record.item_index(), descriptor.file_name));
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }
    }

    Ok(written)
}
