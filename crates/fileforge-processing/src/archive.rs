//! ZIP packaging for multi-artifact responses.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build a ZIP archive from named entries, preserving entry order.
///
/// Duplicate names are disambiguated with a numeric suffix before the
/// extension so no entry silently overwrites another.
pub fn build_zip(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut seen = HashSet::new();
    for (name, data) in entries {
        let entry_name = dedup_name(name, &mut seen);
        writer
            .start_file(&entry_name, options)
            .with_context(|| format!("Failed to start ZIP entry '{entry_name}'"))?;
        writer
            .write_all(data)
            .with_context(|| format!("Failed to write ZIP entry '{entry_name}'"))?;
    }

    let cursor = writer.finish().context("Failed to finalize ZIP archive")?;
    Ok(cursor.into_inner())
}

fn dedup_name(name: &str, seen: &mut HashSet<String>) -> String {
    if seen.insert(name.to_string()) {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    for n in 2.. {
        let candidate = match ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        if seen.insert(candidate.clone()) {
            return candidate;
        }
    }
    unreachable!()
}
