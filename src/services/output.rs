// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Output document writer.

use crate::error::Result;
use crate::models::OutputDocument;
use std::fs;
use std::path::Path;

/// Write the document as pretty JSON, replacing any previous file.
///
/// The JSON goes to a sibling `.tmp` file first and is renamed into place,
/// so the dashboard never reads a half-written document.
pub fn write_document<P: AsRef<Path>>(path: P, document: &OutputDocument) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(document)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    tracing::info!(
        path = %path.display(),
        athletes = document.athletes.len(),
        "Wrote output document"
    );
    Ok(())
}

/// Read a previously written document.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<OutputDocument> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
