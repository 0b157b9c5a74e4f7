// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Atomic document output.
//!
//! The document is written to a temporary sibling path and renamed into
//! place, so the output file is either fully written or absent — a
//! half-written model file would crash the consuming plugin at load time.

use crate::{render, ModelDocument, NumberFormat, TranscodeError};
use std::path::{Path, PathBuf};

/// Output options for [`write_document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// How numeric data values are written.
    pub numbers: NumberFormat,
    /// Pretty-print the JSON (compact by default).
    pub pretty: bool,
}

/// Serialises the document and writes it to `path` atomically.
pub fn write_document(
    doc: &ModelDocument,
    path: &Path,
    opts: WriteOptions,
) -> Result<(), TranscodeError> {
    let json = render::to_json_string(doc, opts.numbers, opts.pretty)?;

    let tmp = temp_sibling(path);
    std::fs::write(&tmp, &json).map_err(|e| TranscodeError::Write {
        path: tmp.clone(),
        detail: e.to_string(),
    })?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(TranscodeError::Write {
            path: path.to_path_buf(),
            detail: e.to_string(),
        });
    }

    tracing::info!(
        "wrote {} records ({} bytes) to '{}'",
        doc.variables.len(),
        json.len(),
        path.display(),
    );
    Ok(())
}

/// Returns `<path>.tmp` in the same directory, so the final rename never
/// crosses a filesystem boundary.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayerRecord, RecordName};

    fn sample_doc() -> ModelDocument {
        ModelDocument {
            activation: "gated".to_string(),
            output_channels: 1,
            input_channels: 1,
            residual_channels: 2,
            filter_width: 3,
            dilations: vec![1],
            variables: vec![LayerRecord {
                layer_idx: -1,
                data: vec![1.0, 2.0],
                name: RecordName::W,
            }],
        }
    }

    #[test]
    fn test_temp_sibling() {
        let p = Path::new("/out/converted_model.json");
        assert_eq!(temp_sibling(p), PathBuf::from("/out/converted_model.json.tmp"));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = std::env::temp_dir().join("pedal_export_test_writer");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("converted_model.json");

        let doc = sample_doc();
        write_document(&doc, &path, WriteOptions::default()).unwrap();

        let back = ModelDocument::from_file(&path).unwrap();
        assert_eq!(back, doc);

        // No temp file left behind.
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("pedal_export_test_writer_missing")
            .join("nested")
            .join("out.json");
        let err = write_document(&sample_doc(), &path, WriteOptions::default()).unwrap_err();
        assert!(matches!(err, TranscodeError::Write { .. }));
    }
}
