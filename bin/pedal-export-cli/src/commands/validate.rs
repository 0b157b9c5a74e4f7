// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pedal-export validate` command: diff a conversion against a
//! known-good reference document.

use checkpoint::CheckpointLoader;
use std::path::PathBuf;
use wave_tensor::Axes3;
use wavenet_json::{compare, ModelDocument, Transcoder, ValidationOptions};

/// How many record mismatches to print before eliding the rest.
const MAX_PRINTED: usize = 20;

pub fn execute(
    model: PathBuf,
    reference: PathBuf,
    axes: Option<String>,
    tolerance: f32,
) -> anyhow::Result<()> {
    let transcoder = match axes {
        Some(s) => Transcoder::with_axes(s.parse::<Axes3>()?),
        None => Transcoder::new(),
    };

    let ckpt = CheckpointLoader::load(&model).map_err(|e| {
        anyhow::anyhow!("failed to load model from '{}': {e}", model.display())
    })?;
    let produced = transcoder.transcode(&ckpt.hparams, &ckpt.tensors)?;

    let reference_doc = ModelDocument::from_file(&reference).map_err(|e| {
        anyhow::anyhow!("failed to read reference '{}': {e}", reference.display())
    })?;

    let report = compare(&produced, &reference_doc, &ValidationOptions { tolerance });

    println!("Validation against '{}':", reference.display());
    println!("  axes {}, tolerance {tolerance:.1e}", transcoder.axes());
    println!("  {}", report.summary());

    if report.passed() {
        return Ok(());
    }

    for issue in &report.header_mismatches {
        println!("  header: {issue}");
    }
    for mismatch in report.record_mismatches.iter().take(MAX_PRINTED) {
        println!("  {mismatch}");
    }
    if report.record_mismatches.len() > MAX_PRINTED {
        println!(
            "  ... and {} more",
            report.record_mismatches.len() - MAX_PRINTED,
        );
    }

    anyhow::bail!("document does not match reference");
}
