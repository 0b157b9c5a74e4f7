// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pedal-export convert` command: checkpoint → WaveNetVA JSON.

use checkpoint::CheckpointLoader;
use std::path::PathBuf;
use wavenet_json::{write_document, ConvertConfig, Transcoder};

pub fn execute(
    model: Option<PathBuf>,
    output: Option<PathBuf>,
    axes: Option<String>,
    numbers: Option<String>,
    pretty: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Config file as the base, CLI flags on top.
    let mut cfg = match config {
        Some(path) => ConvertConfig::from_file(&path)?,
        None => ConvertConfig::default(),
    };
    if let Some(model) = model {
        cfg.model_path = model;
    }
    if let Some(output) = output {
        cfg.output_path = output;
    }
    if let Some(axes) = axes {
        cfg.axes = axes;
    }
    if let Some(numbers) = numbers {
        cfg.numbers = numbers.parse().map_err(anyhow::Error::msg)?;
    }
    if pretty {
        cfg.pretty = true;
    }

    let axes = cfg.parse_axes()?;
    let ckpt = CheckpointLoader::load(&cfg.model_path).map_err(|e| {
        anyhow::anyhow!("failed to load model from '{}': {e}", cfg.model_path.display())
    })?;

    let doc = Transcoder::with_axes(axes).transcode(&ckpt.hparams, &ckpt.tensors)?;
    write_document(&doc, &cfg.output_path, cfg.write_options())?;

    println!(
        "Converted '{}' → '{}'",
        cfg.model_path.display(),
        cfg.output_path.display(),
    );
    println!(
        "  {} hidden layers, {} records, axes {}, {} numbers",
        doc.num_hidden_layers(),
        doc.variables.len(),
        axes,
        cfg.numbers,
    );
    Ok(())
}
