// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pedal-export inspect` command: display checkpoint structure.
//!
//! Loads the manifest + SafeTensors file and prints the hyperparameters,
//! the derived dilation schedule, and a per-tensor breakdown.

use checkpoint::CheckpointLoader;
use std::path::PathBuf;
use wavenet_json::ModelDocument;

pub fn execute(model: PathBuf) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║           pedal-export · Checkpoint Inspector       ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let ckpt = CheckpointLoader::load(&model).map_err(|e| {
        anyhow::anyhow!("failed to load model from '{}': {e}", model.display())
    })?;

    // ── Summary ────────────────────────────────────────────────
    let h = &ckpt.hparams;
    let dilations = h.dilations();
    println!("  Model: {}", model.display());
    println!("  Channels: {}", h.residual_channels());
    println!("  Filter width: {}", h.filter_width());
    println!(
        "  Dilation schedule: {:?} (depth {} × repeat {})",
        dilations, h.dilation_depth, h.num_repeat,
    );
    println!(
        "  Expected output records: {}",
        ModelDocument::expected_record_count(h.num_hidden_layers()),
    );
    println!();

    // ── Per-Tensor Detail ──────────────────────────────────────
    println!("  {:<40} {:<14} {:>10}", "Key", "Shape", "Elements");
    println!("  {}", "-".repeat(68));
    for name in ckpt.tensors.sorted_names() {
        if let Some(tensor) = ckpt.tensors.get(name) {
            println!(
                "  {:<40} {:<14} {:>10}",
                truncate(name, 40),
                tensor.shape().to_string(),
                tensor.num_elements(),
            );
        }
    }
    println!("  {}", "-".repeat(68));
    println!(
        "  {} tensors, {} parameters total",
        ckpt.tensors.len(),
        ckpt.tensors.total_elements(),
    );
    println!();

    // ── Completeness ───────────────────────────────────────────
    let missing = ckpt.tensors.missing_keys(h);
    if missing.is_empty() {
        println!("  All required tensor keys present.");
    } else {
        println!("  Missing required keys ({}):", missing.len());
        for key in &missing {
            println!("   - {key}");
        }
    }
    println!();
    Ok(())
}

/// Truncates a string to `max_len` with ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
