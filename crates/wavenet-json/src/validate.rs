// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reference-comparison validation harness.
//!
//! The documented axis permutation is acknowledged to produce audio that
//! does not match the reference implementation, so the safest way to
//! trust a conversion is to diff it against a known-good JSON document
//! produced by a working toolchain. [`compare`] reports header and
//! per-record mismatches along with the largest absolute value
//! difference observed.

use crate::ModelDocument;
use std::fmt;

/// Comparison options.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Maximum allowed absolute difference between corresponding values.
    pub tolerance: f32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { tolerance: 1e-5 }
    }
}

/// A mismatch in one record of the `variables` array.
#[derive(Debug, Clone)]
pub struct RecordMismatch {
    /// Position in the `variables` array.
    pub index: usize,
    /// The produced record's name (or the reference's if lengths differ).
    pub name: String,
    /// The produced record's `layer_idx`.
    pub layer_idx: i64,
    /// What differed.
    pub detail: String,
}

impl fmt::Display for RecordMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "variables[{}] ({} @ layer {}): {}",
            self.index, self.name, self.layer_idx, self.detail
        )
    }
}

/// Result of comparing a produced document against a reference.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Differences in the scalar header fields or the dilation schedule.
    pub header_mismatches: Vec<String>,
    /// Differences in individual records.
    pub record_mismatches: Vec<RecordMismatch>,
    /// Largest absolute element difference across all compared records.
    pub max_abs_diff: f32,
    /// Number of records compared element-by-element.
    pub records_compared: usize,
}

impl ValidationReport {
    /// Returns `true` if no mismatch was found.
    pub fn passed(&self) -> bool {
        self.header_mismatches.is_empty() && self.record_mismatches.is_empty()
    }

    /// One-line summary for log output.
    pub fn summary(&self) -> String {
        if self.passed() {
            format!(
                "match: {} records compared, max |diff| {:.3e}",
                self.records_compared, self.max_abs_diff
            )
        } else {
            format!(
                "mismatch: {} header, {} record issues ({} records compared, max |diff| {:.3e})",
                self.header_mismatches.len(),
                self.record_mismatches.len(),
                self.records_compared,
                self.max_abs_diff,
            )
        }
    }
}

/// Compares a produced document against a reference document.
pub fn compare(
    produced: &ModelDocument,
    reference: &ModelDocument,
    opts: &ValidationOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    compare_headers(produced, reference, &mut report);

    if produced.variables.len() != reference.variables.len() {
        report.header_mismatches.push(format!(
            "variables length: produced {}, reference {}",
            produced.variables.len(),
            reference.variables.len(),
        ));
    }

    let n = produced.variables.len().min(reference.variables.len());
    for i in 0..n {
        compare_record(i, produced, reference, opts, &mut report);
    }
    report.records_compared = n;

    report
}

fn compare_headers(
    produced: &ModelDocument,
    reference: &ModelDocument,
    report: &mut ValidationReport,
) {
    let fields = [
        ("activation", produced.activation.clone(), reference.activation.clone()),
        (
            "output_channels",
            produced.output_channels.to_string(),
            reference.output_channels.to_string(),
        ),
        (
            "input_channels",
            produced.input_channels.to_string(),
            reference.input_channels.to_string(),
        ),
        (
            "residual_channels",
            produced.residual_channels.to_string(),
            reference.residual_channels.to_string(),
        ),
        (
            "filter_width",
            produced.filter_width.to_string(),
            reference.filter_width.to_string(),
        ),
        (
            "dilations",
            format!("{:?}", produced.dilations),
            format!("{:?}", reference.dilations),
        ),
    ];

    for (field, ours, theirs) in fields {
        if ours != theirs {
            report
                .header_mismatches
                .push(format!("{field}: produced {ours}, reference {theirs}"));
        }
    }
}

fn compare_record(
    index: usize,
    produced: &ModelDocument,
    reference: &ModelDocument,
    opts: &ValidationOptions,
    report: &mut ValidationReport,
) {
    let ours = &produced.variables[index];
    let theirs = &reference.variables[index];

    let mismatch = |detail: String| RecordMismatch {
        index,
        name: ours.name.to_string(),
        layer_idx: ours.layer_idx,
        detail,
    };

    if ours.name != theirs.name {
        report
            .record_mismatches
            .push(mismatch(format!("name: produced {}, reference {}", ours.name, theirs.name)));
        return;
    }
    if ours.layer_idx != theirs.layer_idx {
        report.record_mismatches.push(mismatch(format!(
            "layer_idx: produced {}, reference {}",
            ours.layer_idx, theirs.layer_idx
        )));
        return;
    }
    if ours.data.len() != theirs.data.len() {
        report.record_mismatches.push(mismatch(format!(
            "data length: produced {}, reference {}",
            ours.data.len(),
            theirs.data.len()
        )));
        return;
    }

    // Track the worst element and report it once per record.
    let mut worst: Option<(usize, f32, f32, f32)> = None;
    for (j, (&a, &b)) in ours.data.iter().zip(theirs.data.iter()).enumerate() {
        let diff = (a - b).abs();
        if diff > report.max_abs_diff {
            report.max_abs_diff = diff;
        }
        if diff > opts.tolerance && worst.map_or(true, |(_, _, _, w)| diff > w) {
            worst = Some((j, a, b, diff));
        }
    }
    if let Some((j, a, b, diff)) = worst {
        report.record_mismatches.push(mismatch(format!(
            "data[{j}]: produced {a}, reference {b} (|diff| {diff:.3e} > {:.3e})",
            opts.tolerance
        )));
    }
}
