// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and permutation.

use crate::Shape;

/// Errors that can occur when building or reordering tensors.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer length does not match the shape's element count.
    #[error("shape {shape} expects {expected} elements, got {actual}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    /// The tensor's rank does not match what the operation requires.
    #[error("rank mismatch for {op}: expected rank {expected}, got shape {actual}")]
    RankMismatch {
        op: &'static str,
        expected: usize,
        actual: Shape,
    },

    /// The axis list is not a permutation of `{0, 1, 2}`.
    #[error("invalid axis permutation {axes:?}: must reorder axes 0..3")]
    InvalidPermutation { axes: [usize; 3] },

    /// An axis list string could not be parsed.
    #[error("cannot parse axis list '{input}': expected three comma-separated axes like '2,1,0'")]
    ParseAxes { input: String },
}
