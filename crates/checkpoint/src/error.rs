// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for checkpoint access.

/// Errors that can occur when loading or validating checkpoint data.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// The hyperparameter manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestRead(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// The SafeTensors file could not be loaded.
    #[error("failed to load SafeTensors: {0}")]
    SafeTensors(String),

    /// A stored tensor uses an element type the exporter cannot handle.
    #[error("tensor '{name}' has unsupported dtype {dtype} (expected F32)")]
    UnsupportedDtype { name: String, dtype: String },

    /// A hyperparameter is outside its valid range.
    #[error("invalid hyperparameter '{field}': must be a positive integer, got {value}")]
    InvalidHyperparameter { field: &'static str, value: usize },

    /// A stored tensor's buffer is inconsistent with its declared shape.
    #[error("tensor '{name}': {source}")]
    Tensor {
        name: String,
        #[source]
        source: wave_tensor::TensorError,
    },
}
