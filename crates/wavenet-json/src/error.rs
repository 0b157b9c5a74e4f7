// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the transcoder.

use std::path::PathBuf;
use wave_tensor::Shape;

/// Errors that can occur while transcoding or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// A required tensor key is absent from the store (typically a
    /// hyperparameter set that disagrees with the trained weights).
    #[error("tensor not found: {key}")]
    MissingTensor { key: String },

    /// A tensor's rank does not match its role.
    #[error("tensor '{key}' has wrong shape: expected {expected}, got {actual}")]
    Shape {
        key: String,
        expected: &'static str,
        actual: Shape,
    },

    /// Checkpoint data was invalid.
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] checkpoint::CheckpointError),

    /// A tensor operation failed.
    #[error("tensor error: {0}")]
    Tensor(#[from] wave_tensor::TensorError),

    /// The conversion configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The output file could not be written.
    #[error("failed to write '{path}': {detail}")]
    Write { path: PathBuf, detail: String },

    /// A document could not be serialised or parsed.
    #[error("document serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reference document file could not be read.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}
