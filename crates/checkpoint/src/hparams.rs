// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hyperparameter manifest parsing and the dilation schedule.
//!
//! The manifest (`model.json`) carries the four architecture parameters
//! the exporter needs, using the training-side key names:
//!
//! # Format
//! ```json
//! {
//!   "num_channels": 16,
//!   "kernel_size": 3,
//!   "dilation_depth": 10,
//!   "num_repeat": 1
//! }
//! ```

use crate::CheckpointError;
use std::path::Path;

/// Architecture hyperparameters of a trained PedalNet model.
///
/// Field names follow the training configuration; the exporter-side
/// vocabulary is exposed through [`residual_channels`](Self::residual_channels)
/// and [`filter_width`](Self::filter_width).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hyperparameters {
    /// Number of convolution channels per layer.
    pub num_channels: usize,
    /// Convolution kernel size.
    pub kernel_size: usize,
    /// Number of doubling steps in the dilation schedule.
    pub dilation_depth: usize,
    /// How many times the dilation schedule repeats.
    pub num_repeat: usize,
}

impl Hyperparameters {
    /// Loads hyperparameters from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, CheckpointError> {
        let content = std::fs::read_to_string(path)?;
        let hparams: Self = serde_json::from_str(&content)?;
        Ok(hparams)
    }

    /// Parses hyperparameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let hparams: Self = serde_json::from_str(json)?;
        Ok(hparams)
    }

    /// Validates that every field is a positive integer.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        let fields = [
            ("num_channels", self.num_channels),
            ("kernel_size", self.kernel_size),
            ("dilation_depth", self.dilation_depth),
            ("num_repeat", self.num_repeat),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(CheckpointError::InvalidHyperparameter { field, value });
            }
        }
        Ok(())
    }

    /// The number of residual channels in the exported document.
    pub fn residual_channels(&self) -> usize {
        self.num_channels
    }

    /// The convolution filter width in the exported document.
    pub fn filter_width(&self) -> usize {
        self.kernel_size
    }

    /// The per-layer dilation factors.
    ///
    /// Position `k` holds `2^(k mod dilation_depth)`; the doubling
    /// schedule repeats `num_repeat` times, giving
    /// `dilation_depth * num_repeat` hidden layers in total.
    pub fn dilations(&self) -> Vec<usize> {
        (0..self.num_hidden_layers())
            .map(|k| 1usize << (k % self.dilation_depth))
            .collect()
    }

    /// The number of hidden (gated convolution) layers.
    pub fn num_hidden_layers(&self) -> usize {
        self.dilation_depth * self.num_repeat
    }
}
