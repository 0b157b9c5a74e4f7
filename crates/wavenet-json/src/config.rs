// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conversion configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/pedalnet"
//! output_path = "converted_model.json"
//! axes = "2,1,0"
//! numbers = "quoted"
//! pretty = false
//! ```

use crate::{NumberFormat, TranscodeError, WriteOptions};
use std::path::{Path, PathBuf};
use wave_tensor::Axes3;

/// Configuration for one conversion run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConvertConfig {
    /// Path to the model directory (`model.json` + `model.safetensors`).
    pub model_path: PathBuf,
    /// Path of the JSON document to write.
    pub output_path: PathBuf,
    /// Weight axis permutation, as a comma-separated axis list.
    #[serde(default = "default_axes")]
    pub axes: String,
    /// How numeric data values are written.
    #[serde(default)]
    pub numbers: NumberFormat,
    /// Pretty-print the output JSON.
    #[serde(default)]
    pub pretty: bool,
}

fn default_axes() -> String {
    Axes3::TORCH_TO_TF.to_string()
}

impl ConvertConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TranscodeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranscodeError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TranscodeError> {
        toml::from_str(toml_str)
            .map_err(|e| TranscodeError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TranscodeError> {
        toml::to_string_pretty(self)
            .map_err(|e| TranscodeError::Config(format!("TOML serialise error: {e}")))
    }

    /// Parses the configured axis permutation.
    pub fn parse_axes(&self) -> Result<Axes3, TranscodeError> {
        self.axes
            .parse::<Axes3>()
            .map_err(|e| TranscodeError::Config(format!("invalid axes '{}': {e}", self.axes)))
    }

    /// The writer options this configuration describes.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            numbers: self.numbers,
            pretty: self.pretty,
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/pedalnet"),
            output_path: PathBuf::from("converted_model.json"),
            axes: default_axes(),
            numbers: NumberFormat::Quoted,
            pretty: false,
        }
    }
}
