// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The WaveNetVA model document and its layer records.
//!
//! # Format
//! ```json
//! {
//!   "activation": "gated",
//!   "output_channels": 1,
//!   "input_channels": 1,
//!   "residual_channels": 16,
//!   "filter_width": 3,
//!   "dilations": [1, 2, 4, 8],
//!   "variables": [
//!     { "layer_idx": -1, "data": ["0.1", "-0.2"], "name": "W" },
//!     ...
//!   ]
//! }
//! ```
//!
//! `data` entries are quoted decimal strings in the original format.
//! Deserialisation accepts both strings and native numbers, so the
//! validation harness can read reference files that have already been
//! through the downstream quote-stripping step.

use serde::Deserialize;
use std::path::Path;

/// The role a record plays within its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RecordName {
    /// Input or mix layer weight.
    #[serde(rename = "W")]
    W,
    /// Input or mix layer bias.
    #[serde(rename = "b")]
    B,
    /// Gated convolution weights (tanh branch then sigmoid branch).
    #[serde(rename = "W_conv")]
    WConv,
    /// Gated convolution biases (tanh branch then sigmoid branch).
    #[serde(rename = "b_conv")]
    BConv,
    /// Residual/skip projection weight.
    #[serde(rename = "W_out")]
    WOut,
    /// Residual/skip projection bias.
    #[serde(rename = "b_out")]
    BOut,
}

impl RecordName {
    /// The name string used in the JSON document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W => "W",
            Self::B => "b",
            Self::WConv => "W_conv",
            Self::BConv => "b_conv",
            Self::WOut => "W_out",
            Self::BOut => "b_out",
        }
    }
}

impl std::fmt::Display for RecordName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weight or bias entry in the document's `variables` array.
///
/// Consumers read `variables` positionally, so record order is part of
/// the format, not a presentation detail.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct LayerRecord {
    /// `-1` for the input layer, `0..n` for hidden layers, `n` for the
    /// final mix layer (where `n = dilations.len()`).
    pub layer_idx: i64,
    /// Flattened weight or bias values in emission order.
    #[serde(deserialize_with = "number_tokens")]
    pub data: Vec<f32>,
    /// The record's role within its layer.
    pub name: RecordName,
}

/// The complete output document, constructed once per conversion and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ModelDocument {
    /// Always `"gated"` for this architecture.
    pub activation: String,
    /// Mono output.
    pub output_channels: usize,
    /// Mono input.
    pub input_channels: usize,
    /// Convolution channels per layer.
    pub residual_channels: usize,
    /// Convolution kernel size.
    pub filter_width: usize,
    /// Per-hidden-layer dilation factors.
    pub dilations: Vec<usize>,
    /// Layer records in emission order.
    pub variables: Vec<LayerRecord>,
}

impl ModelDocument {
    /// Parses a document from a JSON string.
    ///
    /// Accepts `data` entries as either quoted strings or numbers.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, crate::TranscodeError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// The record count a document with `num_hidden` hidden layers must
    /// have: a `W`/`b` pair each for the input and mix layers, plus four
    /// records per hidden layer.
    pub fn expected_record_count(num_hidden: usize) -> usize {
        4 + 4 * num_hidden
    }

    /// The number of hidden layers this document describes.
    pub fn num_hidden_layers(&self) -> usize {
        self.dilations.len()
    }
}

/// Deserialises a `data` array whose entries are numbers, quoted decimal
/// strings, or a mix of both.
fn number_tokens<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Token {
        Num(f32),
        Str(String),
    }

    let tokens = Vec::<Token>::deserialize(deserializer)?;
    tokens
        .into_iter()
        .map(|t| match t {
            Token::Num(v) => Ok(v),
            Token::Str(s) => s.trim().parse::<f32>().map_err(|e| {
                serde::de::Error::custom(format!("invalid numeric token '{s}': {e}"))
            }),
        })
        .collect()
}
