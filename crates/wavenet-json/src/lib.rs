// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # wavenet-json
//!
//! Transcodes the learned weights of a trained PedalNet model into the
//! JSON document the WaveNetVA audio plugin consumes.
//!
//! The core is [`Transcoder::transcode`], a pure function from
//! `(hyperparameters, named tensors)` to a [`ModelDocument`]. Around it:
//!
//! - [`ModelDocument`] / [`LayerRecord`] — the target document model.
//! - [`NumberFormat`] and the render module — the document's numeric
//!   values serialise as quoted JSON *strings* by default (a quirk of the
//!   established downstream workflow), with native numbers opt-in.
//! - [`write_document`] — atomic file output (temp sibling + rename).
//! - [`compare`] — a validation harness that diffs a produced document
//!   against a known-good reference within a float tolerance.
//! - [`ConvertConfig`] — TOML-file configuration for the CLI.
//!
//! # Example
//! ```
//! use checkpoint::{Hyperparameters, TensorStore};
//! use wavenet_json::Transcoder;
//! # use checkpoint::keys;
//! # use wave_tensor::{Shape, Tensor};
//!
//! # let hparams = Hyperparameters {
//! #     num_channels: 2, kernel_size: 3, dilation_depth: 1, num_repeat: 1,
//! # };
//! # let mut tensors = TensorStore::new();
//! # tensors.insert(keys::INPUT_LAYER_WEIGHT, Tensor::zeros(Shape::conv(2, 1, 1)));
//! # tensors.insert(keys::INPUT_LAYER_BIAS, Tensor::zeros(Shape::vector(2)));
//! # tensors.insert(keys::conv_tanh_weight(0), Tensor::zeros(Shape::conv(2, 2, 3)));
//! # tensors.insert(keys::conv_tanh_bias(0), Tensor::zeros(Shape::vector(2)));
//! # tensors.insert(keys::conv_sigm_weight(0), Tensor::zeros(Shape::conv(2, 2, 3)));
//! # tensors.insert(keys::conv_sigm_bias(0), Tensor::zeros(Shape::vector(2)));
//! # tensors.insert(keys::residual_weight(0), Tensor::zeros(Shape::conv(2, 2, 1)));
//! # tensors.insert(keys::residual_bias(0), Tensor::zeros(Shape::vector(2)));
//! # tensors.insert(keys::LINEAR_MIX_WEIGHT, Tensor::zeros(Shape::conv(1, 2, 1)));
//! # tensors.insert(keys::LINEAR_MIX_BIAS, Tensor::zeros(Shape::vector(1)));
//! let doc = Transcoder::new().transcode(&hparams, &tensors).unwrap();
//! assert_eq!(doc.variables.len(), 8); // 2 + 2 + 4 per hidden layer
//! ```

mod config;
mod document;
mod error;
mod render;
mod transcode;
mod validate;
mod writer;

pub use config::ConvertConfig;
pub use document::{LayerRecord, ModelDocument, RecordName};
pub use error::TranscodeError;
pub use render::{to_json_string, to_value, NumberFormat};
pub use transcode::Transcoder;
pub use validate::{compare, RecordMismatch, ValidationOptions, ValidationReport};
pub use writer::{write_document, WriteOptions};
