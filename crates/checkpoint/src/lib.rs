// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # checkpoint
//!
//! Access to trained PedalNet model data, decoupled from any training
//! framework. Rather than reaching into a framework checkpoint object,
//! the exporter consumes two explicit pieces of plain data:
//!
//! - [`Hyperparameters`] — a validated struct parsed from a JSON manifest.
//! - [`TensorStore`] — an explicit map from state-dict key to
//!   [`wave_tensor::Tensor`].
//!
//! # Supported Model Format
//! A model is stored as a directory containing:
//! - `model.json` — the hyperparameter manifest.
//! - `model.safetensors` — weights in HuggingFace SafeTensors format,
//!   keyed by the original state-dict names (see [`keys`]).
//!
//! # Example
//! ```no_run
//! use checkpoint::CheckpointLoader;
//! use std::path::Path;
//!
//! let ckpt = CheckpointLoader::load(Path::new("./models/pedalnet")).unwrap();
//! println!("{} tensors, {} hidden layers",
//!     ckpt.tensors.len(),
//!     ckpt.hparams.num_hidden_layers());
//! ```

mod error;
mod hparams;
pub mod keys;
mod loader;
mod store;

pub use error::CheckpointError;
pub use hparams::Hyperparameters;
pub use loader::{Checkpoint, CheckpointLoader};
pub use store::TensorStore;
