// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # wave-tensor
//!
//! Minimal tensor types for the WaveNet weight export pipeline.
//!
//! This crate provides:
//! - [`Shape`] — rank/dimension descriptors with row-major stride math.
//! - [`Tensor`] — an owned, contiguous `f32` tensor.
//! - [`Axes3`] and [`permute3`] — axis reordering for rank-3 convolution
//!   weights, the core operation of the checkpoint transcoder.
//!
//! Everything here is `f32`: PedalNet models are trained on Float32 wave
//! data and the consuming plugin processes float audio, so no other
//! element type ever reaches the exporter.
//!
//! # Design Goals
//! - No compute kernels — this is a data-movement crate, not a math crate.
//! - Checked constructors: a [`Tensor`] always has a buffer consistent
//!   with its [`Shape`].
//! - Clean error types via `thiserror`.

mod error;
mod permute;
mod shape;
mod tensor;

pub use error::TensorError;
pub use permute::{permute3, Axes3};
pub use shape::Shape;
pub use tensor::Tensor;
