// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Axis permutation for rank-3 convolution weights.
//!
//! The source framework stores convolution weights as
//! `(out_channels, in_channels, kernel_width)`; the consuming plugin
//! expects `(kernel_width, in_channels, out_channels)`. [`Axes3`] encodes
//! the reordering as data so callers can experiment with alternative
//! orders (the documented default is known to produce output that does
//! not match the reference implementation — see the project README).

use crate::{Shape, Tensor, TensorError};
use std::fmt;
use std::str::FromStr;

/// A permutation of the three axes of a rank-3 tensor.
///
/// `Axes3([a, b, c])` means output axis 0 takes input axis `a`, output
/// axis 1 takes input axis `b`, and output axis 2 takes input axis `c` —
/// the same convention as `Tensor.permute(a, b, c)` in the source
/// framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Axes3([usize; 3]);

impl Axes3 {
    /// The documented source→target reordering:
    /// `(out, in, kernel)` → `(kernel, in, out)`.
    pub const TORCH_TO_TF: Axes3 = Axes3([2, 1, 0]);

    /// The identity permutation (no reordering).
    pub const IDENTITY: Axes3 = Axes3([0, 1, 2]);

    /// Creates a permutation, checking that `[a, b, c]` reorders the axes
    /// `{0, 1, 2}` without repetition.
    pub fn new(a: usize, b: usize, c: usize) -> Result<Self, TensorError> {
        let axes = [a, b, c];
        let mut seen = [false; 3];
        for &ax in &axes {
            if ax > 2 || seen[ax] {
                return Err(TensorError::InvalidPermutation { axes });
            }
            seen[ax] = true;
        }
        Ok(Self(axes))
    }

    /// Returns the permutation as an array.
    pub fn as_array(self) -> [usize; 3] {
        self.0
    }

    /// Returns the inverse permutation.
    ///
    /// Permuting by `self` and then by `self.inverse()` recovers the
    /// original tensor.
    pub fn inverse(self) -> Axes3 {
        let mut inv = [0usize; 3];
        for (i, &ax) in self.0.iter().enumerate() {
            inv[ax] = i;
        }
        Axes3(inv)
    }
}

impl fmt::Display for Axes3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Parses `"2,1,0"`-style axis lists (as accepted on the command line).
impl FromStr for Axes3 {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<usize> = s
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| TensorError::ParseAxes { input: s.to_string() })?;
        if parts.len() != 3 {
            return Err(TensorError::ParseAxes { input: s.to_string() });
        }
        Axes3::new(parts[0], parts[1], parts[2])
    }
}

/// Reorders the axes of a rank-3 tensor.
///
/// The result is a new owned tensor whose flat buffer is laid out in
/// row-major order for the permuted shape, so flattening it afterwards
/// yields the element sequence the consuming plugin expects.
///
/// Returns an error if the tensor is not rank 3.
pub fn permute3(tensor: &Tensor, axes: Axes3) -> Result<Tensor, TensorError> {
    if tensor.rank() != 3 {
        return Err(TensorError::RankMismatch {
            op: "permute3",
            expected: 3,
            actual: tensor.shape().clone(),
        });
    }

    let perm = axes.as_array();
    let dims = tensor.shape().dims();
    let in_strides = tensor.shape().strides();
    let out_dims = [dims[perm[0]], dims[perm[1]], dims[perm[2]]];

    let data = tensor.data();
    let mut out = Vec::with_capacity(tensor.num_elements());

    // Walk the output in row-major order, mapping each position back to
    // its source index: output position (i0, i1, i2) reads input
    // position p where p[perm[j]] = ij.
    let mut src = [0usize; 3];
    for i0 in 0..out_dims[0] {
        src[perm[0]] = i0;
        for i1 in 0..out_dims[1] {
            src[perm[1]] = i1;
            for i2 in 0..out_dims[2] {
                src[perm[2]] = i2;
                let offset =
                    src[0] * in_strides[0] + src[1] * in_strides[1] + src[2] * in_strides[2];
                out.push(data[offset]);
            }
        }
    }

    Tensor::from_f32(Shape::new(out_dims.to_vec()), out)
}
