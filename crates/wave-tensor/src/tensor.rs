// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned f32 tensor type.

use crate::{Shape, TensorError};

/// An owned, n-dimensional `f32` tensor stored in contiguous memory.
///
/// `Tensor` is the data carrier between the checkpoint loader and the
/// transcoder. Data is stored in row-major (C) order, matching the layout
/// the source framework serialises.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor from a shape and a flat value buffer.
    ///
    /// Returns an error if the buffer length does not match
    /// `shape.num_elements()`.
    ///
    /// # Examples
    /// ```
    /// use wave_tensor::{Shape, Tensor};
    /// let t = Tensor::from_f32(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.data(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_f32(shape: Shape, data: Vec<f32>) -> Result<Self, TensorError> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(TensorError::ElementCountMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates a new tensor filled with zeros.
    pub fn zeros(shape: Shape) -> Self {
        let size = shape.num_elements();
        Self {
            shape,
            data: vec![0.0; size],
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the total number of elements.
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// Returns the flat row-major value buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the tensor, returning its flat row-major value buffer.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_checked() {
        let t = Tensor::from_f32(Shape::conv(2, 1, 3), vec![0.0; 6]).unwrap();
        assert_eq!(t.rank(), 3);
        assert_eq!(t.num_elements(), 6);
    }

    #[test]
    fn test_from_f32_length_mismatch() {
        let err = Tensor::from_f32(Shape::vector(4), vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::ElementCountMismatch {
                expected: 4,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(Shape::vector(8));
        assert_eq!(t.data(), &[0.0; 8]);
    }

    #[test]
    fn test_into_data() {
        let t = Tensor::from_f32(Shape::vector(2), vec![5.0, 6.0]).unwrap();
        assert_eq!(t.into_data(), vec![5.0, 6.0]);
    }
}
