// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The per-layer weight transcoding algorithm.
//!
//! [`Transcoder::transcode`] walks `layer_idx` from `-1` (causal input
//! layer) through the hidden layers to `dilations.len()` (final linear
//! mix) and emits the records the plugin reads positionally:
//!
//! | layer            | records                               |
//! |------------------|---------------------------------------|
//! | `-1` (input)     | `W`, `b`                              |
//! | `0..n` (hidden)  | `W_conv`, `b_conv`, `W_out`, `b_out`  |
//! | `n` (mix)        | `W`, `b`                              |
//!
//! Convolution weights are axis-permuted before flattening; biases are
//! rank-1 and never permuted. `W_conv`/`b_conv` concatenate the tanh
//! branch first and the sigmoid branch second.

use crate::{LayerRecord, ModelDocument, RecordName, TranscodeError};
use checkpoint::{keys, Hyperparameters, TensorStore};
use wave_tensor::{permute3, Axes3};

/// Transcodes a checkpoint's named tensors into a [`ModelDocument`].
///
/// The axis permutation applied to convolution weights is a parameter:
/// the documented `(2, 1, 0)` reordering is the default, but it is known
/// to produce audio that does not match the reference implementation, so
/// callers can try alternatives and check them with the validation
/// harness (see [`crate::compare`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoder {
    axes: Axes3,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self {
            axes: Axes3::TORCH_TO_TF,
        }
    }
}

impl Transcoder {
    /// Creates a transcoder with the documented default permutation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcoder with a custom weight axis permutation.
    pub fn with_axes(axes: Axes3) -> Self {
        Self { axes }
    }

    /// Returns the weight axis permutation in use.
    pub fn axes(&self) -> Axes3 {
        self.axes
    }

    /// Builds the output document from hyperparameters and tensors.
    ///
    /// Pure apart from reading the supplied store: no I/O, no mutation of
    /// inputs. Fails on the first missing tensor key or rank mismatch,
    /// naming the offending key.
    pub fn transcode(
        &self,
        hparams: &Hyperparameters,
        tensors: &TensorStore,
    ) -> Result<ModelDocument, TranscodeError> {
        hparams.validate()?;

        let dilations = hparams.dilations();
        let num_hidden = dilations.len();
        let mut variables = Vec::with_capacity(ModelDocument::expected_record_count(num_hidden));

        // Input layer.
        variables.push(self.weight_record(tensors, keys::INPUT_LAYER_WEIGHT, -1, RecordName::W)?);
        variables.push(bias_record(tensors, keys::INPUT_LAYER_BIAS, -1, RecordName::B)?);

        // Hidden layers, one per dilation step.
        for i in 0..num_hidden {
            let layer_idx = i as i64;

            // Tanh branch first, sigmoid branch second.
            let mut conv_w = self.conv_weight(tensors, &keys::conv_tanh_weight(i))?;
            conv_w.extend(self.conv_weight(tensors, &keys::conv_sigm_weight(i))?);
            variables.push(LayerRecord {
                layer_idx,
                data: conv_w,
                name: RecordName::WConv,
            });

            let mut conv_b = bias(tensors, &keys::conv_tanh_bias(i))?;
            conv_b.extend(bias(tensors, &keys::conv_sigm_bias(i))?);
            variables.push(LayerRecord {
                layer_idx,
                data: conv_b,
                name: RecordName::BConv,
            });

            variables.push(self.weight_record(
                tensors,
                &keys::residual_weight(i),
                layer_idx,
                RecordName::WOut,
            )?);
            variables.push(bias_record(
                tensors,
                &keys::residual_bias(i),
                layer_idx,
                RecordName::BOut,
            )?);

            tracing::debug!("transcoded hidden layer {i} (dilation {})", dilations[i]);
        }

        // Final linear mix layer.
        let mix_idx = num_hidden as i64;
        variables.push(self.weight_record(
            tensors,
            keys::LINEAR_MIX_WEIGHT,
            mix_idx,
            RecordName::W,
        )?);
        variables.push(bias_record(tensors, keys::LINEAR_MIX_BIAS, mix_idx, RecordName::B)?);

        tracing::info!(
            "transcoded {} records for {} hidden layers (axes {})",
            variables.len(),
            num_hidden,
            self.axes,
        );

        Ok(ModelDocument {
            activation: "gated".to_string(),
            output_channels: 1,
            input_channels: 1,
            residual_channels: hparams.residual_channels(),
            filter_width: hparams.filter_width(),
            dilations,
            variables,
        })
    }

    /// Fetches a rank-3 convolution weight, permutes its axes, and
    /// flattens it in row-major order.
    fn conv_weight(
        &self,
        tensors: &TensorStore,
        key: &str,
    ) -> Result<Vec<f32>, TranscodeError> {
        let tensor = tensors
            .get(key)
            .ok_or_else(|| TranscodeError::MissingTensor { key: key.to_string() })?;
        if tensor.rank() != 3 {
            return Err(TranscodeError::Shape {
                key: key.to_string(),
                expected: "rank-3 (out_channels, in_channels, kernel_width)",
                actual: tensor.shape().clone(),
            });
        }
        Ok(permute3(tensor, self.axes)?.into_data())
    }

    /// Convenience: builds a full weight record.
    fn weight_record(
        &self,
        tensors: &TensorStore,
        key: &str,
        layer_idx: i64,
        name: RecordName,
    ) -> Result<LayerRecord, TranscodeError> {
        Ok(LayerRecord {
            layer_idx,
            data: self.conv_weight(tensors, key)?,
            name,
        })
    }
}

/// Fetches a rank-1 bias tensor and returns its values unpermuted.
fn bias(tensors: &TensorStore, key: &str) -> Result<Vec<f32>, TranscodeError> {
    let tensor = tensors
        .get(key)
        .ok_or_else(|| TranscodeError::MissingTensor { key: key.to_string() })?;
    if tensor.rank() != 1 {
        return Err(TranscodeError::Shape {
            key: key.to_string(),
            expected: "rank-1 bias vector",
            actual: tensor.shape().clone(),
        });
    }
    Ok(tensor.data().to_vec())
}

/// Convenience: builds a full bias record.
fn bias_record(
    tensors: &TensorStore,
    key: &str,
    layer_idx: i64,
    name: RecordName,
) -> Result<LayerRecord, TranscodeError> {
    Ok(LayerRecord {
        layer_idx,
        data: bias(tensors, key)?,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_tensor::{Shape, Tensor};

    fn hparams(channels: usize, depth: usize, repeat: usize) -> Hyperparameters {
        Hyperparameters {
            num_channels: channels,
            kernel_size: 3,
            dilation_depth: depth,
            num_repeat: repeat,
        }
    }

    /// Builds a complete store where every tensor is filled with a
    /// distinct constant, so concatenation order is observable.
    fn filled_store(h: &Hyperparameters) -> TensorStore {
        let c = h.num_channels;
        let k = h.kernel_size;
        let hidden = h.num_hidden_layers();
        let mut store = TensorStore::new();

        let fill = |shape: Shape, v: f32| {
            let n = shape.num_elements();
            Tensor::from_f32(shape, vec![v; n]).unwrap()
        };

        store.insert(keys::INPUT_LAYER_WEIGHT, fill(Shape::conv(c, 1, 1), 0.1));
        store.insert(keys::INPUT_LAYER_BIAS, fill(Shape::vector(c), 0.2));
        for i in 0..hidden {
            store.insert(keys::conv_tanh_weight(i), fill(Shape::conv(c, c, k), 1.0));
            store.insert(keys::conv_tanh_bias(i), fill(Shape::vector(c), 3.0));
            store.insert(keys::conv_sigm_weight(i), fill(Shape::conv(c, c, k), 2.0));
            store.insert(keys::conv_sigm_bias(i), fill(Shape::vector(c), 4.0));
            store.insert(keys::residual_weight(i), fill(Shape::conv(c, c, 1), 5.0));
            store.insert(keys::residual_bias(i), fill(Shape::vector(c), 6.0));
        }
        store.insert(keys::LINEAR_MIX_WEIGHT, fill(Shape::conv(1, c * hidden, 1), 0.3));
        store.insert(keys::LINEAR_MIX_BIAS, fill(Shape::vector(1), 0.4));
        store
    }

    #[test]
    fn test_record_count_and_order() {
        let h = hparams(4, 2, 1);
        let doc = Transcoder::new().transcode(&h, &filled_store(&h)).unwrap();

        assert_eq!(doc.variables.len(), 12);
        let idxs: Vec<i64> = doc.variables.iter().map(|r| r.layer_idx).collect();
        assert_eq!(idxs, vec![-1, -1, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2]);

        let names: Vec<&str> = doc.variables.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "W", "b", "W_conv", "b_conv", "W_out", "b_out", "W_conv", "b_conv", "W_out",
                "b_out", "W", "b",
            ]
        );
    }

    #[test]
    fn test_header_fields() {
        let h = hparams(16, 2, 1);
        let doc = Transcoder::new().transcode(&h, &filled_store(&h)).unwrap();
        assert_eq!(doc.activation, "gated");
        assert_eq!(doc.output_channels, 1);
        assert_eq!(doc.input_channels, 1);
        assert_eq!(doc.residual_channels, 16);
        assert_eq!(doc.filter_width, 3);
        assert_eq!(doc.dilations, vec![1, 2]);
    }

    #[test]
    fn test_conv_concat_tanh_first() {
        let h = hparams(2, 1, 1);
        let doc = Transcoder::new().transcode(&h, &filled_store(&h)).unwrap();

        let w_conv = &doc.variables[2];
        assert_eq!(w_conv.name, RecordName::WConv);
        // 2*2*3 = 12 elements per branch; tanh fill 1.0 then sigm fill 2.0.
        assert_eq!(w_conv.data.len(), 24);
        assert!(w_conv.data[..12].iter().all(|&v| v == 1.0));
        assert!(w_conv.data[12..].iter().all(|&v| v == 2.0));

        let b_conv = &doc.variables[3];
        assert_eq!(b_conv.data, vec![3.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_weight_permutation_applied() {
        let h = hparams(2, 1, 1);
        let mut store = filled_store(&h);
        // Overwrite the tanh weight with distinct values: in[o][i][k] = o*6 + i*3 + k.
        store.insert(
            keys::conv_tanh_weight(0),
            Tensor::from_f32(Shape::conv(2, 2, 3), (0..12).map(|v| v as f32).collect()).unwrap(),
        );

        let doc = Transcoder::new().transcode(&h, &store).unwrap();
        // After (2,1,0): out[k][i][o] = in[o][i][k], flattened row-major.
        let expected: Vec<f32> = vec![0.0, 6.0, 3.0, 9.0, 1.0, 7.0, 4.0, 10.0, 2.0, 8.0, 5.0, 11.0];
        assert_eq!(&doc.variables[2].data[..12], expected.as_slice());
    }

    #[test]
    fn test_identity_axes_skip_reordering() {
        let h = hparams(2, 1, 1);
        let mut store = filled_store(&h);
        let values: Vec<f32> = (0..12).map(|v| v as f32).collect();
        store.insert(
            keys::conv_tanh_weight(0),
            Tensor::from_f32(Shape::conv(2, 2, 3), values.clone()).unwrap(),
        );

        let doc = Transcoder::with_axes(Axes3::IDENTITY)
            .transcode(&h, &store)
            .unwrap();
        assert_eq!(&doc.variables[2].data[..12], values.as_slice());
    }

    #[test]
    fn test_missing_tensor_names_key() {
        let h = hparams(4, 2, 1);
        let mut store = filled_store(&h);
        store.remove(&keys::residual_weight(0));

        let err = Transcoder::new().transcode(&h, &store).unwrap_err();
        match err {
            TranscodeError::MissingTensor { key } => {
                assert_eq!(key, "wavenet.residuals.0.weight");
            }
            other => panic!("expected MissingTensor, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_error_on_bad_rank() {
        let h = hparams(2, 1, 1);
        let mut store = filled_store(&h);
        // Rank-2 where a rank-3 conv weight is required.
        store.insert(
            keys::residual_weight(0),
            Tensor::from_f32(Shape::new(vec![2, 2]), vec![0.0; 4]).unwrap(),
        );

        let err = Transcoder::new().transcode(&h, &store).unwrap_err();
        assert!(matches!(err, TranscodeError::Shape { .. }));
    }

    #[test]
    fn test_bias_never_permuted() {
        let h = hparams(3, 1, 1);
        let mut store = filled_store(&h);
        store.insert(
            keys::INPUT_LAYER_BIAS,
            Tensor::from_f32(Shape::vector(3), vec![7.0, 8.0, 9.0]).unwrap(),
        );

        let doc = Transcoder::new().transcode(&h, &store).unwrap();
        assert_eq!(doc.variables[1].data, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_invalid_hparams_rejected() {
        let mut h = hparams(2, 1, 1);
        h.kernel_size = 0;
        let err = Transcoder::new().transcode(&h, &TensorStore::new()).unwrap_err();
        assert!(matches!(err, TranscodeError::Checkpoint(_)));
    }
}
