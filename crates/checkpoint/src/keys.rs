// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The state-dict key schema of a PedalNet checkpoint.
//!
//! Every tensor the exporter reads is addressed by one of these keys.
//! Weight tensors are rank-3 `(out_channels, in_channels, kernel_width)`;
//! bias tensors are rank-1.

use crate::Hyperparameters;

/// Causal input layer weight, shape `(num_channels, 1, 1)`.
pub const INPUT_LAYER_WEIGHT: &str = "wavenet.input_layer.weight";
/// Causal input layer bias, shape `(num_channels,)`.
pub const INPUT_LAYER_BIAS: &str = "wavenet.input_layer.bias";
/// Final linear mix weight, shape `(1, num_channels * layers, 1)`.
pub const LINEAR_MIX_WEIGHT: &str = "wavenet.linear_mix.weight";
/// Final linear mix bias, shape `(1,)`.
pub const LINEAR_MIX_BIAS: &str = "wavenet.linear_mix.bias";

/// Tanh-branch convolution weight for hidden layer `i`.
pub fn conv_tanh_weight(i: usize) -> String {
    format!("wavenet.convs_tanh.{i}.weight")
}

/// Tanh-branch convolution bias for hidden layer `i`.
pub fn conv_tanh_bias(i: usize) -> String {
    format!("wavenet.convs_tanh.{i}.bias")
}

/// Sigmoid-branch convolution weight for hidden layer `i`.
pub fn conv_sigm_weight(i: usize) -> String {
    format!("wavenet.convs_sigm.{i}.weight")
}

/// Sigmoid-branch convolution bias for hidden layer `i`.
pub fn conv_sigm_bias(i: usize) -> String {
    format!("wavenet.convs_sigm.{i}.bias")
}

/// Residual/skip projection weight for hidden layer `i`.
pub fn residual_weight(i: usize) -> String {
    format!("wavenet.residuals.{i}.weight")
}

/// Residual/skip projection bias for hidden layer `i`.
pub fn residual_bias(i: usize) -> String {
    format!("wavenet.residuals.{i}.bias")
}

/// Every key a complete checkpoint must contain for the given
/// hyperparameters, in export order.
pub fn required_keys(hparams: &Hyperparameters) -> Vec<String> {
    let hidden = hparams.num_hidden_layers();
    let mut keys = Vec::with_capacity(4 + 6 * hidden);
    keys.push(INPUT_LAYER_WEIGHT.to_string());
    keys.push(INPUT_LAYER_BIAS.to_string());
    for i in 0..hidden {
        keys.push(conv_tanh_weight(i));
        keys.push(conv_tanh_bias(i));
        keys.push(conv_sigm_weight(i));
        keys.push(conv_sigm_bias(i));
        keys.push(residual_weight(i));
        keys.push(residual_bias(i));
    }
    keys.push(LINEAR_MIX_WEIGHT.to_string());
    keys.push(LINEAR_MIX_BIAS.to_string());
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_keys() {
        assert_eq!(conv_tanh_weight(0), "wavenet.convs_tanh.0.weight");
        assert_eq!(conv_sigm_bias(7), "wavenet.convs_sigm.7.bias");
        assert_eq!(residual_weight(3), "wavenet.residuals.3.weight");
    }

    #[test]
    fn test_required_keys_count() {
        let h = Hyperparameters {
            num_channels: 16,
            kernel_size: 3,
            dilation_depth: 10,
            num_repeat: 1,
        };
        let keys = required_keys(&h);
        // 2 input + 2 mix + 6 per hidden layer.
        assert_eq!(keys.len(), 4 + 6 * 10);
        assert_eq!(keys.first().unwrap(), INPUT_LAYER_WEIGHT);
        assert_eq!(keys.last().unwrap(), LINEAR_MIX_BIAS);
    }
}
