// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Named-tensor collection keyed by state-dict name.

use crate::Hyperparameters;
use std::collections::HashMap;
use wave_tensor::Tensor;

/// An explicit map from state-dict key to tensor.
///
/// Lookup returns `Option`; deciding whether an absent key is an error
/// (and which error) is left to the caller, which knows which keys its
/// layer construction requires.
#[derive(Debug, Clone, Default)]
pub struct TensorStore {
    tensors: HashMap<String, Tensor>,
}

impl TensorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tensor under the given key, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, tensor: Tensor) {
        self.tensors.insert(name.into(), tensor);
    }

    /// Looks up a tensor by key.
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.tensors.get(name)
    }

    /// Removes and returns the tensor stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Tensor> {
        self.tensors.remove(name)
    }

    /// Returns `true` if the store holds a tensor under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.tensors.contains_key(name)
    }

    /// Returns the number of stored tensors.
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    /// Returns all keys in sorted order (for stable inspection output).
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tensors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the total element count across all stored tensors.
    pub fn total_elements(&self) -> usize {
        self.tensors.values().map(Tensor::num_elements).sum()
    }

    /// Returns the required keys (see [`crate::keys::required_keys`])
    /// that are absent from this store.
    pub fn missing_keys(&self, hparams: &Hyperparameters) -> Vec<String> {
        crate::keys::required_keys(hparams)
            .into_iter()
            .filter(|k| !self.contains(k))
            .collect()
    }
}

impl FromIterator<(String, Tensor)> for TensorStore {
    fn from_iter<I: IntoIterator<Item = (String, Tensor)>>(iter: I) -> Self {
        Self {
            tensors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_tensor::Shape;

    #[test]
    fn test_insert_and_get() {
        let mut store = TensorStore::new();
        assert!(store.is_empty());
        store.insert("wavenet.input_layer.bias", Tensor::zeros(Shape::vector(4)));
        assert_eq!(store.len(), 1);
        assert!(store.contains("wavenet.input_layer.bias"));
        assert!(store.get("wavenet.input_layer.weight").is_none());
    }

    #[test]
    fn test_sorted_names() {
        let mut store = TensorStore::new();
        store.insert("b", Tensor::zeros(Shape::vector(1)));
        store.insert("a", Tensor::zeros(Shape::vector(2)));
        assert_eq!(store.sorted_names(), vec!["a", "b"]);
        assert_eq!(store.total_elements(), 3);
    }

    #[test]
    fn test_missing_keys() {
        let h = Hyperparameters {
            num_channels: 4,
            kernel_size: 3,
            dilation_depth: 1,
            num_repeat: 1,
        };
        let mut store = TensorStore::new();
        store.insert(crate::keys::INPUT_LAYER_WEIGHT, Tensor::zeros(Shape::conv(4, 1, 1)));
        let missing = store.missing_keys(&h);
        // 10 required keys in total, one present.
        assert_eq!(missing.len(), 9);
        assert!(missing.contains(&crate::keys::conv_tanh_weight(0)));
    }
}
