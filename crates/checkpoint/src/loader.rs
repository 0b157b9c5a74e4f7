// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Checkpoint loading from manifest + SafeTensors files.
//!
//! The loader reads a model directory containing:
//! - `model.json` — the hyperparameter manifest (see [`Hyperparameters`]).
//! - `model.safetensors` — the weight file in HuggingFace SafeTensors format.
//!
//! Weight data is decoded eagerly into `f32` tensors: the exporter always
//! touches every element exactly once, so there is nothing to gain from
//! lazy access. The file is memory-mapped for the header parse and the
//! per-tensor copies.

use crate::{CheckpointError, Hyperparameters, TensorStore};
use std::path::Path;
use wave_tensor::{Shape, Tensor};

/// Default manifest filename.
const MANIFEST_FILE: &str = "model.json";

/// Default SafeTensors filename.
const WEIGHTS_FILE: &str = "model.safetensors";

/// A loaded checkpoint: validated hyperparameters plus the named-tensor
/// collection.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Architecture hyperparameters.
    pub hparams: Hyperparameters,
    /// State-dict tensors keyed by name.
    pub tensors: TensorStore,
}

impl Checkpoint {
    /// Builds a checkpoint from already-loaded parts.
    ///
    /// Useful for testing without actual SafeTensors files. Validates the
    /// hyperparameters; tensor completeness is checked by the consumer,
    /// which knows which keys it needs.
    pub fn from_parts(
        hparams: Hyperparameters,
        tensors: TensorStore,
    ) -> Result<Self, CheckpointError> {
        hparams.validate()?;
        Ok(Self { hparams, tensors })
    }
}

/// Loads a checkpoint from a model directory.
///
/// # Example
/// ```no_run
/// use checkpoint::CheckpointLoader;
/// use std::path::Path;
///
/// let ckpt = CheckpointLoader::load(Path::new("./models/pedalnet")).unwrap();
/// println!("loaded {} tensors", ckpt.tensors.len());
/// ```
pub struct CheckpointLoader;

impl CheckpointLoader {
    /// Loads and validates a checkpoint from the given directory.
    ///
    /// Steps:
    /// 1. Parse `model.json` and validate the hyperparameters.
    /// 2. Memory-map `model.safetensors` and parse its header.
    /// 3. Decode every tensor into an owned f32 [`Tensor`].
    pub fn load(model_dir: &Path) -> Result<Checkpoint, CheckpointError> {
        let hparams = Hyperparameters::from_file(&model_dir.join(MANIFEST_FILE))?;
        hparams.validate()?;

        let tensors = Self::read_tensors(model_dir)?;
        tracing::info!(
            "loaded checkpoint from '{}': {} tensors, {} hidden layers",
            model_dir.display(),
            tensors.len(),
            hparams.num_hidden_layers(),
        );

        Ok(Checkpoint { hparams, tensors })
    }

    /// Reads and decodes all tensors from the SafeTensors file.
    fn read_tensors(model_dir: &Path) -> Result<TensorStore, CheckpointError> {
        let weights_path = model_dir.join(WEIGHTS_FILE);
        let file = std::fs::File::open(&weights_path).map_err(|e| {
            CheckpointError::SafeTensors(format!(
                "cannot open '{}': {e}",
                weights_path.display()
            ))
        })?;

        // Memory-map the file for zero-copy header parsing.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| CheckpointError::SafeTensors(format!("mmap failed: {e}")))?;

        let st = safetensors::SafeTensors::deserialize(&mmap)
            .map_err(|e| CheckpointError::SafeTensors(format!("SafeTensors parse error: {e}")))?;

        let mut store = TensorStore::new();
        for (name, view) in st.tensors() {
            if view.dtype() != safetensors::Dtype::F32 {
                return Err(CheckpointError::UnsupportedDtype {
                    name,
                    dtype: format!("{:?}", view.dtype()),
                });
            }

            let shape = Shape::new(view.shape().to_vec());
            let values = decode_f32_le(view.data());
            let tensor = Tensor::from_f32(shape, values)
                .map_err(|source| CheckpointError::Tensor {
                    name: name.clone(),
                    source,
                })?;
            store.insert(name, tensor);
        }

        Ok(store)
    }
}

/// Decodes little-endian f32 values from a SafeTensors data buffer.
fn decode_f32_le(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_hparams() -> Hyperparameters {
        Hyperparameters {
            num_channels: 2,
            kernel_size: 3,
            dilation_depth: 1,
            num_repeat: 1,
        }
    }

    /// Writes a minimal model directory (manifest + SafeTensors) and
    /// returns its path.
    fn write_test_model(dir_name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();

        let hparams = sample_hparams();
        std::fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_string(&hparams).unwrap(),
        )
        .unwrap();

        // Two small tensors are enough to exercise the decode path.
        let entries: Vec<(&str, Vec<usize>, Vec<f32>)> = vec![
            (crate::keys::INPUT_LAYER_WEIGHT, vec![2, 1, 1], vec![0.5, -0.5]),
            (crate::keys::INPUT_LAYER_BIAS, vec![2], vec![1.0, 2.0]),
        ];
        let bytes: Vec<(String, Vec<u8>, Vec<usize>)> = entries
            .into_iter()
            .map(|(name, shape, values)| {
                let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
                (name.to_string(), data, shape)
            })
            .collect();

        let views: HashMap<String, safetensors::tensor::TensorView<'_>> = bytes
            .iter()
            .map(|(name, data, shape)| {
                (
                    name.clone(),
                    safetensors::tensor::TensorView::new(
                        safetensors::Dtype::F32,
                        shape.clone(),
                        data,
                    )
                    .unwrap(),
                )
            })
            .collect();

        let serialized = safetensors::serialize(views, &None).unwrap();
        std::fs::write(dir.join(WEIGHTS_FILE), serialized).unwrap();
        dir
    }

    #[test]
    fn test_decode_f32_le() {
        let bytes: Vec<u8> = [1.5f32, -2.25].iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(decode_f32_le(&bytes), vec![1.5, -2.25]);
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = write_test_model("pedal_export_test_load");
        let ckpt = CheckpointLoader::load(&dir).unwrap();

        assert_eq!(ckpt.hparams, sample_hparams());
        assert_eq!(ckpt.tensors.len(), 2);

        let w = ckpt.tensors.get(crate::keys::INPUT_LAYER_WEIGHT).unwrap();
        assert_eq!(w.shape().dims(), &[2, 1, 1]);
        assert_eq!(w.data(), &[0.5, -0.5]);

        let b = ckpt.tensors.get(crate::keys::INPUT_LAYER_BIAS).unwrap();
        assert_eq!(b.data(), &[1.0, 2.0]);
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = std::env::temp_dir().join("pedal_export_test_no_such_model");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(CheckpointLoader::load(&dir).is_err());
    }

    #[test]
    fn test_from_parts_validates() {
        let mut bad = sample_hparams();
        bad.num_repeat = 0;
        let err = Checkpoint::from_parts(bad, TensorStore::new()).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::InvalidHyperparameter { field: "num_repeat", .. }
        ));
    }
}
