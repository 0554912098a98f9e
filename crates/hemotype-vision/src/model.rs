//! rten-backed agglutination model.

use std::path::{Path, PathBuf};

use rten::Model;
use rten_tensor::prelude::*;
use rten_tensor::{NdTensor, Tensor};
use tracing::{debug, info};

use crate::classifier::AgglutinationModel;
use crate::error::VisionError;

/// Binary classifier loaded from a `.rten` file.
///
/// The model takes a `[1, 224, 224, 3]` batch and emits a single sigmoid
/// output per item.
pub struct RtenModel {
    model: Model,
    path: PathBuf,
}

impl RtenModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VisionError> {
        let path = path.as_ref();
        debug!("Loading agglutination model from {:?}", path);

        let model = Model::load_file(path).map_err(|e| VisionError::ModelLoad(e.to_string()))?;

        info!("Loaded agglutination model from {:?}", path);
        Ok(Self {
            model,
            path: path.to_path_buf(),
        })
    }

    /// Loads the model if the file exists. A missing file is not an error.
    pub fn load_if_present(path: impl AsRef<Path>) -> Result<Option<Self>, VisionError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AgglutinationModel for RtenModel {
    fn predict(&self, input: &NdTensor<f32, 4>) -> Result<f32, VisionError> {
        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| VisionError::Inference(e.to_string()))?;

        let scores = Tensor::<f32>::try_from(output)
            .map_err(|e| VisionError::Inference(e.to_string()))?;

        scores
            .iter()
            .next()
            .copied()
            .ok_or_else(|| VisionError::Inference("model returned an empty output".into()))
    }
}
