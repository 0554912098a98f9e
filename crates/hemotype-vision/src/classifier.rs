//! Agglutination scoring for a single card section.

use std::sync::Arc;

use hemotype_core::{classify_probability, SectionResult};
use image::RgbImage;
use rten_tensor::NdTensor;

use crate::error::VisionError;
use crate::preprocess::rgb_to_model_input;

/// A binary classifier that scores one preprocessed section.
pub trait AgglutinationModel: Send + Sync {
    /// Returns the probability of agglutination in `[0, 1]` for a
    /// `[1, 224, 224, 3]` input.
    fn predict(&self, input: &NdTensor<f32, 4>) -> Result<f32, VisionError>;
}

/// Wraps an optional model. Without one, every section is reported as
/// unavailable instead of failing.
#[derive(Clone, Default)]
pub struct SectionClassifier {
    model: Option<Arc<dyn AgglutinationModel>>,
}

impl SectionClassifier {
    pub fn new(model: Arc<dyn AgglutinationModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Classifier running in degraded mode.
    pub fn without_model() -> Self {
        Self { model: None }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Scores one section image.
    pub fn classify(&self, section: &RgbImage) -> Result<SectionResult, VisionError> {
        let Some(model) = &self.model else {
            return Ok(SectionResult::unavailable());
        };

        let input = rgb_to_model_input(section);
        let probability = model.predict(&input)?;
        Ok(classify_probability(probability))
    }
}

impl std::fmt::Debug for SectionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionClassifier")
            .field("has_model", &self.has_model())
            .finish()
    }
}
