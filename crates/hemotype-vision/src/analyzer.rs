//! End-to-end analysis of one test card.

use hemotype_core::{AnalysisResult, SectionResult, SECTION_COUNT};
use image::{DynamicImage, RgbImage};
use tracing::{debug, info};

use crate::classifier::SectionClassifier;
use crate::error::VisionError;
use crate::sectioner::split_sections;

/// Decodes any supported image format and converts it to RGB.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, VisionError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgb8())
}

/// Runs sectioning, per-section classification, and blood-type resolution.
#[derive(Debug, Clone, Default)]
pub struct CardAnalyzer {
    classifier: SectionClassifier,
}

impl CardAnalyzer {
    pub fn new(classifier: SectionClassifier) -> Self {
        Self { classifier }
    }

    pub fn has_model(&self) -> bool {
        self.classifier.has_model()
    }

    /// Decodes `bytes` and analyzes the resulting image.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, VisionError> {
        let image = decode_image(bytes)?;
        self.analyze_rgb(&image)
    }

    pub fn analyze(&self, image: &DynamicImage) -> Result<AnalysisResult, VisionError> {
        self.analyze_rgb(&image.to_rgb8())
    }

    /// Sections are scored one after another; the first failure aborts the
    /// whole card.
    pub fn analyze_rgb(&self, image: &RgbImage) -> Result<AnalysisResult, VisionError> {
        let sections = split_sections(image)?;

        let mut results = [SectionResult::unavailable(); SECTION_COUNT];
        for section in &sections {
            let result = self.classifier.classify(&section.image)?;
            debug!(
                section = section.index,
                reagent = %section.reagent,
                width = section.width(),
                agglutination = ?result.agglutination,
                confidence = result.confidence,
                "Classified section"
            );
            results[section.index] = result;
        }

        let analysis = AnalysisResult::assemble(results);
        info!(
            blood_type = %analysis.blood_type,
            confidence = analysis.confidence_score,
            width = image.width(),
            height = image.height(),
            "Analyzed test card"
        );
        Ok(analysis)
    }
}
