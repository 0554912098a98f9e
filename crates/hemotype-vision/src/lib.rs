//! Image side of the hemotype pipeline.
//!
//! A test card is decoded, cut into one strip per reagent, and each strip is
//! scored by an [`AgglutinationModel`]. [`CardAnalyzer`] ties the steps
//! together and hands the section results to [`hemotype_core::AnalysisResult`].

mod analyzer;
mod classifier;
mod error;
mod model;
mod preprocess;
mod sectioner;

pub use analyzer::{decode_image, CardAnalyzer};
pub use classifier::{AgglutinationModel, SectionClassifier};
pub use error::VisionError;
pub use model::RtenModel;
pub use preprocess::{to_model_input, MODEL_INPUT_SIZE};
pub use sectioner::{split_sections, Section};
