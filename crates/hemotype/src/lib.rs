//! Blood-typing test-card classifier.
//!
//! Re-exports the domain types from `hemotype-core` and the image pipeline
//! from `hemotype-vision`.
//!
//! ```rust,no_run
//! use hemotype::prelude::*;
//!
//! let analyzer = CardAnalyzer::new(SectionClassifier::without_model());
//! let bytes = std::fs::read("card.png").unwrap();
//! let result = analyzer.analyze_bytes(&bytes).unwrap();
//! println!("{}", result.blood_type);
//! ```

pub use hemotype_core as domain;
pub use hemotype_vision as vision;

pub mod prelude {
    pub use hemotype_core::{
        blood_type_label, classify_probability, resolve, resolve_blood_type, AnalysisResult,
        BloodType, Reagent, SectionResult, UNDETERMINED,
    };
    pub use hemotype_vision::{
        split_sections, AgglutinationModel, CardAnalyzer, RtenModel, SectionClassifier,
        VisionError,
    };
}
