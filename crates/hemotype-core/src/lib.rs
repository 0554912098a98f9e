//! Core domain types and rules for hemotype.
//!
//! This crate holds the pure part of the blood-typing pipeline, with no image
//! or model dependencies:
//!
//! - [`BloodType`] and the reaction lookup in [`resolve`] / [`blood_type_label`]
//! - [`Reagent`] — which antibody a card section belongs to
//! - [`SectionResult`] and [`classify_probability`] — thresholding a raw model output
//! - [`AnalysisResult`] — the assembled response for one card
//!
//! # Example
//!
//! ```rust
//! use hemotype_core::{classify_probability, AnalysisResult};
//!
//! let sections = [
//!     classify_probability(0.91),
//!     classify_probability(0.12),
//!     classify_probability(0.77),
//! ];
//! let result = AnalysisResult::assemble(sections);
//! assert_eq!(result.blood_type, "A+");
//! ```

mod analysis;
mod resolver;
mod section;

pub use analysis::{section_key, AnalysisResult};
pub use resolver::{
    blood_type_label, resolve, resolve_blood_type, BloodType, ParseBloodTypeError, UNDETERMINED,
};
pub use section::{
    classify_probability, round_confidence, Reagent, SectionResult, AGGLUTINATION_THRESHOLD,
    SECTION_COUNT,
};
