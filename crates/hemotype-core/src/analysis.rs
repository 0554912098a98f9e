//! Assembly of the per-card analysis response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resolver::blood_type_label;
use crate::section::{SectionResult, SECTION_COUNT};

/// Key under which a section appears in `analysis_data`.
pub fn section_key(index: usize) -> String {
    format!("section_{}", index)
}

/// Combined result for one test card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One of the eight blood-type labels, or `"Undetermined"`.
    pub blood_type: String,
    /// Unweighted mean of the section confidences.
    pub confidence_score: f64,
    /// Section results keyed `section_0` to `section_2`.
    pub analysis_data: BTreeMap<String, SectionResult>,
}

impl AnalysisResult {
    /// Builds the response from section results in reagent order.
    pub fn assemble(sections: [SectionResult; SECTION_COUNT]) -> Self {
        let reactions = sections.map(|s| s.agglutination);
        let confidence_score =
            sections.iter().map(|s| s.confidence).sum::<f64>() / SECTION_COUNT as f64;

        let analysis_data = sections
            .into_iter()
            .enumerate()
            .map(|(i, s)| (section_key(i), s))
            .collect();

        Self {
            blood_type: blood_type_label(reactions).to_string(),
            confidence_score,
            analysis_data,
        }
    }

    /// Section results in index order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionResult> {
        (0..SECTION_COUNT).filter_map(|i| self.analysis_data.get(&section_key(i)))
    }
}
