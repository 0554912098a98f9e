//! Per-section classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of reagent sections on a test card.
pub const SECTION_COUNT: usize = 3;

/// Model outputs strictly above this count as agglutination.
pub const AGGLUTINATION_THRESHOLD: f32 = 0.3;

/// Antibody reagent applied to a card section, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reagent {
    AntiA,
    AntiB,
    AntiD,
}

impl Reagent {
    pub const ORDER: [Reagent; SECTION_COUNT] = [Reagent::AntiA, Reagent::AntiB, Reagent::AntiD];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reagent::AntiA => "Anti-A",
            Reagent::AntiB => "Anti-B",
            Reagent::AntiD => "Anti-D (Rh)",
        }
    }
}

impl fmt::Display for Reagent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one card section.
///
/// `agglutination` is `None` only when no model is loaded, in which case
/// `confidence` is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub agglutination: Option<bool>,
    pub confidence: f64,
}

impl SectionResult {
    /// Result reported for every section while running without a model.
    pub fn unavailable() -> Self {
        Self {
            agglutination: None,
            confidence: 0.0,
        }
    }
}

/// Turns a raw model probability into a section result.
///
/// The comparison happens in `f32`, the model's output type, so `0.3` itself
/// is not agglutination. Confidence is for the predicted class.
pub fn classify_probability(probability: f32) -> SectionResult {
    let agglutination = probability > AGGLUTINATION_THRESHOLD;
    let p = f64::from(probability);
    let raw = if agglutination { p } else { 1.0 - p };

    SectionResult {
        agglutination: Some(agglutination),
        confidence: round_confidence(raw),
    }
}

/// Rounds to two decimal places, ties to even, on the exact binary value.
///
/// `0.625` becomes `0.62`, while `2.675` (stored just below the tie) becomes
/// `2.67`.
pub fn round_confidence(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Exact residual of the product; nonzero means `scaled` is not the true value.
    let residual = value.mul_add(100.0, -scaled);

    let rounded = if scaled.fract().abs() == 0.5 && residual != 0.0 {
        if residual > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(classify_probability(0.3).agglutination, Some(false));
        assert_eq!(classify_probability(0.30001).agglutination, Some(true));
        assert_eq!(classify_probability(0.0).agglutination, Some(false));
        assert_eq!(classify_probability(1.0).agglutination, Some(true));
    }

    #[test]
    fn test_confidence_is_for_predicted_class() {
        let positive = classify_probability(0.756);
        assert_eq!(positive.agglutination, Some(true));
        assert_eq!(positive.confidence, 0.76);

        let negative = classify_probability(0.1);
        assert_eq!(negative.agglutination, Some(false));
        assert_eq!(negative.confidence, 0.9);

        // At the threshold the prediction is negative: 1 - 0.3
        assert_eq!(classify_probability(0.3).confidence, 0.7);
    }

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.756), 0.76);
        assert_eq!(round_confidence(0.754), 0.75);
        assert_eq!(round_confidence(1.0), 1.0);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn test_round_confidence_ties_to_even() {
        assert_eq!(round_confidence(0.125), 0.12);
        assert_eq!(round_confidence(0.375), 0.38);
        assert_eq!(round_confidence(0.625), 0.62);
        assert_eq!(round_confidence(0.875), 0.88);
        // Not a tie once the binary value is considered
        assert_eq!(round_confidence(2.675), 2.67);
    }

    #[test]
    fn test_confidence_tie_from_model_output() {
        let positive = classify_probability(0.625);
        assert_eq!(positive.agglutination, Some(true));
        assert_eq!(positive.confidence, 0.62);

        // 1 - 0.125 = 0.875
        let negative = classify_probability(0.125);
        assert_eq!(negative.agglutination, Some(false));
        assert_eq!(negative.confidence, 0.88);
    }

    #[test]
    fn test_unavailable() {
        let r = SectionResult::unavailable();
        assert_eq!(r.agglutination, None);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_reagent_order() {
        assert_eq!(Reagent::ORDER[0], Reagent::AntiA);
        assert_eq!(Reagent::ORDER[2], Reagent::AntiD);
        assert_eq!(Reagent::AntiD.to_string(), "Anti-D (Rh)");
    }

    #[test]
    fn test_null_agglutination_serializes_as_null() {
        let json = serde_json::to_value(SectionResult::unavailable()).unwrap();
        assert_eq!(json, serde_json::json!({ "agglutination": null, "confidence": 0.0 }));
    }
}
