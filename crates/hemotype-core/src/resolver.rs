//! ABO/Rh lookup from the three reagent reactions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Label returned when the reaction pattern has no table entry.
pub const UNDETERMINED: &str = "Undetermined";

/// One of the eight ABO/Rh blood types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    /// True when the Anti-D reagent reacted.
    pub fn is_rh_positive(&self) -> bool {
        matches!(
            self,
            BloodType::APositive
                | BloodType::BPositive
                | BloodType::AbPositive
                | BloodType::OPositive
        )
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`BloodType::from_str`] for anything outside the eight labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown blood type: {0}")]
pub struct ParseBloodTypeError(pub String);

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == s)
            .ok_or_else(|| ParseBloodTypeError(s.to_string()))
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BloodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Maps the (Anti-A, Anti-B, Anti-D) reactions to a blood type.
pub fn resolve_blood_type(anti_a: bool, anti_b: bool, anti_d: bool) -> BloodType {
    match (anti_a, anti_b, anti_d) {
        (true, false, true) => BloodType::APositive,
        (true, false, false) => BloodType::ANegative,
        (false, true, true) => BloodType::BPositive,
        (false, true, false) => BloodType::BNegative,
        (true, true, true) => BloodType::AbPositive,
        (true, true, false) => BloodType::AbNegative,
        (false, false, true) => BloodType::OPositive,
        (false, false, false) => BloodType::ONegative,
    }
}

/// Resolves a reaction triple in reagent order. Any missing reaction has no
/// table entry and yields `None`.
pub fn resolve(reactions: [Option<bool>; 3]) -> Option<BloodType> {
    match reactions {
        [Some(a), Some(b), Some(d)] => Some(resolve_blood_type(a, b, d)),
        _ => None,
    }
}

/// Like [`resolve`], falling back to [`UNDETERMINED`].
pub fn blood_type_label(reactions: [Option<bool>; 3]) -> &'static str {
    resolve(reactions).map_or(UNDETERMINED, |bt| bt.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table() {
        let cases = [
            ((true, false, true), "A+"),
            ((true, false, false), "A-"),
            ((false, true, true), "B+"),
            ((false, true, false), "B-"),
            ((true, true, true), "AB+"),
            ((true, true, false), "AB-"),
            ((false, false, true), "O+"),
            ((false, false, false), "O-"),
        ];

        for ((a, b, d), expected) in cases {
            assert_eq!(resolve_blood_type(a, b, d).as_str(), expected);
            assert_eq!(blood_type_label([Some(a), Some(b), Some(d)]), expected);
        }
    }

    #[test]
    fn test_any_null_is_undetermined() {
        assert_eq!(blood_type_label([None, None, None]), UNDETERMINED);
        assert_eq!(blood_type_label([Some(true), None, Some(true)]), UNDETERMINED);
        assert_eq!(blood_type_label([Some(false), Some(false), None]), UNDETERMINED);
        assert!(resolve([None, Some(true), Some(true)]).is_none());
    }

    #[test]
    fn test_table_is_a_bijection() {
        let mut seen = std::collections::HashSet::new();
        for a in [true, false] {
            for b in [true, false] {
                for d in [true, false] {
                    let bt = resolve_blood_type(a, b, d);
                    assert_eq!(bt.is_rh_positive(), d);
                    assert!(seen.insert(bt));
                }
            }
        }
        assert_eq!(seen.len(), BloodType::ALL.len());
    }

    #[test]
    fn test_parse_and_display() {
        for bt in BloodType::ALL {
            assert_eq!(bt.to_string().parse::<BloodType>().unwrap(), bt);
        }
        assert_eq!(
            "Undetermined".parse::<BloodType>(),
            Err(ParseBloodTypeError("Undetermined".into()))
        );
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&BloodType::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let parsed: BloodType = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(parsed, BloodType::OPositive);
        assert!(serde_json::from_str::<BloodType>("\"C+\"").is_err());
    }
}
