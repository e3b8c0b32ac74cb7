//! The adjustment ledger shown alongside resolved fields
//!
//! Every rule that touches a field leaves an annotation, including the
//! zero-delta ones that explain why nothing moved. The dialog renders
//! these as tooltips on the adjusted inputs.

use serde::{Deserialize, Serialize};

use crate::core::types::{CoverLevel, SizeCategory, VisionBand};

/// Which input an annotation hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotatedField {
    Pool,
    Difficulty,
    Damage,
}

/// The rule behind an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationReason {
    TargetNotEngaged,
    RangedBlocked,
    AimSuppressed,
    ShortRangeSuppressed,
    AllOutAttack,
    Brace,
    /// Resolve of the target when known; the difficulty is set to it
    Pinning { resolve: Option<i32> },
    PistolsInMelee,
    Vision(VisionBand),
    TargetSize(SizeCategory),
    Disarm,
    Cover(CoverLevel),
}

impl AnnotationReason {
    /// Rules text shown to the player
    pub fn label(&self) -> String {
        match self {
            AnnotationReason::TargetNotEngaged => {
                "Engaged Attacker (Targets must be engaged)".to_string()
            }
            AnnotationReason::RangedBlocked => {
                "Engaged Opponent (Cannot fire non-Pistol ranged weapons)".to_string()
            }
            AnnotationReason::AimSuppressed => {
                "Engaged Opponent (Aim bonus suppressed)".to_string()
            }
            AnnotationReason::ShortRangeSuppressed => {
                "Engaged Opponent (Short Range bonus suppressed)".to_string()
            }
            AnnotationReason::AllOutAttack => {
                "All-Out Attack (+2 Dice / -2 Defence)".to_string()
            }
            AnnotationReason::Brace => "Brace (Negate Heavy trait)".to_string(),
            AnnotationReason::Pinning { resolve: Some(dn) } => {
                format!("Pinning Attack (No damage, target tests Resolve) (Resolve DN {})", dn)
            }
            AnnotationReason::Pinning { resolve: None } => {
                "Pinning Attack (No damage, target tests Resolve)".to_string()
            }
            AnnotationReason::PistolsInMelee => {
                "Pistols In Melee (+2 DN to Ballistic Skill)".to_string()
            }
            AnnotationReason::Vision(band) => match band {
                VisionBand::None => "Vision: Clear".to_string(),
                VisionBand::Twilight => {
                    "Vision: Twilight, Light Shadows, Heavy Mist (+1 DN Ranged / +0 DN Melee)"
                        .to_string()
                }
                VisionBand::Dim => {
                    "Vision: Very Dim Light, Heavy Rain, Fog, Drifting Smoke (+2 DN Ranged / +1 DN Melee)"
                        .to_string()
                }
                VisionBand::Heavy => {
                    "Vision: Heavy Fog, Deployed Smoke, Torrential Storm (+3 DN Ranged / +2 DN Melee)"
                        .to_string()
                }
                VisionBand::Darkness => {
                    "Vision: Total Darkness, Thermal Smoke (+4 DN Ranged / +3 DN Melee)".to_string()
                }
            },
            AnnotationReason::TargetSize(size) => match size {
                SizeCategory::Tiny => "Tiny Target (+2 DN)".to_string(),
                SizeCategory::Small => "Small Target (+1 DN)".to_string(),
                SizeCategory::Average => "Average Target (No modifier)".to_string(),
                SizeCategory::Large => "Large Target (+1 Die)".to_string(),
                SizeCategory::Huge => "Huge Target (+2 Dice)".to_string(),
                SizeCategory::Gargantuan => "Gargantuan Target (+3 Dice)".to_string(),
            },
            AnnotationReason::Disarm => {
                "Disarm (No damage; Strength DN = half total damage)".to_string()
            }
            AnnotationReason::Cover(level) => match level {
                CoverLevel::None => "No Cover".to_string(),
                CoverLevel::Half => "Half Cover (+1 Defence)".to_string(),
                CoverLevel::Full => "Full Cover (+2 Defence)".to_string(),
            },
        }
    }
}

/// One line of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub field: AnnotatedField,
    pub delta: i32,
    pub reason: AnnotationReason,
}

impl Annotation {
    pub fn new(field: AnnotatedField, delta: i32, reason: AnnotationReason) -> Self {
        Self { field, delta, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinning_label_carries_resolve() {
        let reason = AnnotationReason::Pinning { resolve: Some(3) };
        assert!(reason.label().contains("Resolve DN 3"));

        let unknown = AnnotationReason::Pinning { resolve: None };
        assert!(!unknown.label().contains("DN"));
    }

    #[test]
    fn test_labels_are_nonempty() {
        let reasons = [
            AnnotationReason::TargetNotEngaged,
            AnnotationReason::RangedBlocked,
            AnnotationReason::AimSuppressed,
            AnnotationReason::ShortRangeSuppressed,
            AnnotationReason::AllOutAttack,
            AnnotationReason::Brace,
            AnnotationReason::PistolsInMelee,
            AnnotationReason::Vision(VisionBand::Darkness),
            AnnotationReason::TargetSize(SizeCategory::Gargantuan),
            AnnotationReason::Disarm,
            AnnotationReason::Cover(CoverLevel::Full),
        ];
        for reason in reasons {
            assert!(!reason.label().is_empty());
        }
    }
}
