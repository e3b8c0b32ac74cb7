//! Weapon profiles and the traits the resolver cares about

use serde::{Deserialize, Serialize};

/// Broad attack kind; everything in the pipeline branches on this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Melee,
    Ranged,
}

/// Weapon traits with mechanical weight in the resolver.
///
/// Anything else a stat block carries is ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponTrait {
    /// Usable while engaged, at a price
    Pistol,
    /// Penalises firing unbraced below the rating's strength
    Heavy(i32),
    /// Shots per attack; pinning needs more than one
    Salvo(i32),
}

/// The weapon an attack is being configured with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    pub kind: WeaponKind,
    pub traits: Vec<WeaponTrait>,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, kind: WeaponKind) -> Self {
        Self {
            name: name.into(),
            kind,
            traits: Vec::new(),
        }
    }

    pub fn with_trait(mut self, t: WeaponTrait) -> Self {
        self.traits.push(t);
        self
    }

    pub fn is_melee(&self) -> bool {
        self.kind == WeaponKind::Melee
    }

    pub fn is_ranged(&self) -> bool {
        self.kind == WeaponKind::Ranged
    }

    pub fn has_pistol(&self) -> bool {
        self.traits.iter().any(|t| matches!(t, WeaponTrait::Pistol))
    }

    /// Heavy rating when present and meaningful
    pub fn heavy_rating(&self) -> Option<i32> {
        self.traits.iter().find_map(|t| match t {
            WeaponTrait::Heavy(rating) if *rating > 0 => Some(*rating),
            _ => None,
        })
    }

    /// Shots per attack; single-shot when the trait is absent
    pub fn salvo(&self) -> i32 {
        self.traits
            .iter()
            .find_map(|t| match t {
                WeaponTrait::Salvo(value) => Some(*value),
                _ => None,
            })
            .unwrap_or(1)
    }
}
