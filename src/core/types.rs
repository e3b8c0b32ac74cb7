//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a combatant placed on the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for the backing record a combatant represents.
///
/// Several combatants can share one record (linked copies of the same
/// creature); condition markers live on the record, not the combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// 2D position in scene pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Creature size category, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SizeCategory {
    Tiny = 0,
    Small = 1,
    Average = 2,
    Large = 3,
    Huge = 4,
    Gargantuan = 5,
}

impl SizeCategory {
    /// How many categories above Average this size sits (0 for Average and below)
    pub fn steps_above_average(&self) -> u8 {
        (*self as u8).saturating_sub(SizeCategory::Average as u8)
    }

    /// Parses a size key, falling back to Average for unknown or empty input
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "tiny" => SizeCategory::Tiny,
            "small" => SizeCategory::Small,
            "large" => SizeCategory::Large,
            "huge" => SizeCategory::Huge,
            "gargantuan" => SizeCategory::Gargantuan,
            _ => SizeCategory::Average,
        }
    }
}

impl Default for SizeCategory {
    fn default() -> Self {
        SizeCategory::Average
    }
}

/// Which side of the fight a combatant stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    Friendly,
    Hostile,
    Neutral,
}

impl Disposition {
    /// Maps a signed disposition value: positive friendly, negative hostile, zero neutral
    pub fn from_value(value: i32) -> Self {
        match value.cmp(&0) {
            std::cmp::Ordering::Greater => Disposition::Friendly,
            std::cmp::Ordering::Less => Disposition::Hostile,
            std::cmp::Ordering::Equal => Disposition::Neutral,
        }
    }
}

/// Cover the target benefits from, ordered by protection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CoverLevel {
    None = 0,
    Half = 1,
    Full = 2,
}

impl Default for CoverLevel {
    fn default() -> Self {
        CoverLevel::None
    }
}

/// Ambient lighting band, ordered clearest to darkest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum VisionBand {
    None = 0,
    Twilight = 1,
    Dim = 2,
    Heavy = 3,
    Darkness = 4,
}

impl Default for VisionBand {
    fn default() -> Self {
        VisionBand::None
    }
}
