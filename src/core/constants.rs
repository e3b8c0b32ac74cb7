//! Rules-table constants - all fixed modifier values in one place
//!
//! These values are ADDITIVE dice and difficulty adjustments straight from
//! the tabletop rules. Tunable numbers live in config, not here.

use crate::core::types::{CoverLevel, SizeCategory, VisionBand};

// Stance and option modifiers
pub const ALL_OUT_ATTACK_POOL_BONUS: i32 = 2;
pub const BRACE_DIFFICULTY_REDUCTION: i32 = 2;
pub const PISTOLS_IN_MELEE_PENALTY: i32 = 2;

// Upstream bonuses clawed back while engaged with a pistol
pub const AIM_POOL_BONUS: i32 = 1;
pub const SHORT_RANGE_POOL_BONUS: i32 = 1;

/// Dice and difficulty adjustment granted by a target's size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeModifier {
    /// Bonus dice added to the attacker's pool
    pub pool: i32,
    /// Difficulty added to the attacker's test
    pub difficulty: i32,
}

/// Size modifier table: small targets raise difficulty, big targets grant dice
pub const fn size_modifier(size: SizeCategory) -> SizeModifier {
    match size {
        SizeCategory::Tiny => SizeModifier { pool: 0, difficulty: 2 },
        SizeCategory::Small => SizeModifier { pool: 0, difficulty: 1 },
        SizeCategory::Average => SizeModifier { pool: 0, difficulty: 0 },
        SizeCategory::Large => SizeModifier { pool: 1, difficulty: 0 },
        SizeCategory::Huge => SizeModifier { pool: 2, difficulty: 0 },
        SizeCategory::Gargantuan => SizeModifier { pool: 3, difficulty: 0 },
    }
}

/// Difficulty penalty from a darkness band, split by attack kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisionPenalty {
    pub ranged: i32,
    pub melee: i32,
}

/// Vision penalty table: melee always one step kinder than ranged
pub const fn vision_penalty(band: VisionBand) -> VisionPenalty {
    match band {
        VisionBand::None => VisionPenalty { ranged: 0, melee: 0 },
        VisionBand::Twilight => VisionPenalty { ranged: 1, melee: 0 },
        VisionBand::Dim => VisionPenalty { ranged: 2, melee: 1 },
        VisionBand::Heavy => VisionPenalty { ranged: 3, melee: 2 },
        VisionBand::Darkness => VisionPenalty { ranged: 4, melee: 3 },
    }
}

/// Difficulty added by the cover a target enjoys
pub const fn cover_difficulty(level: CoverLevel) -> i32 {
    match level {
        CoverLevel::None => 0,
        CoverLevel::Half => 1,
        CoverLevel::Full => 2,
    }
}
