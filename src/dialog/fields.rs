//! The numeric fields of an attack roll and deltas between them

use serde::{Deserialize, Serialize};

/// A bonus expressed as a flat value plus extra dice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceValue {
    pub value: i32,
    pub dice: i32,
}

impl DiceValue {
    pub fn new(value: i32, dice: i32) -> Self {
        Self { value, dice }
    }
}

/// Every number the attack dialog rolls with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    /// Dice rolled
    pub pool: i32,
    /// Successes needed
    pub difficulty: i32,
    /// Flat damage on a hit
    pub damage: i32,
    /// Extra damage
    pub ed: DiceValue,
    /// Armour penetration
    pub ap: DiceValue,
    /// Wrath dice within the pool
    pub wrath: i32,
}

impl FieldSet {
    /// The adjustment separating these fields from a baseline.
    ///
    /// Wrath is never adjusted by the pipeline, so deltas do not carry it.
    pub fn minus(&self, baseline: &FieldSet) -> ResolutionDelta {
        ResolutionDelta {
            pool: self.pool - baseline.pool,
            difficulty: self.difficulty - baseline.difficulty,
            damage: self.damage - baseline.damage,
            ed: DiceValue::new(self.ed.value - baseline.ed.value, self.ed.dice - baseline.ed.dice),
            ap: DiceValue::new(self.ap.value - baseline.ap.value, self.ap.dice - baseline.ap.dice),
        }
    }

    /// Back a previously applied delta out of these fields
    pub fn remove_delta(&self, delta: &ResolutionDelta) -> FieldSet {
        FieldSet {
            pool: self.pool - delta.pool,
            difficulty: self.difficulty - delta.difficulty,
            damage: self.damage - delta.damage,
            ed: DiceValue::new(self.ed.value - delta.ed.value, self.ed.dice - delta.ed.dice),
            ap: DiceValue::new(self.ap.value - delta.ap.value, self.ap.dice - delta.ap.dice),
            wrath: self.wrath,
        }
    }

    /// Clamp every field a roll needs non-negative. Damage is the one
    /// field the pipeline never floors.
    pub fn clamp_floors(&mut self) {
        self.pool = self.pool.max(0);
        self.difficulty = self.difficulty.max(0);
        self.ed.value = self.ed.value.max(0);
        self.ed.dice = self.ed.dice.max(0);
        self.ap.value = self.ap.value.max(0);
        self.ap.dice = self.ap.dice.max(0);
        self.wrath = self.wrath.max(0);
    }
}

/// What the pipeline changed relative to the upstream baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDelta {
    pub pool: i32,
    pub difficulty: i32,
    pub damage: i32,
    pub ed: DiceValue,
    pub ap: DiceValue,
}

impl ResolutionDelta {
    pub fn is_zero(&self) -> bool {
        *self == ResolutionDelta::default()
    }
}
