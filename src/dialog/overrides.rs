//! Manual field edits that outrank the pipeline
//!
//! When a player types a number into an input, that number wins over
//! whatever the rules computed, pass after pass, until the overrides are
//! cleared.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::dialog::fields::FieldSet;

/// Addressable inputs on the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldPath {
    Pool,
    Difficulty,
    Damage,
    EdValue,
    EdDice,
    ApValue,
    ApDice,
    Wrath,
}

/// The set of fields currently pinned by hand
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    values: AHashMap<FieldPath, i32>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a field to a hand-entered value
    pub fn record(&mut self, path: FieldPath, value: i32) {
        self.values.insert(path, value);
    }

    /// Release a single field back to the pipeline
    pub fn release(&mut self, path: FieldPath) {
        self.values.remove(&path);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, path: FieldPath) -> Option<i32> {
        self.values.get(&path).copied()
    }

    /// Stamp every pinned value over the computed fields
    pub fn apply(&self, fields: &mut FieldSet) {
        if let Some(v) = self.get(FieldPath::Pool) {
            fields.pool = v;
        }
        if let Some(v) = self.get(FieldPath::Difficulty) {
            fields.difficulty = v;
        }
        if let Some(v) = self.get(FieldPath::Damage) {
            fields.damage = v;
        }
        if let Some(v) = self.get(FieldPath::EdValue) {
            fields.ed.value = v;
        }
        if let Some(v) = self.get(FieldPath::EdDice) {
            fields.ed.dice = v;
        }
        if let Some(v) = self.get(FieldPath::ApValue) {
            fields.ap.value = v;
        }
        if let Some(v) = self.get(FieldPath::ApDice) {
            fields.ap.dice = v;
        }
        if let Some(v) = self.get(FieldPath::Wrath) {
            fields.wrath = v;
        }
    }
}
