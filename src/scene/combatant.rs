//! Combatants placed on the battle scene
//!
//! A combatant is a placed piece: a position, a footprint, and a link to the
//! backing record that owns its conditions. Several combatants may share one
//! record.

use serde::{Deserialize, Serialize};

use crate::core::types::{CombatantId, Disposition, RecordId, SizeCategory, Vec2};

/// A piece placed on the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub record: RecordId,

    /// Centre position in scene pixels
    pub position: Vec2,
    /// Footprint in grid squares (width, height); None when the piece is malformed
    pub footprint: Option<(f32, f32)>,

    pub size: SizeCategory,
    pub disposition: Disposition,

    // State flags
    pub defeated: bool,
    pub hidden: bool,
}

impl Combatant {
    pub fn new(position: Vec2, size: SizeCategory, disposition: Disposition) -> Self {
        Self {
            id: CombatantId::new(),
            record: RecordId::new(),
            position,
            footprint: Some((1.0, 1.0)),
            size,
            disposition,
            defeated: false,
            hidden: false,
        }
    }

    /// Attach this combatant to an existing record (linked copies share one)
    pub fn with_record(mut self, record: RecordId) -> Self {
        self.record = record;
        self
    }

    pub fn with_footprint(mut self, width: f32, height: f32) -> Self {
        self.footprint = Some((width, height));
        self
    }

    pub fn defeated(mut self) -> Self {
        self.defeated = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Eligible to project or suffer engagement
    pub fn is_active(&self) -> bool {
        !self.defeated && !self.hidden
    }
}

/// Split a roster into (friendly, hostile), dropping neutral, hidden,
/// and defeated combatants
pub fn partition_rosters(combatants: &[Combatant]) -> (Vec<&Combatant>, Vec<&Combatant>) {
    let mut friendly = Vec::new();
    let mut hostile = Vec::new();

    for combatant in combatants {
        if !combatant.is_active() {
            continue;
        }
        match combatant.disposition {
            Disposition::Friendly => friendly.push(combatant),
            Disposition::Hostile => hostile.push(combatant),
            Disposition::Neutral => {}
        }
    }

    (friendly, hostile)
}
