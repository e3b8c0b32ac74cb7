pub mod combatant;
pub mod conditions;
pub mod grid;

pub use combatant::{partition_rosters, Combatant};
pub use conditions::{ConditionStore, Marker, MemoryConditionStore, Provenance};
pub use grid::{MeasureContext, SceneGrid};
