//! Reconciling Engaged markers with detector results
//!
//! The sweep recomputes the engaged set for the whole scene and walks every
//! record toward it. Markers applied by hand are left alone; a record that
//! refuses a write is logged and skipped, never allowed to stall the rest.

use ahash::{AHashMap, AHashSet};

use crate::core::config::ExtenderConfig;
use crate::core::types::RecordId;
use crate::engagement::detector::engaged_ids;
use crate::scene::combatant::{partition_rosters, Combatant};
use crate::scene::conditions::{ConditionStore, Marker, Provenance};
use crate::scene::grid::SceneGrid;

/// What a single marker reconciliation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    Added,
    Removed,
    Unchanged,
}

/// Counters from one sweep over the scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub added: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Drive one record's Engaged marker toward the detector's verdict.
///
/// Adds carry this crate's provenance; removal only ever touches markers
/// with that provenance, so hand-applied ones survive automation.
pub fn reconcile_engaged(
    store: &mut dyn ConditionStore,
    record: RecordId,
    should_be_engaged: bool,
) -> crate::core::error::Result<ReconcileAction> {
    let existing = store.get(record, Marker::Engaged);

    if should_be_engaged {
        if existing.is_some() {
            return Ok(ReconcileAction::Unchanged);
        }
        store.add(record, Marker::Engaged, Provenance::Extender)?;
        return Ok(ReconcileAction::Added);
    }

    match existing {
        Some(Provenance::Extender) => {
            store.remove(record, Marker::Engaged)?;
            Ok(ReconcileAction::Removed)
        }
        Some(Provenance::Foreign) | None => Ok(ReconcileAction::Unchanged),
    }
}

/// Recompute engagement for the scene and reconcile every record.
///
/// Non-authoritative instances do nothing. Records shared by several
/// combatants count as engaged when any one of their combatants is, and
/// every known record is reconciled, so stale markers clear even for
/// combatants that dropped out of the rosters this sweep.
pub fn sweep(
    store: &mut dyn ConditionStore,
    combatants: &[Combatant],
    grid: &SceneGrid,
    config: &ExtenderConfig,
) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();

    if !config.authoritative {
        return outcome;
    }
    if combatants.is_empty() {
        return outcome;
    }

    let (friendly, hostile) = partition_rosters(combatants);

    let engaged = match grid.measure_context() {
        Some(ctx) => engaged_ids(&friendly, &hostile, &ctx, config),
        // Unmeasurable scene: nobody counts as engaged
        None => AHashSet::new(),
    };

    // Coalesce combatants onto their backing records
    let mut record_engaged: AHashMap<RecordId, bool> = AHashMap::new();
    for combatant in combatants {
        let entry = record_engaged.entry(combatant.record).or_insert(false);
        *entry |= engaged.contains(&combatant.id);
    }

    for (record, should_be_engaged) in record_engaged {
        match reconcile_engaged(store, record, should_be_engaged) {
            Ok(ReconcileAction::Added) => outcome.added += 1,
            Ok(ReconcileAction::Removed) => outcome.removed += 1,
            Ok(ReconcileAction::Unchanged) => {}
            Err(e) => {
                tracing::warn!("Engaged sync failed for record {:?}: {}", record, e);
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Clear a record's automated Engaged marker when its last combatant
/// leaves the scene
pub fn release(store: &mut dyn ConditionStore, record: RecordId) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();
    match reconcile_engaged(store, record, false) {
        Ok(ReconcileAction::Removed) => outcome.removed += 1,
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Engaged release failed for record {:?}: {}", record, e);
            outcome.failed += 1;
        }
    }
    outcome
}
