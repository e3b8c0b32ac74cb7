//! All-Out Attack stance lifecycle across combat turns
//!
//! The stance lasts until the attacker's next turn. Turn-start and
//! combat-end expiry are automation, so they only remove markers this
//! crate wrote; switching the stance off explicitly removes the marker
//! whoever applied it.

use crate::core::error::Result;
use crate::core::types::RecordId;
use crate::engagement::sync::{ReconcileAction, SyncOutcome};
use crate::scene::conditions::{ConditionStore, Marker, Provenance};

/// Apply or drop the stance from an explicit choice in the attack dialog
pub fn set_all_out_attack(
    store: &mut dyn ConditionStore,
    record: RecordId,
    enabled: bool,
) -> Result<ReconcileAction> {
    let existing = store.get(record, Marker::AllOutAttack);

    if enabled {
        if existing.is_some() {
            return Ok(ReconcileAction::Unchanged);
        }
        store.add(record, Marker::AllOutAttack, Provenance::Extender)?;
        return Ok(ReconcileAction::Added);
    }

    if existing.is_none() {
        return Ok(ReconcileAction::Unchanged);
    }
    store.remove(record, Marker::AllOutAttack)?;
    Ok(ReconcileAction::Removed)
}

/// Expire the stance as the record's turn comes back around.
///
/// Leaves hand-applied markers in place.
pub fn begin_turn(store: &mut dyn ConditionStore, record: RecordId) -> Result<ReconcileAction> {
    match store.get(record, Marker::AllOutAttack) {
        Some(Provenance::Extender) => {
            store.remove(record, Marker::AllOutAttack)?;
            Ok(ReconcileAction::Removed)
        }
        Some(Provenance::Foreign) | None => Ok(ReconcileAction::Unchanged),
    }
}

/// Expire the stance for every listed record when combat ends.
///
/// Failures are logged and counted; one stubborn record never blocks the
/// rest of the roster.
pub fn end_combat(store: &mut dyn ConditionStore, records: &[RecordId]) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();
    for &record in records {
        match begin_turn(store, record) {
            Ok(ReconcileAction::Removed) => outcome.removed += 1,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("All-Out Attack cleanup failed for record {:?}: {}", record, e);
                outcome.failed += 1;
            }
        }
    }
    outcome
}
