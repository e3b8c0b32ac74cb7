//! Condition markers on backing records, with provenance tracking
//!
//! Markers written by this crate are tagged so they can be told apart from
//! markers a player or another module applied by hand. Automation only ever
//! removes its own markers.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::error::{ExtenderError, Result};
use crate::core::types::RecordId;

/// Condition markers this crate reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Engaged,
    AllOutAttack,
    FullDefence,
}

impl Marker {
    /// Stable string key used by the host platform
    pub fn key(&self) -> &'static str {
        match self {
            Marker::Engaged => "engaged",
            Marker::AllOutAttack => "all-out-attack",
            Marker::FullDefence => "full-defence",
        }
    }
}

/// Who put a marker on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Written by this crate's automation
    Extender,
    /// Applied by hand or by another module
    Foreign,
}

/// Storage seam for condition markers.
///
/// Implementations must be idempotent: adding a marker that is already
/// present and removing one that is absent both succeed without effect.
pub trait ConditionStore {
    /// Provenance of a marker if present
    fn get(&self, record: RecordId, marker: Marker) -> Option<Provenance>;

    /// Add a marker; no-op when it is already present
    fn add(&mut self, record: RecordId, marker: Marker, provenance: Provenance) -> Result<()>;

    /// Remove a marker; no-op when it is absent
    fn remove(&mut self, record: RecordId, marker: Marker) -> Result<()>;
}

/// In-memory condition store
///
/// Serves tests and the demo runner. Individual records can be primed to
/// reject writes, standing in for a host that refuses the change.
#[derive(Debug, Default)]
pub struct MemoryConditionStore {
    markers: AHashMap<(RecordId, Marker), Provenance>,
    rejecting: AHashSet<RecordId>,
}

impl MemoryConditionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future write against this record fail
    pub fn reject_writes_for(&mut self, record: RecordId) {
        self.rejecting.insert(record);
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn check_writable(&self, record: RecordId) -> Result<()> {
        if self.rejecting.contains(&record) {
            return Err(ExtenderError::ConditionRejected {
                record,
                reason: "record refused the write".to_string(),
            });
        }
        Ok(())
    }
}

impl ConditionStore for MemoryConditionStore {
    fn get(&self, record: RecordId, marker: Marker) -> Option<Provenance> {
        self.markers.get(&(record, marker)).copied()
    }

    fn add(&mut self, record: RecordId, marker: Marker, provenance: Provenance) -> Result<()> {
        self.check_writable(record)?;
        self.markers.entry((record, marker)).or_insert(provenance);
        Ok(())
    }

    fn remove(&mut self, record: RecordId, marker: Marker) -> Result<()> {
        self.check_writable(record)?;
        self.markers.remove(&(record, marker));
        Ok(())
    }
}
