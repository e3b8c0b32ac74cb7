//! Engagement tracking - detection, marker sync, and debounced sweeps
//!
//! The detector decides who stands in melee with whom from scene
//! geometry alone; the sync layer pushes those verdicts into condition
//! markers without ever touching a hand-applied one; the scheduler
//! collapses bursts of scene activity into single sweeps.

pub mod detector;
pub mod scheduler;
pub mod sync;
pub mod turns;

pub use detector::{engaged_ids, exhaustive_scan};
pub use scheduler::{SweepScheduler, SweepTrigger};
pub use sync::{reconcile_engaged, release, sweep, ReconcileAction, SyncOutcome};
pub use turns::{begin_turn, end_combat, set_all_out_attack};
