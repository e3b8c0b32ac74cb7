//! Engagement detection between opposing rosters
//!
//! A spatial-bucket prefilter keeps large scenes cheap; the exact
//! edge-distance predicate makes the final call on every surviving pair.
//! Whenever bucketing cannot be trusted the scan falls back to comparing
//! every pair, so degraded input costs speed, never correctness.

use ahash::{AHashMap, AHashSet};

use crate::core::config::ExtenderConfig;
use crate::core::types::CombatantId;
use crate::measure::distance::{are_engaged, footprint_radius};
use crate::measure::reach::engagement_reach;
use crate::scene::combatant::Combatant;
use crate::scene::grid::MeasureContext;

/// Precomputed per-combatant scan data
struct ScanRecord<'a> {
    combatant: &'a Combatant,
    /// Engagement reach in scene units
    reach: f32,
    /// Footprint radius in scene units
    radius: f32,
    /// Reach plus radius converted to pixels, for window sizing
    reach_px: f32,
    radius_px: f32,
    /// Bucket cell; None when the position cannot be bucketed
    bucket: Option<(i32, i32)>,
}

impl<'a> ScanRecord<'a> {
    fn build(
        combatant: &'a Combatant,
        ctx: &MeasureContext,
        config: &ExtenderConfig,
    ) -> Option<Self> {
        if !combatant.position.is_finite() {
            return None;
        }

        let reach = engagement_reach(combatant.size, config);
        let radius = footprint_radius(combatant, ctx);

        let reach_px = reach * ctx.pixels_per_unit;
        let radius_px = radius * ctx.pixels_per_unit;

        Some(Self {
            combatant,
            reach,
            radius,
            reach_px: if reach_px.is_finite() && reach_px >= 0.0 { reach_px } else { 0.0 },
            radius_px: if radius_px.is_finite() && radius_px >= 0.0 { radius_px } else { 0.0 },
            bucket: bucket_coord(combatant, ctx),
        })
    }
}

/// Bucket cell for a position, or None when the division cannot be
/// represented as i32 coordinates
fn bucket_coord(combatant: &Combatant, ctx: &MeasureContext) -> Option<(i32, i32)> {
    if ctx.bucket_size_px <= 0.0 {
        return None;
    }

    let bx = (combatant.position.x / ctx.bucket_size_px).floor();
    let by = (combatant.position.y / ctx.bucket_size_px).floor();

    let in_range = |v: f32| v.is_finite() && v >= i32::MIN as f32 && v <= i32::MAX as f32;
    if !in_range(bx) || !in_range(by) {
        return None;
    }

    Some((bx as i32, by as i32))
}

/// Collect the ids of every combatant standing in an engagement.
///
/// Membership is symmetric: whenever a pair qualifies, both ids land in
/// the result. Unmeasurable combatants are skipped entirely, and an empty
/// roster on either side short-circuits to an empty set.
pub fn engaged_ids(
    friendly: &[&Combatant],
    hostile: &[&Combatant],
    ctx: &MeasureContext,
    config: &ExtenderConfig,
) -> AHashSet<CombatantId> {
    let mut engaged = AHashSet::new();
    if friendly.is_empty() || hostile.is_empty() {
        return engaged;
    }

    let friendly_data: Vec<ScanRecord> = friendly
        .iter()
        .filter_map(|c| ScanRecord::build(c, ctx, config))
        .collect();
    let hostile_data: Vec<ScanRecord> = hostile
        .iter()
        .filter_map(|c| ScanRecord::build(c, ctx, config))
        .collect();

    if friendly_data.is_empty() || hostile_data.is_empty() {
        return engaged;
    }

    let all_bucketed = friendly_data.iter().chain(&hostile_data).all(|r| r.bucket.is_some());

    if all_bucketed && !config.force_exhaustive {
        bucketed_scan(&friendly_data, &hostile_data, ctx, config, &mut engaged);
        if !engaged.is_empty() {
            return engaged;
        }
        // An empty bucketed result is re-checked exhaustively; the pair
        // scan is the authority on "nobody is engaged"
    }

    for f in &friendly_data {
        for h in &hostile_data {
            if are_engaged(f.combatant, h.combatant, ctx, config) {
                engaged.insert(f.combatant.id);
                engaged.insert(h.combatant.id);
            }
        }
    }

    engaged
}

/// Compare every friendly-hostile pair with the exact predicate.
///
/// The baseline the bucketed scan must agree with; also the benchmark
/// reference.
pub fn exhaustive_scan(
    friendly: &[&Combatant],
    hostile: &[&Combatant],
    ctx: &MeasureContext,
    config: &ExtenderConfig,
) -> AHashSet<CombatantId> {
    let mut engaged = AHashSet::new();
    for f in friendly {
        for h in hostile {
            if are_engaged(f, h, ctx, config) {
                engaged.insert(f.id);
                engaged.insert(h.id);
            }
        }
    }
    engaged
}

fn bucketed_scan(
    friendly_data: &[ScanRecord],
    hostile_data: &[ScanRecord],
    ctx: &MeasureContext,
    config: &ExtenderConfig,
    engaged: &mut AHashSet<CombatantId>,
) {
    // Window size covers the longest reach-plus-radius on the field from
    // the widest piece, so no qualifying pair can sit outside the window
    let mut max_reach_px: f32 = 0.0;
    let mut max_radius_px: f32 = 0.0;
    for record in friendly_data.iter().chain(hostile_data) {
        max_radius_px = max_radius_px.max(record.radius_px);
        max_reach_px = max_reach_px.max(record.reach_px + record.radius_px);
    }

    let cells = ((max_reach_px + max_radius_px) / ctx.bucket_size_px).ceil();
    let bucket_radius = if cells.is_finite() && cells > 0.0 {
        cells.min(i32::MAX as f32) as i32
    } else {
        0
    };

    let mut hostile_buckets: AHashMap<(i32, i32), Vec<&ScanRecord>> = AHashMap::new();
    for record in hostile_data {
        if let Some(cell) = record.bucket {
            hostile_buckets.entry(cell).or_default().push(record);
        }
    }

    for f in friendly_data {
        let Some((fx, fy)) = f.bucket else { continue };

        for bx in (fx - bucket_radius)..=(fx + bucket_radius) {
            for by in (fy - bucket_radius)..=(fy + bucket_radius) {
                let Some(candidates) = hostile_buckets.get(&(bx, by)) else {
                    continue;
                };

                for h in candidates {
                    let base = f.reach.max(h.reach);
                    let expanded = base + f.radius + h.radius;
                    if !expanded.is_finite() || expanded <= 0.0 {
                        continue;
                    }

                    let threshold_px = expanded * ctx.pixels_per_unit;
                    let dx = h.combatant.position.x - f.combatant.position.x;
                    let dy = h.combatant.position.y - f.combatant.position.y;

                    if dx.abs() > threshold_px || dy.abs() > threshold_px {
                        continue;
                    }
                    if dx * dx + dy * dy > threshold_px * threshold_px {
                        continue;
                    }

                    if !are_engaged(f.combatant, h.combatant, ctx, config) {
                        continue;
                    }

                    engaged.insert(f.combatant.id);
                    engaged.insert(h.combatant.id);
                }
            }
        }
    }
}
