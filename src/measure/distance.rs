//! Distance measurement between combatants
//!
//! A pair with an unresolvable position cannot be measured and is never
//! engaged. Every other gap in the data falls back to a neutral default
//! instead of failing the measurement.

use crate::core::config::ExtenderConfig;
use crate::measure::reach::pair_threshold;
use crate::scene::combatant::Combatant;
use crate::scene::grid::MeasureContext;

/// Radius of a combatant's footprint in scene units.
///
/// Uses the longer footprint side, so oblong pieces threaten out to their
/// widest edge. A missing or degenerate footprint measures as a point.
pub fn footprint_radius(combatant: &Combatant, ctx: &MeasureContext) -> f32 {
    let Some((width, height)) = combatant.footprint else {
        return 0.0;
    };
    let side = width.max(height);
    if !side.is_finite() || side <= 0.0 {
        return 0.0;
    }
    let units = side * ctx.grid_distance;
    if !units.is_finite() {
        return 0.0;
    }
    units / 2.0
}

/// Centre-to-centre distance in scene units
pub fn center_distance(a: &Combatant, b: &Combatant, ctx: &MeasureContext) -> Option<f32> {
    if a.id == b.id {
        return Some(0.0);
    }
    if !a.position.is_finite() || !b.position.is_finite() {
        return None;
    }

    let dist = a.position.distance(&b.position) * ctx.units_per_pixel;
    if !dist.is_finite() || dist < 0.0 {
        return None;
    }
    Some(dist)
}

/// Edge-to-edge distance in scene units: centre distance minus both radii,
/// clamped at zero for overlapping pieces
pub fn edge_distance(a: &Combatant, b: &Combatant, ctx: &MeasureContext) -> Option<f32> {
    let centers = center_distance(a, b, ctx)?;
    let radius_a = footprint_radius(a, ctx);
    let radius_b = footprint_radius(b, ctx);
    Some((centers - radius_a - radius_b).max(0.0))
}

/// The exact engagement predicate: edges within the pair's threshold.
///
/// Symmetric by construction; false whenever the pair cannot be measured.
pub fn are_engaged(a: &Combatant, b: &Combatant, ctx: &MeasureContext, config: &ExtenderConfig) -> bool {
    let threshold = pair_threshold(a.size, b.size, config);
    match edge_distance(a, b, ctx) {
        Some(dist) => dist <= threshold,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Disposition, SizeCategory, Vec2};
    use crate::scene::grid::SceneGrid;

    fn ctx() -> MeasureContext {
        SceneGrid::default().measure_context().unwrap()
    }

    fn at(x: f32, y: f32) -> Combatant {
        Combatant::new(Vec2::new(x, y), SizeCategory::Average, Disposition::Friendly)
    }

    #[test]
    fn test_footprint_radius_uses_longer_side() {
        let c = at(0.0, 0.0).with_footprint(1.0, 3.0);
        assert_eq!(footprint_radius(&c, &ctx()), 1.5);
    }

    #[test]
    fn test_footprint_radius_defaults_to_point() {
        let mut c = at(0.0, 0.0);
        c.footprint = None;
        assert_eq!(footprint_radius(&c, &ctx()), 0.0);

        let zero = at(0.0, 0.0).with_footprint(0.0, 0.0);
        assert_eq!(footprint_radius(&zero, &ctx()), 0.0);

        let nan = at(0.0, 0.0).with_footprint(f32::NAN, 1.0);
        assert_eq!(footprint_radius(&nan, &ctx()), 0.0);
    }

    #[test]
    fn test_center_distance_converts_pixels_to_units() {
        // 300px apart on a 100px/1-unit grid = 3 units
        let a = at(0.0, 0.0);
        let b = at(300.0, 0.0);
        assert_eq!(center_distance(&a, &b, &ctx()), Some(3.0));
    }

    #[test]
    fn test_center_distance_same_combatant_is_zero() {
        let a = at(50.0, 50.0);
        assert_eq!(center_distance(&a, &a, &ctx()), Some(0.0));
    }

    #[test]
    fn test_center_distance_rejects_non_finite_positions() {
        let a = at(f32::NAN, 0.0);
        let b = at(100.0, 0.0);
        assert_eq!(center_distance(&a, &b, &ctx()), None);
    }

    #[test]
    fn test_edge_distance_subtracts_radii() {
        // Centres 3 units apart, each radius 0.5 -> edges 2 units apart
        let a = at(0.0, 0.0);
        let b = at(300.0, 0.0);
        assert_eq!(edge_distance(&a, &b, &ctx()), Some(2.0));
    }

    #[test]
    fn test_edge_distance_clamps_overlap_to_zero() {
        let a = at(0.0, 0.0).with_footprint(4.0, 4.0);
        let b = at(100.0, 0.0).with_footprint(4.0, 4.0);
        assert_eq!(edge_distance(&a, &b, &ctx()), Some(0.0));
    }

    #[test]
    fn test_engagement_is_symmetric_across_sizes() {
        let config = ExtenderConfig::default();
        // Gargantuan reach 6.0; edges 5 units apart
        let mut giant = at(0.0, 0.0).with_footprint(4.0, 4.0);
        giant.size = SizeCategory::Gargantuan;
        let sprite = at(750.0, 0.0).with_footprint(0.5, 0.5);

        assert!(are_engaged(&giant, &sprite, &ctx(), &config));
        assert!(are_engaged(&sprite, &giant, &ctx(), &config));
    }

    #[test]
    fn test_unresolvable_position_is_not_engaged() {
        let config = ExtenderConfig::default();
        let a = at(0.0, 0.0);
        let b = at(f32::NAN, 0.0);
        assert!(!are_engaged(&a, &b, &ctx(), &config));
    }

    #[test]
    fn test_footprintless_pair_engages_by_centres() {
        let config = ExtenderConfig::default();
        // Without footprints the centres must close the whole threshold
        let a = at(0.0, 0.0);
        let mut b = at(140.0, 0.0);
        b.footprint = None;
        assert!(are_engaged(&a, &b, &ctx(), &config));

        let mut far = at(260.0, 0.0);
        far.footprint = None;
        assert!(!are_engaged(&a, &far, &ctx(), &config));
    }

    #[test]
    fn test_adjacent_average_pair_is_engaged() {
        let config = ExtenderConfig::default();
        // Adjacent squares: centres 100px = 1 unit, edges 0 units
        let a = at(0.0, 0.0);
        let b = at(100.0, 0.0);
        assert!(are_engaged(&a, &b, &ctx(), &config));
    }

    #[test]
    fn test_distant_pair_is_not_engaged() {
        let config = ExtenderConfig::default();
        let a = at(0.0, 0.0);
        let b = at(1000.0, 0.0);
        assert!(!are_engaged(&a, &b, &ctx(), &config));
    }
}
