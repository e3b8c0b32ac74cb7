//! Resolution stability across passes
//!
//! The host re-renders its dialog freely and hands back whatever numbers
//! it currently shows, previous adjustments included. These tests feed
//! each resolution back in as the next upstream outcome and verify that
//! nothing compounds, toggles unwind cleanly, and manual edits behave
//! like the rules say.

use combat_extender::core::config::ExtenderConfig;
use combat_extender::core::error::Result;
use combat_extender::core::types::{Disposition, SizeCategory, Vec2, VisionBand};
use combat_extender::dialog::{
    AttackContext, AttackResolver, BaseCalculator, DiceValue, FieldPath, FieldSet, OptionState,
    Resolution, TargetInfo, UpstreamOutcome, WeaponKind, WeaponProfile, WeaponTrait,
};
use combat_extender::scene::{Combatant, ConditionStore, Marker, MemoryConditionStore, Provenance, SceneGrid};

struct StickyCalculator {
    current: FieldSet,
    aim_bonus: bool,
}

impl StickyCalculator {
    fn new(base: FieldSet) -> Self {
        Self { current: base, aim_bonus: false }
    }

    fn absorb(&mut self, resolution: &Resolution) {
        self.current = resolution.fields.clone();
    }
}

impl BaseCalculator for StickyCalculator {
    fn compute(&mut self, _ctx: &AttackContext) -> Result<UpstreamOutcome> {
        Ok(UpstreamOutcome {
            fields: self.current.clone(),
            aim_bonus: self.aim_bonus,
            short_range_bonus: false,
        })
    }
}

struct FailingCalculator;

impl BaseCalculator for FailingCalculator {
    fn compute(&mut self, _ctx: &AttackContext) -> Result<UpstreamOutcome> {
        Err(combat_extender::core::error::ExtenderError::UpstreamCalculation(
            "actor data unavailable".to_string(),
        ))
    }
}

fn base_fields() -> FieldSet {
    FieldSet {
        pool: 6,
        difficulty: 3,
        damage: 10,
        ed: DiceValue::new(2, 1),
        ap: DiceValue::new(1, 0),
        wrath: 1,
    }
}

fn grid() -> SceneGrid {
    SceneGrid::new(5.0, 100.0)
}

fn fresh_resolver() -> AttackResolver {
    AttackResolver::with_config(ExtenderConfig::default())
}

fn melee_context() -> AttackContext {
    let actor = Combatant::new(Vec2::new(0.0, 0.0), SizeCategory::Average, Disposition::Friendly);
    let target = Combatant::new(Vec2::new(100.0, 0.0), SizeCategory::Average, Disposition::Hostile);
    AttackContext {
        actor,
        actor_strength: 3,
        weapon: Some(WeaponProfile::new("Chainsword", WeaponKind::Melee)),
        targets: vec![TargetInfo::new(target)],
    }
}

/// Re-running the same selection through the sticky loop never stacks
/// the bonus
#[test]
fn test_option_delta_does_not_compound() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();
    let mut options = OptionState::default();
    options.all_out_attack = true;

    for _ in 0..4 {
        let resolution = resolver
            .resolve(&mut calc, &ctx, &options, &store, &grid())
            .unwrap();
        calc.absorb(&resolution);
        assert_eq!(resolution.fields.pool, 8);
        assert_eq!(resolution.delta.pool, 2);
    }
}

/// Toggling the option back off unwinds its whole effect
#[test]
fn test_toggle_off_unwinds_cleanly() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();
    let mut options = OptionState::default();
    options.all_out_attack = true;

    let first = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    calc.absorb(&first);

    options.all_out_attack = false;
    let second = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    calc.absorb(&second);

    assert_eq!(second.fields, base_fields());
    assert!(second.delta.is_zero());

    // With the memory cleared, the next neutral pass trusts upstream
    let third = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    assert_eq!(third.fields, base_fields());
    assert!(resolver.previous_delta().is_none());
}

/// Swapping one option for another in a single pass both unwinds the old
/// effect and applies the new one
#[test]
fn test_option_swap_in_one_pass() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();

    let mut options = OptionState::default();
    options.all_out_attack = true;
    let first = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    calc.absorb(&first);
    assert_eq!(first.fields.pool, 8);

    options.all_out_attack = false;
    options.vision = VisionBand::Dim;
    let second = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();

    assert_eq!(second.fields.pool, 6);
    assert_eq!(second.fields.difficulty, 4);
    assert_eq!(second.delta.pool, 0);
    assert_eq!(second.delta.difficulty, 1);
}

/// A manual edit pins its field through any number of passes
#[test]
fn test_manual_edit_pins_field_across_passes() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();

    resolver.record_manual_edit(FieldPath::Damage, 15);
    let first = resolver
        .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
        .unwrap();
    calc.absorb(&first);
    assert_eq!(first.fields.damage, 15);

    let mut options = OptionState::default();
    options.all_out_attack = true;
    let second = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    calc.absorb(&second);
    assert_eq!(second.fields.damage, 15);
    assert_eq!(second.fields.pool, 8);
}

/// A released override stops pinning, though its value lives on in the
/// host's sticky fields until upstream re-derives them
#[test]
fn test_released_override_follows_upstream_refresh() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();

    resolver.record_manual_edit(FieldPath::Damage, 15);
    let first = resolver
        .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
        .unwrap();
    calc.absorb(&first);
    assert_eq!(first.fields.damage, 15);

    resolver.release_manual_edit(FieldPath::Damage);

    // The host re-derives its numbers, as on a weapon change
    calc.current = base_fields();
    let second = resolver
        .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
        .unwrap();
    assert_eq!(second.fields.damage, 10);
}

/// An upstream failure mid-session leaves the restore state intact
#[test]
fn test_upstream_error_preserves_restore_state() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();
    let mut options = OptionState::default();
    options.all_out_attack = true;

    let first = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    calc.absorb(&first);

    let failed = resolver.resolve(&mut FailingCalculator, &ctx, &options, &store, &grid());
    assert!(failed.is_err());

    let third = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    assert_eq!(third.fields, first.fields);
    assert_eq!(third.delta, first.delta);
}

/// The neutral fallback hands even pathological upstream numbers through
/// untouched
#[test]
fn test_fallback_passes_upstream_verbatim() {
    let mut resolver = fresh_resolver();
    let odd = FieldSet {
        pool: 0,
        difficulty: 0,
        damage: -3,
        ed: DiceValue::new(0, 0),
        ap: DiceValue::new(0, 0),
        wrath: 0,
    };
    let mut calc = StickyCalculator::new(odd.clone());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();

    let resolution = resolver
        .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
        .unwrap();
    assert_eq!(resolution.fields, odd);
    assert!(resolution.delta.is_zero());
}

/// The first selection after a run of neutral passes computes from the
/// untouched upstream numbers
#[test]
fn test_first_selection_after_neutral_passes() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();

    for _ in 0..3 {
        let resolution = resolver
            .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
            .unwrap();
        calc.absorb(&resolution);
    }

    let mut options = OptionState::default();
    options.all_out_attack = true;
    let resolution = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    assert_eq!(resolution.fields.pool, 8);
    assert_eq!(resolution.delta.pool, 2);
}

/// After a reset the resolver trusts whatever upstream shows now, as on
/// a freshly opened dialog
#[test]
fn test_reset_trusts_current_upstream() {
    let mut resolver = fresh_resolver();
    let mut calc = StickyCalculator::new(base_fields());
    let store = MemoryConditionStore::new();
    let ctx = melee_context();
    let mut options = OptionState::default();
    options.all_out_attack = true;

    let first = resolver
        .resolve(&mut calc, &ctx, &options, &store, &grid())
        .unwrap();
    calc.absorb(&first);

    resolver.reset();
    let resolution = resolver
        .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
        .unwrap();
    assert_eq!(resolution.fields.pool, 8);
    assert!(resolution.delta.is_zero());
}

/// The engaged-pistol clawback never digs below zero dice, and the
/// ledger records the attempt even when there is nothing to take
#[test]
fn test_clawback_bounded_by_available_pool() {
    let mut resolver = fresh_resolver();
    let mut empty = base_fields();
    empty.pool = 0;
    let mut calc = StickyCalculator::new(empty);
    calc.aim_bonus = true;
    let mut store = MemoryConditionStore::new();
    let actor = Combatant::new(Vec2::new(0.0, 0.0), SizeCategory::Average, Disposition::Friendly);
    let target = Combatant::new(Vec2::new(100.0, 0.0), SizeCategory::Average, Disposition::Hostile);
    store
        .add(actor.record, Marker::Engaged, Provenance::Extender)
        .unwrap();
    let ctx = AttackContext {
        actor,
        actor_strength: 3,
        weapon: Some(
            WeaponProfile::new("Bolt Pistol", WeaponKind::Ranged).with_trait(WeaponTrait::Pistol),
        ),
        targets: vec![TargetInfo::new(target)],
    };

    let resolution = resolver
        .resolve(&mut calc, &ctx, &OptionState::default(), &store, &grid())
        .unwrap();

    assert_eq!(resolution.fields.pool, 0);
    assert_eq!(resolution.annotations.len(), 1);
    assert_eq!(resolution.annotations[0].delta, 0);
}
