//! The modifier-resolution pipeline behind the attack dialog
//!
//! Every pass starts from the upstream calculator's output, restores the
//! untouched baseline, applies engagement restrictions and selected
//! options in rules order, and reports the final fields together with the
//! delta and an annotation ledger. Passes are idempotent: unchanged
//! inputs resolve to unchanged outputs, however many times they run.

use serde::{Deserialize, Serialize};

use crate::core::config::{config, ExtenderConfig};
use crate::core::constants::{
    cover_difficulty, size_modifier, vision_penalty, AIM_POOL_BONUS, ALL_OUT_ATTACK_POOL_BONUS,
    BRACE_DIFFICULTY_REDUCTION, PISTOLS_IN_MELEE_PENALTY, SHORT_RANGE_POOL_BONUS,
};
use crate::core::error::{ExtenderError, Result};
use crate::core::types::{CoverLevel, VisionBand};
use crate::dialog::annotations::{AnnotatedField, Annotation, AnnotationReason};
use crate::dialog::fields::{DiceValue, FieldSet, ResolutionDelta};
use crate::dialog::options::OptionState;
use crate::dialog::overrides::{FieldPath, OverrideSet};
use crate::dialog::weapon::WeaponProfile;
use crate::measure::distance::are_engaged;
use crate::scene::combatant::Combatant;
use crate::scene::conditions::{ConditionStore, Marker};
use crate::scene::grid::SceneGrid;

/// A target of the attack with the state that feeds modifiers
#[derive(Debug, Clone)]
pub struct TargetInfo {
    pub combatant: Combatant,
    /// Resolve rating when known; pinning sets the difficulty to it
    pub resolve: Option<i32>,
    /// Cover granted by the target's own condition markers
    pub status_cover: CoverLevel,
}

impl TargetInfo {
    pub fn new(combatant: Combatant) -> Self {
        Self {
            combatant,
            resolve: None,
            status_cover: CoverLevel::None,
        }
    }

    pub fn with_resolve(mut self, resolve: i32) -> Self {
        self.resolve = Some(resolve);
        self
    }

    pub fn with_status_cover(mut self, cover: CoverLevel) -> Self {
        self.status_cover = cover;
        self
    }
}

/// The attack being configured
#[derive(Debug, Clone)]
pub struct AttackContext {
    pub actor: Combatant,
    pub actor_strength: i32,
    pub weapon: Option<WeaponProfile>,
    pub targets: Vec<TargetInfo>,
}

/// What the host's own calculator produced for this pass.
///
/// The field set is the dialog's current numbers, which already include
/// whatever delta the previous pass applied; the resolver restores the
/// baseline itself. The bonus flags say which upstream pool bonuses are
/// folded into the fields, so engagement can claw them back.
#[derive(Debug, Clone)]
pub struct UpstreamOutcome {
    pub fields: FieldSet,
    pub aim_bonus: bool,
    pub short_range_bonus: bool,
}

/// Seam to the host's base attack calculator
pub trait BaseCalculator {
    fn compute(&mut self, ctx: &AttackContext) -> Result<UpstreamOutcome>;
}

/// The resolved state of one pipeline pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Final field values for the dialog
    pub fields: FieldSet,
    /// Adjustment relative to the restored baseline, before overrides
    pub delta: ResolutionDelta,
    /// Ledger of every applied rule
    pub annotations: Vec<Annotation>,
    /// Options after forced normalizations (pinning without salvo,
    /// pistols without eligibility, stance under Full Defence)
    pub effective_options: OptionState,
}

/// Stateful resolver for one attack dialog.
///
/// Remembers the delta it applied last pass so it can restore the
/// baseline from sticky upstream fields, and the manual overrides that
/// outrank everything it computes.
pub struct AttackResolver {
    config: ExtenderConfig,
    previous_delta: Option<ResolutionDelta>,
    overrides: OverrideSet,
}

impl AttackResolver {
    pub fn new() -> Self {
        Self::with_config(config().clone())
    }

    pub fn with_config(config: ExtenderConfig) -> Self {
        Self {
            config,
            previous_delta: None,
            overrides: OverrideSet::new(),
        }
    }

    /// Pin a field to a hand-entered value
    pub fn record_manual_edit(&mut self, path: FieldPath, value: i32) {
        self.overrides.record(path, value);
    }

    /// Release a single pinned field back to the pipeline
    pub fn release_manual_edit(&mut self, path: FieldPath) {
        self.overrides.release(path);
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Forget everything from previous passes, as when the dialog reopens
    pub fn reset(&mut self) {
        self.previous_delta = None;
        self.overrides.clear();
    }

    /// The delta this resolver believes is folded into upstream's fields
    pub fn previous_delta(&self) -> Option<&ResolutionDelta> {
        self.previous_delta.as_ref()
    }

    /// Run one pipeline pass.
    ///
    /// A missing weapon and an upstream failure both leave the resolver's
    /// state untouched.
    pub fn resolve(
        &mut self,
        calculator: &mut dyn BaseCalculator,
        ctx: &AttackContext,
        options: &OptionState,
        conditions: &dyn ConditionStore,
        grid: &SceneGrid,
    ) -> Result<Resolution> {
        let weapon = ctx.weapon.as_ref().ok_or(ExtenderError::MissingWeapon)?;
        let upstream = calculator.compute(ctx)?;

        // Restore the baseline the previous pass adjusted away from
        let baseline = match &self.previous_delta {
            Some(delta) => upstream.fields.remove_delta(delta),
            None => upstream.fields.clone(),
        };
        let mut working = baseline.clone();
        let mut annotations: Vec<Annotation> = Vec::new();
        let mut effective = options.clone();

        if conditions.get(ctx.actor.record, Marker::FullDefence).is_some() {
            effective.all_out_attack = false;
        }

        // Upstream folds the first target's size into pool or difficulty;
        // back it out so exactly one size adjustment survives the pass
        let default_size = ctx
            .targets
            .first()
            .map(|t| t.combatant.size)
            .unwrap_or_default();
        let upstream_size = size_modifier(default_size);
        if upstream_size.pool != 0 {
            working.pool = (working.pool - upstream_size.pool).max(0);
        }
        if upstream_size.difficulty != 0 {
            working.difficulty = (working.difficulty - upstream_size.difficulty).max(0);
        }
        let selected_size = effective.size.unwrap_or(default_size);
        effective.size = Some(selected_size);

        if !(weapon.is_ranged() && weapon.salvo() > 1) {
            effective.pinning = false;
        }

        let actor_engaged = conditions.get(ctx.actor.record, Marker::Engaged).is_some();
        let measure = grid.measure_context();

        // Engaged attackers must direct attacks at opponents they are
        // actually engaged with; an unmeasurable scene fails every target
        let mut target_block = false;
        if actor_engaged && !ctx.targets.is_empty() {
            let any_unreachable = match &measure {
                Some(m) => ctx
                    .targets
                    .iter()
                    .any(|t| !are_engaged(&ctx.actor, &t.combatant, m, &self.config)),
                None => true,
            };

            if any_unreachable {
                target_block = true;
                let current_pool = working.pool.max(0);
                if current_pool > 0 {
                    working.pool = 0;
                    annotations.push(Annotation::new(
                        AnnotatedField::Pool,
                        -current_pool,
                        AnnotationReason::TargetNotEngaged,
                    ));
                } else {
                    annotations.push(Annotation::new(
                        AnnotatedField::Pool,
                        0,
                        AnnotationReason::TargetNotEngaged,
                    ));
                }

                let current_difficulty = working.difficulty.max(0);
                let blocked = current_difficulty
                    .max(baseline.difficulty)
                    .max(self.config.blocked_difficulty);
                working.difficulty = blocked;
                annotations.push(Annotation::new(
                    AnnotatedField::Difficulty,
                    blocked - current_difficulty,
                    AnnotationReason::TargetNotEngaged,
                ));
            }
        }

        let engaged_ranged = weapon.is_ranged() && actor_engaged;
        if engaged_ranged {
            if weapon.has_pistol() {
                if upstream.aim_bonus {
                    let clawback = AIM_POOL_BONUS.min(working.pool.max(0));
                    if clawback > 0 {
                        working.pool = (working.pool - clawback).max(0);
                        annotations.push(Annotation::new(
                            AnnotatedField::Pool,
                            -clawback,
                            AnnotationReason::AimSuppressed,
                        ));
                    } else {
                        annotations.push(Annotation::new(
                            AnnotatedField::Pool,
                            0,
                            AnnotationReason::AimSuppressed,
                        ));
                    }
                }
                if upstream.short_range_bonus {
                    let clawback = SHORT_RANGE_POOL_BONUS.min(working.pool.max(0));
                    if clawback > 0 {
                        working.pool = (working.pool - clawback).max(0);
                        annotations.push(Annotation::new(
                            AnnotatedField::Pool,
                            -clawback,
                            AnnotationReason::ShortRangeSuppressed,
                        ));
                    } else {
                        annotations.push(Annotation::new(
                            AnnotatedField::Pool,
                            0,
                            AnnotationReason::ShortRangeSuppressed,
                        ));
                    }
                }
            } else {
                let current_pool = working.pool.max(0);
                if current_pool > 0 {
                    working.pool = 0;
                    annotations.push(Annotation::new(
                        AnnotatedField::Pool,
                        -current_pool,
                        AnnotationReason::RangedBlocked,
                    ));
                } else {
                    annotations.push(Annotation::new(
                        AnnotatedField::Pool,
                        0,
                        AnnotationReason::RangedBlocked,
                    ));
                }

                let current_difficulty = working.difficulty.max(0);
                let blocked = current_difficulty.max(self.config.blocked_difficulty);
                working.difficulty = blocked;
                annotations.push(Annotation::new(
                    AnnotatedField::Difficulty,
                    blocked - current_difficulty,
                    AnnotationReason::RangedBlocked,
                ));
            }
        }

        // Damage baselines are captured after blocks so a suppressed
        // option annotates the figure the player currently sees
        let base_damage = working.damage;
        let base_ed = working.ed;
        let mut damage_suppressed = false;

        let pinning_resolve = ctx
            .targets
            .first()
            .and_then(|t| t.resolve)
            .map(|r| r.max(0));

        if weapon.is_melee() && effective.all_out_attack {
            working.pool += ALL_OUT_ATTACK_POOL_BONUS;
            annotations.push(Annotation::new(
                AnnotatedField::Pool,
                ALL_OUT_ATTACK_POOL_BONUS,
                AnnotationReason::AllOutAttack,
            ));
        }

        if weapon.is_ranged() {
            if effective.brace {
                let negates_heavy = weapon
                    .heavy_rating()
                    .map_or(false, |rating| ctx.actor_strength < rating);
                if negates_heavy {
                    working.difficulty = (working.difficulty - BRACE_DIFFICULTY_REDUCTION).max(0);
                    annotations.push(Annotation::new(
                        AnnotatedField::Difficulty,
                        -BRACE_DIFFICULTY_REDUCTION,
                        AnnotationReason::Brace,
                    ));
                } else {
                    annotations.push(Annotation::new(
                        AnnotatedField::Difficulty,
                        0,
                        AnnotationReason::Brace,
                    ));
                }
            }

            if effective.pinning {
                if base_damage != 0 {
                    annotations.push(Annotation::new(
                        AnnotatedField::Damage,
                        -base_damage,
                        AnnotationReason::Pinning { resolve: None },
                    ));
                }

                match pinning_resolve {
                    Some(dn) => {
                        let previous = working.difficulty;
                        working.difficulty = dn.max(0);
                        annotations.push(Annotation::new(
                            AnnotatedField::Difficulty,
                            working.difficulty - previous,
                            AnnotationReason::Pinning { resolve: Some(working.difficulty) },
                        ));
                    }
                    None => annotations.push(Annotation::new(
                        AnnotatedField::Difficulty,
                        0,
                        AnnotationReason::Pinning { resolve: None },
                    )),
                }

                working.damage = 0;
                working.ed = DiceValue::default();
                damage_suppressed = true;
            }

            if effective.pistols_in_melee {
                if weapon.has_pistol() && actor_engaged {
                    working.difficulty += PISTOLS_IN_MELEE_PENALTY;
                    annotations.push(Annotation::new(
                        AnnotatedField::Difficulty,
                        PISTOLS_IN_MELEE_PENALTY,
                        AnnotationReason::PistolsInMelee,
                    ));
                } else {
                    effective.pistols_in_melee = false;
                }
            }
        }

        if effective.vision != VisionBand::None {
            let penalty = vision_penalty(effective.vision);
            let applied = if weapon.is_melee() { penalty.melee } else { penalty.ranged };
            if applied > 0 {
                working.difficulty += applied;
            }
            annotations.push(Annotation::new(
                AnnotatedField::Difficulty,
                applied,
                AnnotationReason::Vision(effective.vision),
            ));
        }

        let selected_mod = size_modifier(selected_size);
        if selected_mod.pool != 0 {
            working.pool += selected_mod.pool;
            annotations.push(Annotation::new(
                AnnotatedField::Pool,
                selected_mod.pool,
                AnnotationReason::TargetSize(selected_size),
            ));
        }
        if selected_mod.difficulty != 0 {
            working.difficulty += selected_mod.difficulty;
            annotations.push(Annotation::new(
                AnnotatedField::Difficulty,
                selected_mod.difficulty,
                AnnotationReason::TargetSize(selected_size),
            ));
        }

        if effective.disarm {
            if base_damage != 0 {
                annotations.push(Annotation::new(
                    AnnotatedField::Damage,
                    -base_damage,
                    AnnotationReason::Disarm,
                ));
            }
            annotations.push(Annotation::new(
                AnnotatedField::Difficulty,
                0,
                AnnotationReason::Disarm,
            ));
            working.damage = 0;
            working.ed = DiceValue::default();
            damage_suppressed = true;
        }

        let status_cover = ctx
            .targets
            .first()
            .map(|t| t.status_cover)
            .unwrap_or_default();
        let selected_cover = effective.cover.unwrap_or(status_cover);
        let cover_delta = cover_difficulty(selected_cover) - cover_difficulty(status_cover);
        if cover_delta != 0 {
            working.difficulty += cover_delta;
            let named = if cover_delta > 0 { selected_cover } else { status_cover };
            annotations.push(Annotation::new(
                AnnotatedField::Difficulty,
                cover_delta,
                AnnotationReason::Cover(named),
            ));
        }

        if !damage_suppressed {
            working.damage = base_damage;
            working.ed = base_ed;
        }

        // The delta is taken before overrides and floors, so it reflects
        // what the rules did, not what the player or the clamps did
        let delta = working.minus(&baseline);

        self.overrides.apply(&mut working);
        working.clamp_floors();

        // With nothing selected, nothing pinned, and no engagement rule in
        // play, hand upstream's fields back untouched
        let fallback = self.overrides.is_empty()
            && !engaged_ranged
            && !target_block
            && options.is_neutral()
            && self.previous_delta.is_none();
        if fallback {
            return Ok(Resolution {
                fields: upstream.fields,
                delta: ResolutionDelta::default(),
                annotations,
                effective_options: effective,
            });
        }

        // A zero delta clears the memory so the fallback can re-arm
        self.previous_delta = if delta.is_zero() { None } else { Some(delta) };

        Ok(Resolution {
            fields: working,
            delta,
            annotations,
            effective_options: effective,
        })
    }
}

impl Default for AttackResolver {
    fn default() -> Self {
        Self::new()
    }
}
