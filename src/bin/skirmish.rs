//! Headless Skirmish Runner
//!
//! Seeds a scene with two rosters, runs debounced engagement sweeps over
//! it, then resolves one attack through the modifier pipeline and prints
//! the result for inspection.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;

use combat_extender::core::config::{config, set_config, ExtenderConfig};
use combat_extender::core::error::Result;
use combat_extender::core::types::{CoverLevel, Disposition, SizeCategory, Vec2};
use combat_extender::dialog::{
    AttackContext, AttackResolver, BaseCalculator, DiceValue, FieldSet, OptionState, TargetInfo,
    UpstreamOutcome, WeaponKind, WeaponProfile, WeaponTrait,
};
use combat_extender::engagement::{sweep, SweepScheduler, SweepTrigger, SyncOutcome};
use combat_extender::scene::{Combatant, ConditionStore, Marker, MemoryConditionStore, SceneGrid};

/// Headless Skirmish Runner - engagement sweeps and attack resolution
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Seed a scene, sweep engagement, resolve a sample attack")]
struct Args {
    /// Friendly combatants to seed
    #[arg(long, default_value_t = 12)]
    friendlies: usize,

    /// Hostile combatants to seed
    #[arg(long, default_value_t = 12)]
    hostiles: usize,

    /// Pixel spread combatants scatter across
    #[arg(long, default_value_t = 2000.0)]
    spread: f32,

    /// Scene units per grid square
    #[arg(long, default_value_t = 1.0)]
    grid_distance: f32,

    /// Pixels per grid square
    #[arg(long, default_value_t = 100.0)]
    grid_size: f32,

    /// Extender config TOML (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Debounced trigger bursts to fire before resolving
    #[arg(long, default_value_t = 3)]
    bursts: usize,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct AnnotationLine {
    delta: i32,
    label: String,
}

#[derive(Serialize)]
struct ResolutionSummary {
    weapon: String,
    pool: i32,
    difficulty: i32,
    damage: i32,
    ed_value: i32,
    ed_dice: i32,
    ap_value: i32,
    ap_dice: i32,
    wrath: i32,
    delta_pool: i32,
    delta_difficulty: i32,
    annotations: Vec<AnnotationLine>,
}

#[derive(Serialize)]
struct SkirmishResult {
    seed: u64,
    combatants: usize,
    sweeps_run: usize,
    engaged_markers: usize,
    added: usize,
    removed: usize,
    failed: usize,
    resolution: ResolutionSummary,
}

/// Upstream stand-in producing one fixed field set
struct FixedCalculator {
    fields: FieldSet,
}

impl BaseCalculator for FixedCalculator {
    fn compute(&mut self, _ctx: &AttackContext) -> Result<UpstreamOutcome> {
        Ok(UpstreamOutcome {
            fields: self.fields.clone(),
            aim_bonus: false,
            short_range_bonus: false,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "combat_extender=debug" } else { "combat_extender=info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = &args.config {
        match ExtenderConfig::load_from_path(path) {
            Ok(loaded) => {
                let _ = set_config(loaded);
            }
            Err(e) => {
                eprintln!("Warning: failed to load config {}: {}", path.display(), e);
                eprintln!("Using default config");
            }
        }
    }
    let cfg = config().clone();

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut roster = seed_side(&mut rng, args.friendlies, Disposition::Friendly, args.spread);
    roster.extend(seed_side(&mut rng, args.hostiles, Disposition::Hostile, args.spread));
    let grid = SceneGrid::new(args.grid_distance, args.grid_size);

    let store = Arc::new(Mutex::new(MemoryConditionStore::new()));
    let outcomes = Arc::new(Mutex::new(Vec::<SyncOutcome>::new()));

    // Drive the sweeps through the scheduler so a burst of triggers
    // collapses into one pass per quiet window
    let rt = Runtime::new()?;
    rt.block_on(async {
        let sweep_store = Arc::clone(&store);
        let sweep_outcomes = Arc::clone(&outcomes);
        let sweep_roster = roster.clone();
        let sweep_grid = grid;
        let sweep_cfg = cfg.clone();

        let scheduler = SweepScheduler::spawn(Duration::from_millis(sweep_cfg.debounce_ms), move || {
            let mut store = sweep_store.lock().unwrap();
            let outcome = sweep(&mut *store, &sweep_roster, &sweep_grid, &sweep_cfg);
            sweep_outcomes.lock().unwrap().push(outcome);
        });

        for _ in 0..args.bursts {
            scheduler.trigger(SweepTrigger::SceneReady);
            scheduler.trigger(SweepTrigger::CombatantUpdated);
            scheduler.trigger(SweepTrigger::CombatantRefreshed);
            tokio::time::sleep(Duration::from_millis(cfg.debounce_ms + 50)).await;
        }

        scheduler.shutdown().await;
    });

    let outcomes = outcomes.lock().unwrap().clone();
    let total_added: usize = outcomes.iter().map(|o| o.added).sum();
    let total_removed: usize = outcomes.iter().map(|o| o.removed).sum();
    let total_failed: usize = outcomes.iter().map(|o| o.failed).sum();

    let store = store.lock().unwrap();
    let engaged_markers = store.marker_count();

    // Resolve one attack from the first active friendly at the nearest
    // active hostile
    let actor = roster
        .iter()
        .find(|c| c.disposition == Disposition::Friendly && c.is_active())
        .cloned()
        .unwrap_or_else(|| Combatant::new(Vec2::new(0.0, 0.0), SizeCategory::Average, Disposition::Friendly));
    let target = roster
        .iter()
        .filter(|c| c.disposition == Disposition::Hostile && c.is_active())
        .min_by(|a, b| {
            let da = actor.position.distance(&a.position);
            let db = actor.position.distance(&b.position);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .cloned()
        .unwrap_or_else(|| Combatant::new(Vec2::new(100.0, 0.0), SizeCategory::Average, Disposition::Hostile));

    let actor_engaged = store.get(actor.record, Marker::Engaged).is_some();
    let weapon = if actor_engaged {
        WeaponProfile::new("Chainsword", WeaponKind::Melee)
    } else {
        WeaponProfile::new("Bolt Pistol", WeaponKind::Ranged)
            .with_trait(WeaponTrait::Pistol)
            .with_trait(WeaponTrait::Salvo(2))
    };
    let weapon_name = weapon.name.clone();

    let mut options = OptionState::default();
    if actor_engaged {
        options.all_out_attack = true;
    } else {
        options.pinning = true;
    }

    let target_info = TargetInfo::new(target)
        .with_resolve(rng.gen_range(1..6))
        .with_status_cover(match rng.gen_range(0..4) {
            0 => CoverLevel::Half,
            1 => CoverLevel::Full,
            _ => CoverLevel::None,
        });

    let ctx = AttackContext {
        actor,
        actor_strength: rng.gen_range(2..6),
        weapon: Some(weapon),
        targets: vec![target_info],
    };

    let mut calculator = FixedCalculator {
        fields: FieldSet {
            pool: rng.gen_range(3..8),
            difficulty: 3,
            damage: rng.gen_range(6..12),
            ed: DiceValue::new(rng.gen_range(1..4), 1),
            ap: DiceValue::new(rng.gen_range(0..3), 0),
            wrath: 1,
        },
    };

    let mut resolver = AttackResolver::with_config(cfg);
    let resolution = resolver.resolve(&mut calculator, &ctx, &options, &*store, &grid)?;

    let result = SkirmishResult {
        seed,
        combatants: roster.len(),
        sweeps_run: outcomes.len(),
        engaged_markers,
        added: total_added,
        removed: total_removed,
        failed: total_failed,
        resolution: ResolutionSummary {
            weapon: weapon_name,
            pool: resolution.fields.pool,
            difficulty: resolution.fields.difficulty,
            damage: resolution.fields.damage,
            ed_value: resolution.fields.ed.value,
            ed_dice: resolution.fields.ed.dice,
            ap_value: resolution.fields.ap.value,
            ap_dice: resolution.fields.ap.dice,
            wrath: resolution.fields.wrath,
            delta_pool: resolution.delta.pool,
            delta_difficulty: resolution.delta.difficulty,
            annotations: resolution
                .annotations
                .iter()
                .map(|a| AnnotationLine { delta: a.delta, label: a.reason.label() })
                .collect(),
        },
    };

    match args.format.as_str() {
        "text" => {
            println!("Skirmish Result");
            println!("===============");
            println!("Seed: {}", result.seed);
            println!("Combatants: {}", result.combatants);
            println!(
                "Sweeps: {} (added {}, removed {}, failed {})",
                result.sweeps_run, result.added, result.removed, result.failed
            );
            println!("Engaged markers: {}", result.engaged_markers);
            println!();
            println!("Attack with {}", result.resolution.weapon);
            println!(
                "  Pool {} / DN {} / Damage {} + {}ED",
                result.resolution.pool,
                result.resolution.difficulty,
                result.resolution.damage,
                result.resolution.ed_dice
            );
            for line in &result.resolution.annotations {
                println!("  {:+} {}", line.delta, line.label);
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

/// Scatter one side across the scene with size-weighted footprints
fn seed_side(rng: &mut StdRng, count: usize, disposition: Disposition, spread: f32) -> Vec<Combatant> {
    (0..count)
        .map(|_| {
            let position = Vec2::new(rng.gen_range(0.0..spread), rng.gen_range(0.0..spread));
            let size = match rng.gen_range(0..12) {
                0 => SizeCategory::Small,
                1 | 2 => SizeCategory::Large,
                3 => SizeCategory::Huge,
                _ => SizeCategory::Average,
            };
            let side = match size {
                SizeCategory::Huge => 3.0,
                SizeCategory::Large => 2.0,
                _ => 1.0,
            };
            let combatant = Combatant::new(position, size, disposition).with_footprint(side, side);
            if rng.gen_bool(0.05) {
                combatant.defeated()
            } else {
                combatant
            }
        })
        .collect()
}
