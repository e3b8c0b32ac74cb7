//! Extender configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use std::fs;
use std::path::Path;

/// Configuration for engagement evaluation and modifier resolution
///
/// These values match the tabletop rules as written. Changing them alters
/// which attacks get blocked and how far engagement reaches.
#[derive(Debug, Clone)]
pub struct ExtenderConfig {
    // === ENGAGEMENT EVALUATION ===
    /// Quiet window after the last scene change before a sweep runs (milliseconds)
    ///
    /// Scene edits arrive in bursts (drag-moves fire one update per frame).
    /// Each new change restarts the window, so a burst costs one sweep.
    pub debounce_ms: u64,

    /// Whether this instance is allowed to write condition markers
    ///
    /// Exactly one instance per shared scene should have this set, or
    /// every connected instance repeats the same marker writes.
    pub authoritative: bool,

    /// Skip the bucket prefilter and compare every friendly-hostile pair
    ///
    /// The bucketed scan and the exhaustive scan agree on every roster;
    /// this exists for debugging and for the benchmark baseline.
    pub force_exhaustive: bool,

    // === REACH ===
    /// Engagement reach for Average-sized and smaller creatures (scene units)
    ///
    /// One melee increment on a standard grid. Nothing reaches shorter
    /// than this, however small the creature.
    pub reach_floor: f32,

    /// Added reach per size category above Average (scene units)
    ///
    /// Large 3.0, Huge 4.5, Gargantuan 6.0 at the default step of 1.5.
    pub reach_step: f32,

    // === RESOLVER ===
    /// Difficulty applied to attacks the engagement rules forbid outright
    ///
    /// A sentinel no legal roll can meet. Existing higher difficulties
    /// are kept, so this only ever raises.
    pub blocked_difficulty: i32,
}

impl Default for ExtenderConfig {
    fn default() -> Self {
        Self {
            // Engagement evaluation
            debounce_ms: 100,
            authoritative: true,
            force_exhaustive: false,

            // Reach (floor + step per category above Average)
            reach_floor: 1.5,
            reach_step: 1.5,

            // Resolver
            blocked_difficulty: 999,
        }
    }
}

impl ExtenderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.reach_floor <= 0.0 || !self.reach_floor.is_finite() {
            return Err(format!(
                "reach_floor ({}) must be positive and finite",
                self.reach_floor
            ));
        }

        if self.reach_step < 0.0 || !self.reach_step.is_finite() {
            return Err(format!(
                "reach_step ({}) must be non-negative and finite",
                self.reach_step
            ));
        }

        // The sentinel must exceed any difficulty a table would set by hand
        if self.blocked_difficulty < 100 {
            return Err(format!(
                "blocked_difficulty ({}) must be >= 100",
                self.blocked_difficulty
            ));
        }

        Ok(())
    }

    /// Load a config from a TOML file, keeping defaults for absent keys
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text, keeping defaults for absent keys
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let toml: toml::Value = content
            .parse()
            .map_err(|e| format!("Invalid TOML: {}", e))?;

        let mut config = Self::default();

        if let Some(table) = toml.get("engagement").and_then(|v| v.as_table()) {
            if let Some(v) = table.get("debounce_ms").and_then(|v| v.as_integer()) {
                config.debounce_ms = v.max(0) as u64;
            }
            if let Some(v) = table.get("authoritative").and_then(|v| v.as_bool()) {
                config.authoritative = v;
            }
            if let Some(v) = table.get("force_exhaustive").and_then(|v| v.as_bool()) {
                config.force_exhaustive = v;
            }
        }

        if let Some(table) = toml.get("reach").and_then(|v| v.as_table()) {
            if let Some(v) = table.get("floor").and_then(|v| v.as_float()) {
                config.reach_floor = v as f32;
            }
            if let Some(v) = table.get("step").and_then(|v| v.as_float()) {
                config.reach_step = v as f32;
            }
        }

        if let Some(table) = toml.get("resolver").and_then(|v| v.as_table()) {
            if let Some(v) = table.get("blocked_difficulty").and_then(|v| v.as_integer()) {
                config.blocked_difficulty = v as i32;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ExtenderConfig> = OnceLock::new();

/// Get the global extender config (initializes with defaults if not set)
pub fn config() -> &'static ExtenderConfig {
    CONFIG.get_or_init(ExtenderConfig::default)
}

/// Set the global extender config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ExtenderConfig) -> Result<(), ExtenderConfig> {
    CONFIG.set(config)
}
