pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use error::{ExtenderError, Result};
pub use types::{CombatantId, CoverLevel, Disposition, RecordId, SizeCategory, Vec2, VisionBand};
