//! Attack dialog resolution: fields, options, overrides, annotations

pub mod annotations;
pub mod fields;
pub mod options;
pub mod overrides;
pub mod resolver;
pub mod weapon;

pub use annotations::{AnnotatedField, Annotation, AnnotationReason};
pub use fields::{DiceValue, FieldSet, ResolutionDelta};
pub use options::OptionState;
pub use overrides::{FieldPath, OverrideSet};
pub use resolver::{AttackContext, AttackResolver, BaseCalculator, Resolution, TargetInfo, UpstreamOutcome};
pub use weapon::{WeaponKind, WeaponProfile, WeaponTrait};
