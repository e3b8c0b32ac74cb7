//! Engagement reach derived from creature size

use crate::core::config::ExtenderConfig;
use crate::core::types::SizeCategory;

/// How far a creature of this size threatens, in scene units.
///
/// Average and smaller creatures all get the floor; each category above
/// Average adds one step. Reach never shrinks below the floor.
pub fn engagement_reach(size: SizeCategory, config: &ExtenderConfig) -> f32 {
    config.reach_floor + config.reach_step * size.steps_above_average() as f32
}

/// Engagement threshold for a pair: the longer reach of the two.
///
/// A Gargantuan creature threatens a Tiny one at the Gargantuan's reach,
/// and the engagement binds both ways.
pub fn pair_threshold(a: SizeCategory, b: SizeCategory, config: &ExtenderConfig) -> f32 {
    engagement_reach(a, config).max(engagement_reach(b, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_table() {
        let config = ExtenderConfig::default();
        assert_eq!(engagement_reach(SizeCategory::Tiny, &config), 1.5);
        assert_eq!(engagement_reach(SizeCategory::Small, &config), 1.5);
        assert_eq!(engagement_reach(SizeCategory::Average, &config), 1.5);
        assert_eq!(engagement_reach(SizeCategory::Large, &config), 3.0);
        assert_eq!(engagement_reach(SizeCategory::Huge, &config), 4.5);
        assert_eq!(engagement_reach(SizeCategory::Gargantuan, &config), 6.0);
    }

    #[test]
    fn test_pair_threshold_takes_longer_reach() {
        let config = ExtenderConfig::default();
        assert_eq!(
            pair_threshold(SizeCategory::Tiny, SizeCategory::Gargantuan, &config),
            6.0
        );
        assert_eq!(
            pair_threshold(SizeCategory::Gargantuan, SizeCategory::Tiny, &config),
            6.0
        );
        assert_eq!(
            pair_threshold(SizeCategory::Average, SizeCategory::Average, &config),
            1.5
        );
    }
}
