//! User-selected combat options on the attack dialog

use serde::{Deserialize, Serialize};

use crate::core::types::{CoverLevel, SizeCategory, VisionBand};

/// Everything the user can toggle on the extended dialog section.
///
/// `cover` and `size` distinguish "follow the target" (None) from an
/// explicit selection, including an explicit selection of the default
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionState {
    pub all_out_attack: bool,
    pub brace: bool,
    pub pinning: bool,
    pub pistols_in_melee: bool,
    pub disarm: bool,

    /// Explicit cover selection; None follows the target's status cover
    pub cover: Option<CoverLevel>,
    pub vision: VisionBand,
    /// Explicit size selection; None follows the first target's size
    pub size: Option<SizeCategory>,
}

impl OptionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing is selected and every control follows its default
    pub fn is_neutral(&self) -> bool {
        !self.all_out_attack
            && !self.brace
            && !self.pinning
            && !self.pistols_in_melee
            && !self.disarm
            && self.cover.is_none()
            && self.vision == VisionBand::None
            && self.size.is_none()
    }
}
