pub mod distance;
pub mod reach;

pub use distance::{are_engaged, center_distance, edge_distance, footprint_radius};
pub use reach::{engagement_reach, pair_threshold};
