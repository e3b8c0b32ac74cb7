//! Combat Extender - Engagement Tracking and Attack Resolution

pub mod core;
pub mod dialog;
pub mod engagement;
pub mod measure;
pub mod scene;
