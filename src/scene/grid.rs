//! Scene grid geometry and the pixel/unit measurement context

use serde::{Deserialize, Serialize};

/// Grid parameters as stored on a scene
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SceneGrid {
    /// Scene units represented by one grid square
    pub distance: f32,
    /// Pixels spanned by one grid square
    pub size: f32,
}

impl SceneGrid {
    pub fn new(distance: f32, size: f32) -> Self {
        Self { distance, size }
    }

    /// Derive the conversion ratios for measuring on this grid.
    ///
    /// Returns None when the grid is degenerate (non-finite or non-positive
    /// values, or ratios that overflow); callers treat that as "cannot
    /// measure" rather than an error.
    pub fn measure_context(&self) -> Option<MeasureContext> {
        if !self.distance.is_finite() || !self.size.is_finite() {
            return None;
        }
        if self.distance <= 0.0 || self.size <= 0.0 {
            return None;
        }

        let units_per_pixel = self.distance / self.size;
        if !units_per_pixel.is_finite() || units_per_pixel <= 0.0 {
            return None;
        }

        let pixels_per_unit = 1.0 / units_per_pixel;
        if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
            return None;
        }

        Some(MeasureContext {
            units_per_pixel,
            pixels_per_unit,
            bucket_size_px: self.size,
            grid_distance: self.distance,
        })
    }
}

impl Default for SceneGrid {
    /// Standard 1-yard squares at 100 pixels each
    fn default() -> Self {
        Self { distance: 1.0, size: 100.0 }
    }
}

/// Validated conversion ratios for a measurable scene
#[derive(Debug, Clone, Copy)]
pub struct MeasureContext {
    pub units_per_pixel: f32,
    pub pixels_per_unit: f32,
    /// Spatial-bucket cell size in pixels (one grid square)
    pub bucket_size_px: f32,
    pub grid_distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_context() {
        let ctx = SceneGrid::default().measure_context().unwrap();
        assert_eq!(ctx.units_per_pixel, 0.01);
        assert_eq!(ctx.pixels_per_unit, 100.0);
        assert_eq!(ctx.bucket_size_px, 100.0);
        assert_eq!(ctx.grid_distance, 1.0);
    }

    #[test]
    fn test_degenerate_grids_yield_no_context() {
        assert!(SceneGrid::new(0.0, 100.0).measure_context().is_none());
        assert!(SceneGrid::new(1.0, 0.0).measure_context().is_none());
        assert!(SceneGrid::new(-5.0, 100.0).measure_context().is_none());
        assert!(SceneGrid::new(f32::NAN, 100.0).measure_context().is_none());
        assert!(SceneGrid::new(1.0, f32::INFINITY).measure_context().is_none());
    }

    #[test]
    fn test_ratios_invert() {
        let ctx = SceneGrid::new(5.0, 140.0).measure_context().unwrap();
        assert!((ctx.units_per_pixel * ctx.pixels_per_unit - 1.0).abs() < 1e-6);
    }
}
