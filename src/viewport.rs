//! Viewport scaling
//!
//! Maps the fixed 1920×1080 logical resolution onto whatever physical canvas the
//! shell provides. A single uniform `scale` (the smaller axis ratio) keeps sizes and
//! speeds proportional without distorting circles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_HEIGHT, BASE_WIDTH};

/// Physical canvas size and the derived scale factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// `min(scale_x, scale_y)`; multiplied into every base magnitude at use time
    pub scale: f32,
}

/// Proportional position mapping between two canvas sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remap {
    pub from: Vec2,
    pub to: Vec2,
}

impl Remap {
    /// Map a point so it keeps its relative place in the arena
    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        p / self.from * self.to
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(BASE_WIDTH, BASE_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let (width, height) = sanitize(width, height);
        let scale_x = width / BASE_WIDTH;
        let scale_y = height / BASE_HEIGHT;
        Self {
            width,
            height,
            scale_x,
            scale_y,
            scale: scale_x.min(scale_y),
        }
    }

    /// Apply new physical dimensions.
    ///
    /// Returns the remap for live entities when the size actually changed.
    pub fn resize(&mut self, width: f32, height: f32) -> Option<Remap> {
        let old = self.size();
        *self = Self::new(width, height);
        let new = self.size();
        if old == new {
            return None;
        }
        log::debug!(
            "Viewport resized {}x{} -> {}x{} (scale {:.3})",
            old.x,
            old.y,
            new.x,
            new.y,
            self.scale
        );
        Some(Remap { from: old, to: new })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

/// Zero or non-finite sizes would poison the scale with NaN/inf
fn sanitize(width: f32, height: f32) -> (f32, f32) {
    let fix = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
    let (w, h) = (fix(width), fix(height));
    if w != width || h != height {
        log::warn!("Degenerate viewport {}x{} clamped to {}x{}", width, height, w, h);
    }
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_resolution_has_unit_scale() {
        let vp = Viewport::new(1920.0, 1080.0);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.center(), Vec2::new(960.0, 540.0));
    }

    #[test]
    fn test_scale_uses_smaller_axis() {
        // 4:3 canvas is width-limited
        let vp = Viewport::new(960.0, 1080.0);
        assert_eq!(vp.scale_x, 0.5);
        assert_eq!(vp.scale_y, 1.0);
        assert_eq!(vp.scale, 0.5);
    }

    #[test]
    fn test_resize_reports_remap() {
        let mut vp = Viewport::new(800.0, 600.0);
        let remap = vp.resize(1600.0, 1200.0).unwrap();
        assert_eq!(remap.apply(Vec2::new(400.0, 300.0)), Vec2::new(800.0, 600.0));
        assert_eq!(vp.width, 1600.0);
        assert_eq!(vp.scale, (1600.0_f32 / 1920.0).min(1200.0 / 1080.0));
    }

    #[test]
    fn test_resize_to_same_size_is_noop() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(vp.resize(800.0, 600.0).is_none());
    }

    #[test]
    fn test_degenerate_size_is_clamped() {
        let vp = Viewport::new(0.0, f32::NAN);
        assert_eq!(vp.size(), Vec2::ONE);
        assert!(vp.scale.is_finite() && vp.scale > 0.0);
    }
}
