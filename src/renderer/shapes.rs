//! Flat 2D draw primitives

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;

/// A single draw instruction in canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Fill the whole canvas
    Clear { color: Color },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Filled disc
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Circle outline
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// Filled triangle
    Triangle { points: [Vec2; 3], color: Color },
    /// Filled axis-aligned rectangle (top-left origin)
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
}

/// Facing notch inside a circle of radius `r`, pointing along `angle`
pub fn facing_triangle(center: Vec2, r: f32, angle: f32) -> [Vec2; 3] {
    let rot = Vec2::from_angle(angle);
    [
        Vec2::new(r, 0.0),
        Vec2::new(r * 0.6, -r * 0.4),
        Vec2::new(r * 0.6, r * 0.4),
    ]
    .map(|p| center + rot.rotate(p))
}

/// Background grid: vertical then horizontal lines every `spacing` pixels
pub fn grid_lines(size: Vec2, spacing: f32, width: f32, color: Color) -> Vec<DrawCmd> {
    if spacing <= 0.0 {
        return Vec::new();
    }
    let mut lines = Vec::new();

    let mut x = 0.0;
    while x < size.x {
        lines.push(DrawCmd::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, size.y),
            width,
            color,
        });
        x += spacing;
    }

    let mut y = 0.0;
    while y < size.y {
        lines.push(DrawCmd::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(size.x, y),
            width,
            color,
        });
        y += spacing;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_triangle_points_along_angle() {
        let tri = facing_triangle(Vec2::new(10.0, 10.0), 10.0, 0.0);
        assert_eq!(tri[0], Vec2::new(20.0, 10.0));

        let tri = facing_triangle(Vec2::ZERO, 10.0, std::f32::consts::FRAC_PI_2);
        assert!((tri[0] - Vec2::new(0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_grid_line_count() {
        let lines = grid_lines(Vec2::new(100.0, 50.0), 25.0, 1.0, Color::WHITE);
        // x = 0, 25, 50, 75 and y = 0, 25
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_grid_rejects_zero_spacing() {
        assert!(grid_lines(Vec2::new(100.0, 50.0), 0.0, 1.0, Color::WHITE).is_empty());
    }
}
