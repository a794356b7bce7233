// Screen-space geometry shared by entities, commands and rendering.
// Coordinates follow the screen convention: +x right, +y down.

use serde::Serialize;

/// A 2D point or direction in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle. Width and height never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Builds a rect of the given size whose center sits on `center`.
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let mut rect = Self::new(0.0, 0.0, width, height);
        rect.set_center(center);
        rect
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }
}

/// Kill radius between two bodies: the average of both rects' sides.
pub fn proximity_radius(a: &Rect, b: &Rect) -> f32 {
    (a.width + a.height + b.width + b.height) / 4.0
}

/// True when the centers of `a` and `b` are at most the proximity radius apart.
pub fn in_proximity(a: &Rect, b: &Rect) -> bool {
    let radius = proximity_radius(a, b);
    let (ca, cb) = (a.center(), b.center());
    let dx = cb.x - ca.x;
    let dy = cb.y - ca.y;
    (dx * dx + dy * dy) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_size_is_negative_then_rect_clamps_to_zero() {
        let mut rect = Rect::new(1.0, 2.0, -5.0, 3.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 3.0);

        rect.resize(4.0, -1.0);
        assert_eq!(rect.width(), 4.0);
        assert_eq!(rect.height(), 0.0);
    }

    #[test]
    fn when_center_is_set_then_top_left_moves_by_half_size() {
        let rect = Rect::centered(Vec2::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(rect.x, 40.0);
        assert_eq!(rect.y, 45.0);
        assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn when_centers_are_exactly_radius_apart_then_in_proximity() {
        // radius = (10 + 10 + 10 + 10) / 4 = 10
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(in_proximity(&a, &b));

        let c = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(!in_proximity(&a, &c));
    }
}
