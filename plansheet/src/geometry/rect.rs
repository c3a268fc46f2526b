use crate::geometry::geo_traits::CollidesWith;
use anyhow::Result;
use anyhow::ensure;

/// Axis-aligned rectangle in page space.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Rect {
    pub fn try_new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle anchored at its top-left corner with the given extent.
    pub fn from_anchor(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        Rect::try_new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn centroid(&self) -> (f32, f32) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Largest rectangle contained in both `a` and `b`, if their interiors meet.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = f32::max(a.x_min, b.x_min);
        let y_min = f32::max(a.y_min, b.y_min);
        let x_max = f32::min(a.x_max, b.x_max);
        let y_max = f32::min(a.y_max, b.y_max);
        if x_min < x_max && y_min < y_max {
            Some(Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }
}

impl CollidesWith<Rect> for Rect {
    /// Separating-axis test over open intervals: rectangles that merely share
    /// an edge or a corner do not collide.
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f32::max(self.x_min, other.x_min) < f32::min(self.x_max, other.x_max)
            && f32::max(self.y_min, other.y_min) < f32::min(self.y_max, other.y_max)
    }
}
