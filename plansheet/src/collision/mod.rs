use crate::entities::{CellPos, Part};
use crate::geometry::Rect;
use crate::geometry::geo_traits::CollidesWith;
use crate::layout::FootprintRules;
use std::collections::HashMap;

/// Detects and resolves conflicts between free-form placements, outside the
/// grid's cell model (e.g. validating pixel-space positions before snapping).
///
/// Coordinate convention: rows map to `y`, columns to `x`. This is the
/// transpose of [`CellPos`]'s (row, col) order; callers must not mix the two.
#[derive(Clone, Debug, Default)]
pub struct CollisionManager {
    priorities: HashMap<String, i32>,
}

impl CollisionManager {
    pub fn new() -> Self {
        CollisionManager::default()
    }

    /// Registers the priority used by [`Self::resolve`]. Unregistered parts
    /// have priority 0.
    pub fn set_priority(&mut self, part_id: impl Into<String>, priority: i32) {
        self.priorities.insert(part_id.into(), priority);
    }

    pub fn priority(&self, part_id: &str) -> i32 {
        self.priorities.get(part_id).copied().unwrap_or(0)
    }

    /// Bounding rectangle of `part` anchored at `position`, sized by its
    /// effective footprint under `rules`.
    pub fn part_bounds(rules: &FootprintRules, part: &Part, position: CellPos) -> Rect {
        let footprint = rules.effective_footprint(part.category, part.rotation, part.scale);
        Rect::from_anchor(
            position.col as f32,
            position.row as f32,
            footprint.width as f32,
            footprint.height as f32,
        )
        .expect("footprint dimensions are always positive")
    }

    /// True iff the two parts' bounding rectangles overlap on both axes.
    /// Edge-touching rectangles do not conflict.
    pub fn check_collision(
        rules: &FootprintRules,
        a: (&Part, CellPos),
        b: (&Part, CellPos),
    ) -> bool {
        let rect_a = Self::part_bounds(rules, a.0, a.1);
        let rect_b = Self::part_bounds(rules, b.0, b.1);
        rect_a.collides_with(&rect_b)
    }

    /// Picks the conflict winner by registered priority. Ties fall to the
    /// second argument; treat the tie-break as unspecified rather than a
    /// guaranteed contract.
    pub fn resolve<'a>(&self, a: &'a Part, b: &'a Part) -> &'a Part {
        if self.priority(&a.id) > self.priority(&b.id) {
            a
        } else {
            b
        }
    }
}
