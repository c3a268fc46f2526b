use crate::entities::{Footprint, PartCategory, Rotation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sizing rule of one part category: the footprint a fresh part gets, and the
/// bounds scaling may never push it past.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRule {
    pub default: Footprint,
    pub min: Footprint,
    pub max: Footprint,
}

impl SizeRule {
    const fn new(default: (usize, usize), min: (usize, usize), max: (usize, usize)) -> Self {
        SizeRule {
            default: Footprint::new(default.0, default.1),
            min: Footprint::new(min.0, min.1),
            max: Footprint::new(max.0, max.1),
        }
    }
}

/// Per-category footprint rules. Immutable configuration: lookups are total,
/// categories without an override fall back to the built-in table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootprintRules {
    overrides: HashMap<PartCategory, SizeRule>,
}

impl FootprintRules {
    pub fn with_overrides(overrides: HashMap<PartCategory, SizeRule>) -> Self {
        FootprintRules { overrides }
    }

    pub fn rule(&self, category: PartCategory) -> SizeRule {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| builtin_rule(category))
    }

    /// The footprint a part of `category` occupies under `rotation` and `scale`.
    ///
    /// Pure function of its inputs: the category default is axis-swapped for
    /// 90°/270°, each dimension is scaled and truncated, then clamped
    /// componentwise to the category's (unswapped) min/max bounds.
    pub fn effective_footprint(
        &self,
        category: PartCategory,
        rotation: Rotation,
        scale: f32,
    ) -> Footprint {
        let SizeRule { default, min, max } = self.rule(category);
        let base = if rotation.swaps_axes() {
            default.swapped()
        } else {
            default
        };
        let scaled = Footprint::new(
            (base.width as f32 * scale) as usize,
            (base.height as f32 * scale) as usize,
        );
        scaled.clamp(min, max)
    }
}

fn builtin_rule(category: PartCategory) -> SizeRule {
    match category {
        PartCategory::FrontView => SizeRule::new((2, 2), (1, 1), (3, 3)),
        PartCategory::SideView => SizeRule::new((1, 2), (1, 1), (2, 2)),
        PartCategory::TopView => SizeRule::new((2, 1), (1, 1), (2, 2)),
        PartCategory::Perspective => SizeRule::new((1, 1), (1, 1), (2, 2)),
        PartCategory::Detail => SizeRule::new((1, 1), (1, 1), (1, 1)),
        PartCategory::Dimensions => SizeRule::new((1, 1), (1, 1), (2, 1)),
        PartCategory::Section => SizeRule::new((1, 1), (1, 1), (2, 2)),
        PartCategory::Assembly => SizeRule::new((2, 2), (1, 1), (3, 3)),
        PartCategory::PartsList => SizeRule::new((1, 2), (1, 1), (1, 3)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_footprint_is_deterministic() {
        let rules = FootprintRules::default();
        let a = rules.effective_footprint(PartCategory::SideView, Rotation::R90, 1.3);
        let b = rules.effective_footprint(PartCategory::SideView, Rotation::R90, 1.3);
        assert_eq!(a, b);
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let rules = FootprintRules::default();
        let upright = rules.effective_footprint(PartCategory::SideView, Rotation::R0, 1.0);
        let turned = rules.effective_footprint(PartCategory::SideView, Rotation::R90, 1.0);
        assert_eq!(upright, Footprint::new(1, 2));
        assert_eq!(turned, Footprint::new(2, 1));
    }

    #[test]
    fn full_turn_restores_footprint() {
        let rules = FootprintRules::default();
        let mut rotation = Rotation::R0;
        let original = rules.effective_footprint(PartCategory::TopView, rotation, 1.0);
        for _ in 0..4 {
            rotation = rotation.advanced();
        }
        assert_eq!(
            rules.effective_footprint(PartCategory::TopView, rotation, 1.0),
            original
        );
    }

    #[test]
    fn scaling_respects_category_bounds() {
        let rules = FootprintRules::default();
        // front view default (2,2), max (3,3): doubling hits the ceiling
        assert_eq!(
            rules.effective_footprint(PartCategory::FrontView, Rotation::R0, 2.0),
            Footprint::new(3, 3)
        );
        // shrinking truncates, then the floor kicks in
        assert_eq!(
            rules.effective_footprint(PartCategory::FrontView, Rotation::R0, 0.5),
            Footprint::new(1, 1)
        );
        // detail is pinned to 1×1 whatever the scale
        assert_eq!(
            rules.effective_footprint(PartCategory::Detail, Rotation::R0, 2.0),
            Footprint::new(1, 1)
        );
    }

    #[test]
    fn overrides_take_precedence() {
        let mut overrides = HashMap::new();
        overrides.insert(
            PartCategory::Detail,
            SizeRule::new((2, 2), (1, 1), (2, 2)),
        );
        let rules = FootprintRules::with_overrides(overrides);
        assert_eq!(
            rules.effective_footprint(PartCategory::Detail, Rotation::R0, 1.0),
            Footprint::new(2, 2)
        );
        // untouched categories keep the built-in table
        assert_eq!(
            rules.effective_footprint(PartCategory::Assembly, Rotation::R0, 1.0),
            Footprint::new(2, 2)
        );
    }
}
