use crate::entities::{
    CellPos, Footprint, Part, PartKey, SCALE_MAX, SCALE_MIN, SheetGrid, Template,
};
use crate::layout::FootprintRules;
use log::debug;
use std::cmp::Reverse;

/// Outcome of a rotate/scale mutation on a placed part.
#[derive(Clone, Debug)]
pub enum Reseat {
    /// The part fit again and occupies the grid under this (new) key.
    Placed(PartKey),
    /// The new footprint fits nowhere; the part is handed back unplaced.
    Unplaced(Part),
}

/// Translates part lists into concrete grid placements.
///
/// Owns the [`SheetGrid`] of the current layout attempt; every `auto_layout`
/// call discards it and starts from an empty one.
#[derive(Clone, Debug)]
pub struct LayoutManager {
    pub grid: SheetGrid,
    rules: FootprintRules,
}

impl LayoutManager {
    pub fn new(rules: FootprintRules, rows: usize, cols: usize) -> Self {
        LayoutManager {
            grid: SheetGrid::new(rows, cols),
            rules,
        }
    }

    pub fn rules(&self) -> &FootprintRules {
        &self.rules
    }

    /// See [`FootprintRules::effective_footprint`].
    pub fn effective_footprint(&self, part: &Part) -> Footprint {
        self.rules
            .effective_footprint(part.category, part.rotation, part.scale)
    }

    /// Greedy first-fit layout of `parts` into a fresh grid.
    ///
    /// Parts are seated in order of descending footprint area (stable for
    /// equal areas) at the first free row-major anchor. Returns `false` as
    /// soon as one part fits nowhere; parts seated before that point stay on
    /// the grid, so callers needing all-or-nothing must discard the grid.
    pub fn auto_layout(&mut self, parts: Vec<Part>) -> bool {
        self.grid = SheetGrid::new(self.grid.rows, self.grid.cols);

        let mut parts = parts;
        parts.sort_by_key(|p| Reverse(p.footprint.area()));

        for part in parts {
            match self.first_fit_anchor(part.footprint) {
                Some(anchor) => {
                    debug!(
                        "seating part {} ({}x{}) at ({}, {})",
                        part.id, part.footprint.width, part.footprint.height, anchor.row, anchor.col
                    );
                    self.grid.place(part, anchor);
                }
                None => {
                    debug!("no free anchor for part {}, aborting layout", part.id);
                    return false;
                }
            }
        }
        true
    }

    /// Advances the part's rotation by 90° and re-seats only that part into
    /// the current occupancy. Returns `None` for a key that is not placed.
    pub fn rotate(&mut self, key: PartKey) -> Option<Reseat> {
        let mut part = self.grid.remove(key)?;
        part.rotation = part.rotation.advanced();
        part.footprint = self.effective_footprint(&part);
        Some(self.reseat(part))
    }

    /// Multiplies the part's scale by `factor` (clamped to
    /// [`SCALE_MIN`, `SCALE_MAX`]) and re-seats it exactly like [`Self::rotate`].
    pub fn scale(&mut self, key: PartKey, factor: f32) -> Option<Reseat> {
        let mut part = self.grid.remove(key)?;
        part.scale = (part.scale * factor).clamp(SCALE_MIN, SCALE_MAX);
        part.footprint = self.effective_footprint(&part);
        Some(self.reseat(part))
    }

    /// Stamps a template onto a fresh grid, creating one part per slot.
    /// Returns `false` if any slot cannot be placed at its pinned position.
    pub fn apply_template(&mut self, template: &Template) -> bool {
        self.grid = SheetGrid::new(self.grid.rows, self.grid.cols);
        for (i, slot) in template.slots.iter().enumerate() {
            let part = Part::new(
                format!("{}_{}", template.id, i),
                slot.category.key().to_string(),
                slot.category,
                slot.size,
            );
            if self.grid.place(part, slot.position).is_none() {
                return false;
            }
        }
        true
    }

    fn reseat(&mut self, part: Part) -> Reseat {
        match self.first_fit_anchor(part.footprint) {
            Some(anchor) => {
                let key = self
                    .grid
                    .place(part, anchor)
                    .expect("anchor was just verified free");
                Reseat::Placed(key)
            }
            None => Reseat::Unplaced(part),
        }
    }

    /// First anchor in row-major order where `footprint` fits, if any.
    fn first_fit_anchor(&self, footprint: Footprint) -> Option<CellPos> {
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let anchor = CellPos::new(row, col);
                if self.grid.can_place(footprint, anchor) {
                    return Some(anchor);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PartCategory, Rotation};

    fn manager() -> LayoutManager {
        LayoutManager::new(FootprintRules::default(), 3, 3)
    }

    fn part(id: &str, category: PartCategory, width: usize, height: usize) -> Part {
        Part::new(
            id.to_string(),
            id.to_string(),
            category,
            Footprint::new(width, height),
        )
    }

    #[test]
    fn auto_layout_fills_the_sheet_first_fit() {
        let mut manager = manager();
        let parts = vec![
            part("front", PartCategory::FrontView, 2, 2),
            part("side", PartCategory::SideView, 1, 2),
            part("top", PartCategory::TopView, 2, 1),
        ];
        assert!(manager.auto_layout(parts));

        let anchors = manager.grid.anchor_map();
        assert_eq!(anchors["front"], CellPos::new(0, 0));
        assert_eq!(anchors["side"], CellPos::new(0, 2));
        assert_eq!(anchors["top"], CellPos::new(2, 0));
        assert_eq!(manager.grid.n_occupied_cells(), 9);
    }

    #[test]
    fn auto_layout_reports_overflow() {
        let mut manager = manager();
        let parts = (0..4)
            .map(|i| part(&format!("a{i}"), PartCategory::Assembly, 2, 2))
            .collect();
        // a second 2x2 part cannot fit in the L-shaped remainder of a 3x3 sheet
        assert!(!manager.auto_layout(parts));
        assert_eq!(manager.grid.placed.len(), 1);
    }

    #[test]
    fn equal_areas_keep_input_order() {
        let mut manager = manager();
        let parts = vec![
            part("first", PartCategory::Detail, 1, 1),
            part("second", PartCategory::Detail, 1, 1),
        ];
        assert!(manager.auto_layout(parts));
        let anchors = manager.grid.anchor_map();
        assert_eq!(anchors["first"], CellPos::new(0, 0));
        assert_eq!(anchors["second"], CellPos::new(0, 1));
    }

    #[test]
    fn rotate_reseats_only_the_rotated_part() {
        let mut manager = manager();
        assert!(manager.auto_layout(vec![
            part("side", PartCategory::SideView, 1, 2),
            part("detail", PartCategory::Detail, 1, 1),
        ]));
        let side_key = manager
            .grid
            .placed
            .iter()
            .find(|(_, p)| p.id == "side")
            .map(|(k, _)| k)
            .unwrap();
        let detail_anchor = manager.grid.anchor_map()["detail"];

        match manager.rotate(side_key).unwrap() {
            Reseat::Placed(key) => {
                let rotated = &manager.grid.placed[key];
                assert_eq!(rotated.rotation, Rotation::R90);
                assert_eq!(rotated.footprint, Footprint::new(2, 1));
            }
            Reseat::Unplaced(_) => panic!("rotated part should still fit"),
        }
        // the other part did not move
        assert_eq!(manager.grid.anchor_map()["detail"], detail_anchor);
    }

    #[test]
    fn rotate_unknown_key_is_rejected() {
        let mut manager = manager();
        assert!(manager.auto_layout(vec![part("a", PartCategory::Detail, 1, 1)]));
        let key = manager.grid.placed.keys().next().unwrap();
        manager.grid.remove(key).unwrap();
        assert!(manager.rotate(key).is_none());
    }

    #[test]
    fn scale_clamps_to_bounds() {
        let mut manager = manager();
        assert!(manager.auto_layout(vec![part("front", PartCategory::FrontView, 2, 2)]));
        let key = manager.grid.placed.keys().next().unwrap();

        let key = match manager.scale(key, 100.0).unwrap() {
            Reseat::Placed(key) => {
                assert_eq!(manager.grid.placed[key].scale, SCALE_MAX);
                key
            }
            Reseat::Unplaced(_) => panic!("3x3 footprint fits an empty 3x3 sheet"),
        };
        match manager.scale(key, 0.001).unwrap() {
            Reseat::Placed(key) => assert_eq!(manager.grid.placed[key].scale, SCALE_MIN),
            Reseat::Unplaced(_) => panic!("1x1 footprint always fits"),
        }
    }

    #[test]
    fn unplaceable_footprint_ends_unplaced() {
        let mut manager = manager();
        assert!(manager.auto_layout(vec![
            part("front", PartCategory::FrontView, 2, 2),
            part("side", PartCategory::SideView, 1, 2),
            part("top", PartCategory::TopView, 2, 1),
        ]));
        let front_key = manager
            .grid
            .placed
            .iter()
            .find(|(_, p)| p.id == "front")
            .map(|(k, _)| k)
            .unwrap();

        // growing the front view to 3x3 cannot fit next to the other parts
        match manager.scale(front_key, 2.0).unwrap() {
            Reseat::Unplaced(p) => {
                assert_eq!(p.position, None);
                assert_eq!(p.footprint, Footprint::new(3, 3));
            }
            Reseat::Placed(_) => panic!("3x3 footprint cannot fit a partially occupied sheet"),
        }
        assert_eq!(manager.grid.placed.len(), 2);
    }

    #[test]
    fn builtin_templates_fit_the_default_sheet() {
        for template in Template::builtin() {
            let mut manager = manager();
            assert!(manager.apply_template(&template), "{} must fit", template.id);
        }
    }
}
