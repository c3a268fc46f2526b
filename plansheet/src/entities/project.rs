use crate::entities::{CellPos, Part, SheetGrid};
use crate::util;
use jiff::Timestamp;
use log::warn;
use std::collections::HashMap;

/// Bookkeeping attached to a [`Project`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectMeta {
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
    pub author: Option<String>,
    pub version: String,
}

impl ProjectMeta {
    pub fn new() -> Self {
        let now = Timestamp::now();
        ProjectMeta {
            created_at: now,
            modified_at: now,
            author: None,
            version: "1.0".to_string(),
        }
    }
}

impl Default for ProjectMeta {
    fn default() -> Self {
        ProjectMeta::new()
    }
}

/// One sheet of a project: the parts on it and the last applied arrangement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub parts: Vec<Part>,
    /// Part id → anchor of the arrangement this page was last laid out with.
    /// The parts' own `position` fields are authoritative; this mapping is a
    /// cached layout result kept for collaborators.
    pub layout: HashMap<String, CellPos>,
}

impl Page {
    /// Rebuilds the occupancy grid from the page's positioned parts.
    /// Parts without a position, or whose recorded position no longer fits,
    /// are left off the grid with a warning.
    pub fn to_grid(&self, rows: usize, cols: usize) -> SheetGrid {
        let mut grid = SheetGrid::new(rows, cols);
        for part in &self.parts {
            match part.position {
                Some(anchor) => {
                    if grid.place(part.clone(), anchor).is_none() {
                        warn!(
                            "part {} does not fit at its recorded position ({}, {}), leaving it off the sheet",
                            part.id, anchor.row, anchor.col
                        );
                    }
                }
                None => warn!("part {} has no position, leaving it off the sheet", part.id),
            }
        }
        grid
    }
}

/// A drafting project: an ordered set of pages plus metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub meta: ProjectMeta,
    pub pages: Vec<Page>,
    pub current_page: usize,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Project {
            id: util::pseudo_uid(&name),
            name,
            meta: ProjectMeta::new(),
            pages: vec![Page::default()],
            current_page: 0,
        }
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(self.current_page)
    }

    pub fn add_page(&mut self) -> &mut Page {
        self.pages.push(Page::default());
        self.pages.last_mut().expect("page was just pushed")
    }

    /// Stamps the modification time. Call after any mutation that should be
    /// visible in the project metadata.
    pub fn touch(&mut self) {
        self.meta.modified_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Footprint, PartCategory};

    #[test]
    fn page_grid_skips_conflicting_positions() {
        let mut a = Part::new(
            "a".to_string(),
            "a".to_string(),
            PartCategory::FrontView,
            Footprint::new(2, 2),
        );
        a.position = Some(CellPos::new(0, 0));
        let mut b = Part::new(
            "b".to_string(),
            "b".to_string(),
            PartCategory::Detail,
            Footprint::new(1, 1),
        );
        b.position = Some(CellPos::new(1, 1)); // collides with a

        let page = Page {
            parts: vec![a, b],
            layout: HashMap::new(),
        };
        let grid = page.to_grid(3, 3);
        assert_eq!(grid.placed.len(), 1);
        assert_eq!(grid.n_occupied_cells(), 4);
    }
}
