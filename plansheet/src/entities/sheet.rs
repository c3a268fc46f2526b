use crate::entities::{CellPos, Footprint, Part};
use crate::util::assertions;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

new_key_type! {
    /// Unique key of a part placed in a [`SheetGrid`]
    pub struct PartKey;
}

/// Occupancy grid of a single sheet: a `rows × cols` table of cells, each either
/// empty or claimed by exactly one placed part. Mutated only through
/// [`SheetGrid::place`] and [`SheetGrid::remove`]; a new layout attempt starts
/// from a fresh instance.
#[derive(Clone, Debug)]
pub struct SheetGrid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Option<PartKey>>,
    /// All parts currently placed in the grid, indexed by a unique key
    pub placed: SlotMap<PartKey, Part>,
}

impl SheetGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        SheetGrid {
            rows,
            cols,
            cells: vec![None; rows * cols],
            placed: SlotMap::with_key(),
        }
    }

    /// True iff a part with `footprint` anchored at `anchor` lies fully inside
    /// the grid and covers only empty cells.
    pub fn can_place(&self, footprint: Footprint, anchor: CellPos) -> bool {
        if anchor.row + footprint.height > self.rows || anchor.col + footprint.width > self.cols {
            return false;
        }
        covered_cells(footprint, anchor, self.cols).all(|idx| self.cells[idx].is_none())
    }

    /// Places `part` with its top-left cell at `anchor` and returns its key.
    /// A rejected placement leaves the grid untouched and returns `None`.
    pub fn place(&mut self, mut part: Part, anchor: CellPos) -> Option<PartKey> {
        if !self.can_place(part.footprint, anchor) {
            return None;
        }
        part.position = Some(anchor);
        let footprint = part.footprint;
        let key = self.placed.insert(part);
        for idx in covered_cells(footprint, anchor, self.cols) {
            self.cells[idx] = Some(key);
        }

        debug_assert!(assertions::cells_match_placed_parts(self));

        Some(key)
    }

    /// Removes a placed part, clearing every cell it occupied. The part is
    /// returned with its position unset; an unknown key yields `None`.
    pub fn remove(&mut self, key: PartKey) -> Option<Part> {
        let mut part = self.placed.remove(key)?;
        let anchor = part
            .position
            .take()
            .expect("placed part always carries an anchor");
        for idx in covered_cells(part.footprint, anchor, self.cols) {
            self.cells[idx] = None;
        }

        debug_assert!(assertions::cells_match_placed_parts(self));

        Some(part)
    }

    /// The key occupying a cell, if any. Out-of-bounds positions are empty.
    pub fn cell(&self, pos: CellPos) -> Option<PartKey> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.cells[pos.row * self.cols + pos.col]
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn n_cells(&self) -> usize {
        self.rows * self.cols
    }

    pub fn n_occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Mapping of part id → anchor for every placed part.
    pub fn anchor_map(&self) -> HashMap<String, CellPos> {
        self.placed
            .values()
            .map(|p| {
                let anchor = p.position.expect("placed part always carries an anchor");
                (p.id.clone(), anchor)
            })
            .collect()
    }

}

fn covered_cells(
    footprint: Footprint,
    anchor: CellPos,
    n_cols: usize,
) -> impl Iterator<Item = usize> {
    (anchor.row..anchor.row + footprint.height).flat_map(move |row| {
        (anchor.col..anchor.col + footprint.width).map(move |col| row * n_cols + col)
    })
}
