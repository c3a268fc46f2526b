use crate::entities::{CellPos, SheetGrid};
use std::collections::HashMap;

/// True iff the grid's cells are exactly the union of the placed parts'
/// footprint rectangles, with no cell claimed twice.
pub fn cells_match_placed_parts(grid: &SheetGrid) -> bool {
    let mut expected = HashMap::new();
    for (key, part) in grid.placed.iter() {
        let Some(anchor) = part.position else {
            return false;
        };
        for row in anchor.row..anchor.row + part.footprint.height {
            for col in anchor.col..anchor.col + part.footprint.width {
                if expected.insert((row, col), key).is_some() {
                    // two parts claim the same cell
                    return false;
                }
            }
        }
    }
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            if grid.cell(CellPos::new(row, col)) != expected.get(&(row, col)).copied() {
                return false;
            }
        }
    }
    true
}
