use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Lower bound for a part's scale factor.
pub const SCALE_MIN: f32 = 0.5;
/// Upper bound for a part's scale factor.
pub const SCALE_MAX: f32 = 2.0;

/// Closed set of part kinds that can appear on a drawing sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    FrontView,
    SideView,
    TopView,
    Perspective,
    Detail,
    Dimensions,
    Section,
    Assembly,
    PartsList,
}

impl PartCategory {
    pub const ALL: [PartCategory; 9] = [
        PartCategory::FrontView,
        PartCategory::SideView,
        PartCategory::TopView,
        PartCategory::Perspective,
        PartCategory::Detail,
        PartCategory::Dimensions,
        PartCategory::Section,
        PartCategory::Assembly,
        PartCategory::PartsList,
    ];

    /// Stable key, doubles as the translation catalog key for the category label.
    pub fn key(self) -> &'static str {
        match self {
            PartCategory::FrontView => "front_view",
            PartCategory::SideView => "side_view",
            PartCategory::TopView => "top_view",
            PartCategory::Perspective => "perspective",
            PartCategory::Detail => "detail",
            PartCategory::Dimensions => "dimensions",
            PartCategory::Section => "section",
            PartCategory::Assembly => "assembly",
            PartCategory::PartsList => "parts_list",
        }
    }
}

/// Orthogonal rotation applied to a part before it is sized and placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Advances by 90°, wrapping 270° back to 0°.
    pub fn advanced(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    pub fn from_degrees(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            _ => bail!("rotation must be a multiple of 90° in [0°, 270°], got {degrees}°"),
        }
    }

    /// True for the two rotations that swap a footprint's width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// Width × height of a part, in grid cells. Width spans columns, height spans rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: usize,
    pub height: usize,
}

impl Footprint {
    pub const fn new(width: usize, height: usize) -> Self {
        Footprint { width, height }
    }

    pub fn area(self) -> usize {
        self.width * self.height
    }

    /// Footprint with width and height exchanged.
    pub fn swapped(self) -> Self {
        Footprint {
            width: self.height,
            height: self.width,
        }
    }

    /// Componentwise clamp to `[min, max]`.
    pub fn clamp(self, min: Footprint, max: Footprint) -> Self {
        Footprint {
            width: self.width.clamp(min.width, max.width),
            height: self.height.clamp(min.height, max.height),
        }
    }
}

/// (row, column) anchor of a part's top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }

    /// Manhattan distance to another anchor.
    pub fn manhattan_distance(self, other: CellPos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// A placeable unit: one labeled view of a technical drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    /// Unique identifier of the part within its project
    pub id: String,
    /// Human readable label, drawn next to the part on the exported sheet
    pub name: String,
    pub category: PartCategory,
    /// Cell rectangle the part claims when placed
    pub footprint: Footprint,
    /// Top-left anchor in the grid, `None` until placed
    pub position: Option<CellPos>,
    pub rotation: Rotation,
    /// Scale factor, kept within [`SCALE_MIN`, `SCALE_MAX`]
    pub scale: f32,
    /// Handle to the drawing resource backing this part; not interpreted here
    pub image_ref: Option<String>,
}

impl Part {
    pub fn new(id: String, name: String, category: PartCategory, footprint: Footprint) -> Self {
        Part {
            id,
            name,
            category,
            footprint,
            position: None,
            rotation: Rotation::default(),
            scale: 1.0,
            image_ref: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_cycle_returns_to_start() {
        let mut r = Rotation::R0;
        for _ in 0..4 {
            r = r.advanced();
        }
        assert_eq!(r, Rotation::R0);
    }

    #[test]
    fn rejects_off_axis_degrees() {
        assert!(Rotation::from_degrees(45).is_err());
        assert!(Rotation::from_degrees(360).is_err());
    }

    #[test]
    fn footprint_clamp_is_componentwise() {
        let clamped = Footprint::new(5, 0).clamp(Footprint::new(1, 1), Footprint::new(3, 3));
        assert_eq!(clamped, Footprint::new(3, 1));
    }
}
