use crate::entities::{CellPos, Footprint, PartCategory};
use serde::{Deserialize, Serialize};

/// One fixed slot of a [`Template`]: a category pinned to an explicit cell
/// rectangle. Slot sizes are authoritative and bypass the footprint rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateSlot {
    pub category: PartCategory,
    pub position: CellPos,
    pub size: Footprint,
}

/// A predefined sheet arrangement that can be stamped onto an empty grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub slots: Vec<TemplateSlot>,
}

impl Template {
    /// The built-in templates shipped with the library, all sized for the
    /// default 3×3 sheet.
    pub fn builtin() -> Vec<Template> {
        vec![
            Template {
                id: "standard".to_string(),
                name: "Standard layout".to_string(),
                description: "Basic three-view arrangement".to_string(),
                slots: vec![
                    TemplateSlot {
                        category: PartCategory::FrontView,
                        position: CellPos::new(0, 0),
                        size: Footprint::new(2, 2),
                    },
                    TemplateSlot {
                        category: PartCategory::SideView,
                        position: CellPos::new(0, 2),
                        size: Footprint::new(1, 2),
                    },
                    TemplateSlot {
                        category: PartCategory::TopView,
                        position: CellPos::new(2, 0),
                        size: Footprint::new(2, 1),
                    },
                ],
            },
            Template {
                id: "detailed".to_string(),
                name: "Detailed layout".to_string(),
                description: "Front view with detail, section and dimensions".to_string(),
                slots: vec![
                    TemplateSlot {
                        category: PartCategory::FrontView,
                        position: CellPos::new(0, 0),
                        size: Footprint::new(2, 2),
                    },
                    TemplateSlot {
                        category: PartCategory::Detail,
                        position: CellPos::new(0, 2),
                        size: Footprint::new(1, 1),
                    },
                    TemplateSlot {
                        category: PartCategory::Section,
                        position: CellPos::new(1, 2),
                        size: Footprint::new(1, 1),
                    },
                    TemplateSlot {
                        category: PartCategory::Dimensions,
                        position: CellPos::new(2, 0),
                        size: Footprint::new(2, 1),
                    },
                ],
            },
        ]
    }
}
