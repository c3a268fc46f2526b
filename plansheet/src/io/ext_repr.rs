use crate::entities::PartCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// External (JSON) representation of a [`Part`](crate::entities::Part).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPart {
    /// Unique identifier; generated on import when empty
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub category: PartCategory,
    pub name: String,
    /// (width, height) in grid cells; derived from the category rules if omitted
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<(usize, usize)>,
    /// (row, col) anchor; absent for unplaced parts
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<(usize, usize)>,
    /// Rotation in degrees, a multiple of 90 in [0, 270]
    #[serde(default)]
    pub rotation: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_path: Option<String>,
}

fn default_scale() -> f32 {
    1.0
}

/// External representation of a [`Page`](crate::entities::Page).
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtPage {
    #[serde(default)]
    pub parts: Vec<ExtPart>,
    /// Part id → (row, col) of the arrangement the page was last laid out with
    #[serde(default)]
    pub layout: HashMap<String, (usize, usize)>,
}

/// External representation of [`ProjectMeta`](crate::entities::ProjectMeta).
/// Timestamps are RFC 3339 strings.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtProjectMeta {
    pub created_at: String,
    pub modified_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,
    pub version: String,
}

/// External representation of a [`Project`](crate::entities::Project).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtProject {
    pub id: String,
    pub name: String,
    pub metadata: ExtProjectMeta,
    pub pages: Vec<ExtPage>,
    #[serde(default)]
    pub current_page: usize,
}
