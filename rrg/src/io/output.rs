use crate::config::RRGConfig;
use plansheet::io::ext_repr::ExtPart;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything one arranger run produces, written as a single JSON document.
#[derive(Serialize, Deserialize, Clone)]
pub struct RRGOutput {
    /// The input parts, with the winning anchors applied
    pub parts: Vec<ExtPart>,
    /// Part id → (row, col) of the winning arrangement; absent when no trial
    /// seated every part
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub arrangement: Option<HashMap<String, (usize, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f32>,
    pub config: RRGConfig,
}
