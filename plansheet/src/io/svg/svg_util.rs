use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    #[serde(default)]
    pub theme: SvgSheetThemes,
    ///Draws the cell borders of the grid
    #[serde(default = "default_true")]
    pub grid_lines: bool,
    ///Draws each part's name in its top-left corner
    #[serde(default = "default_true")]
    pub labels: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgSheetThemes::default(),
            grid_lines: true,
            labels: true,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum SvgSheetThemes {
    #[default]
    Blueprint,
    Gray,
}

impl SvgSheetThemes {
    pub fn get_theme(&self) -> SvgSheetTheme {
        match self {
            SvgSheetThemes::Blueprint => BLUEPRINT_THEME,
            SvgSheetThemes::Gray => GRAY_THEME,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgSheetTheme {
    pub stroke_width_multiplier: f32,
    pub sheet_fill: &'static str,
    pub part_fill: &'static str,
    pub grid_stroke: &'static str,
    pub label_color: &'static str,
}

pub static BLUEPRINT_THEME: SvgSheetTheme = SvgSheetTheme {
    stroke_width_multiplier: 2.0,
    sheet_fill: "#F5F2E9",
    part_fill: "#A8C0D6",
    grid_stroke: "#3E5C76",
    label_color: "#1D2D44",
};

pub static GRAY_THEME: SvgSheetTheme = SvgSheetTheme {
    stroke_width_multiplier: 2.5,
    sheet_fill: "#FFFFFF",
    part_fill: "#C3C3C3",
    grid_stroke: "#636363",
    label_color: "#2D2D2D",
};

pub fn change_brightness(color: &str, fraction: f32) -> String {
    let color = color.strip_prefix('#').unwrap_or(color);
    let mut r = u8::from_str_radix(&color[0..2], 16).unwrap_or(0);
    let mut g = u8::from_str_radix(&color[2..4], 16).unwrap_or(0);
    let mut b = u8::from_str_radix(&color[4..6], 16).unwrap_or(0);
    r = (r as f32 * fraction) as u8;
    g = (g as f32 * fraction) as u8;
    b = (b as f32 * fraction) as u8;
    format!("#{r:02X}{g:02X}{b:02X}")
}
