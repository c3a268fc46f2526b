use serde::{Deserialize, Serialize};

/// Minimum DPI acceptable for print export.
pub const MIN_PRINT_DPI: u32 = 300;

/// ISO 216 A-series page formats supported by the sheet exporters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageFormat {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
}

impl PageFormat {
    pub const ALL: [PageFormat; 6] = [
        PageFormat::A0,
        PageFormat::A1,
        PageFormat::A2,
        PageFormat::A3,
        PageFormat::A4,
        PageFormat::A5,
    ];

    /// Minimum (width, height) in pixels for a full-page image at 300 DPI.
    pub fn min_pixels(self) -> (u32, u32) {
        match self {
            PageFormat::A0 => (9933, 14043),
            PageFormat::A1 => (7016, 9933),
            PageFormat::A2 => (4961, 7016),
            PageFormat::A3 => (3508, 4961),
            PageFormat::A4 => (2480, 3508),
            PageFormat::A5 => (1748, 2480),
        }
    }
}

/// Decoded image metadata, supplied by the embedding application's codec.
/// The library never opens image files itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: u32,
}

/// Outcome of checking an image against a page format.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionReport {
    pub valid: bool,
    pub current_px: (u32, u32),
    pub current_dpi: u32,
    pub required_px: (u32, u32),
    pub required_dpi: u32,
    pub format: PageFormat,
    pub issues: Vec<String>,
}

/// Suggested acquisition parameters for a page format.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionSuggestion {
    pub pixels: (u32, u32),
    pub dpi: u32,
    pub print_size_mm: (f32, f32),
}

/// Validates referenced images against the print requirements of a format.
#[derive(Clone, Copy, Debug)]
pub struct ResolutionChecker {
    pub min_dpi: u32,
}

impl ResolutionChecker {
    pub fn new() -> Self {
        ResolutionChecker {
            min_dpi: MIN_PRINT_DPI,
        }
    }

    pub fn check(&self, image: ImageInfo, format: PageFormat) -> ResolutionReport {
        let (min_w, min_h) = format.min_pixels();
        let mut issues = Vec::new();

        if image.width_px < min_w || image.height_px < min_h {
            issues.push(format!(
                "image too small: {}x{}px (minimum: {min_w}x{min_h}px)",
                image.width_px, image.height_px
            ));
        }
        if image.dpi < self.min_dpi {
            issues.push(format!(
                "dpi too low: {} (minimum: {})",
                image.dpi, self.min_dpi
            ));
        }

        ResolutionReport {
            valid: issues.is_empty(),
            current_px: (image.width_px, image.height_px),
            current_dpi: image.dpi,
            required_px: (min_w, min_h),
            required_dpi: self.min_dpi,
            format,
            issues,
        }
    }

    /// Physical print size in millimeters of a pixel extent at `dpi`.
    pub fn print_size_mm(pixels: (u32, u32), dpi: u32) -> (f32, f32) {
        (
            pixels.0 as f32 / dpi as f32 * 25.4,
            pixels.1 as f32 / dpi as f32 * 25.4,
        )
    }

    pub fn suggest(&self, format: PageFormat, target_dpi: u32) -> ResolutionSuggestion {
        let pixels = format.min_pixels();
        ResolutionSuggestion {
            pixels,
            dpi: target_dpi,
            print_size_mm: Self::print_size_mm(pixels, target_dpi),
        }
    }
}

impl Default for ResolutionChecker {
    fn default() -> Self {
        ResolutionChecker::new()
    }
}
