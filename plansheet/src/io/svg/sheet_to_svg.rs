use crate::entities::{PartCategory, Project, SheetGrid};
use crate::io::svg::svg_util::{self, SvgDrawOptions};
use anyhow::{Result, bail, ensure};
use std::collections::HashMap;
use std::path::Path;
use svg::Document;
use svg::node::element::{Group, Image, Line, Rectangle, Text, Title};

/// Composes a sheet grid as an SVG document. Grid cells are mapped to physical
/// page regions of `cell_size` (in user units, typically mm); parts backed by
/// an image reference are drawn with their rotation/scale transform applied,
/// the rest as labeled placeholder rectangles.
pub fn sheet_to_svg(grid: &SheetGrid, options: SvgDrawOptions, cell_size: f32, title: &str) -> Document {
    let theme = options.theme.get_theme();
    let sheet_w = grid.cols as f32 * cell_size;
    let sheet_h = grid.rows as f32 * cell_size;
    let stroke_width = f32::min(sheet_w, sheet_h) * 0.001 * theme.stroke_width_multiplier;
    let margin = 0.05 * f32::min(sheet_w, sheet_h);

    let label = Text::new(format!(
        "{} | {} parts | {}/{} cells",
        title,
        grid.placed.len(),
        grid.n_occupied_cells(),
        grid.n_cells(),
    ))
    .set("x", 0)
    .set("y", -0.5 * margin)
    .set("font-size", 0.4 * margin)
    .set("font-family", "monospace")
    .set("font-weight", "500");

    let sheet_group = Group::new()
        .set("id", "sheet")
        .add(Title::new(format!(
            "sheet, {} rows x {} cols, cell size {cell_size:.1}",
            grid.rows, grid.cols
        )))
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", sheet_w)
                .set("height", sheet_h)
                .set("fill", theme.sheet_fill)
                .set("stroke", theme.grid_stroke)
                .set("stroke-width", 2.0 * stroke_width),
        );

    let mut document = Document::new()
        .set(
            "viewBox",
            (
                -margin,
                -margin,
                sheet_w + 2.0 * margin,
                sheet_h + 2.0 * margin,
            ),
        )
        .add(label)
        .add(sheet_group);

    if options.grid_lines {
        let mut lines = Group::new().set("id", "grid_lines");
        for row in 1..grid.rows {
            let y = row as f32 * cell_size;
            lines = lines.add(grid_line(0.0, y, sheet_w, y, theme.grid_stroke, stroke_width));
        }
        for col in 1..grid.cols {
            let x = col as f32 * cell_size;
            lines = lines.add(grid_line(x, 0.0, x, sheet_h, theme.grid_stroke, stroke_width));
        }
        document = document.add(lines);
    }

    let mut parts_group = Group::new().set("id", "parts");
    for (_, part) in grid.placed.iter() {
        let anchor = part.position.expect("placed part always carries an anchor");
        let x = anchor.col as f32 * cell_size;
        let y = anchor.row as f32 * cell_size;
        let w = part.footprint.width as f32 * cell_size;
        let h = part.footprint.height as f32 * cell_size;

        let fill = category_fill(theme.part_fill, part.category);
        let mut group = Group::new()
            .set("id", format!("part_{}", part.id))
            .add(Title::new(format!(
                "{}, category: {}, anchor: ({}, {})",
                part.name,
                part.category.key(),
                anchor.row,
                anchor.col
            )))
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", w)
                    .set("height", h)
                    .set("fill", fill)
                    .set("fill-opacity", "0.85")
                    .set("stroke", theme.grid_stroke)
                    .set("stroke-width", 1.5 * stroke_width),
            );

        if let Some(image_ref) = &part.image_ref {
            // rotation/scale about the cell rectangle's center
            let transform = format!(
                "translate({} {}) rotate({}) scale({}) translate({} {})",
                x + w / 2.0,
                y + h / 2.0,
                part.rotation.degrees(),
                part.scale,
                -w / 2.0,
                -h / 2.0,
            );
            group = group.add(
                Image::new()
                    .set("href", image_ref.as_str())
                    .set("width", w)
                    .set("height", h)
                    .set("preserveAspectRatio", "xMidYMid meet")
                    .set("transform", transform),
            );
        }

        if options.labels {
            group = group.add(
                Text::new(part.name.clone())
                    .set("x", x + 0.15 * cell_size)
                    .set("y", y + 0.25 * cell_size)
                    .set("font-size", 0.15 * cell_size)
                    .set("font-family", "monospace")
                    .set("fill", theme.label_color),
            );
        }
        parts_group = parts_group.add(group);
    }

    document.add(parts_group)
}

fn grid_line(x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, stroke_width: f32) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", stroke)
        .set("stroke-width", stroke_width)
        .set("stroke-dasharray", format!("{} {}", 2.0 * stroke_width, 3.0 * stroke_width))
}

/// Varies the base part fill per category so neighboring categories are
/// distinguishable on the exported sheet.
fn category_fill(base: &str, category: PartCategory) -> String {
    let index = PartCategory::ALL
        .iter()
        .position(|c| *c == category)
        .expect("category is part of the closed set");
    svg_util::change_brightness(base, 0.7 + 0.05 * index as f32)
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .map_err(|e| anyhow::anyhow!("failed to write svg file {}: {e}", path.display()))?;
    log::info!("svg written to {}", path.display());
    Ok(())
}

/// A page composition backend. Implementations turn the current page of a
/// project into a file at `path`.
pub trait Exporter {
    fn export(&self, project: &Project, path: &Path) -> Result<()>;
}

/// Exports the current page as an SVG sheet.
pub struct SvgExporter {
    pub options: SvgDrawOptions,
    /// Physical size of one grid cell in user units
    pub cell_size: f32,
    pub rows: usize,
    pub cols: usize,
}

impl Default for SvgExporter {
    fn default() -> Self {
        SvgExporter {
            options: SvgDrawOptions::default(),
            cell_size: 100.0,
            rows: 3,
            cols: 3,
        }
    }
}

impl Exporter for SvgExporter {
    fn export(&self, project: &Project, path: &Path) -> Result<()> {
        let page = match project.current_page() {
            Some(page) => page,
            None => bail!("project {} has no pages", project.name),
        };
        let grid = page.to_grid(self.rows, self.cols);
        let document = sheet_to_svg(&grid, self.options, self.cell_size, &project.name);
        write_svg(&document, path)
    }
}

/// Dispatches exports to the backend registered for a format name.
/// Raster and page-description encoders are expected to be registered by the
/// embedding application; only `svg` ships with the library.
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    pub fn standard() -> Self {
        let mut exporters: HashMap<String, Box<dyn Exporter>> = HashMap::new();
        exporters.insert("svg".to_string(), Box::new(SvgExporter::default()));
        ExportManager { exporters }
    }

    pub fn register(&mut self, format: impl Into<String>, exporter: Box<dyn Exporter>) {
        self.exporters.insert(format.into(), exporter);
    }

    pub fn supported_formats(&self) -> Vec<&str> {
        self.exporters.keys().map(|k| k.as_str()).collect()
    }

    pub fn export(&self, project: &Project, format: &str, path: &Path) -> Result<()> {
        ensure!(
            self.exporters.contains_key(format),
            "unsupported export format: {format}"
        );
        self.exporters[format].export(project, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CellPos, Footprint, Part};

    #[test]
    fn svg_contains_placed_parts() {
        let mut grid = SheetGrid::new(3, 3);
        let mut part = Part::new(
            "front".to_string(),
            "front".to_string(),
            PartCategory::FrontView,
            Footprint::new(2, 2),
        );
        part.image_ref = Some("front.png".to_string());
        grid.place(part, CellPos::new(0, 0)).unwrap();

        let document = sheet_to_svg(&grid, SvgDrawOptions::default(), 100.0, "test");
        let rendered = document.to_string();
        assert!(rendered.contains("part_front"));
        assert!(rendered.contains("front.png"));
        assert!(rendered.contains("rotate(0)"));
    }

    #[test]
    fn unknown_export_format_is_rejected() {
        let manager = ExportManager::standard();
        let project = Project::new("x");
        assert!(
            manager
                .export(&project, "pdf", Path::new("/tmp/x.pdf"))
                .is_err()
        );
    }
}
