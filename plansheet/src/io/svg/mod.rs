mod sheet_to_svg;

/// Themes and draw options for sheet SVGs
pub mod svg_util;

#[doc(inline)]
pub use sheet_to_svg::sheet_to_svg;

#[doc(inline)]
pub use sheet_to_svg::ExportManager;

#[doc(inline)]
pub use sheet_to_svg::Exporter;

#[doc(inline)]
pub use sheet_to_svg::SvgExporter;

#[doc(inline)]
pub use svg_util::SvgDrawOptions;
