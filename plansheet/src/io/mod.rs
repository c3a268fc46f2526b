use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::entities::{Project, Template};
use crate::io::ext_repr::ExtProject;
use crate::io::import::Importer;

/// Export of sheets/projects to external representations
pub mod export;

/// External (serde) representations of the core entities
pub mod ext_repr;

/// Import of external representations into core entities
pub mod import;

/// Rendering a sheet as an SVG document
pub mod svg;

/// Reads and imports a project file.
pub fn read_project(path: &Path, importer: &Importer) -> Result<Project> {
    let file = File::open(path)
        .with_context(|| format!("could not open project file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let ext: ExtProject = serde_json::from_reader(reader)
        .with_context(|| format!("could not parse project file: {}", path.display()))?;
    importer.import_project(&ext)
}

/// Exports and writes a project file.
pub fn write_project(project: &Project, path: &Path) -> Result<()> {
    let ext = export::export_project(project);
    let file = File::create(path)
        .with_context(|| format!("could not create project file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &ext).context("could not serialize project")?;
    info!("project written to {}", path.display());
    Ok(())
}

/// Writes a recovery copy of the project into `dir`, creating it if needed.
/// Returns the path of the copy.
pub fn write_autosave(project: &Project, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("could not create autosave folder: {}", dir.display()))?;
    let path = dir.join(format!("{}_autosave.plansheet", project.name));
    write_project(project, &path)?;
    Ok(path)
}

/// Reads a template file.
pub fn read_template(path: &Path) -> Result<Template> {
    let file = File::open(path)
        .with_context(|| format!("could not open template file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("could not parse template file: {}", path.display()))
}

/// Writes a template file.
pub fn write_template(template: &Template, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create template file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, template).context("could not serialize template")?;
    info!("template written to {}", path.display());
    Ok(())
}
