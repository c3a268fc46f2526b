use crate::entities::{Page, Part, Project};
use crate::io::ext_repr::{ExtPage, ExtPart, ExtProject, ExtProjectMeta};
use itertools::Itertools;

/// Exports a [`Part`] by composing its external representation.
pub fn export_part(part: &Part) -> ExtPart {
    ExtPart {
        id: part.id.clone(),
        category: part.category,
        name: part.name.clone(),
        size: Some((part.footprint.width, part.footprint.height)),
        position: part.position.map(|pos| (pos.row, pos.col)),
        rotation: part.rotation.degrees(),
        scale: part.scale,
        image_path: part.image_ref.clone(),
    }
}

/// Exports a [`Page`] by composing its external representation.
pub fn export_page(page: &Page) -> ExtPage {
    ExtPage {
        parts: page.parts.iter().map(export_part).collect_vec(),
        layout: page
            .layout
            .iter()
            .map(|(id, pos)| (id.clone(), (pos.row, pos.col)))
            .collect(),
    }
}

/// Exports a [`Project`] by composing its external representation.
pub fn export_project(project: &Project) -> ExtProject {
    ExtProject {
        id: project.id.clone(),
        name: project.name.clone(),
        metadata: ExtProjectMeta {
            created_at: project.meta.created_at.to_string(),
            modified_at: project.meta.modified_at.to_string(),
            author: project.meta.author.clone(),
            version: project.meta.version.clone(),
        },
        pages: project.pages.iter().map(export_page).collect_vec(),
        current_page: project.current_page,
    }
}
