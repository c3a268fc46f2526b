use crate::entities::{
    CellPos, Footprint, Page, Part, Project, ProjectMeta, Rotation, SCALE_MAX, SCALE_MIN,
};
use crate::io::ext_repr::{ExtPage, ExtPart, ExtProject};
use crate::layout::FootprintRules;
use crate::util;
use anyhow::{Context, Result, ensure};
use jiff::Timestamp;
use log::warn;

/// Converts external representations into internal entities, validating and
/// normalizing fields along the way.
#[derive(Clone, Debug)]
pub struct Importer {
    pub rules: FootprintRules,
    pub rows: usize,
    pub cols: usize,
}

impl Importer {
    pub fn new(rules: FootprintRules, rows: usize, cols: usize) -> Self {
        Importer { rules, rows, cols }
    }

    pub fn import_part(&self, ext: &ExtPart) -> Result<Part> {
        let rotation = Rotation::from_degrees(ext.rotation)
            .with_context(|| format!("part {:?} has an invalid rotation", ext.name))?;

        ensure!(
            ext.scale.is_finite() && ext.scale > 0.0,
            "part {:?} has an invalid scale: {}",
            ext.name,
            ext.scale
        );
        let scale = ext.scale.clamp(SCALE_MIN, SCALE_MAX);
        if scale != ext.scale {
            warn!("clamped scale of part {:?} from {} to {scale}", ext.name, ext.scale);
        }

        let footprint = match ext.size {
            Some((width, height)) => {
                ensure!(
                    width > 0 && height > 0,
                    "part {:?} has a degenerate size: ({width}, {height})",
                    ext.name
                );
                Footprint::new(width, height)
            }
            None => self
                .rules
                .effective_footprint(ext.category, rotation, scale),
        };

        if let Some((row, col)) = ext.position {
            ensure!(
                row < self.rows && col < self.cols,
                "part {:?} anchor ({row}, {col}) lies outside the {}x{} sheet",
                ext.name,
                self.rows,
                self.cols
            );
        }

        let id = if ext.id.is_empty() {
            util::pseudo_uid(&ext.name)
        } else {
            ext.id.clone()
        };

        let mut part = Part::new(id, ext.name.clone(), ext.category, footprint);
        part.rotation = rotation;
        part.scale = scale;
        part.position = ext.position.map(|(row, col)| CellPos::new(row, col));
        part.image_ref = ext.image_path.clone();
        Ok(part)
    }

    pub fn import_page(&self, ext: &ExtPage) -> Result<Page> {
        let parts = ext
            .parts
            .iter()
            .map(|p| self.import_part(p))
            .collect::<Result<Vec<_>>>()?;
        let layout = ext
            .layout
            .iter()
            .map(|(id, &(row, col))| (id.clone(), CellPos::new(row, col)))
            .collect();
        Ok(Page { parts, layout })
    }

    pub fn import_project(&self, ext: &ExtProject) -> Result<Project> {
        let created_at: Timestamp = ext
            .metadata
            .created_at
            .parse()
            .context("invalid created_at timestamp")?;
        let modified_at: Timestamp = ext
            .metadata
            .modified_at
            .parse()
            .context("invalid modified_at timestamp")?;
        let pages = ext
            .pages
            .iter()
            .map(|p| self.import_page(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Project {
            id: ext.id.clone(),
            name: ext.name.clone(),
            meta: ProjectMeta {
                created_at,
                modified_at,
                author: ext.metadata.author.clone(),
                version: ext.metadata.version.clone(),
            },
            pages,
            current_page: ext.current_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PartCategory;

    fn importer() -> Importer {
        Importer::new(FootprintRules::default(), 3, 3)
    }

    fn ext_part() -> ExtPart {
        ExtPart {
            id: String::new(),
            category: PartCategory::FrontView,
            name: "front".to_string(),
            size: None,
            position: None,
            rotation: 0,
            scale: 1.0,
            image_path: None,
        }
    }

    #[test]
    fn missing_id_is_generated() {
        let part = importer().import_part(&ext_part()).unwrap();
        assert!(!part.id.is_empty());
    }

    #[test]
    fn missing_size_falls_back_to_category_rules() {
        let part = importer().import_part(&ext_part()).unwrap();
        assert_eq!(part.footprint, Footprint::new(2, 2));
    }

    #[test]
    fn off_axis_rotation_is_rejected() {
        let ext = ExtPart {
            rotation: 45,
            ..ext_part()
        };
        assert!(importer().import_part(&ext).is_err());
    }

    #[test]
    fn out_of_range_scale_is_clamped() {
        let ext = ExtPart {
            scale: 7.5,
            ..ext_part()
        };
        let part = importer().import_part(&ext).unwrap();
        assert_eq!(part.scale, SCALE_MAX);
    }

    #[test]
    fn out_of_bounds_anchor_is_rejected() {
        let ext = ExtPart {
            position: Some((3, 0)),
            ..ext_part()
        };
        assert!(importer().import_part(&ext).is_err());
    }
}
