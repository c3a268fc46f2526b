#[cfg(test)]
mod tests {
    use plansheet::entities::{CellPos, Project, Template};
    use plansheet::history::VersionLog;
    use plansheet::io;
    use plansheet::io::export::export_project;
    use plansheet::io::ext_repr::{ExtPage, ExtPart};
    use plansheet::io::import::Importer;
    use plansheet::io::svg::{SvgDrawOptions, sheet_to_svg};
    use plansheet::layout::{FootprintRules, LayoutManager};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn importer() -> Importer {
        Importer::new(FootprintRules::default(), 3, 3)
    }

    fn ext_part(id: &str, category: &str) -> ExtPart {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": category,
            "name": id,
        }))
        .unwrap()
    }

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("plansheet_tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn page_json_flows_through_layout_to_svg() {
        let ext_page = ExtPage {
            parts: vec![
                ext_part("front", "front_view"),
                ext_part("side", "side_view"),
                ext_part("top", "top_view"),
            ],
            layout: HashMap::new(),
        };
        let page = importer().import_page(&ext_page).unwrap();

        let mut manager = LayoutManager::new(FootprintRules::default(), 3, 3);
        assert!(manager.auto_layout(page.parts));
        assert_eq!(manager.grid.anchor_map()["front"], CellPos::new(0, 0));

        let document = sheet_to_svg(&manager.grid, SvgDrawOptions::default(), 100.0, "flow");
        let rendered = document.to_string();
        for id in ["front", "side", "top"] {
            assert!(rendered.contains(&format!("part_{id}")));
        }
    }

    #[test]
    fn project_survives_a_file_round_trip() {
        let mut project = Project::new("gearbox");
        let page = importer()
            .import_page(&ExtPage {
                parts: vec![ext_part("front", "front_view"), ext_part("d", "detail")],
                layout: HashMap::new(),
            })
            .unwrap();
        project.pages[0] = page;

        let path = scratch_path("gearbox.plansheet");
        io::write_project(&project, &path).unwrap();
        let loaded = io::read_project(&path, &importer()).unwrap();

        assert_eq!(project, loaded);
    }

    #[test]
    fn templates_survive_a_file_round_trip() {
        let template = Template::builtin().remove(0);
        let path = scratch_path("standard.template");
        io::write_template(&template, &path).unwrap();
        assert_eq!(io::read_template(&path).unwrap(), template);
    }

    #[test]
    fn version_log_survives_a_file_round_trip() {
        let mut log = VersionLog::new();
        log.commit(export_project(&Project::new("v1")), "first")
            .unwrap();
        log.commit(export_project(&Project::new("v2")), "second")
            .unwrap();

        let path = scratch_path("versions.json");
        log.save(&path).unwrap();
        let loaded = VersionLog::load(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert!(loaded.verify());
        assert_eq!(loaded.current().unwrap().message, "second");
    }

    #[test]
    fn autosave_lands_next_to_the_project_name() {
        let project = Project::new("bracket");
        let dir = scratch_path("autosave");
        let path = io::write_autosave(&project, &dir).unwrap();
        assert!(path.ends_with("bracket_autosave.plansheet"));
        assert!(path.exists());
    }
}
