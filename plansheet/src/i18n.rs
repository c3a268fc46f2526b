use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Lookup table for user-facing strings, keyed by language then message key.
/// Ships with an English table; further languages are overlaid at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    language: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert("en".to_string(), builtin_english());
        Catalog {
            language: "en".to_string(),
            tables,
        }
    }

    /// Translation of `key` in the current language, falling back to the key
    /// itself so untranslated strings stay visible instead of vanishing.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.tables
            .get(&self.language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Like [`Self::text`] but with an explicit fallback.
    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.tables
            .get(&self.language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .unwrap_or(default)
    }

    /// Switches the active language; unknown languages are refused.
    pub fn set_language(&mut self, language: &str) -> bool {
        if self.tables.contains_key(language) {
            self.language = language.to_string();
            true
        } else {
            false
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn available_languages(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Adds or extends a language table.
    pub fn extend(&mut self, language: impl Into<String>, entries: HashMap<String, String>) {
        self.tables.entry(language.into()).or_default().extend(entries);
    }

    /// Overlays catalogs from a JSON file of the shape
    /// `{"<language>": {"<key>": "<text>", ...}, ...}`.
    pub fn load_overlay(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("could not open catalog file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let overlay: HashMap<String, HashMap<String, String>> = serde_json::from_reader(reader)
            .with_context(|| format!("could not parse catalog file: {}", path.display()))?;
        for (language, entries) in overlay {
            self.extend(language, entries);
        }
        Ok(())
    }

    /// Writes every table (built-in included) to a JSON overlay file.
    pub fn save_overlay(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("could not create catalog file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.tables).context("could not serialize catalog")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}

fn builtin_english() -> HashMap<String, String> {
    [
        // menu
        ("new_project", "New Project"),
        ("save", "Save"),
        ("save_as", "Save As"),
        ("export", "Export"),
        ("import", "Import"),
        ("close", "Close"),
        // editing
        ("undo", "Undo"),
        ("redo", "Redo"),
        ("cut", "Cut"),
        ("copy", "Copy"),
        ("paste", "Paste"),
        ("delete", "Delete"),
        // part categories
        ("front_view", "Front View"),
        ("side_view", "Side View"),
        ("top_view", "Top View"),
        ("perspective", "Perspective"),
        ("detail", "Detail"),
        ("dimensions", "Dimensions"),
        ("section", "Section"),
        ("assembly", "Assembly"),
        ("parts_list", "Parts List"),
        // error messages
        ("error_save", "Save error!"),
        ("error_load", "Load error!"),
        ("error_export", "Export error!"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PartCategory;

    #[test]
    fn every_category_key_is_translated() {
        let catalog = Catalog::new();
        for category in PartCategory::ALL {
            assert_ne!(catalog.text(category.key()), category.key());
        }
    }

    #[test]
    fn missing_keys_fall_back() {
        let catalog = Catalog::new();
        assert_eq!(catalog.text("no_such_key"), "no_such_key");
        assert_eq!(catalog.text_or("no_such_key", "fallback"), "fallback");
    }

    #[test]
    fn language_switching_requires_a_table() {
        let mut catalog = Catalog::new();
        assert!(!catalog.set_language("tr"));

        catalog.extend(
            "tr",
            [("save".to_string(), "Kaydet".to_string())].into(),
        );
        assert!(catalog.set_language("tr"));
        assert_eq!(catalog.text("save"), "Kaydet");
        // untranslated key falls back to the key itself
        assert_eq!(catalog.text("undo"), "undo");
    }
}
