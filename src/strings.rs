//! Localized string table.
//!
//! Translations are split across any number of JSON modules in one
//! directory. Each module carries an object per locale:
//!
//! ```json
//! {
//!   "en": { "nav": { "docs": "Docs", "blog": "Blog" } },
//!   "fr": { "nav": { "docs": "Documentation" } }
//! }
//! ```
//!
//! Modules are merged in file-name order. The merge is deep: a later module
//! that sets `nav.docs` replaces only that key, so `nav.blog` from an earlier
//! module survives.
//!
//! Lookups use dotted keys (`nav.docs`). A key that cannot be resolved comes
//! back verbatim so it shows up in the rendered page instead of failing the
//! build.

use crate::locale::Locale;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StringsError {
    #[error("Locales directory not found: {0}")]
    DirMissing(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid translation module {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Merged translations for every locale.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    tables: BTreeMap<Locale, Value>,
}

impl StringTable {
    /// Load and merge every `*.json` module in `dir`.
    ///
    /// Fails if the directory does not exist or any module is not valid JSON.
    /// An incomplete table would silently produce wrong labels, so both are
    /// fatal.
    pub fn load(dir: &Path) -> Result<Self, StringsError> {
        if !dir.is_dir() {
            return Err(StringsError::DirMissing(dir.to_path_buf()));
        }

        let io_err = |source| StringsError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let entries = fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?;
        let mut modules: Vec<PathBuf> = entries
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
            .collect();
        modules.sort();

        let mut table = Self::default();
        for path in &modules {
            let content = fs::read_to_string(path).map_err(|source| StringsError::Io {
                path: path.clone(),
                source,
            })?;
            let module: Value =
                serde_json::from_str(&content).map_err(|source| StringsError::Parse {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!(module = %path.display(), "Merging translation module");
            table.merge_module(&module);
        }
        Ok(table)
    }

    /// Merge one parsed module on top of the table.
    ///
    /// Only the top-level locale objects are read; anything else in the
    /// module is ignored.
    pub fn merge_module(&mut self, module: &Value) {
        for locale in Locale::ALL {
            if let Some(overlay) = module.get(locale.code()) {
                let base = self
                    .tables
                    .entry(locale)
                    .or_insert_with(|| Value::Object(Map::new()));
                merge_json(base, overlay);
            }
        }
    }

    /// Resolve a dotted key for a locale, falling back to the key itself.
    pub fn resolve(&self, locale: Locale, dotted_key: &str) -> String {
        self.lookup(locale, dotted_key)
            .unwrap_or_else(|| dotted_key.to_string())
    }

    /// Resolve a dotted key, returning `None` when any segment is missing or
    /// the key names an object rather than a leaf.
    pub fn lookup(&self, locale: Locale, dotted_key: &str) -> Option<String> {
        let mut node = self.tables.get(&locale)?;
        for segment in dotted_key.split('.') {
            node = node.get(segment)?;
        }
        match node {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) | Value::Array(_) | Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key by key; any other overlay value replaces the base value.
fn merge_json(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_val) => merge_json(base_val, overlay_val),
                    None => {
                        base_map.insert(key.clone(), overlay_val.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn table_from(modules: &[Value]) -> StringTable {
        let mut table = StringTable::default();
        for m in modules {
            table.merge_module(m);
        }
        table
    }

    #[test]
    fn resolves_nested_key() {
        let table = table_from(&[json!({ "en": { "nav": { "docs": "Docs" } } })]);
        assert_eq!(table.resolve(Locale::En, "nav.docs"), "Docs");
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let table = table_from(&[json!({ "en": { "nav": { "docs": "Docs" } } })]);
        assert_eq!(table.resolve(Locale::En, "nav.pricing"), "nav.pricing");
        assert_eq!(table.resolve(Locale::En, "footer.copy"), "footer.copy");
        assert_eq!(table.resolve(Locale::Fr, "nav.docs"), "nav.docs");
    }

    #[test]
    fn object_key_is_not_a_leaf() {
        let table = table_from(&[json!({ "en": { "nav": { "docs": "Docs" } } })]);
        assert_eq!(table.resolve(Locale::En, "nav"), "nav");
    }

    #[test]
    fn later_module_overrides_per_key_not_per_module() {
        let table = table_from(&[
            json!({ "en": { "nav": { "docs": "Docs", "blog": "Blog" } } }),
            json!({ "en": { "nav": { "docs": "Documentation" } } }),
        ]);
        assert_eq!(table.resolve(Locale::En, "nav.docs"), "Documentation");
        assert_eq!(table.resolve(Locale::En, "nav.blog"), "Blog");
    }

    #[test]
    fn locales_are_independent() {
        let table = table_from(&[json!({
            "en": { "hero": { "title": "Secure agents" } },
            "fr": { "hero": { "title": "Agents sécurisés" } }
        })]);
        assert_eq!(table.resolve(Locale::En, "hero.title"), "Secure agents");
        assert_eq!(table.resolve(Locale::Fr, "hero.title"), "Agents sécurisés");
    }

    #[test]
    fn scalar_leaves_render_as_text() {
        let table = table_from(&[json!({ "en": { "stats": { "count": 42 } } })]);
        assert_eq!(table.resolve(Locale::En, "stats.count"), "42");
    }

    #[test]
    fn load_merges_modules_in_file_name_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a-common.json"),
            r#"{ "en": { "nav": { "docs": "Docs", "blog": "Blog" } } }"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("b-override.json"),
            r#"{ "en": { "nav": { "docs": "Guides" } }, "fr": { "nav": { "docs": "Guides FR" } } }"#,
        )
        .unwrap();
        fs::write(tmp.path().join("notes.txt"), "not a module").unwrap();

        let table = StringTable::load(tmp.path()).unwrap();
        assert_eq!(table.resolve(Locale::En, "nav.docs"), "Guides");
        assert_eq!(table.resolve(Locale::En, "nav.blog"), "Blog");
        assert_eq!(table.resolve(Locale::Fr, "nav.docs"), "Guides FR");
    }

    #[test]
    fn load_fails_without_directory() {
        let tmp = TempDir::new().unwrap();
        let result = StringTable::load(&tmp.path().join("missing"));
        assert!(matches!(result, Err(StringsError::DirMissing(_))));
    }

    #[cfg(unix)]
    #[test]
    fn load_fails_on_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("modules");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("common.json"), r#"{ "en": {} }"#).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user.
        let readable = fs::read_dir(&dir).is_ok();
        let result = StringTable::load(&dir);
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        if !readable {
            assert!(matches!(result, Err(StringsError::Io { .. })));
        }
    }

    #[test]
    fn load_fails_on_invalid_module() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{ \"en\": ").unwrap();
        let result = StringTable::load(tmp.path());
        assert!(matches!(result, Err(StringsError::Parse { .. })));
    }
}
