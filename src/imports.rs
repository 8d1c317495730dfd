//! Cross-component reference scanning.
//!
//! Import paths are matched textually against configured internal prefixes.
//! The matching is approximate, so it sits behind [`ReferenceScanner`] and can
//! be swapped for a module-graph based implementation.

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ImportPrefix;

lazy_static! {
    static ref IMPORT_RE: Regex =
        Regex::new(r#"(?:^|[;\s])(?:import|export)\b[^'";]*?\bfrom\s*['"]([^'"]+)['"]"#).unwrap();
}

pub trait ReferenceScanner: Send + Sync {
    /// Directories of components statically referenced by `source_text`,
    /// which lives in `from_dir`. The importing component itself is never returned.
    fn referenced_components(&self, source_text: &str, from_dir: &Path) -> Vec<PathBuf>;
}

/// Resolves `import ... from '<prefix>...'` against the prefix's root, or
/// against the importing directory for relative prefixes.
pub struct ImportPrefixScanner {
    prefixes: Vec<ImportPrefix>,
}

impl ImportPrefixScanner {
    pub fn new(prefixes: Vec<ImportPrefix>) -> Self {
        Self { prefixes }
    }

    fn resolve(&self, specifier: &str, from_dir: &Path) -> Option<PathBuf> {
        let prefix = self
            .prefixes
            .iter()
            .find(|p| specifier.starts_with(p.prefix.as_str()))?;

        let target = match &prefix.root {
            Some(root) => root.join(&specifier[prefix.prefix.len()..]),
            None => from_dir.join(specifier),
        };

        // `../button` names the directory; `../button/index` a file inside it
        if target.is_dir() {
            return Some(target);
        }
        let parent = target.parent()?;
        let stem = target.file_name()?.to_str()?;
        let names_file = fs::read_dir(parent)
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .any(|p| p.is_file() && p.file_stem().and_then(|s| s.to_str()) == Some(stem));
        names_file.then(|| parent.to_path_buf())
    }
}

impl ReferenceScanner for ImportPrefixScanner {
    fn referenced_components(&self, source_text: &str, from_dir: &Path) -> Vec<PathBuf> {
        let own = canonical(from_dir);
        let mut found: Vec<PathBuf> = Vec::new();

        for caps in IMPORT_RE.captures_iter(source_text) {
            let Some(dir) = self.resolve(&caps[1], from_dir) else {
                continue;
            };
            let dir = canonical(&dir);
            if dir != own && !found.contains(&dir) {
                found.push(dir);
            }
        }

        found
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
