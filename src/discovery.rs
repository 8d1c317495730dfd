//! Discovery Module
//!
//! Two directory scans live here: the one-time ancestor name index over the
//! configured source roots, and the component listing used by batch runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{LocatorConfig, ResolverConfig};
use crate::error::{DocgenError, DocgenResult};
use crate::locate::{artifact_role, is_component_dir, prefer_source_maps, ArtifactRole};

const DEFAULT_CATEGORY: &str = "general";

// ═══════════════════════════════════════════════════════════════════════════════
// CANDIDATE STEMS
// ═══════════════════════════════════════════════════════════════════════════════

/// File stems that may hold the declaration of `ancestor`.
///
/// `UiIconButtonProps` with short prefix `Ui` gives
/// `uiiconbutton`, `ui-icon-button`, `iconbutton`, `icon-button`.
pub fn candidate_stems(ancestor: &str, config: &ResolverConfig) -> Vec<String> {
    let base = strip_suffixes(ancestor, &config.strip_suffixes);

    let mut bases = vec![base];
    for prefix in &config.short_prefixes {
        if let Some(rest) = base.strip_prefix(prefix.as_str()) {
            if !rest.is_empty() {
                bases.push(rest);
            }
        }
    }

    let mut stems: Vec<String> = Vec::new();
    for base in bases {
        for stem in [base.to_lowercase(), camel_to_kebab(base)] {
            if !stem.is_empty() && !stems.contains(&stem) {
                stems.push(stem);
            }
        }
    }
    stems
}

fn strip_suffixes<'a>(name: &'a str, suffixes: &[String]) -> &'a str {
    let mut base = name;
    for suffix in suffixes {
        if let Some(rest) = base.strip_suffix(suffix.as_str()) {
            if !rest.is_empty() {
                base = rest;
            }
        }
    }
    base
}

/// `IconButton` → `icon-button`, `HTMLInput` → `html-input`.
pub fn camel_to_kebab(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANCESTOR INDEX
// ═══════════════════════════════════════════════════════════════════════════════

/// Stem → properties artifact candidates, built by a single scan of the
/// source roots.
///
/// Direct-source component directories are indexed by directory name;
/// compiled `<stem>.props.*` artifacts by their stem. The first root (and,
/// within a root, the first path in file-name order) to claim a stem keeps it.
/// Sibling artifacts of the claiming one (`button.props.js` next to
/// `button.props.js.map`) are kept as alternates, source maps first.
#[derive(Debug, Clone, Default)]
pub struct AncestorIndex {
    entries: HashMap<String, Vec<PathBuf>>,
}

impl AncestorIndex {
    pub fn build(roots: &[PathBuf], config: &LocatorConfig) -> Self {
        let mut entries = HashMap::new();

        for root in roots {
            if !root.is_dir() {
                warn!(root = %root.display(), "source root is not a directory, skipping");
                continue;
            }

            for entry in WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if entry.file_type().is_dir() {
                    if !has_declaration_entry(path, config) {
                        continue;
                    }
                    if let Some(stem) = path.file_name().and_then(|n| n.to_str()) {
                        entries
                            .entry(stem.to_string())
                            .or_insert_with(|| vec![path.to_path_buf()]);
                    }
                    continue;
                }

                let Some((stem, ArtifactRole::Props)) = artifact_role(path) else {
                    continue;
                };
                match entries.get_mut(&stem) {
                    None => {
                        entries.insert(stem, vec![path.to_path_buf()]);
                    }
                    Some(paths) if paths.iter().all(|p| p.is_file() && p.parent() == path.parent()) => {
                        paths.push(path.to_path_buf());
                        prefer_source_maps(paths);
                    }
                    Some(_) => {}
                }
            }
        }

        debug!(stems = entries.len(), "built ancestor index");
        Self { entries }
    }

    /// Artifact paths of the first candidate stem present in the index,
    /// preferred path first.
    pub fn find(&self, candidates: &[String]) -> Option<&[PathBuf]> {
        candidates
            .iter()
            .find_map(|c| self.entries.get(c))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn has_declaration_entry(dir: &Path, config: &LocatorConfig) -> bool {
    config
        .entry_files
        .iter()
        .chain(&config.declaration_files)
        .any(|f| dir.join(f).is_file())
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT DISCOVERY
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredComponent {
    pub path: PathBuf,
    pub category: String,
}

/// Every component directory below `root`, in file-name order.
///
/// The category is the first path segment under `root`. Component directories
/// are not descended into; nested components are reached through the child
/// mapping instead.
pub fn discover_components(
    root: &Path,
    config: &LocatorConfig,
) -> DocgenResult<Vec<DiscoveredComponent>> {
    fs::read_dir(root).map_err(|source| DocgenError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut components = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_dir() || !is_component_dir(entry.path(), config) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let category = if entry.depth() > 1 {
            relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str())
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string()
        } else {
            DEFAULT_CATEGORY.to_string()
        };

        components.push(DiscoveredComponent {
            path: entry.path().to_path_buf(),
            category,
        });
        walker.skip_current_dir();
    }

    Ok(components)
}
