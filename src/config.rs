//! Run configuration.
//!
//! Supplied by the host as a camelCase JSON document. Every field has a
//! default so an empty object `{}` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocgenError, DocgenResult};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocgenConfig {
    pub locator: LocatorConfig,
    pub analyzer: AnalyzerConfig,
    pub resolver: ResolverConfig,
    pub filters: FilterConfig,
    /// Parent component name → { child key → path relative to the parent's directory }.
    pub children: BTreeMap<String, BTreeMap<String, String>>,
}

impl DocgenConfig {
    pub fn from_json_str(json: &str) -> DocgenResult<Self> {
        serde_json::from_str(json).map_err(|e| DocgenError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> DocgenResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| DocgenError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOCATOR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocatorConfig {
    /// Entry files marking the direct-source form, in preference order.
    pub entry_files: Vec<String>,
    /// Dedicated type-declaration files overriding the entry as properties source.
    pub declaration_files: Vec<String>,
    pub style_files: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            entry_files: strings(&["index.tsx", "index.ts", "index.jsx", "index.js"]),
            declaration_files: strings(&["types.ts", "types.d.ts", "index.d.ts", "props.ts"]),
            style_files: strings(&["styles.ts", "style.ts", "styles.js", "style.js"]),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANALYZER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    pub props_suffixes: Vec<String>,
    /// Declarations with these suffixes never contribute methods.
    pub non_method_suffixes: Vec<String>,
    pub lifecycle_methods: Vec<String>,
    pub default_class_constants: Vec<String>,
    pub style_register_functions: Vec<String>,
    pub emit_functions: Vec<String>,
    /// Arguments dropped from emitted-event signatures.
    pub implicit_target_args: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            props_suffixes: strings(&["Props"]),
            non_method_suffixes: strings(&["Props", "Styles", "State"]),
            lifecycle_methods: strings(&[
                "render",
                "componentDidMount",
                "componentDidUpdate",
                "componentWillUnmount",
                "componentWillMount",
                "componentWillReceiveProps",
                "componentWillUpdate",
                "shouldComponentUpdate",
                "getSnapshotBeforeUpdate",
                "componentDidCatch",
                "connectedCallback",
                "disconnectedCallback",
                "attributeChangedCallback",
                "adoptedCallback",
                "firstUpdated",
                "updated",
                "willUpdate",
            ]),
            default_class_constants: strings(&[
                "DEFAULT_CLASS",
                "DEFAULT_CLASS_NAME",
                "defaultClass",
                "defaultClassName",
            ]),
            style_register_functions: strings(&["register", "registerStyle", "registerClass"]),
            emit_functions: strings(&["emit"]),
            implicit_target_args: strings(&["this", "self"]),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPrefix {
    pub prefix: String,
    /// Directory the remainder of the import path is joined onto. `None` means
    /// the prefix is relative and resolves against the importing component.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Searched in order; the first root that yields a matching stem wins.
    pub source_roots: Vec<PathBuf>,
    pub root_type_name: String,
    /// Fixed location of the hierarchy root's declaration artifact.
    pub root_props_path: Option<PathBuf>,
    pub strip_suffixes: Vec<String>,
    pub short_prefixes: Vec<String>,
    pub import_prefixes: Vec<ImportPrefix>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            source_roots: Vec::new(),
            root_type_name: "BaseComponentProps".to_string(),
            root_props_path: None,
            strip_suffixes: strings(&["Props", "Component"]),
            short_prefixes: Vec::new(),
            import_prefixes: vec![ImportPrefix {
                prefix: "../".to_string(),
                root: None,
            }],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILTERS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentOverride {
    pub exclude_props: Vec<String>,
    pub exclude_methods: Vec<String>,
    pub exclude_styles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    pub exclude_props: Vec<String>,
    pub exclude_inherited_props: Vec<String>,
    pub exclude_methods: Vec<String>,
    pub exclude_styles: Vec<String>,
    /// Keyed by component name.
    pub overrides: BTreeMap<String, ComponentOverride>,
    pub excluded_categories: Vec<String>,
    /// When non-empty, batch runs only document these component names.
    pub component_allow_list: Vec<String>,
}

impl FilterConfig {
    pub fn allows_component(&self, name: &str, category: &str) -> bool {
        if self.excluded_categories.iter().any(|c| c == category) {
            return false;
        }
        self.component_allow_list.is_empty() || self.component_allow_list.iter().any(|c| c == name)
    }
}
