//! Component documentation pipeline.
//!
//! `DocGenerator` ties the stages together for one run: locate the sources,
//! analyze them, resolve the ancestor chain, reconcile events, filter, then
//! recurse into configured child components. A generator owns the ancestor
//! index and the root property cache, so both are built at most once per
//! generator; [`shared_generator`] keeps one generator per configuration for
//! the life of the process.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::DocgenConfig;
use crate::discovery::discover_components;
use crate::error::{DocgenError, DocgenResult};
use crate::events::{declared_events, reconcile_events, EventScanner};
use crate::filter::apply_filters;
use crate::imports::{ImportPrefixScanner, ReferenceScanner};
use crate::locate::locate;
use crate::model::{pascal_case, ComponentDoc, EventDescriptor, PropDescriptor};
use crate::parse::{analyze_source, SourceAnalysis};
use crate::resolve::InheritanceResolver;

// ═══════════════════════════════════════════════════════════════════════════════
// BATCH REPORT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub docs: Vec<ComponentDoc>,
    pub succeeded: usize,
    pub failed: usize,
    /// Filtered out by category exclusion or the allow-list.
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref SHARED_GENERATORS: Mutex<HashMap<String, Arc<DocGenerator>>> =
        Mutex::new(HashMap::new());
}

/// Generator for `config_json` (`None` for the default configuration),
/// created on first use and reused by every later call with the same text.
pub fn shared_generator(config_json: Option<&str>) -> DocgenResult<Arc<DocGenerator>> {
    let key = config_json.unwrap_or_default();
    let mut shared = SHARED_GENERATORS
        .lock()
        .map_err(|_| DocgenError::Config("shared generator registry is poisoned".to_string()))?;

    if let Some(generator) = shared.get(key) {
        return Ok(Arc::clone(generator));
    }

    let config = match config_json {
        Some(json) => DocgenConfig::from_json_str(json)?,
        None => DocgenConfig::default(),
    };
    let generator = Arc::new(DocGenerator::new(config)?);
    shared.insert(key.to_string(), Arc::clone(&generator));
    debug!(configs = shared.len(), "registered shared doc generator");
    Ok(generator)
}

pub struct DocGenerator {
    config: DocgenConfig,
    resolver: InheritanceResolver,
    events: EventScanner,
    references: Box<dyn ReferenceScanner>,
}

impl DocGenerator {
    pub fn new(config: DocgenConfig) -> DocgenResult<Self> {
        let resolver = InheritanceResolver::new(&config);
        let events = EventScanner::new(&config.analyzer)?;
        let references = Box::new(ImportPrefixScanner::new(
            config.resolver.import_prefixes.clone(),
        ));
        debug!(indexed = resolver.index().len(), "doc generator ready");

        Ok(Self {
            config,
            resolver,
            events,
            references,
        })
    }

    /// Replace the import-path heuristic with another reference scanner.
    pub fn with_reference_scanner(mut self, scanner: Box<dyn ReferenceScanner>) -> Self {
        self.references = scanner;
        self
    }

    pub fn config(&self) -> &DocgenConfig {
        &self.config
    }

    pub fn resolver(&self) -> &InheritanceResolver {
        &self.resolver
    }

    /// Document one component. Failures are logged and yield `None`.
    pub fn generate_one(&self, dir: &Path, category: &str) -> Option<ComponentDoc> {
        match self.try_generate(dir, category) {
            Ok(doc) => Some(doc),
            Err(e @ DocgenError::MissingSource(_)) => {
                warn!(component = %dir.display(), "{}", e);
                None
            }
            Err(e) => {
                error!(component = %dir.display(), error = %e, "component documentation failed");
                None
            }
        }
    }

    pub fn try_generate(&self, dir: &Path, category: &str) -> DocgenResult<ComponentDoc> {
        self.generate_nested(dir, category, &mut Vec::new())
    }

    /// Document every component under `root`, in file-name order.
    pub fn generate_all(&self, root: &Path) -> DocgenResult<BatchReport> {
        let components = discover_components(root, &self.config.locator)?;
        let mut report = BatchReport::default();

        for component in components {
            let name = component_name(&component.path);
            if !self.config.filters.allows_component(&name, &component.category) {
                debug!(component = %name, category = %component.category, "skipped by filters");
                report.skipped += 1;
                continue;
            }

            match self.try_generate(&component.path, &component.category) {
                Ok(doc) => {
                    report.succeeded += 1;
                    report.docs.push(doc);
                }
                Err(e) => {
                    error!(component = %component.path.display(), error = %e, "component documentation failed");
                    report.failed += 1;
                    report.failures.push(BatchFailure {
                        path: component.path.display().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            root = %root.display(),
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            "batch documentation finished"
        );
        Ok(report)
    }

    fn generate_nested(
        &self,
        dir: &Path,
        category: &str,
        chain: &mut Vec<PathBuf>,
    ) -> DocgenResult<ComponentDoc> {
        let doc = self.extract(dir, category)?;
        let mut doc = apply_filters(doc, &self.config.filters);

        let Some(mapping) = self.config.children.get(&doc.component_name) else {
            return Ok(doc);
        };

        chain.push(canonical(dir));
        let mut children = Vec::new();
        for (key, relative) in mapping {
            let child_dir = dir.join(relative);
            if !child_dir.exists() {
                warn!(parent = %doc.component_name, child = %key, path = %child_dir.display(), "child component path does not exist, skipping");
                continue;
            }
            if chain.contains(&canonical(&child_dir)) {
                warn!(parent = %doc.component_name, child = %key, "child component already on the nesting chain, skipping");
                continue;
            }

            match self.generate_nested(&child_dir, category, chain) {
                Ok(child) => children.push(child),
                Err(e) => {
                    warn!(parent = %doc.component_name, child = %key, error = %e, "child component documentation failed, skipping")
                }
            }
        }
        chain.pop();

        if !children.is_empty() {
            doc.children = Some(children);
        }
        Ok(doc)
    }

    fn extract(&self, dir: &Path, category: &str) -> DocgenResult<ComponentDoc> {
        let analyzer = &self.config.analyzer;
        let sources = locate(dir, &self.config.locator)?;
        let behavior_text = sources.behavior_source.as_deref();

        let behavior: SourceAnalysis = behavior_text
            .map(|text| analyze_source(text, analyzer))
            .unwrap_or_default();

        let declaration = match sources.props_source.as_deref() {
            Some(text) if Some(text) != behavior_text => analyze_source(text, analyzer).props,
            _ => None,
        }
        .or_else(|| behavior.props.clone());

        let styles = match sources.style_source.as_deref() {
            Some(text) => analyze_source(text, analyzer).styles,
            None => behavior.styles.clone(),
        };

        let mut props: Vec<PropDescriptor> = Vec::new();
        let mut base_class = None;
        if let Some(declaration) = declaration {
            props.extend(declaration.props);
            if let Some(ancestor) = declaration.ancestor {
                props.extend(self.resolver.resolve_from(&declaration.name, &ancestor)?);
                base_class = Some(ancestor);
            }
        }

        let events = match behavior_text {
            Some(text) => reconcile_events(
                declared_events(&props),
                self.events.emitted_events(text),
                self.referenced_events(text, dir),
            ),
            None => declared_events(&props),
        };

        let doc = ComponentDoc {
            component_name: component_name(dir),
            component_path: dir.display().to_string(),
            category: category.to_string(),
            props,
            methods: behavior.methods,
            events,
            styles,
            base_class,
            children: None,
            description: None,
        };
        debug!(
            component = %doc.component_name,
            props = doc.props.len(),
            methods = doc.methods.len(),
            events = doc.events.len(),
            styles = doc.styles.len(),
            "extracted component"
        );
        Ok(doc)
    }

    /// Emitted events of every component the behavior source imports.
    fn referenced_events(&self, source: &str, dir: &Path) -> Vec<Vec<EventDescriptor>> {
        self.references
            .referenced_components(source, dir)
            .into_iter()
            .filter_map(|referenced| match locate(&referenced, &self.config.locator) {
                Ok(sources) => sources
                    .behavior_source
                    .map(|text| self.events.emitted_events(&text)),
                Err(e) => {
                    debug!(referenced = %referenced.display(), error = %e, "referenced component not readable");
                    None
                }
            })
            .collect()
    }
}

fn component_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(pascal_case)
        .unwrap_or_default()
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
