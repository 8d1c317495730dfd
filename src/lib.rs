//! # Component Docgen
//!
//! Extracts structured API documentation from UI component source code.
//!
//! ## Pipeline
//!
//! 1. **Locate**: a component directory yields a properties, behavior and
//!    style source, from either direct sources or compiled artifacts that
//!    embed their original text.
//! 2. **Analyze**: each source is parsed once with oxc; the walk recovers the
//!    Props declaration, public methods and style registrations.
//! 3. **Resolve**: the declared ancestor is looked up by name in an index of
//!    the source roots and followed up to the hierarchy root. Cycles are an
//!    error.
//! 4. **Reconcile**: declared `on*` events, emitted call-site events and
//!    events emitted by imported components are merged by name.
//! 5. **Filter**: configured exclusions are applied and child components are
//!    documented recursively.
//!
//! Extraction is static. Nothing is evaluated beyond string concatenation of
//! known constants in style class names.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod cache;
mod config;
mod discovery;
mod error;
mod events;
mod filter;
mod generator;
mod imports;
mod locate;
mod model;
mod parse;
mod resolve;
mod scan;
mod static_eval;
mod styles;

#[cfg(test)]
mod parse_tests;
#[cfg(test)]
mod resolve_tests;

pub use config::{
    AnalyzerConfig, ComponentOverride, DocgenConfig, FilterConfig, ImportPrefix, LocatorConfig,
    ResolverConfig,
};
pub use discovery::{candidate_stems, discover_components, AncestorIndex, DiscoveredComponent};
pub use error::{DocgenError, DocgenResult};
pub use events::{declared_events, reconcile_events, EventScanner};
pub use filter::apply_filters;
pub use generator::{shared_generator, BatchFailure, BatchReport, DocGenerator};
pub use imports::{ImportPrefixScanner, ReferenceScanner};
pub use locate::{locate, read_props_artifact, ComponentSources, SourceForm};
pub use model::{
    ComponentDoc, EventDescriptor, MethodDescriptor, ParamDescriptor, PropDescriptor,
    StyleDescriptor, Visibility,
};
pub use parse::{analyze_source, extract_methods, extract_props, PropsDeclaration, SourceAnalysis};
pub use resolve::InheritanceResolver;

/// Document one component. Resolves to the ComponentDoc JSON, or `null` when
/// extraction failed (the failure is logged). Calls with the same
/// configuration share one generator, so the ancestor index and the root
/// property cache are built once per process.
#[cfg(feature = "napi")]
#[napi]
pub fn generate_component_doc_native(
    component_path: String,
    category: String,
    config_json: Option<String>,
) -> napi::Result<Option<String>> {
    let generator = shared_generator(config_json.as_deref())
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    match generator.generate_one(std::path::Path::new(&component_path), &category) {
        Some(doc) => serde_json::to_string(&doc)
            .map(Some)
            .map_err(|e| napi::Error::from_reason(format!("Failed to serialize doc: {}", e))),
        None => Ok(None),
    }
}

/// Document every component under `root_dir` and return the batch report JSON.
#[cfg(feature = "napi")]
#[napi]
pub fn generate_all_docs_native(root_dir: String, config_json: Option<String>) -> napi::Result<String> {
    let generator = shared_generator(config_json.as_deref())
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    let report = generator
        .generate_all(std::path::Path::new(&root_dir))
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    serde_json::to_string(&report)
        .map_err(|e| napi::Error::from_reason(format!("Failed to serialize report: {}", e)))
}
