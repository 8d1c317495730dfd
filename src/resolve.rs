//! Inheritance Resolver
//!
//! Maps a declared ancestor name to its declaration artifact by name alone
//! (there is no type system here), parses it, tags its members as inherited
//! and follows that declaration's own ancestor. The hierarchy root is served
//! from a write-once cache.

use tracing::{debug, warn};

use crate::cache::RootPropsCache;
use crate::config::{AnalyzerConfig, DocgenConfig, LocatorConfig, ResolverConfig};
use crate::discovery::{candidate_stems, AncestorIndex};
use crate::error::{DocgenError, DocgenResult};
use crate::locate::{read_props_artifact, read_props_candidates};
use crate::model::PropDescriptor;
use crate::parse::{analyze_source, PropsDeclaration};

pub struct InheritanceResolver {
    resolver: ResolverConfig,
    locator: LocatorConfig,
    analyzer: AnalyzerConfig,
    index: AncestorIndex,
    root_cache: RootPropsCache,
}

impl InheritanceResolver {
    pub fn new(config: &DocgenConfig) -> Self {
        let index = AncestorIndex::build(&config.resolver.source_roots, &config.locator);
        Self {
            resolver: config.resolver.clone(),
            locator: config.locator.clone(),
            analyzer: config.analyzer.clone(),
            index,
            root_cache: RootPropsCache::new(),
        }
    }

    pub fn index(&self) -> &AncestorIndex {
        &self.index
    }

    /// Inherited properties of `ancestor` and everything above it, each tagged
    /// with the ancestor that declares it.
    pub fn resolve_ancestor_chain(&self, ancestor: &str) -> DocgenResult<Vec<PropDescriptor>> {
        self.resolve_with_chain(ancestor, &mut Vec::new())
    }

    /// Same as [`resolve_ancestor_chain`](Self::resolve_ancestor_chain), with
    /// `origin` (the declaring type) counted as part of the chain so that a
    /// hierarchy leading back to it is reported as a cycle.
    pub fn resolve_from(&self, origin: &str, ancestor: &str) -> DocgenResult<Vec<PropDescriptor>> {
        self.resolve_with_chain(ancestor, &mut vec![origin.to_string()])
    }

    fn resolve_with_chain(
        &self,
        ancestor: &str,
        chain: &mut Vec<String>,
    ) -> DocgenResult<Vec<PropDescriptor>> {
        if chain.iter().any(|seen| seen == ancestor) {
            let mut cycle = chain.clone();
            cycle.push(ancestor.to_string());
            return Err(DocgenError::CycleDetected { chain: cycle });
        }

        if ancestor == self.resolver.root_type_name {
            return Ok(self.root_props().to_vec());
        }

        let Some(declaration) = self.load_declaration(ancestor) else {
            return Ok(Vec::new());
        };

        let mut props: Vec<PropDescriptor> = declaration
            .props
            .into_iter()
            .map(|p| p.inherit_from(ancestor))
            .collect();

        if let Some(next) = declaration.ancestor {
            chain.push(ancestor.to_string());
            props.extend(self.resolve_with_chain(&next, chain)?);
            chain.pop();
        }

        Ok(props)
    }

    fn load_declaration(&self, ancestor: &str) -> Option<PropsDeclaration> {
        let candidates = candidate_stems(ancestor, &self.resolver);
        let Some(paths) = self.index.find(&candidates) else {
            warn!(ancestor, ?candidates, "unresolved inheritance: no declaration artifact found");
            return None;
        };

        let source = match read_props_candidates(paths, &self.locator) {
            Ok(Some(source)) => source,
            Ok(None) => {
                warn!(ancestor, ?paths, "ancestor artifact has no properties source");
                return None;
            }
            Err(e) => {
                warn!(ancestor, ?paths, error = %e, "ancestor artifact unreadable");
                return None;
            }
        };

        let declaration = analyze_source(&source, &self.analyzer).props;
        if declaration.is_none() {
            debug!(ancestor, ?paths, "no Props declaration in ancestor artifact");
        }
        declaration
    }

    fn root_props(&self) -> &[PropDescriptor] {
        self.root_cache.get_or_load(|| self.load_root_props())
    }

    fn load_root_props(&self) -> Vec<PropDescriptor> {
        let root_name = self.resolver.root_type_name.as_str();

        let source = match &self.resolver.root_props_path {
            Some(path) => match read_props_artifact(path, &self.locator) {
                Ok(source) => source,
                Err(e) => {
                    warn!(root = root_name, error = %e, "root declaration unreadable");
                    None
                }
            },
            None => {
                let candidates = candidate_stems(root_name, &self.resolver);
                self.index
                    .find(&candidates)
                    .and_then(|paths| read_props_candidates(paths, &self.locator).ok().flatten())
            }
        };

        let Some(declaration) = source.and_then(|s| analyze_source(&s, &self.analyzer).props)
        else {
            warn!(root = root_name, "root declaration not found");
            return Vec::new();
        };

        if declaration.name != root_name {
            warn!(
                root = root_name,
                found = %declaration.name,
                "root declaration name does not match, ignoring root properties"
            );
            return Vec::new();
        }

        debug!(root = root_name, props = declaration.props.len(), "cached root properties");
        declaration
            .props
            .into_iter()
            .map(|p| p.inherit_from(root_name))
            .collect()
    }
}
