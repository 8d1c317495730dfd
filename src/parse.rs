//! Syntax Analyzer
//!
//! Parses one source blob with oxc and walks the tree to recover the Props
//! declaration (members, defaults, declared ancestor), public method
//! signatures and style registrations. Type and initializer text is sliced
//! verbatim from the source using node spans; nothing is executed.

use lazy_static::lazy_static;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Class, ClassElement, Expression, MethodDefinitionKind, Program, PropertyKey, TSAccessibility,
    TSInterfaceDeclaration, TSSignature, TSType, TSTypeAliasDeclaration,
};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use regex::Regex;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::model::{MethodDescriptor, ParamDescriptor, PropDescriptor, StyleDescriptor, Visibility};
use crate::scan::{find_top_level, split_top_level, strip_wrapping_parens};
use crate::styles::StyleCollector;

lazy_static! {
    static ref HERITAGE_RE: Regex = Regex::new(r"^\s*extends\s+([A-Za-z_$][\w$.]*)").unwrap();
}

const PARAM_MODIFIERS: [&str; 5] = ["public ", "private ", "protected ", "readonly ", "override "];

// ═══════════════════════════════════════════════════════════════════════════════
// RESULT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// The first declaration whose name carries a Props suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropsDeclaration {
    pub name: String,
    pub props: Vec<PropDescriptor>,
    /// Single heritage type; only the first is kept when several are declared.
    pub ancestor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SourceAnalysis {
    pub props: Option<PropsDeclaration>,
    pub methods: Vec<MethodDescriptor>,
    pub styles: Vec<StyleDescriptor>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Parse `source` once and gather every facet from the same tree.
///
/// A blob that does not parse is a parse anomaly: logged and treated as empty.
pub fn analyze_source(source: &str, config: &AnalyzerConfig) -> SourceAnalysis {
    with_program(source, |program| {
        let mut declarations = DeclarationCollector::new(source, config);
        declarations.visit_program(program);

        let mut styles = StyleCollector::new(source, config);
        styles.visit_program(program);

        SourceAnalysis {
            props: declarations.props,
            methods: declarations.methods,
            styles: styles.finish(),
        }
    })
    .unwrap_or_default()
}

pub fn extract_props(source: &str, config: &AnalyzerConfig) -> Option<PropsDeclaration> {
    analyze_source(source, config).props
}

pub fn extract_methods(source: &str, config: &AnalyzerConfig) -> Vec<MethodDescriptor> {
    analyze_source(source, config).methods
}

/// Run `f` over the parsed program. TSX is tried first, then plain TS for
/// sources using `<T>expr` assertions.
pub(crate) fn with_program<T>(source: &str, f: impl FnOnce(&Program<'_>) -> T) -> Option<T> {
    let allocator = Allocator::default();
    let tsx = SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true);
    let ts = SourceType::default().with_module(true).with_typescript(true);

    let ret = Parser::new(&allocator, source, tsx).parse();
    let ret = if ret.errors.is_empty() {
        ret
    } else {
        Parser::new(&allocator, source, ts).parse()
    };

    if !ret.errors.is_empty() {
        debug!(errors = ret.errors.len(), "source did not parse, treating as empty");
        return None;
    }

    Some(f(&ret.program))
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECLARATION COLLECTOR
// ═══════════════════════════════════════════════════════════════════════════════

struct DeclarationCollector<'s> {
    source: &'s str,
    config: &'s AnalyzerConfig,
    props: Option<PropsDeclaration>,
    methods: Vec<MethodDescriptor>,
}

impl<'s> DeclarationCollector<'s> {
    fn new(source: &'s str, config: &'s AnalyzerConfig) -> Self {
        Self {
            source,
            config,
            props: None,
            methods: Vec::new(),
        }
    }

    fn text(&self, span: Span) -> &'s str {
        &self.source[span.start as usize..span.end as usize]
    }

    fn is_props_name(&self, name: &str) -> bool {
        self.config.props_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    fn contributes_methods(&self, name: &str) -> bool {
        !self
            .config
            .non_method_suffixes
            .iter()
            .any(|s| name.ends_with(s.as_str()))
    }

    fn type_text(&self, annotation: Option<&TSType<'_>>) -> String {
        annotation
            .map(|ty| self.text(ty.span()).to_string())
            .unwrap_or_else(|| "any".to_string())
    }

    fn signature_prop(&self, signature: &TSSignature<'_>) -> Option<PropDescriptor> {
        match signature {
            TSSignature::TSPropertySignature(prop) if !prop.computed => {
                let name = property_key_name(&prop.key)?;
                let type_text =
                    self.type_text(prop.type_annotation.as_ref().map(|a| &a.type_annotation));
                Some(PropDescriptor::own(name, type_text, prop.optional))
            }
            TSSignature::TSMethodSignature(method) if !method.computed => {
                let name = property_key_name(&method.key)?;
                let params = self.text(method.params.span).trim();
                let return_type = method
                    .return_type
                    .as_ref()
                    .map(|a| self.text(a.type_annotation.span()))
                    .unwrap_or("void");
                let type_text = if params.starts_with('(') {
                    format!("{} => {}", params, return_type)
                } else {
                    format!("({}) => {}", params, return_type)
                };
                Some(PropDescriptor::own(name, type_text, method.optional))
            }
            _ => None,
        }
    }

    /// Members of an object-type alias, following intersections. The first
    /// referenced type in an intersection becomes the ancestor.
    fn collect_alias_members(
        &self,
        ty: &TSType<'_>,
        members: &mut Vec<PropDescriptor>,
        ancestor: &mut Option<String>,
    ) -> bool {
        match ty {
            TSType::TSTypeLiteral(literal) => {
                members.extend(literal.members.iter().filter_map(|s| self.signature_prop(s)));
                true
            }
            TSType::TSIntersectionType(intersection) => {
                let mut is_object = false;
                for part in &intersection.types {
                    is_object |= self.collect_alias_members(part, members, ancestor);
                }
                is_object
            }
            TSType::TSTypeReference(reference) => {
                if ancestor.is_none() {
                    *ancestor = Some(self.text(reference.type_name.span()).to_string());
                }
                false
            }
            _ => false,
        }
    }

    fn initializer_text(&self, value: &Expression<'_>) -> String {
        match value {
            Expression::TSAsExpression(cast) => self.text(cast.expression.span()).to_string(),
            other => self.text(other.span()).to_string(),
        }
    }

    fn class_props(&self, class: &Class<'_>) -> Vec<PropDescriptor> {
        class
            .body
            .body
            .iter()
            .filter_map(|element| match element {
                ClassElement::PropertyDefinition(prop) if !prop.r#static && !prop.computed => {
                    let name = property_key_name(&prop.key)?;
                    let type_text =
                        self.type_text(prop.type_annotation.as_ref().map(|a| &a.type_annotation));
                    let default_value = prop.value.as_ref().map(|v| self.initializer_text(v));
                    Some(PropDescriptor::own(name, type_text, prop.optional).with_default(default_value))
                }
                _ => None,
            })
            .collect()
    }

    fn class_methods(&self, class: &Class<'_>) -> Vec<MethodDescriptor> {
        class
            .body
            .body
            .iter()
            .filter_map(|element| {
                let ClassElement::MethodDefinition(method) = element else {
                    return None;
                };
                if method.computed || !matches!(method.kind, MethodDefinitionKind::Method) {
                    return None;
                }
                if matches!(
                    method.accessibility,
                    Some(TSAccessibility::Private | TSAccessibility::Protected)
                ) {
                    return None;
                }
                let name = property_key_name(&method.key)?;
                if self.config.lifecycle_methods.iter().any(|l| *l == name) {
                    return None;
                }

                let function = &method.value;
                let return_type = function
                    .return_type
                    .as_ref()
                    .map(|a| self.text(a.type_annotation.span()).to_string())
                    .unwrap_or_else(|| "void".to_string());

                Some(MethodDescriptor {
                    name,
                    visibility: Visibility::Public,
                    return_type,
                    params: parse_params(self.text(function.params.span)),
                })
            })
            .collect()
    }
}

impl<'a> Visit<'a> for DeclarationCollector<'_> {
    fn visit_ts_interface_declaration(&mut self, decl: &TSInterfaceDeclaration<'a>) {
        let name = decl.id.name.as_str();
        if self.props.is_none() && self.is_props_name(name) {
            let props = decl
                .body
                .body
                .iter()
                .filter_map(|s| self.signature_prop(s))
                .collect();
            let heritage = self.text(Span::new(decl.id.span.end, decl.body.span.start));
            self.props = Some(PropsDeclaration {
                name: name.to_string(),
                props,
                ancestor: heritage_name(heritage),
            });
        }
        walk::walk_ts_interface_declaration(self, decl);
    }

    fn visit_ts_type_alias_declaration(&mut self, decl: &TSTypeAliasDeclaration<'a>) {
        let name = decl.id.name.as_str();
        if self.props.is_none() && self.is_props_name(name) {
            let mut props = Vec::new();
            let mut ancestor = None;
            let is_object =
                self.collect_alias_members(&decl.type_annotation, &mut props, &mut ancestor);
            if is_object || ancestor.is_some() {
                self.props = Some(PropsDeclaration {
                    name: name.to_string(),
                    props,
                    ancestor,
                });
            }
        }
        walk::walk_ts_type_alias_declaration(self, decl);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        if let Some(id) = &class.id {
            let name = id.name.as_str();
            if self.is_props_name(name) {
                if self.props.is_none() {
                    self.props = Some(PropsDeclaration {
                        name: name.to_string(),
                        props: self.class_props(class),
                        ancestor: class
                            .super_class
                            .as_ref()
                            .map(|sc| strip_type_arguments(self.text(sc.span())).to_string()),
                    });
                }
            } else if self.contributes_methods(name) {
                let methods = self.class_methods(class);
                self.methods.extend(methods);
            }
        }
        walk::walk_class(self, class);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Name of a statically named member. Computed and private keys have none,
/// so such members are never counted.
fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

/// Ancestor named in the text between an interface name and its body,
/// e.g. `<T> extends BaseProps<T>, Other` → `BaseProps`.
fn heritage_name(text: &str) -> Option<String> {
    let rest = skip_type_parameters(text.trim_start());
    HERITAGE_RE.captures(rest).map(|caps| caps[1].to_string())
}

fn skip_type_parameters(text: &str) -> &str {
    if !text.starts_with('<') {
        return text;
    }
    let mut depth = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return &text[i + 1..];
                }
            }
            _ => {}
        }
    }
    text
}

fn strip_type_arguments(text: &str) -> &str {
    match text.find('<') {
        Some(i) => text[..i].trim(),
        None => text.trim(),
    }
}

/// Parameters of a parenthesized list such as `(a: string, b?: number = 1)`.
pub fn parse_params(text: &str) -> Vec<ParamDescriptor> {
    split_top_level(strip_wrapping_parens(text), b',')
        .into_iter()
        .filter_map(parse_param)
        .collect()
}

/// One parameter: `name?: Type = default`. Optional when marked `?` or
/// initialized. `this` parameters are dropped.
pub fn parse_param(text: &str) -> Option<ParamDescriptor> {
    let mut text = text.trim();
    while let Some(rest) = PARAM_MODIFIERS.iter().find_map(|m| text.strip_prefix(m)) {
        text = rest.trim_start();
    }
    if text.is_empty() {
        return None;
    }

    let colon = find_top_level(text, b':');
    let equals = find_top_level(text, b'=');
    let name_end = match (colon, equals) {
        (Some(c), Some(e)) => c.min(e),
        (Some(c), None) => c,
        (None, Some(e)) => e,
        (None, None) => text.len(),
    };

    let raw_name = text[..name_end].trim();
    let name = raw_name.trim_end_matches('?').trim();
    if name.is_empty() || name == "this" {
        return None;
    }

    let type_text = match colon {
        Some(c) if equals.map_or(true, |e| c < e) => {
            text[c + 1..equals.unwrap_or(text.len())].trim()
        }
        _ => "any",
    };

    Some(ParamDescriptor {
        name: name.to_string(),
        type_text: type_text.to_string(),
        optional: raw_name.ends_with('?') || equals.is_some(),
    })
}
