//! Style class extraction.
//!
//! Finds the default-class constant and every style-registration call
//! (`register(...)` or `Sheet.register(...)`), then resolves each call's first
//! argument to a class name. Concatenations over known string constants are
//! folded by [`static_eval`]; anything else keeps its raw expression text.

use oxc_ast::ast::{Argument, BindingPattern, CallExpression, Expression, VariableDeclarator};
use oxc_ast_visit::{walk, Visit};
use oxc_span::GetSpan;
use std::collections::{HashMap, HashSet};

use crate::config::AnalyzerConfig;
use crate::model::StyleDescriptor;
use crate::static_eval::static_eval;

#[derive(Debug, Clone)]
enum ClassArgument {
    Literal(String),
    Expression(String),
}

#[derive(Debug, Clone)]
struct Registration {
    argument: ClassArgument,
    description: Option<String>,
}

pub struct StyleCollector<'s> {
    source: &'s str,
    config: &'s AnalyzerConfig,
    constants: HashMap<String, String>,
    default_class: Option<String>,
    registrations: Vec<Registration>,
}

impl<'s> StyleCollector<'s> {
    pub fn new(source: &'s str, config: &'s AnalyzerConfig) -> Self {
        Self {
            source,
            config,
            constants: HashMap::new(),
            default_class: None,
            registrations: Vec::new(),
        }
    }

    /// Default class first, then registered classes in source order, deduplicated by name.
    /// Without a default-class constant the first registered class is the default.
    pub fn finish(self) -> Vec<StyleDescriptor> {
        let mut seen = HashSet::new();
        let mut styles = Vec::new();

        if let Some(default_class) = &self.default_class {
            seen.insert(default_class.clone());
            styles.push(StyleDescriptor {
                class_name: default_class.clone(),
                description: None,
                is_default: true,
            });
        }

        for registration in self.registrations {
            let class_name = match registration.argument {
                ClassArgument::Literal(value) => value,
                ClassArgument::Expression(raw) => static_eval(&raw, &self.constants).unwrap_or(raw),
            };
            if seen.insert(class_name.clone()) {
                styles.push(StyleDescriptor {
                    class_name,
                    description: registration.description,
                    is_default: false,
                });
            }
        }

        if self.default_class.is_none() {
            if let Some(first) = styles.first_mut() {
                first.is_default = true;
            }
        }

        styles
    }

    fn is_register_call(&self, call: &CallExpression<'_>) -> bool {
        let name = match &call.callee {
            Expression::Identifier(ident) => ident.name.as_str(),
            Expression::StaticMemberExpression(member) => member.property.name.as_str(),
            _ => return false,
        };
        self.config
            .style_register_functions
            .iter()
            .any(|f| f == name)
    }

    /// Comment directly above `offset`, with only whitespace in between.
    fn preceding_comment(&self, offset: usize) -> Option<String> {
        let before = self.source[..offset].trim_end();

        if let Some(body) = before.strip_suffix("*/") {
            let start = body.rfind("/*")?;
            let text = body[start + 2..]
                .lines()
                .map(|line| line.trim().trim_start_matches('*').trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            return (!text.is_empty()).then_some(text);
        }

        let last_line = before.lines().last()?.trim();
        let text = last_line.strip_prefix("//")?.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl<'a> Visit<'a> for StyleCollector<'_> {
    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let (BindingPattern::BindingIdentifier(id), Some(init)) = (&decl.id, &decl.init) {
            let span = init.span();
            let text = &self.source[span.start as usize..span.end as usize];
            if let Some(value) = static_eval(text, &self.constants) {
                let name = id.name.to_string();
                if self.default_class.is_none()
                    && self.config.default_class_constants.iter().any(|c| *c == name)
                {
                    self.default_class = Some(value.clone());
                }
                self.constants.insert(name, value);
            }
        }
        walk::walk_variable_declarator(self, decl);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if self.is_register_call(call) {
            let argument = match call.arguments.first() {
                Some(Argument::StringLiteral(lit)) => Some(ClassArgument::Literal(lit.value.to_string())),
                Some(Argument::SpreadElement(_)) | None => None,
                Some(other) => {
                    let span = other.span();
                    Some(ClassArgument::Expression(
                        self.source[span.start as usize..span.end as usize].to_string(),
                    ))
                }
            };
            if let Some(argument) = argument {
                let description = self.preceding_comment(call.span.start as usize);
                self.registrations.push(Registration {
                    argument,
                    description,
                });
            }
        }
        walk::walk_call_expression(self, call);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AnalyzerConfig;
    use crate::model::StyleDescriptor;
    use crate::parse::analyze_source;
    use pretty_assertions::assert_eq;

    fn styles_of(source: &str) -> Vec<StyleDescriptor> {
        analyze_source(source, &AnalyzerConfig::default()).styles
    }

    fn names(styles: &[StyleDescriptor]) -> Vec<&str> {
        styles.iter().map(|s| s.class_name.as_str()).collect()
    }

    #[test]
    fn test_default_class_and_concatenation() {
        let styles = styles_of(
            r#"
            const DEFAULT_CLASS = "app-button";
            register(DEFAULT_CLASS + '-disabled', { opacity: 0.5 });
            "#,
        );
        assert_eq!(names(&styles), vec!["app-button", "app-button-disabled"]);
        assert!(styles[0].is_default);
        assert!(!styles[1].is_default);
    }

    #[test]
    fn test_member_call_literal_and_dedup() {
        let styles = styles_of(
            r#"
            export const DEFAULT_CLASS = 'app-card';
            StyleSheet.register('app-card--raised', {});
            StyleSheet.register('app-card--raised', {});
            this.register(`${DEFAULT_CLASS}__title`, {});
            "#,
        );
        assert_eq!(
            names(&styles),
            vec!["app-card", "app-card--raised", "app-card__title"]
        );
        assert_eq!(styles.iter().filter(|s| s.is_default).count(), 1);
    }

    #[test]
    fn test_unresolvable_expression_kept_raw() {
        let styles = styles_of(
            r#"
            const DEFAULT_CLASS = 'app-chip';
            register(DEFAULT_CLASS + suffix(), {});
            "#,
        );
        assert_eq!(names(&styles), vec!["app-chip", "DEFAULT_CLASS + suffix()"]);
    }

    #[test]
    fn test_first_registration_is_default_without_constant() {
        let styles = styles_of("register('app-tag', {}); register('app-tag--small', {});");
        assert_eq!(names(&styles), vec!["app-tag", "app-tag--small"]);
        assert!(styles[0].is_default);
        assert!(!styles[1].is_default);
    }

    #[test]
    fn test_preceding_comment_becomes_description() {
        let styles = styles_of(
            r#"
            const DEFAULT_CLASS = 'app-input';
            // Applied while the input is focused
            register(DEFAULT_CLASS + '--focused', {});
            /**
             * Error state
             */
            register(DEFAULT_CLASS + '--error', {});
            "#,
        );
        assert_eq!(
            styles[1].description.as_deref(),
            Some("Applied while the input is focused")
        );
        assert_eq!(styles[2].description.as_deref(), Some("Error state"));
    }
}
