//! Event extraction and reconciliation.
//!
//! Events come from two independent places: function-typed `on*` properties
//! (declared events) and explicit `emit('name', [args])` call sites (emitted
//! events). Call-site data wins on conflict because its parameter list is
//! what listeners actually receive.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::AnalyzerConfig;
use crate::error::{DocgenError, DocgenResult};
use crate::model::{EventDescriptor, PropDescriptor};
use crate::parse::parse_params;
use crate::scan::{find_matching_close, find_top_level_arrow, split_top_level, strip_wrapping_parens};

const FUNCTION_TYPE: &str = "Function";

// ═══════════════════════════════════════════════════════════════════════════════
// DECLARED EVENTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Every `on*` property whose type is function-shaped.
pub fn declared_events(props: &[PropDescriptor]) -> Vec<EventDescriptor> {
    props
        .iter()
        .filter(|p| p.name.starts_with("on") && p.is_function_typed())
        .map(|p| EventDescriptor {
            name: p.name.clone(),
            type_text: p.type_text.clone(),
            params: declared_signature(&p.type_text),
        })
        .collect()
}

/// `(e: TapEvent, target: View) => void` → `(e, target)`. In a union such
/// as `((value: string) => void) | undefined` the function member is used.
fn declared_signature(type_text: &str) -> String {
    let function_type = split_top_level(type_text, b'|')
        .into_iter()
        .map(strip_wrapping_parens)
        .find_map(|member| find_top_level_arrow(member).map(|arrow| &member[..arrow]));

    let names: Vec<String> = match function_type {
        Some(params) => parse_params(params).into_iter().map(|p| p.name).collect(),
        None => Vec::new(),
    };
    format!("({})", names.join(", "))
}

// ═══════════════════════════════════════════════════════════════════════════════
// EMITTED EVENTS
// ═══════════════════════════════════════════════════════════════════════════════

pub struct EventScanner {
    pattern: Regex,
    implicit_args: Vec<String>,
}

impl EventScanner {
    pub fn new(config: &AnalyzerConfig) -> DocgenResult<Self> {
        if config.emit_functions.is_empty() {
            return Err(DocgenError::Config(
                "analyzer.emitFunctions must not be empty".to_string(),
            ));
        }
        let names = config
            .emit_functions
            .iter()
            .map(|f| regex::escape(f))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r#"(?:^|[^\w$])(?:{})\s*\(\s*(?:'([^']+)'|"([^"]+)"|`([^`$]+)`)"#,
            names
        ))
        .map_err(|e| DocgenError::Config(e.to_string()))?;

        Ok(Self {
            pattern,
            implicit_args: config.implicit_target_args.clone(),
        })
    }

    /// Scan raw text for emission call sites. The first occurrence of a name wins.
    pub fn emitted_events(&self, source: &str) -> Vec<EventDescriptor> {
        let mut events: IndexMap<String, EventDescriptor> = IndexMap::new();

        for caps in self.pattern.captures_iter(source) {
            let Some(name) = caps.get(1).or(caps.get(2)).or(caps.get(3)) else {
                continue;
            };
            if events.contains_key(name.as_str()) {
                continue;
            }

            let rest = caps.get(0).map_or("", |m| &source[m.end()..]);
            let args: Vec<&str> = argument_list(rest)
                .map(|list| split_top_level(list, b','))
                .unwrap_or_default()
                .into_iter()
                .filter(|arg| !self.implicit_args.iter().any(|i| i == arg))
                .collect();

            events.insert(
                name.as_str().to_string(),
                EventDescriptor {
                    name: name.as_str().to_string(),
                    type_text: FUNCTION_TYPE.to_string(),
                    params: format!("({})", args.join(", ")),
                },
            );
        }

        events.into_values().collect()
    }
}

/// Inner text of the `[...]` argument array following an event name, e.g.
/// `, [items[0], e])` → `items[0], e`.
fn argument_list(rest: &str) -> Option<&str> {
    let list = rest.trim_start().strip_prefix(',')?.trim_start();
    if !list.starts_with('[') {
        return None;
    }
    let close = find_matching_close(list, 0)?;
    Some(&list[1..close])
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECONCILIATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Merge declared events, the component's own emitted events and the emitted
/// events of statically referenced components into one name-unique list.
///
/// Own call sites overwrite declarations; referenced components only fill
/// names not already present.
pub fn reconcile_events<I>(
    declared: Vec<EventDescriptor>,
    emitted: Vec<EventDescriptor>,
    referenced: I,
) -> Vec<EventDescriptor>
where
    I: IntoIterator<Item = Vec<EventDescriptor>>,
{
    let mut merged: IndexMap<String, EventDescriptor> = IndexMap::new();

    for event in declared {
        merged.insert(event.name.clone(), event);
    }
    for event in emitted {
        merged.insert(event.name.clone(), event);
    }
    for events in referenced {
        for event in events {
            merged.entry(event.name.clone()).or_insert(event);
        }
    }

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(name: &str, params: &str) -> EventDescriptor {
        EventDescriptor {
            name: name.to_string(),
            type_text: FUNCTION_TYPE.to_string(),
            params: params.to_string(),
        }
    }

    fn scanner() -> EventScanner {
        EventScanner::new(&AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_declared_events_require_on_prefix_and_function_type() {
        let props = vec![
            PropDescriptor::own("onTap", "(e: TapEvent, target: View) => void", true),
            PropDescriptor::own("onLoad", "Function", true),
            PropDescriptor::own("onlyText", "string", false),
            PropDescriptor::own("callback", "() => void", false),
            PropDescriptor::own("onChange", "((value: string) => void) | undefined", true),
        ];
        let events = declared_events(&props);
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["onTap", "onLoad", "onChange"]);
        assert_eq!(events[0].params, "(e, target)");
        assert_eq!(events[1].params, "()");
        assert_eq!(events[1].type_text, "Function");
        assert_eq!(events[2].params, "(value)");
    }

    #[test]
    fn test_declared_signature_of_union_member() {
        assert_eq!(declared_signature("undefined | ((a: A, b: B) => void)"), "(a, b)");
        assert_eq!(declared_signature("(cb: () => void) => void"), "(cb)");
        assert_eq!(declared_signature("Function"), "()");
    }

    #[test]
    fn test_emitted_events_drop_implicit_target() {
        let source = r#"
            handleTap(e) { this.emit('onTap', [e, this]); }
            handleHold() { emit("onHold", [this, duration , count]); }
            reset() { this.emit(`onReset`); }
        "#;
        let events = scanner().emitted_events(source);
        assert_eq!(
            events,
            vec![
                event("onTap", "(e)"),
                event("onHold", "(duration, count)"),
                event("onReset", "()"),
            ]
        );
    }

    #[test]
    fn test_emitted_arguments_with_nested_brackets() {
        let source = r#"
            this.emit('onChange', [items[0], e, this]);
            emit('onMove', [{ x: pos[0], y: pos[1] }, delta(a, b), "]"]);
        "#;
        assert_eq!(
            scanner().emitted_events(source),
            vec![
                event("onChange", "(items[0], e)"),
                event("onMove", "({ x: pos[0], y: pos[1] }, delta(a, b), \"]\")"),
            ]
        );
    }

    #[test]
    fn test_emitted_first_occurrence_wins() {
        let source = "emit('onTap', [e]); emit('onTap', [e, extra]);";
        assert_eq!(scanner().emitted_events(source), vec![event("onTap", "(e)")]);
    }

    #[test]
    fn test_emit_name_must_be_whole_identifier() {
        let source = "submit('onSubmit', [form]); reemit('onX', []);";
        assert!(scanner().emitted_events(source).is_empty());
    }

    #[test]
    fn test_reconcile_prefers_call_site_and_keeps_local_names() {
        let declared = vec![
            EventDescriptor {
                name: "onTap".to_string(),
                type_text: "(e: TapEvent) => void".to_string(),
                params: "(e)".to_string(),
            },
            event("onFocus", "()"),
        ];
        let emitted = vec![event("onTap", "(e, target)")];
        let referenced = vec![vec![event("onTap", "(x)"), event("onLongTap", "(e)")]];

        let merged = reconcile_events(declared, emitted, referenced);
        assert_eq!(
            merged,
            vec![
                event("onTap", "(e, target)"),
                event("onFocus", "()"),
                event("onLongTap", "(e)"),
            ]
        );
    }
}
