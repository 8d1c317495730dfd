//! Static String Evaluator
//!
//! Reduces a style-class expression to a literal string without executing it.
//! Identifiers are substituted from known string constants and `+`
//! concatenations are folded. Anything not confidently reducible yields `None`
//! so callers keep the raw expression text.

use std::collections::HashMap;

use crate::scan::split_top_level;

/// Try to evaluate an expression to a static string value.
pub fn static_eval(expr: &str, bindings: &HashMap<String, String>) -> Option<String> {
    let mut trimmed = expr.trim();
    while let Some(stripped) = trimmed.strip_suffix(';') {
        trimmed = stripped.trim_end();
    }

    if trimmed.is_empty() {
        return None;
    }

    if let Some(literal) = try_parse_string_literal(trimmed) {
        return Some(literal);
    }

    if is_valid_identifier(trimmed) {
        return bindings.get(trimmed).cloned();
    }

    if let Some(inner) = trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        if let Some(resolved) = static_eval(inner, bindings) {
            return Some(resolved);
        }
    }

    if let Some(resolved) = try_resolve_concatenation(trimmed, bindings) {
        return Some(resolved);
    }

    try_resolve_template_literal(trimmed, bindings)
}

/// Try to parse a string literal (single, double, or backtick quoted)
fn try_parse_string_literal(s: &str) -> Option<String> {
    if s.len() < 2 {
        return None;
    }

    if (s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')) {
        let inner = &s[1..s.len() - 1];
        let quote = &s[..1];
        // `'a' + 'b'` also starts and ends with a quote
        if inner.contains(quote) && !inner.contains('\\') {
            return None;
        }
        return Some(unescape_string(inner));
    }

    if s.starts_with('`') && s.ends_with('`') {
        let inner = &s[1..s.len() - 1];
        if !inner.contains("${") && !inner.contains('`') {
            return Some(unescape_string(inner));
        }
    }

    None
}

/// Unescape basic string escape sequences
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some('`') => result.push('`'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Try to resolve string concatenation
fn try_resolve_concatenation(expr: &str, bindings: &HashMap<String, String>) -> Option<String> {
    let parts = split_top_level(expr, b'+');
    if parts.len() < 2 {
        return None;
    }

    let mut result = String::new();
    for part in parts {
        result.push_str(&static_eval(part, bindings)?);
    }

    Some(result)
}

/// Try to resolve a template literal with interpolations
fn try_resolve_template_literal(expr: &str, bindings: &HashMap<String, String>) -> Option<String> {
    if expr.len() < 2 || !expr.starts_with('`') || !expr.ends_with('`') {
        return None;
    }

    let inner = &expr[1..expr.len() - 1];
    let mut result = String::new();
    let chars: Vec<char> = inner.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if i + 1 < chars.len() && chars[i] == '$' && chars[i + 1] == '{' {
            let start = i + 2;
            let mut depth = 1;
            let mut end = start;

            while end < chars.len() && depth > 0 {
                match chars[end] {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                end += 1;
            }

            if depth != 0 {
                return None;
            }

            let interpolation: String = chars[start..end - 1].iter().collect();
            result.push_str(&static_eval(&interpolation, bindings)?);
            i = end;
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }

    Some(result)
}

/// Check if a string is a valid JavaScript identifier
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
