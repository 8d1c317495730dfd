//! Depth-aware text scanning over TypeScript fragments.
//!
//! Used on small slices recovered from the syntax tree (parameter lists, type
//! text, call arguments) where splitting on a separator must ignore nested
//! brackets, generics, string literals and arrow tokens.

/// Byte index of the first `target` at nesting depth zero.
pub fn find_top_level(text: &str, target: u8) -> Option<usize> {
    let mut found = None;
    walk_top_level(text, |i, b| {
        if b == target {
            found = Some(i);
            true
        } else {
            false
        }
    });
    found
}

/// Byte index of the first `=>` at nesting depth zero.
pub fn find_top_level_arrow(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'=' if bytes.get(i + 1) == Some(&b'>') => {
                if depth == 0 {
                    return Some(i);
                }
                i += 2;
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = (depth - 1).max(0),
            _ => {}
        }
        i += 1;
    }

    None
}

/// Split on `sep` at nesting depth zero. Pieces are trimmed; empty pieces are dropped.
pub fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    walk_top_level(text, |i, b| {
        if b == sep {
            parts.push(&text[start..i]);
            start = i + 1;
        }
        false
    });
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Byte index of the bracket closing the one opened at `open`. Nested
/// `()[]{}` and string literals are skipped; angle brackets are not counted
/// because argument text may hold comparisons.
pub fn find_matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Remove wrapping parentheses that enclose the whole text, e.g. `((e) => void)`.
pub fn strip_wrapping_parens(text: &str) -> &str {
    let mut current = text.trim();
    while current.starts_with('(') && current.ends_with(')') {
        let inner = &current[1..current.len() - 1];
        if !is_balanced(inner) {
            break;
        }
        current = inner.trim();
    }
    current
}

/// Visit every byte at depth zero, outside strings and arrow tokens.
/// The callback returns `true` to stop early.
fn walk_top_level(text: &str, mut visit: impl FnMut(usize, u8) -> bool) {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'=' if bytes.get(i + 1) == Some(&b'>') => {
                i += 2;
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = (depth - 1).max(0),
            _ => {
                if depth == 0 && visit(i, b) {
                    return;
                }
            }
        }
        i += 1;
    }
}

/// Index just past the string literal opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() && bytes[i] != quote {
        if bytes[i] == b'\\' {
            i += 1;
        }
        i += 1;
    }
    i + 1
}

fn is_balanced(text: &str) -> bool {
    let mut depth: i32 = 0;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_nested_commas() {
        assert_eq!(
            split_top_level("a: Map<string, number>, cb: (x, y) => void, { p, q }: O", b','),
            vec!["a: Map<string, number>", "cb: (x, y) => void", "{ p, q }: O"]
        );
    }

    #[test]
    fn test_split_ignores_strings() {
        assert_eq!(
            split_top_level("'a,b' + DEFAULT_CLASS", b'+'),
            vec!["'a,b'", "DEFAULT_CLASS"]
        );
        assert_eq!(split_top_level("a, ", b','), vec!["a"]);
    }

    #[test]
    fn test_find_skips_arrow_equals() {
        let text = "cb: (a) => void = noop";
        assert_eq!(find_top_level(text, b':'), Some(2));
        assert_eq!(find_top_level(text, b'='), Some(16));
    }

    #[test]
    fn test_find_top_level_arrow() {
        assert_eq!(find_top_level_arrow("(e: Event) => void"), Some(11));
        assert_eq!(find_top_level_arrow("(cb: () => void) => void"), Some(17));
        assert_eq!(find_top_level_arrow("string"), None);
    }

    #[test]
    fn test_find_matching_close() {
        let text = "[items[0], fn(a, [b]), ']', e]; rest";
        assert_eq!(find_matching_close(text, 0), Some(29));
        assert_eq!(&text[1..29], "items[0], fn(a, [b]), ']', e");
        assert_eq!(find_matching_close("[a, b", 0), None);
    }

    #[test]
    fn test_strip_wrapping_parens() {
        assert_eq!(strip_wrapping_parens("((e) => void)"), "(e) => void");
        assert_eq!(strip_wrapping_parens("(a) => (b)"), "(a) => (b)");
    }
}
