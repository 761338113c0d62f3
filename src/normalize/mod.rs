//! Best-effort decoding of text backend responses into a list of strings.
//!
//! Strategies, tried in order until one yields a list:
//! 1. Strict JSON array, on the raw text and again without code fences
//! 2. List literal after cleanup (code fences, smart quotes, `\'`)
//! 3. First bracketed list whose items are all quoted
//! 4. Every quoted substring in the text

mod literal;

pub use literal::parse_list_literal;

use crate::error::{Result, SeedError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum characters of the raw text kept in an error
const SNIPPET_LEN: usize = 200;

/// Code fence markers with an optional language tag
static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").unwrap());

/// Double- or single-quoted substrings
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'"#).unwrap()
});

/// Decode `raw` into a list of strings.
///
/// Fails with [`SeedError::UnparsableOutput`] carrying a truncated snippet
/// of `raw` only when every strategy fails.
pub fn normalize_output(raw: &str) -> Result<Vec<String>> {
    if let Some(items) = decode_json(raw.trim()).or_else(|| decode_json(&strip_fences(raw))) {
        return Ok(items);
    }

    let cleaned = clean_response(raw);

    let strategies: [(&str, fn(&str) -> Option<Vec<String>>); 3] = [
        ("literal", |s| parse_list_literal(s.trim())),
        ("bracketed", extract_bracketed_list),
        ("quoted", extract_quoted_strings),
    ];

    for (name, strategy) in strategies {
        if let Some(items) = strategy(&cleaned) {
            tracing::debug!(strategy = name, items = items.len(), "decoded text output");
            return Ok(items);
        }
    }

    Err(SeedError::UnparsableOutput {
        snippet: snippet(raw),
    })
}

/// Strip code fences, straighten smart quotes and unescape `\'`
pub fn clean_response(raw: &str) -> String {
    let text = raw.replace("\\'", "'");
    strip_fences(&text)
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
}

fn strip_fences(text: &str) -> String {
    FENCE_RE.replace_all(text, "").trim().to_string()
}

/// Strict JSON array; non-string scalars are kept in their JSON spelling
fn decode_json(text: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let items = value.as_array()?;
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        })
        .collect()
}

/// Items of the first `[...]` span whose items are all quoted strings.
///
/// Spans are tried from each `[` to its balancing `]`, so prose brackets
/// such as `[note]` around the list are skipped.
fn extract_bracketed_list(text: &str) -> Option<Vec<String>> {
    text.char_indices()
        .filter(|&(_, ch)| ch == '[')
        .filter_map(|(start, _)| bracket_body(&text[start + 1..]))
        .find_map(quoted_items)
}

/// Text before the `]` balancing an already opened `[`
fn bracket_body(text: &str) -> Option<&str> {
    let mut depth = 1;
    for (i, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn quoted_items(body: &str) -> Option<Vec<String>> {
    let items: Vec<&str> = split_top_level(body)
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() || !items.iter().all(|item| is_quoted(item)) {
        return None;
    }
    Some(
        items
            .into_iter()
            .map(|item| strip_matching_quotes(item).to_string())
            .collect(),
    )
}

/// Every quoted substring anywhere in the text
fn extract_quoted_strings(text: &str) -> Option<Vec<String>> {
    let items: Vec<String> = QUOTED_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().replace("\\\"", "\""))
        .filter(|s| !s.trim().is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escape_next = false;
    let mut start = 0;

    for (i, ch) in body.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        if let Some(q) = quote {
            match ch {
                '\\' => escape_next = true,
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

fn is_quoted(item: &str) -> bool {
    item.len() >= 2 && strip_matching_quotes(item).len() == item.len() - 2
}

fn strip_matching_quotes(item: &str) -> &str {
    let mut chars = item.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '"' || first == '\'') => {
            &item[1..item.len() - 1]
        }
        _ => item,
    }
}

fn snippet(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= SNIPPET_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(SNIPPET_LEN).collect();
        format!("{cut}...")
    }
}
