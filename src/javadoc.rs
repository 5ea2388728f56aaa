//! Javadoc comment normalization and tag extraction
//!
//! Turns a raw `/** ... */` comment into a normalized record: the main
//! description, one entry per `@param`, and the `@return` text. Extraction
//! is total — malformed or tag-only comments degrade to empty fields, never
//! to an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Normalized documentation for one declaration or member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocInfo {
    /// Everything before the first `@`-tag
    pub main: String,

    /// `@param` name to text; duplicate names keep the latest value
    pub params: HashMap<String, String>,

    /// `@return` text. `None` when no tag exists, as distinct from an
    /// empty tag, so the emitter can omit the trailing token entirely.
    pub ret: Option<String>,
}

static STAR_DECOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\*\s*").unwrap());
static PARA_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?p>\s*").unwrap());
static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br ?/?>").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static LINK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{@link\s+([^}]+)}").unwrap());
static CODE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{@code\s+([^}]+)}").unwrap());
static INLINE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{@[^}]+}").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PARAM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"@param\s+(\w+)\s+([^@]*)").unwrap());
static RETURN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"@return\s+([^@]*)").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());

/// Extract normalized documentation from a raw Javadoc comment.
///
/// Absent or blank input yields an all-empty record.
pub fn extract_doc_info(comment: Option<&str>) -> DocInfo {
    let Some(raw) = comment else {
        return DocInfo::default();
    };
    if raw.trim().is_empty() {
        return DocInfo::default();
    }

    let cleaned = normalize(raw);

    let mut params = HashMap::new();
    for cap in PARAM_TAG.captures_iter(&cleaned) {
        // later duplicates overwrite earlier ones
        params.insert(cap[1].to_string(), cap[2].trim().to_string());
    }

    let returns: Vec<String> = RETURN_TAG
        .captures_iter(&cleaned)
        .map(|cap| cap[1].trim().to_string())
        .collect();
    let ret = if returns.is_empty() {
        None
    } else {
        Some(returns.join(" ").trim().to_string())
    };

    let main = ANY_TAG
        .split(&cleaned)
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    DocInfo { main, params, ret }
}

/// Strip comment decoration and markup down to plain single-line text
fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    if let Some(stripped) = text.strip_prefix("/**") {
        text = stripped.to_string();
    }
    if let Some(stripped) = text.strip_suffix("*/") {
        text = stripped.to_string();
    }
    let text = STAR_DECOR.replace_all(&text, " ");
    let text = PARA_TAG.replace_all(&text, "\n");
    let text = BR_TAG.replace_all(&text, "\n");
    let text = HTML_TAG.replace_all(&text, "");
    let text = LINK_TAG.replace_all(&text, "$1");
    let text = CODE_TAG.replace_all(&text, "$1");
    let text = INLINE_TAG.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
