//! Cleanup of converted Markdown
//!
//! The HTML converter leaves behind fragments of the export's scripting and
//! markup. Cleanup is an ordered list of textual removals followed by
//! duplicate-title detection and newline normalization.
//!
//! ## Known limitation
//!
//! Function bodies are matched non-recursively (`{` up to the first `}`), so
//! a definition with nested braces is only partly removed.

use crate::text::are_similar;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

struct Removal {
    name: &'static str,
    regex: Regex,
}

impl Removal {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("cleanup regex"),
        }
    }
}

/// Removals applied in order. Script blocks go before generic tag remnants
/// so a script body never survives its own tags being stripped.
static REMOVALS: LazyLock<Vec<Removal>> = LazyLock::new(|| {
    vec![
        Removal::new(
            "event-registration",
            r"(?:[\w$]+\.)*(?:addEventListener|attachEvent)\s*\([^)]*\)[ \t]*;?",
        ),
        Removal::new(
            "function-definition",
            r"(?s)function\s*[\w$]*\s*\([^)]*\)\s*\{.*?\}[ \t]*;?",
        ),
        Removal::new("script-block", r"(?is)<script\b[^>]*>.*?</script\s*>"),
        Removal::new(
            "event-handler-attribute",
            r#"(?i)\bon\w+\s*=\s*(?:"[^"]*"|'[^']*')"#,
        ),
        Removal::new("html-comment", r"(?s)<!--.*?-->"),
        Removal::new("tag-remnant", r"</?[a-zA-Z][a-zA-Z0-9-]*(?:\s[^<>]*)?/?>"),
        Removal::new("trailing-call", r"[\w$.]+\(\)\s*;?\s*$"),
    ]
});

static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[ \t]+(.+?)[ \t#]*$").expect("h1 regex"));

static EXCESS_NEWLINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline regex"));

static TAG_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:标签|关键词|tags|keywords)[*_]*\s*[:：]").expect("tag line regex"));

static TIME_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:创建于|创建时间|发布于|发布时间|最后修改|created|published|日期|date)[*_]*\s*[:：]?[*_\s]*\d{4}[-/]",
    )
    .expect("time line regex")
});

/// Clean converted Markdown.
///
/// Removes event-registration calls, function definitions, `<script>`
/// blocks, inline `on*=` handlers, HTML comments, leftover tags and a
/// trailing bare call, then drops a first text line that restates the H1
/// and normalizes newlines.
pub fn cleanup(markdown: &str) -> String {
    let mut text = markdown.to_string();

    for removal in REMOVALS.iter() {
        let replaced = removal.regex.replace_all(&text, "");
        if replaced.len() != text.len() {
            trace!(stage = removal.name, removed = text.len() - replaced.len(), "cleanup removal");
            text = replaced.into_owned();
        }
    }

    let text = remove_duplicate_title(&text);
    normalize_newlines(&text)
}

/// Drop the first text line when it restates the first level-1 heading.
///
/// The first non-empty, non-heading line and the first `# ` heading are
/// compared with [`are_similar`]. On a match, the first line whose trimmed
/// content equals that text is removed; earlier identical lines win.
pub fn remove_duplicate_title(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.lines().collect();

    let first_text = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !line.starts_with('#'));

    let heading = lines.iter().find_map(|line| {
        H1_REGEX
            .captures(line.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    });

    let (Some(first_text), Some(heading)) = (first_text, heading) else {
        return markdown.to_string();
    };

    if !are_similar(first_text, heading) {
        return markdown.to_string();
    }

    debug!(line = %first_text, heading = %heading, "removing duplicated title line");

    let mut removed = false;
    let kept: Vec<&str> = lines
        .into_iter()
        .filter(|line| {
            if !removed && line.trim() == first_text {
                removed = true;
                return false;
            }
            true
        })
        .collect();

    let mut result = kept.join("\n");
    if markdown.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Leading Markdown decoration ignored when matching restatement lines.
const LINE_DECORATION: &[char] = &[' ', '\t', '>', '*', '_', '-', '+'];

/// Remove body lines that restate the tag list or a timestamp label, since
/// both already live in the front matter.
pub fn strip_metadata_lines(markdown: &str) -> String {
    let kept: Vec<&str> = markdown
        .lines()
        .filter(|line| {
            let content = line.trim_start_matches(LINE_DECORATION);
            !(TAG_LINE_REGEX.is_match(content) || TIME_LINE_REGEX.is_match(content))
        })
        .collect();

    normalize_newlines(&kept.join("\n"))
}

/// Collapse three or more newlines to two, drop leading newlines and end
/// with exactly one newline.
fn normalize_newlines(text: &str) -> String {
    let collapsed = EXCESS_NEWLINES_REGEX.replace_all(text, "\n\n");
    format!("{}\n", collapsed.trim_matches('\n'))
}
