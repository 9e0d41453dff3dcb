//! Metadata extraction from raw export HTML
//!
//! Three independent extractors run over the unparsed markup:
//! - **Title**: ordered rules, first non-empty match wins
//! - **Tags**: every source contributes, results are cleaned and de-duplicated
//! - **Creation time**: ordered rules, first match wins, falls back to now
//!
//! Each extractor is driven by a static rule table so rules can be added or
//! reordered without touching the control flow.

use crate::datetime::{normalize, now_canonical};
use crate::text::{collapse_whitespace, strip_entities, strip_entities_and_symbols, strip_tags};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Provenance tag added to every note that mentions the source application.
pub const GETNOTE_TAG: &str = "Get笔记";

/// Metadata pulled out of one exported note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedMetadata {
    /// Extracted title, `None` when no rule matched
    pub title: Option<String>,
    /// Cleaned, de-duplicated tags in first-seen order
    pub tags: Vec<String>,
    /// Creation time, canonical unless the source value was unrecognized
    pub created: Option<String>,
}

/// Run all three extractors over `html`.
pub fn extract_metadata(html: &str) -> ExtractedMetadata {
    ExtractedMetadata {
        title: extract_title(html),
        tags: extract_tags(html),
        created: Some(extract_created_time(html)),
    }
}

// ============================================================================
// Title
// ============================================================================

enum TitleSource {
    /// Capture group 1 of the pattern anywhere in the document
    Element(Regex),
    /// First `inner` match inside the first `outer` match
    Scoped { outer: Regex, inner: Regex },
}

struct TitleRule {
    name: &'static str,
    source: TitleSource,
    clean: fn(&str) -> String,
}

static APP_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*Get\s?笔记\s*$").expect("app suffix regex"));

fn clean_heading(raw: &str) -> String {
    collapse_whitespace(&strip_tags(raw))
}

fn clean_document_title(raw: &str) -> String {
    let text = clean_heading(raw);
    APP_SUFFIX_REGEX.replace(&text, "").trim().to_string()
}

fn clean_attribute(raw: &str) -> String {
    raw.trim().to_string()
}

static TITLE_RULES: LazyLock<Vec<TitleRule>> = LazyLock::new(|| {
    let any_heading = || Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").expect("heading regex");

    vec![
        TitleRule {
            name: "title-element",
            source: TitleSource::Element(
                Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("title regex"),
            ),
            clean: clean_document_title,
        },
        TitleRule {
            name: "h1",
            source: TitleSource::Element(
                Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").expect("h1 regex"),
            ),
            clean: clean_heading,
        },
        TitleRule {
            name: "meta-title",
            source: TitleSource::Element(
                Regex::new(&format!(r#"(?is)<meta\s+name\s*=\s*["']title["']\s+{CONTENT_ATTRIBUTE}"#))
                    .expect("meta title regex"),
            ),
            clean: clean_attribute,
        },
        TitleRule {
            name: "header-heading",
            source: TitleSource::Scoped {
                outer: Regex::new(r"(?is)<header\b[^>]*>(.*?)</header\s*>").expect("header regex"),
                inner: any_heading(),
            },
            clean: clean_heading,
        },
        TitleRule {
            name: "any-heading",
            source: TitleSource::Element(any_heading()),
            clean: clean_heading,
        },
    ]
});

/// First participating capture group of the first match.
fn first_capture<'h>(regex: &Regex, haystack: &'h str) -> Option<&'h str> {
    regex
        .captures(haystack)
        .and_then(|caps| caps.iter().skip(1).flatten().next())
        .map(|m| m.as_str())
}

/// `content` attribute value, in either quote style.
const CONTENT_ATTRIBUTE: &str = r#"content\s*=\s*(?:"([^"]*)"|'([^']*)')"#;

/// Extract the note title, or `None` when no rule produces a non-empty value.
///
/// Rules in order: `<title>` (with the ` - Get笔记` suffix removed), first
/// `<h1>`, `<meta name="title">`, first heading inside `<header>`, first
/// heading of any level.
pub fn extract_title(html: &str) -> Option<String> {
    for rule in TITLE_RULES.iter() {
        let raw = match &rule.source {
            TitleSource::Element(regex) => first_capture(regex, html),
            TitleSource::Scoped { outer, inner } => {
                first_capture(outer, html).and_then(|scope| first_capture(inner, scope))
            }
        };

        if let Some(raw) = raw {
            let title = (rule.clean)(raw);
            if !title.is_empty() {
                trace!(rule = rule.name, title = %title, "title matched");
                return Some(title);
            }
        }
    }

    debug!("no title rule matched");
    None
}

// ============================================================================
// Tags
// ============================================================================

const TAG_LABELS: &[&str] = &["标签", "关键词", "tags", "keywords"];

static TAG_LABEL_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TAG_LABELS
        .iter()
        .map(|label| {
            Regex::new(&format!(r"(?i){label}\s*[:：]\s*(.*?)(?:</|\n|$)")).expect("tag label regex")
        })
        .collect()
});

static TAG_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;，；]+").expect("tag split regex"));

static META_KEYWORDS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"(?is)<meta\s+name\s*=\s*["']keywords["']\s+{CONTENT_ATTRIBUTE}"#))
        .expect("meta keywords regex")
});

static KEYWORD_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*").expect("keyword split regex"));

static CLASS_OPEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<[a-z][a-z0-9]*\b[^>]*?\bclass\s*=\s*["']([^"']*)["'][^>]*>"#)
        .expect("class element regex")
});

static TAG_CONTAINER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div\b[^>]*?\bclass\s*=\s*["'][^"']*tags[^"']*["'][^>]*>(.*?)</div\s*>"#)
        .expect("tag container regex")
});

static TAG_SPAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*?\bclass\s*=\s*["']tag["'][^>]*>(.*?)</span\s*>"#)
        .expect("tag span regex")
});

const QUOTE_CHARS: &[char] = &['"', '\'', '“', '”', '‘', '’', '「', '」'];

/// Extract tags from every known source.
///
/// Sources: `标签:`/`关键词:`/`tags:`/`keywords:` labels,
/// `<meta name="keywords">`, elements whose class mentions `tag`,
/// `<span class="tag">` items inside the first tag container, and a
/// [`GETNOTE_TAG`] marker when the document mentions the app. The result has
/// no empty entries and no duplicates.
pub fn extract_tags(html: &str) -> Vec<String> {
    let mut raw = Vec::new();

    for rule in TAG_LABEL_RULES.iter() {
        for caps in rule.captures_iter(html) {
            if let Some(list) = caps.get(1) {
                // Entities go first so their `;` is not taken for a separator.
                let list = strip_entities(list.as_str());
                raw.extend(TAG_SPLIT_REGEX.split(&list).map(str::to_string));
            }
        }
    }

    if let Some(content) = first_capture(&META_KEYWORDS_REGEX, html) {
        raw.extend(KEYWORD_SPLIT_REGEX.split(content).map(str::to_string));
    }

    raw.extend(class_tagged_elements(html));

    if let Some(container) = first_capture(&TAG_CONTAINER_REGEX, html) {
        raw.extend(
            TAG_SPAN_REGEX
                .captures_iter(container)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        );
    }

    if html.contains("Get笔记") || html.contains("Get 笔记") {
        raw.push(GETNOTE_TAG.to_string());
    }

    let mut seen = HashSet::new();
    let tags: Vec<String> = raw
        .iter()
        .filter_map(|candidate| clean_tag(candidate))
        .filter(|tag| seen.insert(tag.clone()))
        .collect();

    trace!(count = tags.len(), "tags extracted");
    tags
}

/// Inner text of elements whose class attribute contains `tag`.
///
/// Each element contributes the text up to the first closing tag after its
/// opening tag, so a container and the items nested inside it are all
/// visited.
fn class_tagged_elements(html: &str) -> Vec<String> {
    CLASS_OPEN_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let (open, class) = (caps.get(0)?, caps.get(1)?);
            if !class.as_str().to_lowercase().contains("tag") {
                return None;
            }

            let rest = &html[open.end()..];
            let inner = rest.find("</").map_or(rest, |end| &rest[..end]);
            Some(inner.to_string())
        })
        .collect()
}

fn clean_tag(raw: &str) -> Option<String> {
    let text = strip_entities_and_symbols(&strip_tags(raw));
    let text = text.trim_matches(QUOTE_CHARS).trim();
    (!text.is_empty()).then(|| text.to_string())
}

// ============================================================================
// Creation time
// ============================================================================

const DATE_HYPHEN: &str = r"(\d{4}-\d{1,2}-\d{1,2}(?:[\sT]+\d{1,2}:\d{1,2}(?::\d{1,2})?)?)";
const DATE_SLASH: &str = r"(\d{4}/\d{1,2}/\d{1,2}(?:\s+\d{1,2}:\d{1,2}(?::\d{1,2})?)?)";
const DATE_EITHER: &str = r"(\d{4}[-/]\d{1,2}[-/]\d{1,2}(?:\s+\d{1,2}:\d{1,2}(?::\d{1,2})?)?)";

/// Separators tolerated between a label and its value: whitespace, colons,
/// `&nbsp;` and inline tags.
const LABEL_GAP: &str = r"(?:[\s:：]|&nbsp;|<[^>]*>)*";

/// Inline labels in priority order; `true` adds a slash-delimited variant.
const INLINE_TIME_LABELS: &[(&str, bool)] = &[
    ("创建于", true),
    ("创建时间", true),
    ("created", true),
    ("发布于", false),
    ("发布时间", false),
    ("published", false),
    ("日期", false),
    ("date", false),
];

const META_TIME_ATTRIBUTES: &[(&str, &str)] = &[
    ("name", "created"),
    ("name", "date"),
    ("name", "published"),
    ("name", "pubdate"),
    ("property", "article:published_time"),
];

struct TimeRule {
    name: String,
    regex: Regex,
}

static TIME_RULES: LazyLock<Vec<TimeRule>> = LazyLock::new(|| {
    let mut rules = Vec::new();

    for (label, with_slash) in INLINE_TIME_LABELS {
        rules.push(TimeRule {
            name: format!("inline:{label}"),
            regex: Regex::new(&format!("(?i){label}{LABEL_GAP}{DATE_HYPHEN}"))
                .expect("inline time regex"),
        });
        if *with_slash {
            rules.push(TimeRule {
                name: format!("inline:{label}:slash"),
                regex: Regex::new(&format!("(?i){label}{LABEL_GAP}{DATE_SLASH}"))
                    .expect("inline slash time regex"),
            });
        }
    }

    for (attribute, value) in META_TIME_ATTRIBUTES {
        rules.push(TimeRule {
            name: format!("meta:{value}"),
            regex: Regex::new(&format!(
                r#"(?is)<meta\s+{attribute}\s*=\s*["']{value}["']\s+content\s*=\s*(?:"([^"]+)"|'([^']+)')"#
            ))
            .expect("meta time regex"),
        });
    }

    rules.push(TimeRule {
        name: "inline:最后修改".to_string(),
        regex: Regex::new(&format!("最后修改{LABEL_GAP}{DATE_EITHER}"))
            .expect("last modified regex"),
    });

    rules
});

/// Extract the creation time. Never fails.
///
/// Labeled inline dates are tried first, then `<meta>` dates, then the
/// last-modified label; the first match is normalized. Without any match the
/// current local time is returned, already in canonical form.
pub fn extract_created_time(html: &str) -> String {
    for rule in TIME_RULES.iter() {
        if let Some(raw) = first_capture(&rule.regex, html) {
            let normalized = normalize(raw);
            trace!(rule = %rule.name, raw = %raw, created = %normalized, "creation time matched");
            return normalized;
        }
    }

    debug!("no creation time found, using current time");
    now_canonical()
}
