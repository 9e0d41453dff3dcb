//! Low-level string cleanup shared by the extractors and the Markdown cleanup.

use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("tag regex"));

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[a-zA-Z][a-zA-Z0-9]*|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("entity regex")
});

/// Characters that show up when a tag is cut out of markup imperfectly.
static SYMBOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>\[\]{}|"'`=“”‘’]"#).expect("symbol regex"));

/// Attribute and class-marker fragments left over from half-stripped markup.
static LEAKED_MARKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bclass\s*=|\bspan\b|\btag\b").expect("leaked markup regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

static EMOJI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{1F000}-\x{1F2FF}\x{1F300}-\x{1F5FF}\x{1F600}-\x{1F64F}\x{1F680}-\x{1F6FF}\x{1F900}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B00}-\x{2BFF}\x{FE00}-\x{FE0F}\x{200D}]",
    )
    .expect("emoji regex")
});

static PUNCTUATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation regex"));

/// Remove every `<...>` span. Nesting is not balanced or validated.
pub fn strip_tags(html: &str) -> String {
    TAG_REGEX.replace_all(html, "").into_owned()
}

/// Remove HTML entities such as `&nbsp;` or `&#39;`.
pub fn strip_entities(text: &str) -> String {
    ENTITY_REGEX.replace_all(text, "").into_owned()
}

/// Remove HTML entities, stray markup symbols and leaked attribute fragments,
/// then collapse whitespace and trim.
pub fn strip_entities_and_symbols(text: &str) -> String {
    let text = ENTITY_REGEX.replace_all(text, "");
    let text = LEAKED_MARKUP_REGEX.replace_all(&text, "");
    let text = SYMBOL_REGEX.replace_all(&text, "");
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

fn similarity_key(text: &str) -> String {
    let text = EMOJI_REGEX.replace_all(text, "");
    let text = PUNCTUATION_REGEX.replace_all(&text, "");
    WHITESPACE_REGEX.replace_all(&text, "").to_lowercase()
}

/// Fuzzy comparison used to spot a title rendered twice.
///
/// Both sides drop emoji, punctuation and whitespace and are lowercased; the
/// spans are similar when the keys are equal or one contains the other. A
/// side that normalizes to nothing is never similar to anything.
pub fn are_similar(a: &str, b: &str) -> bool {
    let a = similarity_key(a);
    let b = similarity_key(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a == b || a.contains(&b) || b.contains(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_removes_all_spans() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("a <br/> b"), "a  b");
    }

    #[test]
    fn test_strip_tags_does_not_balance() {
        assert_eq!(strip_tags("<div><span>x</div>"), "x");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn test_strip_entities_and_symbols() {
        assert_eq!(strip_entities_and_symbols("&nbsp;rust&amp;go&#39;"), "rustgo");
        assert_eq!(strip_entities_and_symbols("  [\"alpha\"]  "), "alpha");
        assert_eq!(strip_entities_and_symbols("class=\"tag\">读书"), "读书");
        assert_eq!(strip_entities_and_symbols("a \n\t b"), "a b");
    }

    #[test]
    fn test_leaked_markup_keeps_words_containing_markers() {
        assert_eq!(strip_entities_and_symbols("vintage spanner"), "vintage spanner");
        assert_eq!(strip_entities_and_symbols("span tag"), "");
    }

    #[test]
    fn test_are_similar() {
        assert!(are_similar("Hello, World!", "hello world"));
        assert!(!are_similar("abc", "xyz"));
    }

    #[test]
    fn test_are_similar_ignores_emoji_and_containment() {
        assert!(are_similar("📚 读书笔记", "读书笔记"));
        assert!(are_similar("Weekly review: March", "weekly review"));
    }

    #[test]
    fn test_are_similar_rejects_empty_keys() {
        assert!(!are_similar("---", "Title"));
        assert!(!are_similar("", ""));
    }
}
