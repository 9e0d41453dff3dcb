//! End-to-end tests for the text pipeline over realistic export markup.
//!
//! The HTML→Markdown step lives in the pipeline crate, so these tests feed
//! the Markdown a converter would produce for the same document.

use getnote_parser::{
    cleanup, compose, extract_metadata, strip_metadata_lines, GETNOTE_TAG,
};

const SAMPLE_HTML: &str = "<html><head><title>Foo - Get笔记</title></head><body><h1>Foo</h1><p>标签: alpha, beta</p><p>创建于: 2023-03-03 12:00:00</p></body></html>";

const SAMPLE_MARKDOWN: &str = "# Foo\n\n标签: alpha, beta\n\n创建于: 2023-03-03 12:00:00";

fn front_matter(document: &str) -> serde_yaml::Value {
    let rest = document.strip_prefix("---\n").expect("opening delimiter");
    let end = rest.find("\n---\n").expect("closing delimiter");
    serde_yaml::from_str(&rest[..end]).expect("front matter is valid YAML")
}

#[test]
fn test_sample_document_end_to_end() {
    let meta = extract_metadata(SAMPLE_HTML);
    assert_eq!(meta.title.as_deref(), Some("Foo"));
    assert_eq!(meta.tags, vec!["alpha", "beta", GETNOTE_TAG]);

    let body = strip_metadata_lines(&cleanup(SAMPLE_MARKDOWN));
    let document = compose(&body, "Foo", &meta.tags, meta.created.as_deref());

    assert!(document.contains("title: Foo\n"));
    assert!(document.contains("created: 2023-03-03 12:00:00\n"));
    assert!(document.contains("tags:\n  - alpha\n  - beta\n  - Get笔记\n"));
    assert!(!document.contains("标签:"));
    assert!(!document.contains("创建于:"));
    assert!(document.ends_with("---\n\n# Foo\n"));

    let yaml = front_matter(&document);
    assert_eq!(yaml["title"].as_str(), Some("Foo"));
    assert_eq!(yaml["tags"].as_sequence().map(Vec::len), Some(3));
}

#[test]
fn test_export_with_scripts_and_duplicate_title() {
    let html = r#"<html><head>
<meta name="keywords" content="阅读, 笔记">
<meta name="created" content="2024-02-29T21:15:00">
</head><body>
<header><h2>📚 本周读书</h2></header>
<div class="note-tags"><span class="tag">阅读</span><span class="tag">习惯</span></div>
</body></html>"#;

    let meta = extract_metadata(html);
    assert_eq!(meta.title.as_deref(), Some("📚 本周读书"));
    assert_eq!(meta.created.as_deref(), Some("2024-02-29 21:15:00"));
    assert_eq!(meta.tags, vec!["阅读", "笔记", "习惯"]);

    let markdown = "本周读书\n\n# 📚 本周读书\n\n正文第一段\n\nwindow.addEventListener('load', boot);\nfunction boot() { render(); }\n\n\n\n<span>结尾</span>\nboot();";
    let body = cleanup(markdown);

    assert_eq!(body, "# 📚 本周读书\n\n正文第一段\n\n结尾\n");
}

#[test]
fn test_metadata_lines_in_lists_and_quotes_are_stripped() {
    let markdown = "# Trip\n\n> 创建时间：2022/10/1 9:30\n\n- Tags: travel\n\nWe left at dawn.\n";
    assert_eq!(strip_metadata_lines(markdown), "# Trip\n\nWe left at dawn.\n");
}

#[test]
fn test_document_without_metadata() {
    let html = "<p>Loose paragraph with no headings</p>";
    let meta = extract_metadata(html);

    assert_eq!(meta.title, None);
    assert!(meta.tags.is_empty());
    assert!(meta.created.is_some());

    let document = compose("Loose paragraph with no headings\n", "untitled", &meta.tags, None);
    assert_eq!(
        document,
        "---\ntitle: untitled\n---\n\nLoose paragraph with no headings\n"
    );
}
