use crate::error::{ImportError, ImportResult};
use htmd::options::{CodeBlockStyle, HeadingStyle, Options};
use htmd::HtmlToMarkdown;

/// Elements whose content never belongs in a note body
const SKIPPED_TAGS: &[&str] = &["script", "style", "head"];

/// HTML → Markdown conversion, treated as a black box
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, html: &str) -> ImportResult<String>;
}

/// [`MarkdownConverter`] backed by `htmd`, with ATX headings and fenced code
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmdConverter;

impl HtmdConverter {
    pub fn new() -> Self {
        Self
    }

    fn build(&self) -> HtmlToMarkdown {
        HtmlToMarkdown::builder()
            .options(Options {
                heading_style: HeadingStyle::Atx,
                code_block_style: CodeBlockStyle::Fenced,
                ..Default::default()
            })
            .skip_tags(SKIPPED_TAGS.to_vec())
            .build()
    }
}

impl MarkdownConverter for HtmdConverter {
    fn convert(&self, html: &str) -> ImportResult<String> {
        self.build()
            .convert(html)
            .map_err(|e| ImportError::conversion(format!("htmd conversion failed: {e}")))
    }
}
