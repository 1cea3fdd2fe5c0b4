//! Markdown renderer built on pulldown-cmark.

use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::highlight::{SyntaxHighlighter, fallback_block};
use crate::toc::{AnchorGenerator, TocEntry};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Table of contents entries (levels 2-6).
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with GFM extensions and optional code highlighting.
///
/// The renderer is immutable after construction and cheap to clone, so one
/// instance can serve every request.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    highlighter: Option<Arc<SyntaxHighlighter>>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fenced code block being collected.
struct OpenCodeBlock {
    lang: Option<String>,
    text: String,
}

/// Heading being collected; `start` indexes its `Start` event.
struct OpenHeading {
    start: usize,
    level: u8,
    text: String,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled and no highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Highlight fenced code blocks with the given highlighter.
    ///
    /// Without a highlighter, code blocks are emitted as escaped
    /// `<pre><code class="language-x">` blocks.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Arc<SyntaxHighlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Parser options: tables, strikethrough (`~~text~~`), task lists,
    /// footnotes and blockquote alerts (`> [!NOTE]`).
    fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_GFM
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, Self::parser_options());

        let mut events: Vec<Event<'_>> = Vec::new();
        let mut toc = Vec::new();
        let mut anchors = AnchorGenerator::default();
        let mut code: Option<OpenCodeBlock> = None;
        let mut heading: Option<OpenHeading> = None;

        for event in parser {
            if let Some(block) = code.as_mut() {
                match event {
                    Event::Text(text) => block.text.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(block) = code.take() {
                            events.push(Event::Html(CowStr::from(self.render_code_block(&block))));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code = Some(OpenCodeBlock {
                        lang: fence_language(&kind),
                        text: String::new(),
                    });
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some(OpenHeading {
                        start: events.len(),
                        level: heading_level_to_num(level),
                        text: String::new(),
                    });
                    events.push(event);
                }
                Event::Text(ref text) | Event::Code(ref text) => {
                    if let Some(open) = heading.as_mut() {
                        open.text.push_str(text);
                    }
                    events.push(event);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(open) = heading.take() {
                        let anchor = anchors.anchor(&open.text);
                        if let Some(Event::Start(Tag::Heading { id, .. })) =
                            events.get_mut(open.start)
                        {
                            *id = Some(CowStr::from(anchor.clone()));
                        }
                        if open.level >= 2 {
                            toc.push(TocEntry {
                                level: open.level,
                                title: open.text.trim().to_owned(),
                                id: anchor,
                            });
                        }
                    }
                    events.push(event);
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderResult { html, toc }
    }

    fn render_code_block(&self, block: &OpenCodeBlock) -> String {
        let lang = block.lang.as_deref();
        match &self.highlighter {
            Some(highlighter) => highlighter.highlight(&block.text, lang),
            None => fallback_block(&block.text, lang),
        }
    }
}

/// First token of a fence info string (` ```rust,ignore ` yields `rust`).
fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_owned),
        CodeBlockKind::Indented => None,
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
