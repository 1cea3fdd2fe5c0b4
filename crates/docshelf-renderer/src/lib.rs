//! Markdown rendering for docshelf.
//!
//! This crate is the markdown collaborator of the site: it takes raw markdown
//! text and returns displayable HTML. It never parses front matter and never
//! decides whether content is trusted; callers hand it markdown bodies only.
//!
//! # Features
//!
//! - GitHub Flavored Markdown extensions (tables, strikethrough, task lists,
//!   footnotes, blockquote alerts) through pulldown-cmark
//! - Fenced code block highlighting through [`SyntaxHighlighter`] (syntect)
//! - Heading anchors and a table of contents ([`TocEntry`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use docshelf_renderer::{MarkdownRenderer, SyntaxHighlighter};
//!
//! let renderer = MarkdownRenderer::new()
//!     .with_highlighter(Arc::new(SyntaxHighlighter::default()));
//! let result = renderer.render("## Usage\n\n~~old~~ new");
//!
//! assert!(result.html.contains("<del>old</del>"));
//! assert_eq!(result.toc[0].id, "usage");
//! ```

mod highlight;
mod renderer;
mod toc;
mod util;

pub use highlight::{DEFAULT_THEME, SyntaxHighlighter, bundled_themes};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use toc::TocEntry;
pub use util::escape_html;
