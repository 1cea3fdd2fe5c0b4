//! Page composition: resolved document plus navigation into a page.

use std::sync::Arc;

use docshelf_renderer::{MarkdownRenderer, escape_html};
use docshelf_storage::DocumentFormat;

use crate::navigation::NavigationList;
use crate::page::{DocumentEntry, PageBody, PageRenderResult, RenderedPage};

/// Combine a resolved document with the navigation list.
///
/// HTML documents are injected verbatim only when `trust_html` is set;
/// otherwise their source is kept for display as escaped text.
#[must_use]
pub fn compose(
    entry: DocumentEntry,
    navigation: Arc<NavigationList>,
    trust_html: bool,
) -> RenderedPage {
    let title = entry.title().to_owned();
    let body = match entry.format {
        DocumentFormat::Markdown => PageBody::Markdown(entry.body),
        DocumentFormat::Html if trust_html => PageBody::TrustedHtml(entry.body),
        DocumentFormat::Html => {
            tracing::warn!(
                document = %entry.source_path,
                "HTML document shown as source; enable trust_html to render it"
            );
            PageBody::UntrustedHtml(entry.body)
        }
    };

    RenderedPage {
        id: entry.id,
        title,
        description: entry.metadata.description.clone(),
        format: entry.format,
        body,
        metadata: entry.metadata,
        navigation,
        source_path: entry.source_path,
        source_mtime: entry.mtime,
    }
}

/// Produce the displayable HTML for a composed page.
#[must_use]
pub fn render_page(page: RenderedPage, renderer: &MarkdownRenderer) -> PageRenderResult {
    let (html, toc) = match &page.body {
        PageBody::Markdown(markdown) => {
            let result = renderer.render(markdown);
            (result.html, result.toc)
        }
        PageBody::TrustedHtml(html) => (html.clone(), Vec::new()),
        PageBody::UntrustedHtml(html) => (
            format!(
                "<pre class=\"html-source\"><code>{}</code></pre>\n",
                escape_html(html)
            ),
            Vec::new(),
        ),
    };

    PageRenderResult { page, html, toc }
}
