//! HTML page shell.
//!
//! Every HTML response shares one layout: a header with the site title, a
//! sidebar listing the documents and a main content area.

use std::fmt::Write;

use docshelf_renderer::escape_html;
use docshelf_site::NavigationList;

/// Data for rendering one HTML page.
pub(crate) struct LayoutData<'a> {
    /// Site title in the header.
    pub(crate) site_title: &'a str,
    /// Content of the `<title>` element.
    pub(crate) page_title: String,
    /// Content of the description `<meta>` element.
    pub(crate) description: String,
    pub(crate) navigation: &'a NavigationList,
    /// Identifier of the current document (`None` on the home page).
    pub(crate) active: Option<&'a str>,
    /// Inner HTML of the main area.
    pub(crate) content: &'a str,
}

/// `<title>` for a document page.
pub(crate) fn document_title(title: &str, site_title: &str) -> String {
    format!("{title} - {site_title}")
}

/// Default description for a document page.
pub(crate) fn document_description(title: &str) -> String {
    format!("Documentation for {title}")
}

/// Render a complete HTML page.
pub(crate) fn render_layout(data: &LayoutData<'_>) -> String {
    let mut html = String::with_capacity(4096 + data.content.len());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&data.page_title));
    let _ = writeln!(
        html,
        "<meta name=\"description\" content=\"{}\">",
        escape_html(&data.description)
    );
    html.push_str("<link rel=\"stylesheet\" href=\"/static/style.css\">\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header class=\"site-header\">\n");
    let _ = writeln!(
        html,
        "<a href=\"/\" class=\"site-title\">{}</a>",
        escape_html(data.site_title)
    );
    html.push_str("</header>\n");

    html.push_str("<div class=\"layout\">\n");
    render_sidebar(&mut html, data.navigation, data.active);

    html.push_str("<main class=\"content\">\n<article class=\"document\">\n");
    html.push_str(data.content);
    html.push_str("\n</article>\n</main>\n");

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Render the document sidebar.
fn render_sidebar(html: &mut String, navigation: &NavigationList, active: Option<&str>) {
    html.push_str("<aside class=\"sidebar\">\n<h2>Documents</h2>\n<nav>\n<ul>\n");

    push_nav_link(html, "/", "Home", active.is_none());
    for item in navigation {
        push_nav_link(html, &item.href(), &item.id, active == Some(item.id.as_str()));
    }

    html.push_str("</ul>\n</nav>\n</aside>\n");
}

fn push_nav_link(html: &mut String, href: &str, label: &str, is_active: bool) {
    let class = if is_active { " class=\"active\"" } else { "" };
    let _ = writeln!(
        html,
        "<li><a href=\"{}\"{class}>{}</a></li>",
        escape_html(href),
        escape_html(label)
    );
}

/// Main area of the home page.
pub(crate) fn render_home_content(navigation: &NavigationList) -> String {
    let mut html = String::new();
    html.push_str("<h1>Welcome to the Documentation</h1>\n");
    html.push_str("<p>Select a document from the sidebar to view it.</p>\n");
    html.push_str("<h2>Available Documents:</h2>\n");

    if navigation.is_empty() {
        html.push_str("<p class=\"empty\">No documents yet.</p>\n");
        return html;
    }

    html.push_str("<ul class=\"document-list\">\n");
    for item in navigation {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&item.href()),
            escape_html(&item.id)
        );
    }
    html.push_str("</ul>\n");
    html
}

/// Main area of the 404 page.
pub(crate) fn render_not_found_content(path: &str) -> String {
    format!(
        "<h1>Page not found</h1>\n\
         <p>Nothing is published at <code>{}</code>.</p>\n\
         <p><a href=\"/\">Back to the document list</a></p>\n",
        escape_html(path)
    )
}

/// Main area of the 500 page.
pub(crate) fn render_error_content() -> String {
    "<h1>Something went wrong</h1>\n\
     <p>The document could not be read. Try again in a moment.</p>\n"
        .to_owned()
}

#[cfg(test)]
mod tests {
    use docshelf_storage::DocumentFile;

    use super::*;

    fn navigation(names: &[&str]) -> NavigationList {
        NavigationList::from_files(
            names
                .iter()
                .filter_map(|name| DocumentFile::from_file_name(name))
                .collect(),
        )
    }

    fn layout<'a>(nav: &'a NavigationList, active: Option<&'a str>, content: &'a str) -> String {
        render_layout(&LayoutData {
            site_title: "AIML Cookbook",
            page_title: document_title("Intro", "Documentation"),
            description: document_description("Intro"),
            navigation: nav,
            active,
            content,
        })
    }

    #[test]
    fn test_layout_head() {
        let nav = navigation(&[]);
        let html = layout(&nav, None, "<p>x</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Intro - Documentation</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Documentation for Intro\">"));
        assert!(html.contains("<a href=\"/\" class=\"site-title\">AIML Cookbook</a>"));
        assert!(html.contains("<article class=\"document\">\n<p>x</p>\n</article>"));
    }

    #[test]
    fn test_sidebar_marks_active_document() {
        let nav = navigation(&["a.md", "b.html"]);
        let html = layout(&nav, Some("b"), "");

        assert!(html.contains("<h2>Documents</h2>"));
        assert!(html.contains("<li><a href=\"/\">Home</a></li>"));
        assert!(html.contains("<li><a href=\"/docs/a\">a</a></li>"));
        assert!(html.contains("<li><a href=\"/docs/b\" class=\"active\">b</a></li>"));
    }

    #[test]
    fn test_sidebar_marks_home_active() {
        let nav = navigation(&["a.md"]);
        let html = layout(&nav, None, "");

        assert!(html.contains("<li><a href=\"/\" class=\"active\">Home</a></li>"));
    }

    #[test]
    fn test_home_page_home_link_precedes_documents() {
        let nav = navigation(&["a.md"]);
        let html = layout(&nav, None, "");

        let home = html.find(">Home<").unwrap();
        let doc = html.find("/docs/a").unwrap();
        assert!(home < doc);
    }

    #[test]
    fn test_titles_are_escaped() {
        let nav = navigation(&[]);
        let html = render_layout(&LayoutData {
            site_title: "<b>",
            page_title: document_title("a & b", "<b>"),
            description: document_description("\"quoted\""),
            navigation: &nav,
            active: None,
            content: "",
        });

        assert!(html.contains("<title>a &amp; b - &lt;b&gt;</title>"));
        assert!(html.contains("content=\"Documentation for &quot;quoted&quot;\""));
    }

    #[test]
    fn test_home_content_lists_documents() {
        let html = render_home_content(&navigation(&["getting-started.md", "faq.html"]));

        assert!(html.contains("<h1>Welcome to the Documentation</h1>"));
        assert!(html.contains("Select a document from the sidebar to view it."));
        assert!(html.contains("<h2>Available Documents:</h2>"));
        assert!(html.contains("<a href=\"/docs/getting-started\">getting-started</a>"));
        assert!(html.contains("<a href=\"/docs/faq\">faq</a>"));
    }

    #[test]
    fn test_home_content_empty() {
        let html = render_home_content(&navigation(&[]));

        assert!(html.contains("No documents yet."));
        assert!(!html.contains("document-list"));
    }

    #[test]
    fn test_not_found_content_escapes_path() {
        let html = render_not_found_content("/docs/<x>");

        assert!(html.contains("<code>/docs/&lt;x&gt;</code>"));
    }
}
