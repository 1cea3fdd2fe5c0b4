//! Syntax highlighting for fenced code blocks.

use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::util::escape_html;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Names of the themes bundled with syntect, sorted.
///
/// Loads only the theme set, so configuration can be checked without
/// building a [`SyntaxHighlighter`].
#[must_use]
pub fn bundled_themes() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// Syntax highlighter using syntect.
///
/// Loading the bundled syntax and theme sets is slow, so build one
/// highlighter per process and share it behind an `Arc`.
#[derive(Debug)]
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme: String,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the specified theme.
    ///
    /// Unknown theme names fall back to the first bundled theme. Callers that
    /// take the name from user input check it against [`bundled_themes`].
    #[must_use]
    pub fn new(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme: theme.to_owned(),
        }
    }

    /// Highlight code with the given language token.
    ///
    /// If the language is not recognized, returns the code escaped inside a
    /// `<pre><code class="language-{lang}">` block.
    #[must_use]
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = match lang {
            Some(token) => self.syntax_set.find_syntax_by_token(token),
            None => Some(self.syntax_set.find_syntax_plain_text()),
        };

        let theme = self
            .theme_set
            .themes
            .get(&self.theme)
            .or_else(|| self.theme_set.themes.values().next());

        match (syntax, theme) {
            (Some(syntax), Some(theme)) => {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
                    .unwrap_or_else(|_| fallback_block(code, lang))
            }
            _ => fallback_block(code, lang),
        }
    }
}

/// Plain escaped code block used when highlighting is unavailable.
pub(crate) fn fallback_block(code: &str, lang: Option<&str>) -> String {
    let lang_class = lang
        .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
        .unwrap_or_default();
    format!("<pre><code{lang_class}>{}</code></pre>\n", escape_html(code))
}
