//! Markdown to HTML rendering.
//!
//! The renderer runs comrak with a fixed configuration:
//! - raw HTML in the source is escaped, never passed through
//! - void elements are written in HTML5 form (`<br>`, not `<br />`)
//! - bare URLs become links
//! - quotes, dashes, ellipses and a few symbols get typographic forms
//!
//! Output is wrapped in [`TrustedHtml`]. Its constructor is private to this
//! module, so any markup the UI injects has come through [`render`].

mod typography;

use std::fmt;
use std::time::Instant;

use comrak::{Arena, Options, format_html, parse_document};

/// HTML produced by the markdown renderer.
///
/// Cannot be built from arbitrary strings; the only way to obtain one is
/// [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// The markup as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the markup.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the renderer produced no markup at all.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrustedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render markdown source to HTML.
///
/// Never fails: malformed markdown degrades to literal text.
///
/// # Example
///
/// ```
/// use markblock::markdown::render;
///
/// let html = render("# Hello");
/// assert_eq!(html.as_str().trim(), "<h1>Hello</h1>");
/// ```
pub fn render(source: &str) -> TrustedHtml {
    let started = Instant::now();
    let arena = Arena::new();
    let mut options = Options::default();
    configure(&mut options);

    let root = parse_document(&arena, source, &options);
    typography::replace_symbols(root);

    let mut out = Vec::with_capacity(source.len() * 2);
    if let Err(err) = format_html(root, &options, &mut out) {
        // Writing into a Vec cannot fail; keep whatever was produced.
        tracing::warn!(%err, "markdown formatting stopped early");
    }
    let html = html5_void_elements(&String::from_utf8_lossy(&out));

    tracing::debug!(
        source_bytes = source.len(),
        html_bytes = html.len(),
        elapsed_us = started.elapsed().as_micros(),
        "rendered markdown"
    );
    TrustedHtml(html)
}

fn configure(options: &mut Options) {
    // Raw HTML shows up as escaped text instead of markup.
    options.render.unsafe_ = false;
    options.render.escape = true;

    // Bare URLs and www. hosts become links.
    options.extension.autolink = true;

    // Curly quotes, en/em dashes, ellipses.
    options.parse.smart = true;

    options.extension.table = true;
    options.extension.strikethrough = true;
}

/// Rewrite XHTML-style void elements (`<br />`) to HTML5 form (`<br>`).
///
/// Text and attribute values always have `>` escaped, so every ` />` in the
/// output closes a tag.
fn html5_void_elements(html: &str) -> String {
    html.replace(" />", ">")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_source_is_empty() {
        let html = render("");
        assert!(html.is_empty(), "got: {html}");
    }

    #[test]
    fn test_render_heading() {
        let html = render("# Hello");
        assert_eq!(html.as_str().trim(), "<h1>Hello</h1>");
    }

    #[test]
    fn test_render_script_block_is_escaped() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.as_str().contains("<script"), "got: {html}");
        assert!(
            html.as_str().contains("&lt;script&gt;alert(1)&lt;/script&gt;"),
            "literal tag text should be kept, got: {html}"
        );
    }

    #[test]
    fn test_render_inline_html_is_escaped() {
        let html = render("Hello <b>there</b>");
        assert!(!html.as_str().contains("<b>"), "got: {html}");
        assert!(html.as_str().contains("&lt;b&gt;there&lt;/b&gt;"), "got: {html}");
    }

    #[test]
    fn test_render_autolinks_bare_url() {
        let html = render("Visit https://example.com now");
        assert!(
            html.as_str()
                .contains("<a href=\"https://example.com\">https://example.com</a>"),
            "got: {html}"
        );
    }

    #[test]
    fn test_render_autolinks_www_host() {
        let html = render("See www.example.com for details");
        assert!(
            html.as_str().contains("<a href=\"http://www.example.com\">"),
            "got: {html}"
        );
    }

    #[test]
    fn test_render_smart_quotes_and_dashes() {
        let html = render("\"quoted\" -- and --- done...");
        let out = html.as_str();
        assert!(out.contains('\u{201c}') && out.contains('\u{201d}'), "got: {out}");
        assert!(out.contains('\u{2013}'), "en dash missing: {out}");
        assert!(out.contains('\u{2014}'), "em dash missing: {out}");
        assert!(out.contains('\u{2026}'), "ellipsis missing: {out}");
    }

    #[test]
    fn test_render_uses_html5_void_elements() {
        let html = render("first  \nsecond\n\n***\n");
        let out = html.as_str();
        assert!(out.contains("<br>"), "got: {out}");
        assert!(out.contains("<hr>"), "got: {out}");
        assert!(!out.contains(" />"), "got: {out}");
    }

    #[test]
    fn test_render_symbol_replacements() {
        let html = render("Copyright (c) 2024 Acme(tm)");
        assert!(html.as_str().contains("Copyright \u{a9} 2024 Acme\u{2122}"), "got: {html}");
    }

    #[test]
    fn test_render_symbols_untouched_in_code() {
        let html = render("`(c)` and\n\n```\n(c) -- \"x\"\n```\n");
        let out = html.as_str();
        assert!(out.contains("<code>(c)</code>"), "got: {out}");
        assert!(out.contains("(c) -- &quot;x&quot;"), "got: {out}");
    }

    #[test]
    fn test_render_special_characters_are_escaped_text() {
        let html = render("1 < 2 > 0 & done");
        assert!(html.as_str().contains("1 &lt; 2 &gt; 0 &amp; done"), "got: {html}");
    }

    #[test]
    fn test_render_unclosed_emphasis_degrades_to_text() {
        let html = render("**not closed and `tick");
        assert!(html.as_str().contains("**not closed and `tick"), "got: {html}");
    }

    #[test]
    fn test_render_tables_and_strikethrough() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        let out = html.as_str();
        assert!(out.contains("<table>"), "got: {out}");
        assert!(out.contains("<del>gone</del>"), "got: {out}");
    }
}
