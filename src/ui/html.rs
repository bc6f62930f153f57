//! Terminal layout for rendered preview markup.
//!
//! The preview is the HTML produced by [`crate::markdown::render`]. This
//! module walks that markup and turns it into styled, wrapped ratatui lines.
//! It only understands the subset of HTML the renderer emits; unknown tags
//! are skipped and their text is kept.

use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::style::Theme;
use crate::markdown::TrustedHtml;

const BULLETS: [&str; 3] = ["• ", "◦ ", "▪ "];
const QUOTE_BAR: &str = "│ ";
const TAB_AS_SPACES: &str = "    ";

/// Lay out rendered markup for a content area `width` columns wide.
pub fn layout(html: &TrustedHtml, width: u16, theme: Theme) -> Vec<Line<'static>> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html.as_str());
    let mut builder = LineBuilder::new(usize::from(width).max(1), theme);
    builder.walk(&dom.document);
    builder.finish()
}

fn get_attr<'a>(attrs: &'a [Attribute], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| &*attr.name.local == key)
        .map(|attr| &*attr.value)
}

fn heading_level(name: &str) -> Option<u8> {
    name.strip_prefix('h')
        .and_then(|level| level.parse().ok())
        .filter(|level| (1..=6).contains(level))
}

enum Prefix {
    Quote,
    /// List item; the marker is drawn on its first line only.
    Item { marker: String, shown: bool },
}

impl Prefix {
    fn width(&self) -> usize {
        match self {
            Self::Quote => QUOTE_BAR.width(),
            Self::Item { marker, .. } => marker.width(),
        }
    }
}

enum List {
    Bullet,
    Ordered(usize),
}

struct Link {
    href: String,
    text: String,
}

struct LineBuilder {
    width: usize,
    theme: Theme,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    /// Prefix spans for the current line are in place.
    started: bool,
    /// Columns used on the current line, not counting prefixes.
    line_width: usize,
    pending_space: bool,
    last_blank: bool,
    styles: Vec<Style>,
    prefixes: Vec<Prefix>,
    lists: Vec<List>,
    link: Option<Link>,
    cell: usize,
    pre: bool,
}

impl LineBuilder {
    fn new(width: usize, theme: Theme) -> Self {
        Self {
            width,
            theme,
            lines: Vec::new(),
            spans: Vec::new(),
            started: false,
            line_width: 0,
            pending_space: false,
            last_blank: false,
            styles: vec![Style::new()],
            prefixes: Vec::new(),
            lists: Vec::new(),
            link: None,
            cell: 0,
            pre: false,
        }
    }

    fn walk(&mut self, node: &Handle) {
        match &node.data {
            NodeData::Element { name, attrs, .. } => {
                let name = &*name.local;
                self.open(name, &attrs.borrow());
                for child in node.children.borrow().iter() {
                    self.walk(child);
                }
                self.close(name);
            }
            NodeData::Text { contents } => self.text(&contents.borrow()),
            _ => {
                for child in node.children.borrow().iter() {
                    self.walk(child);
                }
            }
        }
    }

    fn open(&mut self, name: &str, attrs: &[Attribute]) {
        if let Some(level) = heading_level(name) {
            self.start_block();
            self.push_style(self.theme.heading(level));
            return;
        }
        match name {
            "p" | "table" => self.start_block(),
            "blockquote" => {
                self.start_block();
                self.prefixes.push(Prefix::Quote);
                self.push_style(self.theme.quote());
            }
            "ul" => {
                self.open_list();
                self.lists.push(List::Bullet);
            }
            "ol" => {
                let start = get_attr(attrs, "start")
                    .and_then(|start| start.parse().ok())
                    .unwrap_or(1);
                self.open_list();
                self.lists.push(List::Ordered(start));
            }
            "li" => {
                self.flush();
                let marker = self.next_marker();
                self.prefixes.push(Prefix::Item {
                    marker,
                    shown: false,
                });
            }
            "pre" => {
                self.start_block();
                self.pre = true;
                self.push_style(self.theme.code());
            }
            "code" => self.push_style(self.theme.code()),
            "em" => self.push_style(Style::new().add_modifier(Modifier::ITALIC)),
            "strong" | "th" => self.push_style(Style::new().add_modifier(Modifier::BOLD)),
            "del" => self.push_style(Style::new().add_modifier(Modifier::CROSSED_OUT)),
            "a" => {
                self.push_style(self.theme.link());
                self.link = Some(Link {
                    href: get_attr(attrs, "href").unwrap_or_default().to_string(),
                    text: String::new(),
                });
            }
            "img" => {
                let alt = get_attr(attrs, "alt").unwrap_or_default();
                let label = if alt.is_empty() {
                    "[image]".to_string()
                } else {
                    format!("[image: {alt}]")
                };
                self.words(&label, self.theme.decoration());
            }
            "br" => self.break_line(),
            "hr" => {
                self.start_block();
                let rule = "─".repeat(self.available());
                self.append(&rule, self.theme.decoration());
                self.flush();
            }
            "tr" => {
                self.flush();
                self.cell = 0;
            }
            "td" => self.push_style(Style::new()),
            _ => {}
        }
        if matches!(name, "th" | "td") {
            if self.cell > 0 {
                self.pending_space = true;
                self.push_word("│", self.theme.decoration());
                self.pending_space = true;
            }
            self.cell += 1;
        }
    }

    fn close(&mut self, name: &str) {
        if heading_level(name).is_some() {
            self.flush();
            self.pop_style();
            return;
        }
        match name {
            "p" | "table" | "tr" => self.flush(),
            "blockquote" => {
                self.flush();
                self.prefixes.pop();
                self.pop_style();
            }
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
            }
            "li" => {
                self.flush();
                self.prefixes.pop();
            }
            "pre" => {
                self.flush();
                self.pre = false;
                self.pop_style();
            }
            "code" | "em" | "strong" | "del" | "th" | "td" => self.pop_style(),
            "a" => {
                self.pop_style();
                if let Some(link) = self.link.take() {
                    self.link_target(&link);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(link) = &mut self.link {
            link.text.push_str(text);
        }
        let style = self.style();
        if self.pre {
            let text = text.replace('\t', TAB_AS_SPACES);
            for (i, segment) in text.split('\n').enumerate() {
                if i > 0 {
                    self.break_line();
                }
                self.push_chars(segment, style);
            }
        } else {
            self.words(text, style);
        }
    }

    /// Show where a link goes unless its text already says so.
    fn link_target(&mut self, link: &Link) {
        let text = link.text.trim();
        if link.href.is_empty() || (!text.is_empty() && link.href.ends_with(text)) {
            return;
        }
        self.pending_space = true;
        self.push_word(&format!("({})", link.href), self.theme.decoration());
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        if self.last_blank {
            self.lines.pop();
        }
        self.lines
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, style: Style) {
        let combined = self.style().patch(style);
        self.styles.push(combined);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn open_list(&mut self) {
        if self.lists.is_empty() {
            self.start_block();
        } else {
            self.flush();
        }
    }

    fn next_marker(&mut self) -> String {
        let depth = self.lists.len().saturating_sub(1);
        match self.lists.last_mut() {
            Some(List::Ordered(next)) => {
                let marker = format!("{next}. ");
                *next += 1;
                marker
            }
            Some(List::Bullet) | None => BULLETS[depth % BULLETS.len()].to_string(),
        }
    }

    fn start_block(&mut self) {
        self.flush();
        if !self.lines.is_empty() && !self.last_blank {
            let spans = self
                .prefixes
                .iter()
                .map(|prefix| match prefix {
                    Prefix::Quote => Span::styled(QUOTE_BAR, self.theme.decoration()),
                    Prefix::Item { .. } => Span::raw(" ".repeat(prefix.width())),
                })
                .collect::<Vec<_>>();
            self.lines.push(Line::from(spans));
            self.last_blank = true;
        }
    }

    fn available(&self) -> usize {
        let prefix: usize = self.prefixes.iter().map(Prefix::width).sum();
        self.width.saturating_sub(prefix).max(1)
    }

    fn begin_line(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let decoration = self.theme.decoration();
        for prefix in &mut self.prefixes {
            let text = match prefix {
                Prefix::Quote => QUOTE_BAR.to_string(),
                Prefix::Item { marker, shown } => {
                    if *shown {
                        " ".repeat(marker.width())
                    } else {
                        *shown = true;
                        marker.clone()
                    }
                }
            };
            self.spans.push(Span::styled(text, decoration));
        }
    }

    fn emit(&mut self) {
        self.begin_line();
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
        self.started = false;
        self.line_width = 0;
        self.pending_space = false;
        self.last_blank = false;
    }

    fn flush(&mut self) {
        if self.started {
            self.emit();
        }
        self.pending_space = false;
    }

    fn break_line(&mut self) {
        self.emit();
    }

    fn append(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        self.begin_line();
        self.spans.push(Span::styled(text.to_string(), style));
        self.line_width += text.width();
    }

    fn words(&mut self, text: &str, style: Style) {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                self.pending_space = true;
            }
            self.push_word(word, style);
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn push_word(&mut self, word: &str, style: Style) {
        let width = word.width();
        let available = self.available();
        let space = usize::from(self.pending_space && self.line_width > 0);
        if self.line_width > 0 && self.line_width + space + width > available {
            self.emit();
        }
        if self.pending_space && self.line_width > 0 {
            self.append(" ", self.style());
        }
        self.pending_space = false;
        if width <= available {
            self.append(word, style);
        } else {
            self.push_chars(word, style);
        }
    }

    /// Append text as-is, breaking between characters when the line is full.
    fn push_chars(&mut self, text: &str, style: Style) {
        let available = self.available();
        let mut chunk = String::new();
        let mut chunk_width = 0;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            let used = self.line_width + chunk_width;
            if used > 0 && used + width > available {
                self.append(&chunk, style);
                chunk.clear();
                chunk_width = 0;
                self.emit();
            }
            chunk.push(ch);
            chunk_width += width;
        }
        self.append(&chunk, style);
    }
}
