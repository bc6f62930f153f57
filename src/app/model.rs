use std::time::{Duration, Instant};

use ratatui::text::Line;

use crate::editor::{EditorSlot, LoadResult};
use crate::markdown::{self, TrustedHtml};
use crate::ui::style::Theme;
use crate::ui::viewport::Viewport;
use crate::ui::{HEADER_ROWS, html, preview_content_width};

const TOAST_DURATION: Duration = Duration::from_secs(4);

/// What the content area shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Preview,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Preview lines laid out for one width and theme.
#[derive(Debug)]
struct PreviewLayout {
    width: u16,
    theme: Theme,
    lines: Vec<Line<'static>>,
}

/// The complete state of the block.
///
/// The document text lives here and only here. The editor is a controlled
/// input that gets the text mounted into it and reports every change back
/// through [`super::Message::EditText`].
#[derive(Debug)]
pub struct Model {
    text: String,
    pub mode: Mode,
    pub editor: EditorSlot,
    /// `render(text)`, dropped whenever the text changes.
    preview: Option<TrustedHtml>,
    layout: Option<PreviewLayout>,
    pub viewport: Viewport,
    toast: Option<Toast>,
    pub should_quit: bool,
    pub line_numbers: bool,
    pub theme: Theme,
}

impl Model {
    /// Create a model showing `text` in preview mode.
    pub fn new(text: impl Into<String>, terminal_size: (u16, u16)) -> Self {
        let (width, height) = terminal_size;
        Self {
            text: text.into(),
            mode: Mode::Preview,
            editor: EditorSlot::NotLoaded,
            preview: None,
            layout: None,
            viewport: Viewport::new(width, content_rows(height), 0),
            toast: None,
            should_quit: false,
            line_numbers: true,
            theme: Theme::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the document text. Any string is accepted.
    ///
    /// In edit mode the editor is remounted so it shows the new text; text
    /// that came from the editor itself is already there and is left alone.
    pub fn set_text(&mut self, text: String) {
        if text == self.text {
            return;
        }
        self.text = text;
        self.preview = None;
        self.layout = None;
        if self.mode == Mode::Edit {
            self.mount_editor();
        }
    }

    /// Rendered markup for the current text.
    pub fn preview_html(&mut self) -> &TrustedHtml {
        self.preview
            .get_or_insert_with(|| markdown::render(&self.text))
    }

    /// Lay out the preview for the current width and theme if needed and
    /// size the viewport to it.
    pub fn sync_preview_layout(&mut self) {
        let width = preview_content_width(self.viewport.width());
        let theme = self.theme;
        if self
            .layout
            .as_ref()
            .is_some_and(|layout| layout.width == width && layout.theme == theme)
        {
            return;
        }
        let started = Instant::now();
        let lines = html::layout(self.preview_html(), width, theme);
        tracing::debug!(
            width,
            lines = lines.len(),
            elapsed_us = started.elapsed().as_micros(),
            "preview laid out"
        );
        self.viewport.set_total_lines(lines.len());
        self.layout = Some(PreviewLayout {
            width,
            theme,
            lines,
        });
    }

    /// Lines from the last [`Self::sync_preview_layout`].
    pub fn preview_lines(&self) -> &[Line<'static>] {
        self.layout
            .as_ref()
            .map_or(&[], |layout| layout.lines.as_slice())
    }

    /// Rows available to the preview or the editor.
    pub const fn content_height(&self) -> usize {
        self.viewport.height() as usize
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, content_rows(height));
        let rows = self.content_height();
        if let Some(editor) = self.editor.editor_mut() {
            editor.set_viewport_height(rows);
        }
    }

    /// Mark the editor as loading if it is not loaded yet or the last load
    /// failed. Returns whether a load should be started.
    pub fn begin_editor_load(&mut self) -> bool {
        if !self.editor.needs_load() {
            return false;
        }
        self.editor = EditorSlot::Loading;
        true
    }

    /// Store the outcome of an editor load.
    ///
    /// A failure leaves the text alone; the next switch to edit mode tries
    /// again.
    pub fn finish_editor_load(&mut self, result: LoadResult) {
        match result {
            Ok(mut editor) => {
                editor.set_viewport_height(self.content_height());
                if self.mode == Mode::Edit {
                    editor.mount(&self.text);
                }
                self.editor = EditorSlot::Ready(editor);
                self.show_toast(ToastLevel::Info, "Editor ready");
            }
            Err(err) => {
                self.show_toast(ToastLevel::Error, format!("Editor unavailable: {err}"));
                self.editor = EditorSlot::Failed(err);
            }
        }
    }

    /// Hand the current text to the editor, if there is one.
    pub fn mount_editor(&mut self) {
        if let Some(editor) = self.editor.editor_mut() {
            editor.mount(&self.text);
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// Terminal rows left once the header and status bar are drawn.
const fn content_rows(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(HEADER_ROWS + 1)
}

impl Default for Model {
    fn default() -> Self {
        Self::new(crate::DEFAULT_DOCUMENT, (80, 24))
    }
}
