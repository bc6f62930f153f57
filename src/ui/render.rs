use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{Mode, Model};
use crate::editor::{EditorSlot, TextEditor};

use super::{DOCUMENT_LEFT_PADDING, HEADER_ROWS, status};

/// The two mode-switch controls in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderControl {
    Preview,
    Edit,
}

impl HeaderControl {
    pub const ALL: [Self; 2] = [Self::Preview, Self::Edit];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Edit => "Edit File",
        }
    }

    /// The mode this control switches to.
    pub const fn mode(self) -> Mode {
        match self {
            Self::Preview => Mode::Preview,
            Self::Edit => Mode::Edit,
        }
    }

    fn cell(self) -> String {
        format!(" {} ", self.label())
    }
}

/// Which header control, if any, sits at a terminal cell.
pub fn header_control_at(column: u16, row: u16) -> Option<HeaderControl> {
    if row >= HEADER_ROWS {
        return None;
    }
    let mut start = 0usize;
    for control in HeaderControl::ALL {
        let end = start + control.cell().width();
        if (start..end).contains(&usize::from(column)) {
            return Some(control);
        }
        start = end;
    }
    None
}

/// Width available to preview text in a terminal `total_width` columns wide.
pub const fn preview_content_width(total_width: u16) -> u16 {
    let width = total_width.saturating_sub(DOCUMENT_LEFT_PADDING);
    if width == 0 { 1 } else { width }
}

/// Columns taken by the editor's line-number gutter, separator included.
pub fn editor_gutter_width(model: &Model) -> u16 {
    if !model.line_numbers {
        return 0;
    }
    let total = model.editor.editor().map_or(1, TextEditor::line_count);
    line_number_width(total) + 1
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let header_area = Rect {
        height: HEADER_ROWS.min(area.height),
        ..area
    };
    let content_area = Rect {
        y: area.y + header_area.height,
        height: area.height.saturating_sub(header_area.height + 1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    render_header(model, frame, header_area);
    frame.render_widget(Clear, content_area);
    match model.mode {
        Mode::Preview => render_preview(model, frame, content_area),
        Mode::Edit => render_editor(model, frame, content_area),
    }

    if model.active_toast().is_some() && content_area.height > 0 {
        let toast_area = Rect {
            y: content_area.y + content_area.height - 1,
            height: 1,
            ..content_area
        };
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_header(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.theme;
    let spans = HeaderControl::ALL
        .into_iter()
        .map(|control| {
            let style = if control.mode() == model.mode {
                theme.active_control()
            } else {
                theme.inactive_control()
            };
            Span::styled(control.cell(), style)
        })
        .collect::<Vec<_>>();
    let header = Paragraph::new(Line::from(spans)).style(theme.header());
    frame.render_widget(header, area);
}

fn render_preview(model: &mut Model, frame: &mut Frame, area: Rect) {
    model.sync_preview_layout();
    let range = model.viewport.visible_range();
    let visible = model
        .preview_lines()
        .get(range)
        .map(<[Line<'static>]>::to_vec)
        .unwrap_or_default();

    let block = Block::default().padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    match &model.editor {
        EditorSlot::Ready(editor) => render_editor_surface(model, editor.as_ref(), frame, area),
        EditorSlot::NotLoaded | EditorSlot::Loading => {
            let placeholder = Paragraph::new("Loading editor…")
                .style(model.theme.decoration())
                .block(Block::default().padding(Padding::left(DOCUMENT_LEFT_PADDING)));
            frame.render_widget(placeholder, area);
        }
        EditorSlot::Failed(err) => {
            let lines = vec![
                Line::styled("The editor could not be loaded.", model.theme.heading(2)),
                Line::raw(""),
                Line::raw(err.to_string()),
                Line::raw(""),
                Line::styled(
                    "Press Ctrl+E to retry or Ctrl+P to return to the preview.",
                    model.theme.decoration(),
                ),
            ];
            let banner = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().padding(Padding::left(DOCUMENT_LEFT_PADDING)));
            frame.render_widget(banner, area);
        }
    }
}

fn render_editor_surface(model: &Model, editor: &dyn TextEditor, frame: &mut Frame, area: Rect) {
    let total_lines = editor.line_count();
    let gutter_width = editor_gutter_width(model);
    let cursor = editor.cursor();
    let start = editor.scroll_offset();
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = editor.line_at(line_idx).unwrap_or_default();
        let mut spans = Vec::new();
        if gutter_width > 0 {
            let number = format!(
                "{:>width$} ",
                line_idx + 1,
                width = usize::from(gutter_width - 1)
            );
            spans.push(Span::styled(number, model.theme.gutter()));
        }

        if line_idx == cursor.line {
            let col = (0..=cursor.col.min(line_text.len()))
                .rev()
                .find(|&idx| line_text.is_char_boundary(idx))
                .unwrap_or(0);
            let (before, rest) = line_text.split_at(col);
            let mut chars = rest.chars();
            let under = chars.next().map_or_else(|| " ".to_string(), String::from);
            let after = chars.as_str();

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(under, model.theme.cursor()));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
