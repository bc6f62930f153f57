use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = match model.mode {
        Mode::Preview => format!(
            " PREVIEW  [{}%]  Line {}/{}  e:edit  q:quit",
            model.viewport.scroll_percent(),
            (model.viewport.offset() + 1).min(model.viewport.total_lines().max(1)),
            model.viewport.total_lines()
        ),
        Mode::Edit => {
            let position = model.editor.editor().map_or_else(String::new, |editor| {
                let cursor = editor.cursor();
                format!("  Ln {}, Col {}", cursor.line + 1, cursor.col + 1)
            });
            format!(
                " EDIT  editor {}{}  Esc:preview  Ctrl+Q:quit",
                model.editor.label(),
                position
            )
        }
    };

    let style = match model.mode {
        Mode::Preview => Style::default().bg(Color::DarkGray).fg(Color::White),
        Mode::Edit => Style::default().bg(Color::Magenta).fg(Color::White),
    };
    frame.render_widget(Paragraph::new(status).style(style), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
