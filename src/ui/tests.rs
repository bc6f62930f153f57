use super::*;
use crate::app::{Message, Mode, Model, update};
use crate::editor::{EditorLoadError, EditorSlot, SourceEditor};
use crate::ui::style::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn draw(model: &mut Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn content_background(theme: Theme) -> Color {
    let (r, g, b) = theme.content_rgb();
    Color::Rgb(r, g, b)
}

#[test]
fn test_header_shows_both_controls() {
    let mut model = Model::new("", (80, 24));
    let buffer = draw(&mut model);
    let header = row_text(&buffer, 0);
    assert!(header.starts_with(" Preview  Edit File "), "header was {header:?}");
}

#[test]
fn test_active_control_has_distinct_background() {
    let mut model = Model::new("", (80, 24));
    let buffer = draw(&mut model);
    assert_eq!(buffer[(1, 0)].bg, content_background(Theme::Dark));
    assert_ne!(buffer[(10, 0)].bg, content_background(Theme::Dark));

    let mut model = update(model, Message::ShowEdit);
    let buffer = draw(&mut model);
    assert_ne!(buffer[(1, 0)].bg, content_background(Theme::Dark));
    assert_eq!(buffer[(10, 0)].bg, content_background(Theme::Dark));
}

#[test]
fn test_light_theme_marks_active_control() {
    let mut model = Model::new("", (80, 24));
    model.theme = Theme::Light;
    let buffer = draw(&mut model);
    assert_eq!(buffer[(1, 0)].bg, content_background(Theme::Light));
}

#[test]
fn test_preview_shows_rendered_heading() {
    let mut model = Model::new("# Hello\n\nSome *text* here.", (80, 24));
    let buffer = draw(&mut model);
    let screen = screen_text(&buffer);
    assert!(screen.contains("Hello"));
    assert!(screen.contains("Some text here."));
    assert!(!screen.contains("# Hello"));
}

#[test]
fn test_preview_shows_escaped_markup_as_text() {
    let mut model = Model::new("<b>bold?</b>", (80, 24));
    let screen = screen_text(&draw(&mut model));
    assert!(screen.contains("<b>bold?</b>"));
}

#[test]
fn test_preview_status_bar() {
    let mut model = Model::new("# Hi", (80, 24));
    let buffer = draw(&mut model);
    let status = row_text(&buffer, 23);
    assert!(status.contains("PREVIEW"), "status was {status:?}");
    assert!(status.contains("Line 1/1"), "status was {status:?}");
}

#[test]
fn test_edit_mode_shows_loading_placeholder() {
    let mut model = update(Model::new("# Hi", (80, 24)), Message::ShowEdit);
    model.editor = EditorSlot::Loading;
    let screen = screen_text(&draw(&mut model));
    assert!(screen.contains("Loading editor…"));
    assert!(screen.contains("editor loading"));
}

#[test]
fn test_edit_mode_shows_failure_banner() {
    let mut model = update(Model::new("# Hi", (80, 24)), Message::ShowEdit);
    model.finish_editor_load(Err(EditorLoadError::Provider {
        provider: "source",
        reason: "out of memory".to_string(),
    }));
    let screen = screen_text(&draw(&mut model));
    assert!(screen.contains("The editor could not be loaded."));
    assert!(screen.contains("out of memory"));
    assert!(screen.contains("[error]"));
}

#[test]
fn test_editor_shows_source_with_line_numbers() {
    let mut model = Model::new("# Hello\nworld", (80, 24));
    model.finish_editor_load(Ok(Box::new(SourceEditor::new())));
    let mut model = update(model, Message::ShowEdit);
    assert_eq!(model.mode, Mode::Edit);
    let buffer = draw(&mut model);
    assert!(row_text(&buffer, 1).starts_with("1 # Hello"));
    assert!(row_text(&buffer, 2).starts_with("2 world"));
    assert_eq!(buffer[(2, 1)].bg, Theme::Dark.cursor().bg.unwrap());
    assert!(row_text(&buffer, 23).contains("Ln 1, Col 1"));
}

#[test]
fn test_editor_without_line_numbers() {
    let mut model = Model::new("plain", (80, 24));
    model.line_numbers = false;
    model.finish_editor_load(Ok(Box::new(SourceEditor::new())));
    let mut model = update(model, Message::ShowEdit);
    let buffer = draw(&mut model);
    assert!(row_text(&buffer, 1).starts_with("plain"));
}

#[test]
fn test_scrolled_preview_shows_later_lines() {
    let text = (1..=60)
        .map(|i| format!("para {i}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let mut model = update(Model::new(text, (80, 24)), Message::GoToBottom);
    let buffer = draw(&mut model);
    let rows = (0..24).map(|row| row_text(&buffer, row)).collect::<Vec<_>>();
    assert!(rows.iter().any(|row| row.trim() == "para 60"));
    assert!(!rows.iter().any(|row| row.trim() == "para 1"));
}

#[test]
fn test_header_control_hit_testing() {
    assert_eq!(header_control_at(0, 0), Some(HeaderControl::Preview));
    assert_eq!(header_control_at(8, 0), Some(HeaderControl::Preview));
    assert_eq!(header_control_at(9, 0), Some(HeaderControl::Edit));
    assert_eq!(header_control_at(19, 0), Some(HeaderControl::Edit));
    assert_eq!(header_control_at(20, 0), None);
    assert_eq!(header_control_at(2, 1), None);
}

#[test]
fn test_line_number_width() {
    assert_eq!(line_number_width(9), 1);
    assert_eq!(line_number_width(10), 2);
    assert_eq!(line_number_width(12_345), 5);
}

#[test]
fn test_editor_ready_toast_is_shown_as_info() {
    let mut model = Model::new("# Notes", (80, 24));
    model.finish_editor_load(Ok(Box::new(SourceEditor::new())));
    let buffer = draw(&mut model);
    let toast_row = row_text(&buffer, 22);
    assert!(toast_row.starts_with("[info] Editor ready"), "{toast_row:?}");
}
