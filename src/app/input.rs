use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Message, Mode, Model};
use crate::editor::{Direction, EditorInput};
use crate::ui::{HEADER_ROWS, HeaderControl, editor_gutter_width, header_control_at};

const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Paste(text) if model.mode == Mode::Edit => {
                Some(Message::Editor(EditorInput::Paste(text)))
            }
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl {
            match key.code {
                KeyCode::Char('c') => return Some(Message::Quit),
                KeyCode::Char('p') => return Some(Message::ShowPreview),
                KeyCode::Char('e') => return Some(Message::ShowEdit),
                KeyCode::Char('l') => return Some(Message::Redraw),
                _ => {}
            }
        }
        match model.mode {
            Mode::Preview => Self::handle_preview_key(key),
            Mode::Edit => Self::handle_edit_key(key, model),
        }
    }

    fn handle_preview_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('p') => Some(Message::ShowPreview),
            KeyCode::Char('e') => Some(Message::ShowEdit),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            _ => None,
        }
    }

    fn handle_edit_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Message::ShowPreview),
            KeyCode::Char('q') if ctrl => return Some(Message::Quit),
            _ => {}
        }
        if !model.editor.is_ready() {
            return None;
        }
        let page = model.content_height().max(1);
        let input = match key.code {
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                EditorInput::Insert(ch)
            }
            KeyCode::Tab => EditorInput::Insert('\t'),
            KeyCode::Enter => EditorInput::Newline,
            KeyCode::Backspace => EditorInput::Backspace,
            KeyCode::Delete => EditorInput::Delete,
            KeyCode::Left if ctrl => EditorInput::WordLeft,
            KeyCode::Right if ctrl => EditorInput::WordRight,
            KeyCode::Left => EditorInput::Move(Direction::Left),
            KeyCode::Right => EditorInput::Move(Direction::Right),
            KeyCode::Up => EditorInput::Move(Direction::Up),
            KeyCode::Down => EditorInput::Move(Direction::Down),
            KeyCode::Home if ctrl => EditorInput::DocumentStart,
            KeyCode::End if ctrl => EditorInput::DocumentEnd,
            KeyCode::Home => EditorInput::Home,
            KeyCode::End => EditorInput::End,
            KeyCode::PageUp => EditorInput::ScrollUp(page),
            KeyCode::PageDown => EditorInput::ScrollDown(page),
            _ => return None,
        };
        Some(Message::Editor(input))
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(control) = header_control_at(mouse.column, mouse.row) {
                    return Some(match control {
                        HeaderControl::Preview => Message::ShowPreview,
                        HeaderControl::Edit => Message::ShowEdit,
                    });
                }
                let editor = model.editor.editor()?;
                if model.mode != Mode::Edit || mouse.row < HEADER_ROWS {
                    return None;
                }
                let row = usize::from(mouse.row - HEADER_ROWS);
                if row >= model.content_height() {
                    return None;
                }
                let line = (editor.scroll_offset() + row).min(editor.line_count().saturating_sub(1));
                let cells = usize::from(mouse.column.saturating_sub(editor_gutter_width(model)));
                let column = editor
                    .line_at(line)
                    .map_or(0, |text| char_column_at(&text, cells));
                Some(Message::Editor(EditorInput::MoveTo { line, column }))
            }
            MouseEventKind::ScrollDown => Some(match model.mode {
                Mode::Preview => Message::ScrollDown(WHEEL_LINES),
                Mode::Edit => Message::Editor(EditorInput::ScrollDown(WHEEL_LINES)),
            }),
            MouseEventKind::ScrollUp => Some(match model.mode {
                Mode::Preview => Message::ScrollUp(WHEEL_LINES),
                Mode::Edit => Message::Editor(EditorInput::ScrollUp(WHEEL_LINES)),
            }),
            _ => None,
        }
    }
}

/// Number of characters of `text` that fit in `cells` terminal columns.
///
/// A click on the right half of a wide character lands before it.
fn char_column_at(text: &str, cells: usize) -> usize {
    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= cells
        })
        .count()
}
