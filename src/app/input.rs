use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::app::model::Focus;
use crate::app::{App, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        &self,
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.panel_open() {
            return None;
        }

        let editor_pane = mouse.column < model.size.0 / 2;

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                if editor_pane {
                    Some(Message::EditorScrollDown(3))
                } else {
                    Some(Message::ScrollDown(3))
                }
            }
            MouseEventKind::ScrollUp => {
                if editor_pane {
                    Some(Message::EditorScrollUp(3))
                } else {
                    Some(Message::ScrollUp(3))
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if editor_pane {
                    editor_click_target(model, mouse.column, mouse.row)
                        .map(|(line, col)| Message::MoveTo(line, col))
                } else if model.focus == Focus::Editor {
                    Some(Message::SwitchFocus)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if model.panel_open() {
            match key.code {
                KeyCode::Esc => return Some(Message::ClosePanel),
                KeyCode::Char('d') if ctrl => return Some(Message::DismissPanel),
                _ => {}
            }
        }

        // Global chords, valid regardless of focus
        match key.code {
            KeyCode::Char('c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('e') if ctrl => return Some(Message::ToggleViewMode),
            KeyCode::Char('y') if ctrl => return Some(Message::CopyHtml),
            KeyCode::Char('s') if ctrl => return Some(Message::ExportHtml),
            KeyCode::Char('t') if ctrl => return Some(Message::ToggleTheme),
            KeyCode::Char('p') if ctrl => return Some(Message::TogglePanel),
            KeyCode::Tab => return Some(Message::SwitchFocus),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            _ => {}
        }

        match model.focus {
            Focus::Editor => Self::handle_editor_key(key, ctrl),
            Focus::Preview => Self::handle_preview_key(key, model),
        }
    }

    fn handle_editor_key(key: event::KeyEvent, ctrl: bool) -> Option<Message> {
        match key.code {
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            _ => None,
        }
    }

    fn handle_preview_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('d') => Some(Message::HalfPageDown),
            KeyCode::Char('u') => Some(Message::HalfPageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Esc => Some(Message::SwitchFocus),
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Map a mouse click inside the editor pane to a buffer position.
fn editor_click_target(model: &Model, column: u16, row: u16) -> Option<(usize, usize)> {
    // Skip the pane border (1 row) and the line-number gutter.
    let text_left = 1 + crate::ui::EDITOR_GUTTER_WIDTH;
    let content_height = crate::ui::pane_content_height(model.size.1);
    if row == 0 || row > content_height {
        return None;
    }
    let line = model.editor_scroll_offset + (row - 1) as usize;
    if line >= model.buffer.line_count() {
        return None;
    }
    let text = model.buffer.line_at(line)?;
    let target = column.saturating_sub(text_left) as usize;
    Some((line, display_column_to_byte(&text, target)))
}

/// Byte offset of the character occupying display column `target`.
///
/// Clicks past the end of the line land after the last character.
fn display_column_to_byte(text: &str, target: usize) -> usize {
    let mut width = 0usize;
    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if target < width + ch_width {
            return idx;
        }
        width += ch_width;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::ViewMode;
    use crate::ui::style::Theme;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn model() -> Model {
        Model::new("hello", Theme::Dark, true, (80, 24))
    }

    #[test]
    fn test_plain_char_inserts_when_editor_focused() {
        let msg = App::handle_key(key(KeyCode::Char('a'), KeyModifiers::NONE), &model());
        assert_eq!(msg, Some(Message::InsertChar('a')));
    }

    #[test]
    fn test_ctrl_e_toggles_view_mode() {
        let msg = App::handle_key(key(KeyCode::Char('e'), KeyModifiers::CONTROL), &model());
        assert_eq!(msg, Some(Message::ToggleViewMode));
    }

    #[test]
    fn test_ctrl_y_copies_html() {
        let msg = App::handle_key(key(KeyCode::Char('y'), KeyModifiers::CONTROL), &model());
        assert_eq!(msg, Some(Message::CopyHtml));
    }

    #[test]
    fn test_tab_switches_focus() {
        let msg = App::handle_key(key(KeyCode::Tab, KeyModifiers::NONE), &model());
        assert_eq!(msg, Some(Message::SwitchFocus));
    }

    #[test]
    fn test_q_types_into_editor_but_quits_preview() {
        let mut m = model();
        let msg = App::handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE), &m);
        assert_eq!(msg, Some(Message::InsertChar('q')));

        m.focus = Focus::Preview;
        let msg = App::handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE), &m);
        assert_eq!(msg, Some(Message::Quit));
    }

    #[test]
    fn test_esc_closes_open_panel() {
        let mut m = model();
        m.panel = crate::app::PanelState::Half;
        let msg = App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &m);
        assert_eq!(msg, Some(Message::ClosePanel));
    }

    #[test]
    fn test_any_key_dismisses_help() {
        let mut m = model();
        m.help_visible = true;
        let msg = App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &m);
        assert_eq!(msg, Some(Message::HideHelp));
    }

    #[test]
    fn test_wheel_scrolls_pane_under_pointer() {
        let m = model();
        let left = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            App::handle_mouse(left, &m),
            Some(Message::EditorScrollDown(3))
        );

        let right = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 60,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(App::handle_mouse(right, &m), Some(Message::ScrollDown(3)));
    }

    #[test]
    fn test_click_maps_display_column_to_char_boundary() {
        let m = Model::new("héllo", Theme::Dark, true, (80, 24));
        let text_left = 1 + crate::ui::EDITOR_GUTTER_WIDTH;
        let click = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: text_left + 2,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        // Display column 2 is the 'l' after the two-byte 'é'.
        assert_eq!(App::handle_mouse(click, &m), Some(Message::MoveTo(0, 3)));
    }

    #[test]
    fn test_display_column_mapping_handles_wide_and_multibyte_chars() {
        assert_eq!(display_column_to_byte("héllo", 0), 0);
        assert_eq!(display_column_to_byte("héllo", 2), 3);
        assert_eq!(display_column_to_byte("日本語", 3), 3);
        assert_eq!(display_column_to_byte("abc", 10), 3);
    }

    #[test]
    fn test_scroll_messages_leave_view_mode_alone() {
        let m = model();
        assert_eq!(m.view_mode, ViewMode::Rendered);
        let msg = App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &m);
        assert!(matches!(msg, Some(Message::InsertChar('x'))));
    }
}
