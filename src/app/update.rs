use crate::app::Model;
use crate::app::model::{Focus, PanelState, ViewMode};
use crate::editor::Direction;
use crate::ui::style::Theme;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split line at cursor (Enter)
    InsertNewline,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,
    /// Move cursor to absolute position (line, col) from a mouse click
    MoveTo(usize, usize),

    // Preview
    /// Switch the preview between rendered and raw HTML
    ToggleViewMode,
    /// A background conversion finished (sequence token, html)
    ConversionDone(u64, String),
    /// Scroll the preview up by n lines
    ScrollUp(usize),
    /// Scroll the preview down by n lines
    ScrollDown(usize),
    /// Scroll the preview up one page
    PageUp,
    /// Scroll the preview down one page
    PageDown,
    /// Scroll the preview up half a page
    HalfPageUp,
    /// Scroll the preview down half a page
    HalfPageDown,
    /// Go to the top of the preview
    GoToTop,
    /// Go to the bottom of the preview
    GoToBottom,
    /// Scroll the editor pane up by n lines (mouse wheel)
    EditorScrollUp(usize),
    /// Scroll the editor pane down by n lines (mouse wheel)
    EditorScrollDown(usize),

    // Output
    /// Copy the converted HTML to the system clipboard
    CopyHtml,
    /// Write the converted HTML to a file in the working directory
    ExportHtml,

    // Panels and chrome
    /// Switch focus between the editor and preview panes
    SwitchFocus,
    /// Cycle the bottom info panel (closed, half, full)
    TogglePanel,
    /// Close the bottom info panel
    ClosePanel,
    /// Close the info panel and never auto-open it again
    DismissPanel,
    /// One-shot auto-open of the info panel after startup
    PanelAutoOpen,
    /// Switch between light and dark themes
    ToggleTheme,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Whether a message changes the buffer contents.
///
/// These are the messages whose effects persist the buffer and
/// schedule a background HTML conversion.
pub(super) const fn mutates_buffer(msg: &Message) -> bool {
    matches!(
        msg,
        Message::InsertChar(_)
            | Message::InsertNewline
            | Message::DeleteBack
            | Message::DeleteForward
    )
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(c) => {
            model.buffer.insert_char(c);
            after_edit(&mut model);
        }
        Message::InsertNewline => {
            model.buffer.split_line();
            after_edit(&mut model);
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                after_edit(&mut model);
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                after_edit(&mut model);
            }
        }
        Message::MoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            model.ensure_cursor_visible();
        }
        Message::MoveHome => {
            model.buffer.move_home();
        }
        Message::MoveEnd => {
            model.buffer.move_end();
        }
        Message::MoveWordLeft => {
            model.buffer.move_word_left();
            model.ensure_cursor_visible();
        }
        Message::MoveWordRight => {
            model.buffer.move_word_right();
            model.ensure_cursor_visible();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            model.ensure_cursor_visible();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            model.ensure_cursor_visible();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }

        // Preview
        Message::ToggleViewMode => {
            model.view_mode = match model.view_mode {
                ViewMode::Rendered => ViewMode::RawHtml,
                ViewMode::RawHtml => ViewMode::Rendered,
            };
            model.html_scroll_offset = 0;
        }
        Message::ConversionDone(seq, html) => {
            // Stale results from superseded requests are dropped so the
            // preview can never regress to older output.
            if seq == model.conversion_seq {
                model.html_output = Some(html);
            }
        }
        Message::ScrollUp(n) => match model.view_mode {
            ViewMode::Rendered => model.viewport.scroll_up(n),
            ViewMode::RawHtml => {
                model.html_scroll_offset = model.html_scroll_offset.saturating_sub(n);
            }
        },
        Message::ScrollDown(n) => match model.view_mode {
            ViewMode::Rendered => model.viewport.scroll_down(n),
            ViewMode::RawHtml => {
                model.html_scroll_offset =
                    (model.html_scroll_offset + n).min(max_html_scroll(&model));
            }
        },
        Message::PageUp => {
            let page = page_size(&model);
            model = update(model, Message::ScrollUp(page));
        }
        Message::PageDown => {
            let page = page_size(&model);
            model = update(model, Message::ScrollDown(page));
        }
        Message::HalfPageUp => {
            let page = page_size(&model).max(2) / 2;
            model = update(model, Message::ScrollUp(page));
        }
        Message::HalfPageDown => {
            let page = page_size(&model).max(2) / 2;
            model = update(model, Message::ScrollDown(page));
        }
        Message::GoToTop => match model.view_mode {
            ViewMode::Rendered => model.viewport.go_to_top(),
            ViewMode::RawHtml => model.html_scroll_offset = 0,
        },
        Message::GoToBottom => match model.view_mode {
            ViewMode::Rendered => model.viewport.go_to_bottom(),
            ViewMode::RawHtml => model.html_scroll_offset = max_html_scroll(&model),
        },
        Message::EditorScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max_offset = model
                .buffer
                .line_count()
                .saturating_sub(model.editor_height().max(1));
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max_offset);
        }

        // Clipboard and export happen in effects.
        Message::CopyHtml | Message::ExportHtml | Message::Redraw => {}

        // Panels and chrome
        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Editor => Focus::Preview,
                Focus::Preview => Focus::Editor,
            };
        }
        Message::TogglePanel => {
            model.panel = match model.panel {
                PanelState::Closed => PanelState::Half,
                PanelState::Half => PanelState::Full,
                PanelState::Full => PanelState::Closed,
            };
        }
        Message::ClosePanel => {
            model.panel = PanelState::Closed;
        }
        Message::DismissPanel => {
            model.panel = PanelState::Closed;
            model.panel_dismissed = true;
            model.panel_auto_open_at = None;
        }
        Message::PanelAutoOpen => {
            if !model.panel_dismissed && model.panel == PanelState::Closed {
                model.panel = PanelState::Half;
            }
        }
        Message::ToggleTheme => {
            model.theme = match model.theme {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            };
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.resize(width, height);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

fn after_edit(model: &mut Model) {
    model.sync_preview();
    model.invalidate_html();
    model.ensure_cursor_visible();
}

fn page_size(model: &Model) -> usize {
    (model.viewport.height() as usize).max(1)
}

/// Upper bound for raw HTML scrolling.
///
/// Uses the unwrapped line count of the output, which slightly
/// undercounts wrapped lines but keeps the offset in sane bounds.
fn max_html_scroll(model: &Model) -> usize {
    model
        .html_output
        .as_deref()
        .map_or(0, |html| html.lines().count())
        .saturating_sub(1)
}
