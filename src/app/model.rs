use std::time::{Duration, Instant};

use crate::document::{self, Document};
use crate::editor::EditorBuffer;
use crate::ui::style::Theme;
use crate::ui::viewport::Viewport;

/// How long the copy confirmation stays visible.
pub(crate) const COPY_CONFIRM_DURATION: Duration = Duration::from_millis(2000);

/// Delay before the info panel opens on its own after startup.
pub(crate) const PANEL_AUTO_OPEN_DELAY: Duration = Duration::from_millis(1500);

/// Which representation the preview pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Styled rendering of the markdown structure
    Rendered,
    /// The raw converted HTML text
    RawHtml,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Preview,
}

/// Expansion state of the bottom info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Half,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The markdown source being edited
    pub buffer: EditorBuffer,
    /// Current preview representation
    pub view_mode: ViewMode,
    /// Which pane has keyboard focus
    pub focus: Focus,
    /// Parsed document backing the rendered preview
    pub preview: Document,
    /// Viewport managing preview scroll position
    pub viewport: Viewport,
    /// First visible line of the editor pane
    pub editor_scroll_offset: usize,
    /// Scroll offset for the raw HTML view (in wrapped lines)
    pub html_scroll_offset: usize,
    /// Converted HTML for the current buffer, `None` while a
    /// conversion is in flight
    pub html_output: Option<String>,
    /// Sequence token of the most recent conversion request.
    /// Results carrying an older token are discarded.
    pub conversion_seq: u64,
    /// Copy confirmation deadline, if one is showing
    copied_until: Option<Instant>,
    toast: Option<Toast>,
    /// Bottom info panel state
    pub panel: PanelState,
    /// Whether the user permanently dismissed the info panel
    pub panel_dismissed: bool,
    /// One-shot deadline for the panel auto-open after startup
    pub(super) panel_auto_open_at: Option<Instant>,
    /// Active color theme
    pub theme: Theme,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Full terminal size (columns, rows)
    pub size: (u16, u16),
}

impl Default for Model {
    /// An empty model, used by `std::mem::take` in the event loop.
    fn default() -> Self {
        Self::new("", Theme::Dark, true, (80, 24))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("view_mode", &self.view_mode)
            .field("focus", &self.focus)
            .field("conversion_seq", &self.conversion_seq)
            .field("panel", &self.panel)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model with the given initial content.
    pub fn new(
        content: &str,
        theme: Theme,
        panel_dismissed: bool,
        terminal_size: (u16, u16),
    ) -> Self {
        let preview_width = crate::ui::preview_content_width(terminal_size.0);
        let pane_height = crate::ui::pane_content_height(terminal_size.1);
        let preview = document::parse_with_layout(content, preview_width.max(1));
        let total_lines = preview.line_count();

        let panel_auto_open_at = if panel_dismissed {
            None
        } else {
            Some(Instant::now() + PANEL_AUTO_OPEN_DELAY)
        };

        Self {
            buffer: EditorBuffer::from_text(content),
            view_mode: ViewMode::Rendered,
            focus: Focus::Editor,
            preview,
            viewport: Viewport::new(preview_width, pane_height, total_lines),
            editor_scroll_offset: 0,
            html_scroll_offset: 0,
            html_output: None,
            conversion_seq: 0,
            copied_until: None,
            toast: None,
            panel: PanelState::Closed,
            panel_dismissed,
            panel_auto_open_at,
            theme,
            help_visible: false,
            should_quit: false,
            size: terminal_size,
        }
    }

    /// Number of characters in the buffer, shown under the editor pane.
    pub fn char_count(&self) -> usize {
        self.buffer.char_count()
    }

    /// Reparse the preview document from the current buffer contents.
    pub(super) fn sync_preview(&mut self) {
        let text = self.buffer.text();
        let width = self.viewport.width().max(1);
        self.preview = document::parse_with_layout(&text, width);
        self.viewport.set_total_lines(self.preview.line_count());
    }

    /// Mark the current HTML stale and claim the next sequence token.
    ///
    /// The effects layer reads `conversion_seq` to tag the background
    /// request; only a result carrying this token will be accepted.
    pub(super) fn invalidate_html(&mut self) {
        self.conversion_seq = self.conversion_seq.wrapping_add(1);
        self.html_output = None;
    }

    /// Apply new terminal dimensions and reflow both panes.
    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.viewport.resize(
            crate::ui::preview_content_width(width),
            crate::ui::pane_content_height(height),
        );
        self.sync_preview();
        self.html_scroll_offset = 0;
        self.ensure_cursor_visible();
    }

    /// Height of the editor text area in rows.
    pub fn editor_height(&self) -> usize {
        crate::ui::pane_content_height(self.size.1) as usize
    }

    /// Scroll the editor pane so the cursor line is visible.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let height = self.editor_height().max(1);
        let line = self.buffer.cursor().line;
        if line < self.editor_scroll_offset {
            self.editor_scroll_offset = line;
        } else if line >= self.editor_scroll_offset + height {
            self.editor_scroll_offset = line + 1 - height;
        }
        let max_offset = self.buffer.line_count().saturating_sub(height);
        self.editor_scroll_offset = self.editor_scroll_offset.min(max_offset);
    }

    /// Whether the bottom info panel is showing.
    pub const fn panel_open(&self) -> bool {
        !matches!(self.panel, PanelState::Closed)
    }

    pub(super) fn begin_copy_confirmation(&mut self) {
        self.copied_until = Some(Instant::now() + COPY_CONFIRM_DURATION);
    }

    /// Clear the copy confirmation once its deadline passes.
    ///
    /// Returns true when the state changed and a redraw is needed.
    pub(super) fn expire_copy_confirmation(&mut self, now: Instant) -> bool {
        if self.copied_until.is_some_and(|deadline| deadline <= now) {
            self.copied_until = None;
            return true;
        }
        false
    }

    /// Whether the copy confirmation is currently showing.
    pub fn copy_confirmed(&self) -> bool {
        self.copied_until
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Whether an expiry deadline (toast, copy confirmation, panel
    /// auto-open) still needs the event loop to tick.
    pub(super) const fn has_pending_deadline(&self) -> bool {
        self.copied_until.is_some() || self.toast.is_some() || self.panel_auto_open_at.is_some()
    }

    /// Whether a background conversion is in flight for a non-blank
    /// buffer shown in the raw HTML view.
    pub(super) fn awaiting_conversion(&self) -> bool {
        matches!(self.view_mode, ViewMode::RawHtml)
            && self.html_output.is_none()
            && !self.buffer.is_blank()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
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
