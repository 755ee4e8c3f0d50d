//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - Pane rendering, the status bar, and overlays

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{render, split_panes};

/// Columns reserved for the editor line-number gutter.
pub const EDITOR_GUTTER_WIDTH: u16 = 4;

/// Content width of the preview pane for a given terminal width.
///
/// The preview takes the right half of the screen minus its borders.
pub const fn preview_content_width(total_width: u16) -> u16 {
    let w = (total_width / 2).saturating_sub(2);
    if w == 0 { 1 } else { w }
}

/// Content height of either pane for a given terminal height.
///
/// One row goes to the status bar and two to the pane borders.
pub const fn pane_content_height(total_height: u16) -> u16 {
    total_height.saturating_sub(3)
}

#[cfg(test)]
mod tests;
