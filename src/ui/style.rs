//! Theming and color definitions.
//!
//! This module defines the visual styling for rendered markdown elements.
//! Colors come in a light and a dark palette, switchable at runtime.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineStyle, LineType};

/// Color palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Base foreground/background for ordinary pane content.
    pub const fn base(self) -> Style {
        match self {
            Self::Light => Style::new().fg(Color::Black).bg(Color::White),
            Self::Dark => Style::new().fg(Color::White).bg(Color::Reset),
        }
    }

    const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

/// Get the style for a given line type.
pub fn style_for_line_type(theme: Theme, line_type: &LineType) -> Style {
    let light_bg = theme.is_light();
    match line_type {
        // Headings - bold with distinct colors per level
        LineType::Heading(1) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(if light_bg {
                Color::Indexed(22)
            } else {
                Color::Green
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(if light_bg {
                Color::Indexed(58)
            } else {
                Color::Yellow
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(4) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(5) => Style::default()
            .fg(if light_bg {
                Color::Indexed(54)
            } else {
                Color::Magenta
            })
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD),

        // Code blocks - dimmer, fixed tint
        LineType::CodeBlock => Style::default()
            .fg(if light_bg {
                Color::Indexed(238)
            } else {
                Color::Indexed(245)
            })
            .add_modifier(Modifier::DIM),

        // Block quotes - italic blue
        LineType::BlockQuote => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::ITALIC),

        // Horizontal rule - dim
        LineType::HorizontalRule => Style::default()
            .fg(if light_bg {
                Color::Indexed(241)
            } else {
                Color::Indexed(240)
            })
            .add_modifier(Modifier::DIM),

        // Images - magenta italic to stand out as placeholder
        LineType::Image => Style::default()
            .fg(if light_bg {
                Color::Indexed(90)
            } else {
                Color::Magenta
            })
            .add_modifier(Modifier::ITALIC),

        // List items, tables, paragraphs, empty lines - normal style
        LineType::ListItem(_) | LineType::Table | LineType::Paragraph | LineType::Empty => {
            Style::default()
        }
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(theme: Theme, base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.code {
        style = style
            .fg(if theme.is_light() {
                Color::Indexed(88)
            } else {
                Color::Indexed(180)
            })
            .remove_modifier(Modifier::DIM);
    }
    if inline.link {
        style = style
            .fg(if theme.is_light() {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::UNDERLINED);
    }

    style
}

/// Dimmed style for placeholders and hints.
pub const fn placeholder_style(theme: Theme) -> Style {
    let fg = match theme {
        Theme::Light => Color::Indexed(245),
        Theme::Dark => Color::Indexed(243),
    };
    Style::new().fg(fg).add_modifier(Modifier::ITALIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        for level in 1..=6 {
            let style = style_for_line_type(Theme::Dark, &LineType::Heading(level));
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_strong_inline_adds_bold() {
        let inline = InlineStyle {
            strong: true,
            ..InlineStyle::default()
        };
        let style = style_for_inline(Theme::Dark, Style::default(), inline);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_link_inline_is_underlined() {
        let inline = InlineStyle {
            link: true,
            ..InlineStyle::default()
        };
        let style = style_for_inline(Theme::Dark, Style::default(), inline);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_themes_pick_different_code_colors() {
        let inline = InlineStyle {
            code: true,
            ..InlineStyle::default()
        };
        let light = style_for_inline(Theme::Light, Style::default(), inline);
        let dark = style_for_inline(Theme::Dark, Style::default(), inline);
        assert_ne!(light.fg, dark.fg);
    }
}
