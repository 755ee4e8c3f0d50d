use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Model, PanelState};

/// Rect for the slide-up info panel at the bottom of the main area.
pub fn panel_rect(area: Rect, state: PanelState) -> Rect {
    let height = match state {
        PanelState::Closed => 0,
        PanelState::Half => (area.height / 3).max(6),
        PanelState::Full => area.height.saturating_sub(2),
    };
    let height = height.min(area.height);
    Rect {
        y: area.y + area.height - height,
        height,
        ..area
    }
}

pub fn render_panel_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup = panel_rect(area, model.panel);
    if popup.height == 0 {
        return;
    }

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = vec![
        Line::styled("Why Convert Markdown to HTML?", section_style),
        Line::raw(""),
        Line::raw("Markdown is quick to write; HTML is what browsers, blogs, and"),
        Line::raw("email tools actually consume. This converter keeps both in"),
        Line::raw("sync: edit on the left, grab clean HTML on the right."),
        Line::raw(""),
        Line::styled("Tips", section_style),
        Line::raw("  Ctrl+E   flips the preview between rendered and raw HTML"),
        Line::raw("  Ctrl+Y   copies the HTML for pasting anywhere"),
        Line::raw("  Ctrl+S   writes markdown-output.html next to you"),
    ];
    if model.panel == PanelState::Full {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Supported syntax", section_style));
        lines.push(Line::raw("  Headings, emphasis, inline code and fenced blocks,"));
        lines.push(Line::raw("  lists and task lists, tables, links, block quotes,"));
        lines.push(Line::raw("  strikethrough, and horizontal rules."));
        lines.push(Line::raw(""));
        lines.push(Line::raw("Your work is saved locally as you type and restored"));
        lines.push(Line::raw("the next time you open the editor."));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Esc close \u{2502} Ctrl+P resize \u{2502} Ctrl+D don't show again",
        dim_style,
    ));

    let block = Block::default()
        .title("About this editor")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let _ = model;
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    all_lines.push(Line::raw("  Mouse click         Place cursor"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Preview", section_style));
    all_lines.push(Line::raw("  Ctrl-e              Toggle rendered / HTML view"));
    all_lines.push(Line::raw("  Tab                 Switch pane focus"));
    all_lines.push(Line::raw("  j/k or Up/Down      Scroll (preview focused)"));
    all_lines.push(Line::raw("  Space/b, d/u        Page / half page"));
    all_lines.push(Line::raw("  g / G               Top / bottom"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Output", section_style));
    all_lines.push(Line::raw("  Ctrl-y              Copy HTML to clipboard"));
    all_lines.push(Line::raw("  Ctrl-s              Save markdown-output.html"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-t              Toggle light / dark theme"));
    all_lines.push(Line::raw("  Ctrl-p              Open / resize info panel"));
    all_lines.push(Line::raw("  q (preview) / Ctrl-c  Quit"));
    all_lines.push(Line::raw("  ? (preview) / F1    Toggle help"));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = content_height_u16 as usize;
    let end = content_height.min(all_lines.len());
    let visible: Vec<Line> = all_lines[..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
