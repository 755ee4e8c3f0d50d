use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{Focus, Model, ViewMode};

use super::{EDITOR_GUTTER_WIDTH, overlays, status, style};

/// Placeholder shown in the rendered view when the buffer is empty.
pub(super) const PREVIEW_PLACEHOLDER: &str = "Start typing markdown to see the preview";
pub(super) const PREVIEW_PLACEHOLDER_HINT: &str = "Try headings, lists, code blocks, and more!";

/// Placeholder shown in the HTML view when the buffer is empty.
pub(super) const HTML_PLACEHOLDER: &str = "Start typing markdown to see the HTML output";
pub(super) const HTML_PLACEHOLDER_HINT: &str = "The raw HTML will be displayed here";

/// Shown while a background conversion is still in flight.
pub(super) const CONVERTING: &str = "Converting to HTML...";

pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let panes = split_panes(main_area);
    render_editor(model, frame, panes[0]);
    render_preview(model, frame, panes[1]);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.panel_open() {
        overlays::render_panel_overlay(model, frame, main_area);
    }
    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn pane_block(model: &Model, title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(model.theme.base())
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.buffer;
    let block = pane_block(model, "Markdown Editor", model.focus == Focus::Editor)
        .title_bottom(Line::from(format!(" {} characters ", model.char_count())).right_aligned());
    let inner = block.inner(area);

    let total_lines = buf.line_count();
    let visible_height = inner.height as usize;
    let start = model.editor_scroll_offset.min(total_lines.saturating_sub(1));
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();
    let gutter = EDITOR_GUTTER_WIDTH as usize - 1;

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>gutter$} ", line_idx + 1);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line && model.focus == Focus::Editor {
            // Paint the cursor cell by splitting the line around it.
            // The buffer keeps the column on a char boundary.
            let col = cursor.col.min(line_text.len());
            let (before, rest) = line_text.split_at(col);
            let mut rest_chars = rest.chars();
            let cursor_char = rest_chars
                .next()
                .map_or_else(|| " ".to_string(), String::from);
            let after: String = rest_chars.collect();

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let title = match model.view_mode {
        ViewMode::Rendered => "Preview: Rendered",
        ViewMode::RawHtml => "Preview: HTML",
    };
    let mut block = pane_block(model, title, model.focus == Focus::Preview);
    if model.copy_confirmed() {
        block = block.title_bottom(
            Line::from(Span::styled(
                " Copied! ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }

    frame.render_widget(Clear, area);
    match model.view_mode {
        ViewMode::Rendered => render_rendered_preview(model, frame, area, block),
        ViewMode::RawHtml => render_html_preview(model, frame, area, block),
    }
}

fn render_rendered_preview(model: &Model, frame: &mut Frame, area: Rect, block: Block<'static>) {
    if model.buffer.is_blank() {
        let content = placeholder_lines(model, PREVIEW_PLACEHOLDER, PREVIEW_PLACEHOLDER_HINT);
        frame.render_widget(
            Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let visible_lines = model
        .preview
        .visible_lines(model.viewport.offset(), model.viewport.height() as usize);

    let mut content: Vec<Line> = Vec::new();
    for line in visible_lines {
        let line_style = style::style_for_line_type(model.theme, line.line_type());
        if let Some(spans) = line.spans() {
            let styled_spans = spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style::style_for_inline(model.theme, line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>();
            content.push(Line::from(styled_spans));
        } else {
            content.push(Line::styled(line.content().to_string(), line_style));
        }
    }

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_html_preview(model: &Model, frame: &mut Frame, area: Rect, block: Block<'static>) {
    if model.buffer.is_blank() {
        let content = placeholder_lines(model, HTML_PLACEHOLDER, HTML_PLACEHOLDER_HINT);
        frame.render_widget(
            Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let Some(html) = model.html_output.as_deref() else {
        let content = vec![
            Line::raw(""),
            Line::styled(CONVERTING, style::placeholder_style(model.theme)),
        ];
        frame.render_widget(Paragraph::new(content).block(block), area);
        return;
    };

    // Raw HTML wraps at the pane edge and scrolls by line.
    #[allow(clippy::cast_possible_truncation)]
    let scroll = model.html_scroll_offset.min(u16::MAX as usize) as u16;
    let paragraph = Paragraph::new(html.to_string())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn placeholder_lines(model: &Model, headline: &str, hint: &str) -> Vec<Line<'static>> {
    let style = style::placeholder_style(model.theme);
    vec![
        Line::raw(""),
        Line::styled(headline.to_string(), style),
        Line::styled(hint.to_string(), style),
    ]
}
