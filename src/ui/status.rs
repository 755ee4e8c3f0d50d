use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model, ViewMode};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let mode = match model.view_mode {
        ViewMode::Rendered => "Rendered",
        ViewMode::RawHtml => "HTML",
    };
    let focus = match model.focus {
        Focus::Editor => "editor",
        Focus::Preview => "preview",
    };
    let percent = model.viewport.scroll_percent();

    let status = format!(
        " {mode}  [{focus}]  [{percent}%]  Tab:focus  ^E:view  ^Y:copy  ^S:save  ^T:theme  F1:help"
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
