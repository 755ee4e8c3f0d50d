use super::*;
use crate::app::{Message, Model, PanelState, ViewMode, update};
use crate::ui::style::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    // Wide enough that placeholder strings fit on one preview line
    let backend = TestBackend::new(120, 30);
    Terminal::new(backend).unwrap()
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

fn model_with(content: &str) -> Model {
    Model::new(content, Theme::Dark, true, (120, 30))
}

#[test]
fn test_empty_buffer_shows_preview_placeholder() {
    let mut model = model_with("");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("Start typing markdown to see the preview"));
    assert!(content.contains("Try headings, lists, code blocks, and more!"));
}

#[test]
fn test_empty_buffer_shows_html_placeholder_in_html_view() {
    let mut model = model_with("");
    model.view_mode = ViewMode::RawHtml;
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("Start typing markdown to see the HTML output"));
    assert!(content.contains("The raw HTML will be displayed here"));
}

#[test]
fn test_html_view_shows_converting_while_pending() {
    let mut model = model_with("# Title");
    model.view_mode = ViewMode::RawHtml;
    assert!(model.html_output.is_none());

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("Converting to HTML..."));
}

#[test]
fn test_html_view_shows_converted_output() {
    let mut model = model_with("# Title");
    model.view_mode = ViewMode::RawHtml;
    let seq = model.conversion_seq;
    model = update(model, Message::ConversionDone(seq, crate::convert::to_html("# Title")));

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("<h1>Title</h1>"));
}

#[test]
fn test_heading_renders_in_preview_pane() {
    let mut model = model_with("# Hello World");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("Hello World"));
}

#[test]
fn test_character_count_shows_under_editor() {
    let mut model = model_with("hello");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("5 characters"));
}

#[test]
fn test_pane_titles_follow_view_mode() {
    let mut model = model_with("hi");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(buffer_text(&terminal).contains("Preview: Rendered"));

    model = update(model, Message::ToggleViewMode);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(buffer_text(&terminal).contains("Preview: HTML"));
}

#[test]
fn test_panel_overlay_renders_when_open() {
    let mut model = model_with("hi");
    model.panel = PanelState::Half;
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("Why Convert Markdown to HTML?"));
}

#[test]
fn test_help_overlay_renders_when_visible() {
    let mut model = model_with("hi");
    model.help_visible = true;
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("Copy HTML to clipboard"));
}

#[test]
fn test_editor_shows_line_numbers() {
    let mut model = model_with("one\ntwo\nthree");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("one"));
    assert!(content.contains("three"));
}

#[test]
fn test_pane_geometry_helpers() {
    assert_eq!(preview_content_width(80), 38);
    assert_eq!(pane_content_height(24), 21);
    assert_eq!(preview_content_width(0), 1);
}
