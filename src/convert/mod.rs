//! Markdown to HTML conversion.
//!
//! This is the boundary to the external rendering engine (comrak). The
//! adapter is deliberately forgiving: conversion is invoked from UI paths
//! that must never crash, so any failure degrades to a fixed error string
//! instead of propagating.

mod worker;

pub use worker::{ConversionResult, ConversionWorker};

use comrak::{Arena, Options, format_html, parse_document};

/// Fixed output shown in place of HTML when the engine fails.
pub const CONVERSION_ERROR: &str = "Error converting markdown to HTML";

/// Convert markdown source to an HTML string.
///
/// Deterministic for fixed input. Failures from the engine are mapped to
/// [`CONVERSION_ERROR`] rather than returned as errors.
pub fn to_html(source: &str) -> String {
    let arena = Arena::new();
    let options = conversion_options();
    let root = parse_document(&arena, source, &options);

    let mut output = Vec::new();
    match format_html(root, &options, &mut output) {
        Ok(()) => String::from_utf8(output).unwrap_or_else(|_| CONVERSION_ERROR.to_string()),
        Err(err) => {
            tracing::warn!(%err, "html formatting failed");
            CONVERSION_ERROR.to_string()
        }
    }
}

/// Comrak options used for HTML output.
///
/// GFM extensions only; no header IDs, so the output stays plain
/// CommonMark-shaped HTML.
fn conversion_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_converts_to_h1() {
        let html = to_html("# Hello");
        assert!(html.contains("<h1>Hello</h1>"), "got: {html}");
    }

    #[test]
    fn test_inline_code_converts_to_code_tag() {
        let html = to_html("`code`");
        assert!(html.contains("<code>code</code>"), "got: {html}");
    }

    #[test]
    fn test_bold_converts_to_strong() {
        let html = to_html("**bold**");
        assert!(html.contains("<strong>bold</strong>"), "got: {html}");
    }

    #[test]
    fn test_table_extension_enabled() {
        let html = to_html("| a | b |\n| - | - |\n| 1 | 2 |");
        assert!(html.contains("<table>"), "got: {html}");
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let source = "# Title\n\nSome *emphasis* and a [link](https://example.com).\n";
        assert_eq!(to_html(source), to_html(source));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(to_html(""), "");
    }
}
