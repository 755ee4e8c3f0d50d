//! Markdown document parsing for the rendered preview.
//!
//! This module handles:
//! - Parsing markdown with comrak
//! - Rendering the AST to styled lines for display

mod parser;
mod types;

pub use parser::{parse, parse_with_layout};
pub use types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};
