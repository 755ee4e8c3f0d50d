// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::StoreError)
    clippy::module_name_repetitions
)]

//! # mdpane
//!
//! A two-pane terminal markdown editor with live preview and HTML export.
//!
//! mdpane shows a markdown editor on the left and a preview on the right.
//! The preview can display either the rendered document or the raw HTML
//! produced by comrak, and the generated HTML can be copied to the
//! clipboard or exported to a file. Editor content is persisted across
//! sessions in a small key-value store.
//!
//! ## Architecture
//!
//! mdpane uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`convert`]: Markdown to HTML conversion and the background worker
//! - [`document`]: Markdown parsing for the rendered preview
//! - [`editor`]: Rope-backed text buffer
//! - [`store`]: Persistent key-value storage for editor content
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod convert;
pub mod document;
pub mod editor;
pub mod perf;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::store::StoragePort;
    pub use crate::ui::viewport::Viewport;
}
