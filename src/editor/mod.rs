//! Text editing.
//!
//! The editor buffer holds the authoritative markdown source for the
//! session. Every view (rendered preview, raw HTML) derives from it.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
