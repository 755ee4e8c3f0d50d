//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, PanelState, ToastLevel, ViewMode};
pub use update::{Message, update};

use crate::config::ThemeMode;
use crate::store::StoragePort;
use crate::ui::style::Theme;

/// Main application struct that owns the storage port and runs the
/// event loop.
pub struct App {
    store: Box<dyn StoragePort>,
    theme_mode: ThemeMode,
    fresh: bool,
    seed: Option<String>,
}

impl App {
    /// Create a new application backed by the given storage port.
    pub fn new(store: Box<dyn StoragePort>) -> Self {
        Self {
            store,
            theme_mode: ThemeMode::Auto,
            fresh: false,
            seed: None,
        }
    }

    /// Set the color theme preference.
    pub const fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    /// Skip restoring persisted content and panel state.
    pub const fn with_fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    /// Seed the editor with content instead of the stored snapshot.
    pub fn with_seed(mut self, seed: Option<String>) -> Self {
        self.seed = seed;
        self
    }

    /// Resolve the configured theme preference to a concrete theme.
    ///
    /// Auto maps to dark, the common case for terminals.
    const fn resolve_theme(&self) -> Theme {
        match self.theme_mode {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Auto | ThemeMode::Dark => Theme::Dark,
        }
    }
}
