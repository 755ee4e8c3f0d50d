//! mdpane - A split-pane terminal markdown editor with live HTML preview.
//!
//! # Usage
//!
//! ```bash
//! mdpane
//! mdpane NOTES.md
//! mdpane --theme light --fresh
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mdpane::app::App;
use mdpane::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use mdpane::perf;
use mdpane::store::FileStore;

/// A split-pane markdown editor with live HTML preview
#[derive(Parser, Debug)]
#[command(name = "mdpane", version, about, long_about = None)]
struct Cli {
    /// Markdown file to seed the editor with (overrides the stored session)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start with an empty editor instead of restoring the last session
    #[arg(long)]
    fresh: bool,

    /// Color theme (auto follows the terminal default)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in .mdpanerc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .mdpanerc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("MDPANE_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    // An explicit file argument seeds the buffer for this session only;
    // edits are still persisted to the session store.
    let seed = match &cli.file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let store = FileStore::open_default();
    let mut app = App::new(Box::new(store))
        .with_theme(effective.theme.unwrap_or(ThemeMode::Auto))
        .with_fresh(effective.fresh)
        .with_seed(seed);

    app.run().context("Application error")
}
