//! Startup and frame timing instrumentation.
//!
//! Two channels: coarse scope timings printed to stderr when `--perf`
//! is set, and a detailed event log appended to a file when
//! `--render-debug-log` is set. Both are off by default and cost a
//! single atomic load (or a mutex check) when disabled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, PoisonError};
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<Option<EventLog>>> = LazyLock::new(|| Mutex::new(None));

struct EventLog {
    origin: Instant,
    writer: BufWriter<File>,
}

/// A named timing scope; reports its lifetime on drop.
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if is_enabled() {
            let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[perf] {}: {elapsed_ms:.2} ms", self.name);
        }
    }
}

/// Start timing a named scope.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn set_enabled(enabled: bool) {
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// Open (or close, with `None`) the render debug log file.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut slot = EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner);
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writeln!(writer, "mdpane debug log start")?;
            writer.flush()?;
            *slot = Some(EventLog {
                origin: Instant::now(),
                writer,
            });
        }
        None => *slot = None,
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    EVENT_LOG
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Append a timestamped event line to the debug log, if open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut slot = EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(log) = slot.as_mut() {
        let elapsed_ms = log.origin.elapsed().as_secs_f64() * 1000.0;
        let _ = writeln!(
            log.writer,
            "[{elapsed_ms:>10.3} ms] {name}: {}",
            detail.as_ref()
        );
        let _ = log.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_debug_log_path_enables_logging_and_writes() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());
        log_event("test.event", "hello world");
        set_debug_log_path(None).unwrap();
        assert!(!is_debug_log_enabled());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("mdpane debug log start"));
        assert!(content.contains("test.event: hello world"));
    }
}
