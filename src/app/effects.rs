use std::io::{Write, stdout};
use std::path::Path;

use base64::Engine;

use crate::app::update::mutates_buffer;
use crate::app::{App, Message, Model, ToastLevel, ViewMode};
use crate::convert::ConversionWorker;
use crate::store::{CONTENT_KEY, PANEL_DISMISSED_KEY};

/// Name of the file written by the HTML export.
pub(super) const EXPORT_FILE_NAME: &str = "markdown-output.html";

impl App {
    pub(super) fn handle_message_side_effects(
        &self,
        model: &mut Model,
        worker: &ConversionWorker,
        msg: &Message,
    ) {
        if mutates_buffer(msg) {
            let text = model.buffer.text();
            self.store.save(CONTENT_KEY, &text);
            // Conversion runs only while the raw HTML view is active.
            if model.view_mode == ViewMode::RawHtml {
                Self::request_conversion(model, worker, text);
            }
            return;
        }

        match msg {
            Message::ToggleViewMode => {
                // Entering the HTML view with stale output kicks off a
                // conversion so the pane fills in as soon as it lands.
                if model.view_mode == ViewMode::RawHtml && model.html_output.is_none() {
                    Self::request_conversion(model, worker, model.buffer.text());
                }
            }
            Message::CopyHtml => {
                Self::copy_html(model);
            }
            Message::ExportHtml => {
                Self::export_html(model);
            }
            Message::DismissPanel => {
                self.store.save(PANEL_DISMISSED_KEY, "true");
            }
            _ => {}
        }
    }

    /// Send the buffer to the background converter, tagged with the
    /// current sequence token.
    pub(super) fn request_conversion(model: &Model, worker: &ConversionWorker, source: String) {
        if model.buffer.is_blank() {
            return;
        }
        worker.request(model.conversion_seq, source);
    }

    /// Copy the converted HTML to the system clipboard.
    ///
    /// Uses the cached output when it is current, converting inline
    /// otherwise so the copy never waits on the worker. On failure the
    /// confirmation simply does not activate.
    fn copy_html(model: &mut Model) {
        let Some(html) = current_html(model) else {
            return;
        };
        match copy_to_clipboard(&html) {
            Ok(()) => model.begin_copy_confirmation(),
            Err(err) => tracing::warn!(%err, "clipboard copy failed"),
        }
    }

    /// Write the converted HTML to a file in the working directory.
    fn export_html(model: &mut Model) {
        Self::export_html_to(model, Path::new(EXPORT_FILE_NAME));
    }

    fn export_html_to(model: &mut Model, path: &Path) {
        let Some(html) = current_html(model) else {
            return;
        };
        match std::fs::write(path, html) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Saved {}", path.display())),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Export failed: {err}")),
        }
    }
}

/// HTML for the current buffer, or `None` when the buffer is blank.
fn current_html(model: &Model) -> Option<String> {
    if model.buffer.is_blank() {
        return None;
    }
    match &model.html_output {
        Some(html) => Some(html.clone()),
        None => Some(crate::convert::to_html(&model.buffer.text())),
    }
}

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
