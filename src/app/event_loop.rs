use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::convert::ConversionWorker;
use crate::store::{CONTENT_KEY, PANEL_DISMISSED_KEY};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - mdpane requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        // Restore the previous session unless --fresh or a seed file
        // takes precedence.
        let load_scope = crate::perf::scope("app.load_snapshot");
        let content = match (&self.seed, self.fresh) {
            (Some(seed), _) => seed.clone(),
            (None, true) => String::new(),
            (None, false) => self.store.load(CONTENT_KEY).unwrap_or_default(),
        };
        let panel_dismissed =
            !self.fresh && self.store.load(PANEL_DISMISSED_KEY).as_deref() == Some("true");
        drop(load_scope);

        crate::perf::log_event(
            "init.layout",
            format!(
                "terminal={}x{} content_chars={} panel_dismissed={panel_dismissed}",
                size.width,
                size.height,
                content.chars().count()
            ),
        );

        let mut model = Model::new(
            &content,
            self.resolve_theme(),
            panel_dismissed,
            (size.width, size.height),
        );

        let worker = ConversionWorker::spawn();

        execute!(stdout(), EnableMouseCapture)?;
        let result = self.event_loop(&mut terminal, &mut model, &worker);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(
        &self,
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        worker: &ConversionWorker,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            let now = Instant::now();
            if model.expire_toast(now) {
                needs_render = true;
            }
            if model.expire_copy_confirmation(now) {
                needs_render = true;
            }
            if model.panel_auto_open_at.is_some_and(|at| at <= now) {
                model.panel_auto_open_at = None;
                *model = update(std::mem::take(model), Message::PanelAutoOpen);
                needs_render = true;
            }

            // Completed conversions come back as ordinary messages so
            // the stale-result check lives in the pure update.
            for result in worker.drain_results() {
                crate::perf::log_event(
                    "convert.done",
                    format!("frame={frame_idx} seq={}", result.seq),
                );
                *model = update(
                    std::mem::take(model),
                    Message::ConversionDone(result.seq, result.html),
                );
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else if model.has_pending_deadline() || model.awaiting_conversion() {
                50
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg =
                    self.handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    self.handle_message_side_effects(model, worker, &side_msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        self.handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        self.handle_message_side_effects(model, worker, &side_msg);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
