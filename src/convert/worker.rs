//! Background conversion worker.
//!
//! Conversion runs off the event loop thread so rapid typing never blocks
//! input handling. Each request carries a monotonically increasing
//! sequence number; the worker coalesces bursts by always converting only
//! the newest pending request, and the model discards any result whose
//! sequence is no longer current. Stale results are dropped, never shown.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// A conversion request: sequence token plus the buffer snapshot.
#[derive(Debug, Clone)]
struct Request {
    seq: u64,
    source: String,
}

/// A completed conversion, tagged with the request's sequence token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub seq: u64,
    pub html: String,
}

/// Handle to the conversion thread.
pub struct ConversionWorker {
    tx: Sender<Request>,
    rx: Receiver<ConversionResult>,
}

impl ConversionWorker {
    /// Spawn the worker thread.
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (res_tx, res_rx) = mpsc::channel::<ConversionResult>();

        thread::spawn(move || {
            while let Ok(mut request) = req_rx.recv() {
                // Coalesce: convert only the newest request in the queue.
                while let Ok(newer) = req_rx.try_recv() {
                    request = newer;
                }
                let html = super::to_html(&request.source);
                if res_tx
                    .send(ConversionResult {
                        seq: request.seq,
                        html,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            tx: req_tx,
            rx: res_rx,
        }
    }

    /// Queue a conversion. `seq` must be the model's current conversion
    /// sequence so the result can be matched up (or discarded) later.
    pub fn request(&self, seq: u64, source: String) {
        if self.tx.send(Request { seq, source }).is_err() {
            tracing::warn!(seq, "conversion worker gone; request dropped");
        }
    }

    /// Drain all completed conversions without blocking.
    pub fn drain_results(&self) -> Vec<ConversionResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            results.push(result);
        }
        results
    }
}
