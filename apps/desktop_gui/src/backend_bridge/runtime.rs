//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::PlateRecognizer;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{SubmissionFailure, UiEvent};

/// Wakes the UI after an event has been queued.
pub type RepaintNotifier = Arc<dyn Fn() + Send + Sync>;

/// Starts the backend worker. It exits once every command sender is dropped.
pub fn launch(
    recognizer: Arc<dyn PlateRecognizer>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    notify: RepaintNotifier,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                // Dropping cmd_rx here turns every later dispatch into a failure.
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RecognizePlate { ticket, upload } => {
                        let recognizer = Arc::clone(&recognizer);
                        let ui_tx = ui_tx.clone();
                        let notify = Arc::clone(&notify);
                        tokio::spawn(async move {
                            let event = match recognizer.recognize(upload).await {
                                Ok(result) => UiEvent::ScanSucceeded { ticket, result },
                                Err(err) => UiEvent::ScanFailed {
                                    ticket,
                                    failure: SubmissionFailure::from(&err),
                                },
                            };
                            deliver(ui_tx, event, notify).await;
                        });
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    })
}

/// A completion is the only event that clears the UI's in-flight guard; it is
/// never dropped on a full queue.
async fn deliver(ui_tx: Sender<UiEvent>, event: UiEvent, notify: RepaintNotifier) {
    let event = match ui_tx.try_send(event) {
        Ok(()) => {
            notify();
            return;
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui went away before scan completion was delivered");
            return;
        }
        Err(TrySendError::Full(event)) => event,
    };

    tracing::warn!("ui event queue is full; waiting to deliver scan completion");
    notify();
    match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
        Ok(Ok(())) => notify(),
        Ok(Err(_)) => tracing::debug!("ui went away before scan completion was delivered"),
        Err(err) => tracing::error!("scan completion delivery task failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::{FailureKind, ImageUpload, RecognitionError};
    use crossbeam_channel::bounded;
    use serde_json::json;
    use shared::domain::{ScanResult, ScanTicket};

    struct FakeRecognizer {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PlateRecognizer for FakeRecognizer {
        async fn recognize(&self, upload: ImageUpload) -> Result<ScanResult, RecognitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RecognitionError::UnsupportedScheme("ftp".to_string()));
            }
            Ok(ScanResult::new(json!({
                "filename": upload.filename(),
                "plates": [{"recognized_text": "ABC123"}]
            })))
        }
    }

    fn start(fail: bool) -> (
        Arc<FakeRecognizer>,
        Sender<BackendCommand>,
        Receiver<UiEvent>,
        Arc<AtomicUsize>,
        thread::JoinHandle<()>,
    ) {
        start_with_capacity(fail, 4)
    }

    fn start_with_capacity(fail: bool, ui_capacity: usize) -> (
        Arc<FakeRecognizer>,
        Sender<BackendCommand>,
        Receiver<UiEvent>,
        Arc<AtomicUsize>,
        thread::JoinHandle<()>,
    ) {
        let recognizer = Arc::new(FakeRecognizer {
            calls: AtomicUsize::new(0),
            fail,
        });
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(ui_capacity);
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&repaints);
        let notify: RepaintNotifier = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let handle = launch(recognizer.clone(), cmd_rx, ui_tx.clone(), notify);
        if ui_capacity == 1 {
            // Occupy the only slot so the completion finds the queue full.
            ui_tx
                .send(UiEvent::ScanFailed {
                    ticket: ScanTicket(0),
                    failure: SubmissionFailure::new(FailureKind::Transport, "earlier event"),
                })
                .expect("fill ui queue");
        }
        (recognizer, cmd_tx, ui_rx, repaints, handle)
    }

    fn recognize(ticket: u64) -> BackendCommand {
        BackendCommand::RecognizePlate {
            ticket: ScanTicket(ticket),
            upload: ImageUpload::new("car.jpg", "image/jpeg", vec![0xFF, 0xD8]),
        }
    }

    #[test]
    fn successful_scan_is_delivered_with_its_ticket() {
        let (recognizer, cmd_tx, ui_rx, repaints, handle) = start(false);
        cmd_tx.send(recognize(3)).expect("queue command");

        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("scan completion");
        match event {
            UiEvent::ScanSucceeded { ticket, result } => {
                assert_eq!(ticket, ScanTicket(3));
                assert_eq!(result.as_value()["filename"], "car.jpg");
            }
            UiEvent::ScanFailed { .. } => panic!("expected success"),
        }
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(repaints.load(Ordering::SeqCst), 1);

        drop(cmd_tx);
        handle.join().expect("worker exits cleanly");
    }

    #[test]
    fn failed_scan_carries_failure_kind() {
        let (_recognizer, cmd_tx, ui_rx, _repaints, handle) = start(true);
        cmd_tx.send(recognize(8)).expect("queue command");

        match ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("scan completion")
        {
            UiEvent::ScanFailed { ticket, failure } => {
                assert_eq!(ticket, ScanTicket(8));
                assert_eq!(failure.kind, FailureKind::Configuration);
            }
            UiEvent::ScanSucceeded { .. } => panic!("expected failure"),
        }

        drop(cmd_tx);
        handle.join().expect("worker exits cleanly");
    }

    #[test]
    fn completion_waits_out_a_full_ui_queue() {
        let (_recognizer, cmd_tx, ui_rx, _repaints, handle) = start_with_capacity(false, 1);
        cmd_tx.send(recognize(5)).expect("queue command");

        // Give the worker time to find the queue full before draining it.
        std::thread::sleep(Duration::from_millis(200));
        match ui_rx.try_recv().expect("earlier event") {
            UiEvent::ScanFailed { ticket, .. } => assert_eq!(ticket, ScanTicket(0)),
            UiEvent::ScanSucceeded { .. } => panic!("earlier event should come first"),
        }

        match ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("scan completion delivered after the queue drained")
        {
            UiEvent::ScanSucceeded { ticket, .. } => assert_eq!(ticket, ScanTicket(5)),
            UiEvent::ScanFailed { .. } => panic!("expected success"),
        }

        drop(cmd_tx);
        handle.join().expect("worker exits cleanly");
    }
}
