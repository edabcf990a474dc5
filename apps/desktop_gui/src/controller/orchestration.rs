//! Command orchestration helpers from UI actions to backend command queue.

use client_core::FailureKind;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::SubmissionFailure;

/// Queues `cmd` for the backend worker. A refused command is reported as a
/// failed submission so the workflow never waits on a request that was not sent.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), SubmissionFailure> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(SubmissionFailure::new(
            FailureKind::Transport,
            "UI command queue is full",
        )),
        Err(TrySendError::Disconnected(_)) => Err(SubmissionFailure::new(
            FailureKind::Transport,
            "backend command processor disconnected (possible startup/runtime failure)",
        )),
    }
}
