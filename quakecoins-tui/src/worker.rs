//! Background worker thread — fetching and recomputation run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. One
//! refresh command runs the whole pipeline (prices, then quakes, then
//! merge and correlate) sequentially; pending refresh commands are
//! coalesced so a held-down slider key doesn't queue a fetch per repeat.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use quakecoins_core::pipeline::{self, DashboardSnapshot, RefreshOptions};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Refresh { options: RefreshOptions },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    SnapshotReady(Box<DashboardSnapshot>),
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = rx.recv() {
            match coalesce(cmd, &rx) {
                WorkerCommand::Refresh { options } => {
                    let snapshot = pipeline::refresh(options);
                    if tx
                        .send(WorkerResponse::SnapshotReady(Box::new(snapshot)))
                        .is_err()
                    {
                        break;
                    }
                }
                WorkerCommand::Shutdown => break,
            }
        }
    })
}

/// Drain queued commands, keeping only the most recent refresh. A queued
/// shutdown always wins.
fn coalesce(mut latest: WorkerCommand, rx: &Receiver<WorkerCommand>) -> WorkerCommand {
    loop {
        match rx.try_recv() {
            Ok(WorkerCommand::Shutdown) => return WorkerCommand::Shutdown,
            Ok(cmd) => latest = cmd,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return latest,
        }
    }
}
