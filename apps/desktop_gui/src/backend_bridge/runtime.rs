//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::PersistenceWriter;
use crossbeam_channel::{Receiver, Sender};
use storage::{FeedbackStore, MemoryStore, Storage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn spawn_backend_thread(
    database_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let store: Arc<dyn FeedbackStore> = match runtime.block_on(Storage::new(&database_url)) {
            Ok(storage) => {
                tracing::info!(database_url = %database_url, "feedback store opened");
                Arc::new(storage)
            }
            Err(err) => {
                tracing::error!(
                    database_url = %database_url,
                    "failed to open feedback store; keeping feedback in memory only: {err:#}"
                );
                Arc::new(MemoryStore::new())
            }
        };

        let writer = {
            let _guard = runtime.enter();
            let (writer, _task) = PersistenceWriter::spawn(store.clone());
            writer
        };

        run_command_loop(&runtime, store.as_ref(), &writer, &cmd_rx, &ui_tx);

        runtime.block_on(writer.flush());
        tracing::info!("backend worker stopped");
    })
}

fn run_command_loop(
    runtime: &tokio::runtime::Runtime,
    store: &dyn FeedbackStore,
    writer: &PersistenceWriter,
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend command received");
        match cmd {
            BackendCommand::Load { partition } => {
                // Saves queued for this partition must land before it is read back.
                let items = runtime.block_on(async {
                    writer.flush().await;
                    store.load(&partition).await
                });
                if ui_tx.send(UiEvent::Loaded { partition, items }).is_err() {
                    break;
                }
            }
            BackendCommand::Save { partition, items } => writer.enqueue(partition, items),
            BackendCommand::Shutdown => break,
        }
    }
}
