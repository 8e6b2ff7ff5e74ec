use tokio::sync::mpsc;
use tracing::{error, info};

use crate::actors::DirectoryService;
use crate::clients::DirectoryClient;
use crate::domain::User;
use crate::messages::ListSignal;

/// The running system: the directory actor plus the signal channel the
/// flows use to tell the list view to show a notice and reload.
///
/// Responsible for starting the actor, wiring the channel ends, and
/// shutting down cleanly.
pub struct ConsoleSystem {
    pub directory_client: DirectoryClient,
    pub signals_tx: mpsc::Sender<ListSignal>,
    pub signals_rx: mpsc::Receiver<ListSignal>,
    handle: tokio::task::JoinHandle<()>,
}

impl ConsoleSystem {
    pub fn new(seed: Vec<User>, page_size: usize) -> Self {
        let (directory, directory_client) = DirectoryService::new(32, page_size, seed);
        let handle = tokio::spawn(directory.run());

        let (signals_tx, signals_rx) = mpsc::channel(32);

        Self {
            directory_client,
            signals_tx,
            signals_rx,
            handle,
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Dropping the client closes the request channel; the actor exits
        // once it drains.
        drop(self.directory_client);
        drop(self.signals_tx);
        drop(self.signals_rx);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
