use std::sync::mpsc::{Receiver, SendError, Sender, TryRecvError};

use crate::systems::fetch::FetchCommand;
use crate::types::{PageRequest, PageResponse};

/// The controller's end of the fetch worker's channels.
pub struct FetchRuntime {
    tx: Sender<FetchCommand>,
    rx: Receiver<PageResponse>,
}

impl FetchRuntime {
    /// Wrap a command sender and response receiver.
    ///
    /// [`SearchSessionController::spawn`](super::SearchSessionController::spawn)
    /// builds both from a worker thread. Embedders with their own executor can
    /// pass any pair of channels that answers every [`FetchCommand::Fetch`]
    /// with a [`PageResponse`].
    pub fn new(tx: Sender<FetchCommand>, rx: Receiver<PageResponse>) -> Self {
        Self { tx, rx }
    }

    /// Hand a request to the worker, giving it back if the worker is gone.
    pub(crate) fn dispatch(&self, request: PageRequest) -> Result<(), PageRequest> {
        match self.tx.send(FetchCommand::Fetch(request)) {
            Ok(()) => Ok(()),
            Err(SendError(FetchCommand::Fetch(request))) => Err(request),
            Err(SendError(FetchCommand::Shutdown)) => Ok(()),
        }
    }

    pub(crate) fn try_recv(&self) -> Result<PageResponse, TryRecvError> {
        self.rx.try_recv()
    }

    pub(crate) fn shutdown(&self) {
        let _ = self.tx.send(FetchCommand::Shutdown);
    }
}
