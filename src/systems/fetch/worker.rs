use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, error};

use super::commands::FetchCommand;
use crate::source::{FetchError, PageSource};
use crate::types::{Page, PageRequest, PageResponse};

/// Launches the background fetch worker and returns its channels.
///
/// Every request runs on its own thread so a slow trending page never holds
/// up a search page. Responses arrive in completion order, not issue order.
pub fn spawn(source: Arc<dyn PageSource>) -> (Sender<FetchCommand>, Receiver<PageResponse>) {
    let (command_tx, command_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();

    thread::spawn(move || worker_loop(source, command_rx, response_tx));

    (command_tx, response_rx)
}

fn worker_loop(
    source: Arc<dyn PageSource>,
    command_rx: Receiver<FetchCommand>,
    response_tx: Sender<PageResponse>,
) {
    while let Ok(command) = command_rx.recv() {
        if !handle_command(&source, &response_tx, command) {
            break;
        }
    }
    debug!("fetch worker stopped");
}

fn handle_command(
    source: &Arc<dyn PageSource>,
    response_tx: &Sender<PageResponse>,
    command: FetchCommand,
) -> bool {
    match command {
        FetchCommand::Fetch(request) => {
            run_request(source, response_tx, request);
            true
        }
        FetchCommand::Shutdown => false,
    }
}

fn run_request(
    source: &Arc<dyn PageSource>,
    response_tx: &Sender<PageResponse>,
    request: PageRequest,
) {
    let thread_source = Arc::clone(source);
    let thread_tx = response_tx.clone();
    let thread_request = request.clone();

    let spawned = thread::Builder::new()
        .name(format!("gifpick-fetch-{}", request.query.feed))
        .spawn(move || {
            let result = fetch_guarded(thread_source.as_ref(), &thread_request);
            // The controller may already be gone; nothing is waiting then.
            let _ = thread_tx.send(thread_request.respond(result));
        });

    if let Err(err) = spawned {
        error!(%err, "failed to start fetch thread");
        let _ = response_tx.send(request.respond(Err(FetchError::transport(format!(
            "failed to start fetch thread: {err}"
        )))));
    }
}

/// Run the fetch, turning a panic in the source into a transport failure so
/// the cursor waiting on this token goes back to idle.
fn fetch_guarded(source: &dyn PageSource, request: &PageRequest) -> Result<Page, FetchError> {
    panic::catch_unwind(AssertUnwindSafe(|| source.fetch(&request.query))).unwrap_or_else(
        |payload| {
            let reason = panic_reason(payload.as_ref());
            error!(feed = %request.query.feed, token = %request.token, %reason, "page source panicked");
            Err(FetchError::transport(format!("page source panicked: {reason}")))
        },
    )
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
