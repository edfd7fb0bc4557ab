use crate::types::PageRequest;

/// Commands understood by the background fetch worker.
#[derive(Debug)]
pub enum FetchCommand {
    /// Run the request against the page source and send back its response.
    Fetch(PageRequest),
    /// Stop accepting requests. Requests already running still answer, and
    /// their responses are discarded by whoever drains the channel.
    Shutdown,
}
