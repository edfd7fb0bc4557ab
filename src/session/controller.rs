use std::ops::Range;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Instant;

use tracing::{debug, info, trace};

use super::events::{SessionCommand, SessionEvent};
use super::runtime::FetchRuntime;
use super::scroll::ScrollTrigger;
use super::state::SearchSession;
use super::view::{ActiveView, FeedView};
use super::SessionConfig;
use crate::pagination::{ApplyOutcome, TokenMint};
use crate::source::{FetchError, PageSource};
use crate::systems::fetch;
use crate::types::{FeedKind, PageRequest, PageResponse, Query, ResultItem};

/// Coordinates the trending and search feeds behind a single interface.
///
/// The controller is owned by the UI event loop. Requests run on the fetch
/// worker; their responses only take effect when [`pump`](Self::pump) drains
/// them, so every state change happens on the owner's thread.
pub struct SearchSessionController {
    config: SessionConfig,
    runtime: FetchRuntime,
    mint: TokenMint,
    scroll: ScrollTrigger,
    session: Option<SearchSession>,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl SearchSessionController {
    pub fn new(config: SessionConfig, runtime: FetchRuntime) -> Self {
        Self {
            scroll: ScrollTrigger::new(config.scroll_threshold),
            config,
            runtime,
            mint: TokenMint::new(),
            session: None,
            subscribers: Vec::new(),
        }
    }

    /// Start a fetch worker for `source` and build a controller around it.
    pub fn spawn(config: SessionConfig, source: Arc<dyn PageSource>) -> Self {
        let (tx, rx) = fetch::spawn(source);
        Self::new(config, FetchRuntime::new(tx, rx))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Receive a [`SessionEvent`] for every observable state change from now on.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn is_visible(&self) -> bool {
        self.session.is_some()
    }

    /// Apply a command from the render layer.
    pub fn handle(&mut self, command: SessionCommand) {
        self.handle_at(command, Instant::now());
    }

    pub fn handle_at(&mut self, command: SessionCommand, now: Instant) {
        match command {
            SessionCommand::Show => self.show(),
            SessionCommand::Close => self.close(),
            SessionCommand::QueryChanged(text) => self.on_query_change_at(text, now),
            SessionCommand::FetchMore => {
                self.active_fetch_more();
            }
            SessionCommand::ResetValues(feed) => self.reset_values(feed),
            SessionCommand::Viewport(range) => {
                self.on_viewport(range);
            }
            SessionCommand::Select(index) => {
                self.select(index);
            }
        }
    }

    /// Open the panel: build a fresh session and preload the first trending page.
    ///
    /// Does nothing if the panel is already open.
    pub fn show(&mut self) {
        if self.session.is_some() {
            trace!("show ignored, session already open");
            return;
        }
        info!("session opened");
        self.session = Some(SearchSession::new(&self.config));
        self.notify(SessionEvent::Shown);
        self.fetch_more(FeedKind::Trending);
    }

    /// Close the panel and drop the whole session.
    ///
    /// Requests still running are not aborted; their responses find no
    /// session (or a newer one with different tokens) and are discarded.
    pub fn close(&mut self) {
        let Some(mut session) = self.session.take() else {
            trace!("close ignored, no open session");
            return;
        };
        session.debouncer.cancel();
        for feed in [FeedKind::Trending, FeedKind::Search] {
            if let Some(token) = session.fetcher(feed).cursor().in_flight() {
                debug!(%feed, %token, "abandoning outstanding request");
            }
        }
        drop(session);
        info!("session closed");
        self.notify(SessionEvent::Closed);
    }

    /// Close the session and stop the fetch worker.
    pub fn shutdown(&mut self) {
        self.close();
        self.runtime.shutdown();
    }

    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.on_query_change_at(text, Instant::now());
    }

    /// Store the raw text right away and feed it to the debouncer.
    pub fn on_query_change_at(&mut self, text: impl Into<String>, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            trace!("query change ignored, no open session");
            return;
        };
        let text = text.into();
        session.debouncer.observe_at(Query::new(&text), now);
        session.raw_text = text;
    }

    /// Same as [`on_query_change`](Self::on_query_change), for text bindings
    /// that push the field's contents.
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.on_query_change(text);
    }

    /// Text as typed, ahead of debouncing.
    pub fn raw_text(&self) -> &str {
        self.session
            .as_ref()
            .map_or("", |session| session.raw_text.as_str())
    }

    /// The committed (debounced) query, if the panel is open.
    pub fn query(&self) -> Option<&Query> {
        self.session.as_ref().map(|session| &session.query)
    }

    pub fn pump(&mut self) -> bool {
        self.pump_at(Instant::now())
    }

    /// Settle the debounced query and apply every response that has arrived.
    ///
    /// Returns `true` if anything observable changed.
    pub fn pump_at(&mut self, now: Instant) -> bool {
        let settled = self
            .session
            .as_mut()
            .and_then(|session| session.debouncer.poll_at(now));
        let mut changed = match settled {
            Some(query) => self.commit_query(query),
            None => false,
        };

        loop {
            match self.runtime.try_recv() {
                Ok(response) => changed |= self.apply_response(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        changed
    }

    /// Route a response to the fetcher it belongs to.
    ///
    /// Responses for a closed session, a reset cursor or a superseded request
    /// are dropped. Returns `true` if the response was applied.
    pub fn apply_response(&mut self, response: PageResponse) -> bool {
        let feed = response.feed;
        let Some(session) = self.session.as_mut() else {
            debug!(%feed, token = %response.token, "response for closed session dropped");
            return false;
        };

        let outcome = session.fetcher_mut(feed).apply(response);
        match outcome {
            ApplyOutcome::Stale => false,
            ApplyOutcome::Loaded { added, exhausted } => {
                self.notify(SessionEvent::PageLoaded {
                    feed,
                    added,
                    exhausted,
                });
                true
            }
            ApplyOutcome::Failed(error) => {
                self.notify(SessionEvent::FetchFailed { feed, error });
                true
            }
        }
    }

    /// Feed the render layer should show, or `None` while closed.
    pub fn active_feed_kind(&self) -> Option<FeedKind> {
        self.session.as_ref().map(SearchSession::active_kind)
    }

    pub fn active_view(&self) -> Option<ActiveView<'_>> {
        let session = self.session.as_ref()?;
        let feed = FeedView::of(session.fetcher(session.active_kind()));
        Some(match session.active_kind() {
            FeedKind::Trending => ActiveView::Trending(feed),
            FeedKind::Search => ActiveView::Search {
                query: &session.query,
                feed,
            },
        })
    }

    /// Items of the active feed; empty while closed.
    pub fn active_data(&self) -> &[ResultItem] {
        match &self.session {
            Some(session) => session.fetcher(session.active_kind()).items(),
            None => &[],
        }
    }

    /// A window of the active feed, clamped to what has been loaded.
    pub fn items(&self, range: Range<usize>) -> &[ResultItem] {
        let data = self.active_data();
        let end = range.end.min(data.len());
        let start = range.start.min(end);
        &data[start..end]
    }

    pub fn feed(&self, feed: FeedKind) -> Option<FeedView<'_>> {
        self.session
            .as_ref()
            .map(|session| FeedView::of(session.fetcher(feed)))
    }

    pub fn is_loading(&self, feed: FeedKind) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.fetcher(feed).is_loading())
    }

    /// Load the next page of the feed currently on screen.
    pub fn active_fetch_more(&mut self) -> bool {
        match self.active_feed_kind() {
            Some(feed) => self.fetch_more(feed),
            None => false,
        }
    }

    /// Load the next page of `feed`. Returns `true` if a request was issued.
    pub fn fetch_more(&mut self, feed: FeedKind) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let query = session.query.clone();
        let request =
            session
                .fetcher_mut(feed)
                .fetch_next(&query, &self.config.api_key, &mut self.mint);
        let Some(request) = request else {
            return false;
        };
        self.dispatch(request);
        true
    }

    /// Clear `feed` back to its initial state and forget its outstanding request.
    pub fn reset_values(&mut self, feed: FeedKind) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.fetcher_mut(feed).reset();
        self.notify(SessionEvent::Reset { feed });
    }

    /// The render surface now shows `visible` of the active feed; load the
    /// next page when it is close to the end.
    pub fn on_viewport(&mut self, visible: Range<usize>) -> bool {
        if !self.scroll.is_near_end(&visible, self.active_data().len()) {
            return false;
        }
        self.active_fetch_more()
    }

    /// Pick the item at `index` of the active feed and close the panel.
    pub fn select(&mut self, index: usize) -> Option<ResultItem> {
        let item = self.active_data().get(index).cloned()?;
        info!(id = %item.id, "item selected");
        self.notify(SessionEvent::Selected(item.clone()));
        self.close();
        Some(item)
    }

    fn commit_query(&mut self, query: Query) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.query == query {
            return false;
        }
        debug!(query = %query, "query committed");
        session.query = query.clone();
        session.fetcher_mut(FeedKind::Search).reset();

        let searching = !query.is_empty();
        self.notify(SessionEvent::QueryCommitted(query));
        self.notify(SessionEvent::Reset {
            feed: FeedKind::Search,
        });
        if searching {
            self.fetch_more(FeedKind::Search);
        }
        true
    }

    fn dispatch(&mut self, request: PageRequest) {
        self.notify(SessionEvent::FetchStarted {
            feed: request.query.feed,
            offset: request.query.offset,
        });
        if let Err(request) = self.runtime.dispatch(request) {
            self.apply_response(
                request.respond(Err(FetchError::transport("fetch worker is not running"))),
            );
        }
    }

    fn notify(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
