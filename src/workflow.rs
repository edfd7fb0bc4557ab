use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info};

use gifpick::{
    ActiveView, FeedKind, GiphySource, PageSource, Query, ResultItem, SearchSessionController,
    SessionEvent, StaticSource,
};

use crate::settings::ResolvedConfig;

/// How often the headless loop pumps the controller.
const TICK: Duration = Duration::from_millis(16);
/// Delay between simulated keystrokes, well inside the debounce window.
const KEYSTROKE: Duration = Duration::from_millis(40);
const OFFLINE_CATALOG: usize = 200;
const OFFLINE_LATENCY: Duration = Duration::from_millis(120);

/// What the picker showed once the requested pages were loaded.
#[derive(Debug, Serialize)]
pub(crate) struct PickerOutcome {
    pub(crate) feed: FeedKind,
    pub(crate) query: String,
    pub(crate) exhausted: bool,
    pub(crate) error: Option<String>,
    pub(crate) items: Vec<ResultItem>,
}

/// Drives a [`SearchSessionController`] the way a picker panel would, without
/// a screen: open, type, scroll.
pub(crate) struct PickerWorkflow {
    controller: SearchSessionController,
    events: Receiver<SessionEvent>,
    query: Option<String>,
    pages: usize,
    deadline: Instant,
}

impl PickerWorkflow {
    pub(crate) fn from_config(
        config: &ResolvedConfig,
        query: Option<String>,
        pages: usize,
        wait: Duration,
    ) -> Result<Self> {
        let source: Arc<dyn PageSource> = if config.offline {
            Arc::new(StaticSource::sample(OFFLINE_CATALOG).with_latency(OFFLINE_LATENCY))
        } else {
            Arc::new(
                GiphySource::new(config.giphy_options())
                    .context("failed to build the Giphy client")?,
            )
        };

        let mut controller = SearchSessionController::spawn(config.session_config(), source);
        let events = controller.subscribe();
        Ok(Self {
            controller,
            events,
            query,
            pages: pages.max(1),
            deadline: Instant::now() + wait,
        })
    }

    pub(crate) fn run(mut self) -> Result<PickerOutcome> {
        self.controller.show();
        self.wait_until("trending page", |controller| {
            !controller.is_loading(FeedKind::Trending)
        })?;

        if let Some(text) = self.query.take() {
            self.type_query(&text)?;
        }

        for _ in 1..self.pages {
            if !self.controller.active_fetch_more() {
                debug!("no further pages to load");
                break;
            }
            self.wait_until("next page", |controller| match controller.active_feed_kind() {
                Some(feed) => !controller.is_loading(feed),
                None => true,
            })?;
        }

        let outcome = self.snapshot()?;
        self.controller.shutdown();
        Ok(outcome)
    }

    /// Type `text` one character at a time, then wait for the debounced search.
    fn type_query(&mut self, text: &str) -> Result<()> {
        let mut typed = String::new();
        for ch in text.chars() {
            typed.push(ch);
            self.controller.on_query_change(typed.clone());
            self.controller.pump();
            self.drain_events();
            thread::sleep(KEYSTROKE);
        }

        let target = Query::new(text);
        info!(query = %target, "waiting for the query to settle");
        self.wait_until("search results", |controller| {
            controller.query() == Some(&target) && !controller.is_loading(FeedKind::Search)
        })
    }

    fn wait_until(
        &mut self,
        what: &str,
        mut done: impl FnMut(&SearchSessionController) -> bool,
    ) -> Result<()> {
        loop {
            self.controller.pump();
            self.drain_events();
            if done(&self.controller) {
                return Ok(());
            }
            if Instant::now() >= self.deadline {
                bail!("timed out waiting for {what}");
            }
            thread::sleep(TICK);
        }
    }

    fn drain_events(&self) {
        for event in self.events.try_iter() {
            debug!(?event, "session event");
        }
    }

    fn snapshot(&self) -> Result<PickerOutcome> {
        let Some(view) = self.controller.active_view() else {
            bail!("the picker closed unexpectedly");
        };
        let query = match view {
            ActiveView::Trending(_) => String::new(),
            ActiveView::Search { query, .. } => query.as_str().to_string(),
        };
        let feed = view.feed();
        Ok(PickerOutcome {
            feed: feed.feed,
            query,
            exhausted: feed.exhausted,
            error: feed.error.map(ToString::to_string),
            items: feed.items.to_vec(),
        })
    }
}
