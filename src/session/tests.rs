use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use super::*;
use crate::source::FetchError;
use crate::systems::fetch::FetchCommand;
use crate::types::{FeedKind, Page, PageRequest, PageResponse, Query, ResultItem};

const QUIET: Duration = Duration::from_millis(1000);

struct Harness {
    controller: SearchSessionController,
    commands: Receiver<FetchCommand>,
    responses: Sender<PageResponse>,
    events: Receiver<SessionEvent>,
    start: Instant,
}

fn harness() -> Harness {
    let (command_tx, command_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let config = SessionConfig::new("test-key").with_quiet_period(QUIET);
    let mut controller =
        SearchSessionController::new(config, FetchRuntime::new(command_tx, response_rx));
    let events = controller.subscribe();
    Harness {
        controller,
        commands: command_rx,
        responses: response_tx,
        events,
        start: Instant::now(),
    }
}

fn items(prefix: &str, range: Range<usize>) -> Vec<ResultItem> {
    range
        .map(|index| {
            ResultItem::new(
                format!("{prefix}-{index}"),
                format!("{prefix} {index}"),
                format!("https://example.test/{prefix}/{index}"),
            )
        })
        .collect()
}

impl Harness {
    fn next_request(&self) -> PageRequest {
        match self.commands.try_recv() {
            Ok(FetchCommand::Fetch(request)) => request,
            other => panic!("expected a fetch request, got {other:?}"),
        }
    }

    fn assert_no_request(&self) {
        assert!(self.commands.try_recv().is_err(), "unexpected request");
    }

    fn deliver(&mut self, request: &PageRequest, result: Result<Page, FetchError>) -> bool {
        self.responses.send(request.respond(result)).unwrap();
        self.controller.pump_at(self.start)
    }

    fn type_and_settle(&mut self, text: &str) {
        self.controller.on_query_change_at(text, self.start);
        self.controller.pump_at(self.start + QUIET);
    }

    fn drain_events(&self) -> Vec<SessionEvent> {
        self.events.try_iter().collect()
    }

    fn show_with_trending(&mut self, count: usize) -> PageRequest {
        self.controller.show();
        let request = self.next_request();
        self.deliver(&request, Ok(Page::new(items("trend", 0..count), true)));
        request
    }
}

#[test]
fn show_preloads_the_first_trending_page() {
    let mut h = harness();
    h.controller.show();

    let request = h.next_request();
    assert_eq!(request.query.feed, FeedKind::Trending);
    assert_eq!(request.query.offset, 0);
    assert_eq!(request.query.limit, 25);
    assert_eq!(&*request.query.api_key, "test-key");
    assert!(h.controller.is_loading(FeedKind::Trending));
    assert!(!h.controller.is_loading(FeedKind::Search));
    h.assert_no_request();

    assert!(h.deliver(&request, Ok(Page::new(items("trend", 0..25), true))));
    assert_eq!(h.controller.active_data().len(), 25);
    let feed = h.controller.feed(FeedKind::Trending).unwrap();
    assert!(!feed.exhausted);
    assert!(!feed.is_loading);
}

#[test]
fn short_first_page_exhausts_trending() {
    let mut h = harness();
    h.controller.show();
    let request = h.next_request();
    h.deliver(&request, Ok(Page::new(items("trend", 0..12), true)));

    assert_eq!(h.controller.active_data().len(), 12);
    assert!(h.controller.feed(FeedKind::Trending).unwrap().exhausted);
    assert!(!h.controller.active_fetch_more());
    h.assert_no_request();
}

#[test]
fn showing_an_open_panel_does_nothing() {
    let mut h = harness();
    h.controller.show();
    h.next_request();
    h.controller.show();
    h.assert_no_request();
}

#[test]
fn committed_query_switches_to_an_empty_search_feed() {
    let mut h = harness();
    h.show_with_trending(25);

    h.controller.on_query_change_at("cat", h.start);
    assert_eq!(h.controller.raw_text(), "cat");
    h.controller.pump_at(h.start + Duration::from_millis(999));
    assert_eq!(h.controller.active_feed_kind(), Some(FeedKind::Trending));
    h.assert_no_request();

    h.controller.pump_at(h.start + QUIET);
    assert_eq!(h.controller.query(), Some(&Query::new("cat")));
    assert_eq!(h.controller.active_feed_kind(), Some(FeedKind::Search));
    assert!(h.controller.active_data().is_empty());

    let search = h.next_request();
    assert_eq!(search.query.feed, FeedKind::Search);
    assert_eq!(search.query.text, "cat");
    assert_eq!(search.query.offset, 0);

    let trending = h.controller.feed(FeedKind::Trending).unwrap();
    assert_eq!(trending.items.len(), 25);
    assert!(!trending.is_loading);
}

#[test]
fn rapid_typing_issues_a_single_search() {
    let mut h = harness();
    h.show_with_trending(25);

    for (step, text) in ["c", "ca", "cat"].into_iter().enumerate() {
        let now = h.start + Duration::from_millis(step as u64 * 100);
        h.controller.on_query_change_at(text, now);
        h.controller.pump_at(now);
    }
    h.assert_no_request();

    h.controller.pump_at(h.start + Duration::from_millis(200) + QUIET);
    let request = h.next_request();
    assert_eq!(request.query.text, "cat");
    h.assert_no_request();
}

#[test]
fn new_query_discards_the_previous_search() {
    let mut h = harness();
    h.show_with_trending(25);

    h.type_and_settle("cat");
    let cat = h.next_request();

    h.controller
        .on_query_change_at("dog", h.start + QUIET + Duration::from_millis(10));
    h.controller
        .pump_at(h.start + QUIET * 2 + Duration::from_millis(10));
    let dog = h.next_request();
    assert_eq!(dog.query.text, "dog");

    assert!(!h.deliver(&cat, Ok(Page::new(items("cat", 0..25), true))));
    assert!(h.controller.active_data().is_empty());

    assert!(h.deliver(&dog, Ok(Page::new(items("dog", 0..25), true))));
    assert!(h
        .controller
        .active_data()
        .iter()
        .all(|item| item.id.as_str().starts_with("dog")));
}

#[test]
fn new_query_restarts_paging_from_the_first_page() {
    let mut h = harness();
    h.show_with_trending(25);

    h.type_and_settle("cat");
    let first = h.next_request();
    h.deliver(&first, Ok(Page::new(items("cat", 0..25), true)));
    assert!(h.controller.active_fetch_more());
    let second = h.next_request();
    assert_eq!(second.query.offset, 25);
    h.deliver(&second, Ok(Page::new(items("cat", 25..50), true)));
    assert_eq!(h.controller.active_data().len(), 50);

    let later = h.start + QUIET * 2;
    h.controller.on_query_change_at("dog", later);
    h.controller.pump_at(later + QUIET);

    let dog = h.next_request();
    assert_eq!(dog.query.text, "dog");
    assert_eq!(dog.query.offset, 0);
    assert!(h.controller.active_data().is_empty());
    assert!(h.controller.feed(FeedKind::Search).unwrap().items.is_empty());
}

#[test]
fn set_raw_text_feeds_the_debouncer() {
    let mut h = harness();
    h.show_with_trending(25);

    h.controller.set_raw_text("owl");
    assert_eq!(h.controller.raw_text(), "owl");
    h.assert_no_request();

    h.controller.pump_at(Instant::now() + QUIET);
    let request = h.next_request();
    assert_eq!(request.query.text, "owl");
}

#[test]
fn clearing_the_query_returns_to_trending_without_refetching() {
    let mut h = harness();
    h.show_with_trending(25);
    h.type_and_settle("cat");
    let cat = h.next_request();
    h.deliver(&cat, Ok(Page::new(items("cat", 0..25), true)));

    h.controller.on_query_change_at("  ", h.start + QUIET);
    h.controller.pump_at(h.start + QUIET * 2);

    assert_eq!(h.controller.active_feed_kind(), Some(FeedKind::Trending));
    assert_eq!(h.controller.active_data().len(), 25);
    assert!(h.controller.feed(FeedKind::Search).unwrap().items.is_empty());
    h.assert_no_request();
}

#[test]
fn fetch_more_while_loading_is_a_no_op() {
    let mut h = harness();
    h.controller.show();
    let request = h.next_request();

    assert!(!h.controller.active_fetch_more());
    assert!(!h.controller.fetch_more(FeedKind::Trending));
    h.assert_no_request();

    assert!(h.controller.active_data().is_empty());
    assert!(h.deliver(&request, Ok(Page::new(items("trend", 0..25), true))));
}

#[test]
fn next_page_continues_after_the_loaded_items() {
    let mut h = harness();
    h.show_with_trending(25);

    assert!(h.controller.active_fetch_more());
    let next = h.next_request();
    assert_eq!(next.query.offset, 25);

    h.deliver(&next, Ok(Page::new(items("trend", 24..49), true)));
    assert_eq!(h.controller.active_data().len(), 49);
}

#[test]
fn server_error_leaves_the_feed_retryable() {
    let mut h = harness();
    h.show_with_trending(25);
    h.controller.active_fetch_more();
    let failing = h.next_request();
    h.drain_events();

    assert!(h.deliver(&failing, Err(FetchError::server(500, "internal error"))));

    let feed = h.controller.feed(FeedKind::Trending).unwrap();
    assert_eq!(feed.items.len(), 25);
    assert!(!feed.exhausted);
    assert!(!feed.is_loading);
    assert!(matches!(feed.error, Some(FetchError::Server { status: 500, .. })));
    assert_eq!(
        h.drain_events(),
        vec![SessionEvent::FetchFailed {
            feed: FeedKind::Trending,
            error: FetchError::server(500, "internal error"),
        }]
    );

    assert!(h.controller.active_fetch_more());
    let retry = h.next_request();
    assert_eq!(retry.query.offset, 25);
    assert!(h.controller.feed(FeedKind::Trending).unwrap().error.is_none());
}

#[test]
fn close_discards_in_flight_responses() {
    let mut h = harness();
    h.controller.show();
    let abandoned = h.next_request();

    h.controller.close();
    assert!(!h.controller.is_visible());
    assert!(!h.deliver(&abandoned, Ok(Page::new(items("trend", 0..25), true))));
    assert!(h.controller.active_data().is_empty());

    h.controller.show();
    let fresh = h.next_request();
    assert_ne!(fresh.token, abandoned.token);
    assert!(h.controller.active_data().is_empty());
    assert_eq!(h.controller.query(), Some(&Query::empty()));
    assert_eq!(h.controller.raw_text(), "");

    assert!(!h.deliver(&abandoned, Ok(Page::new(items("old", 0..25), true))));
    assert!(h.controller.active_data().is_empty());
    assert_eq!(
        h.controller.feed(FeedKind::Trending).unwrap().items.len(),
        0
    );
}

#[test]
fn close_cancels_a_pending_query() {
    let mut h = harness();
    h.show_with_trending(25);
    h.controller.on_query_change_at("cat", h.start);
    h.controller.close();
    h.controller.show();
    h.next_request();

    h.controller.pump_at(h.start + QUIET * 5);
    assert_eq!(h.controller.query(), Some(&Query::empty()));
    h.assert_no_request();
}

#[test]
fn query_changes_while_closed_are_ignored() {
    let mut h = harness();
    h.controller.on_query_change_at("cat", h.start);
    assert_eq!(h.controller.raw_text(), "");
    assert!(!h.controller.pump_at(h.start + QUIET));
    h.assert_no_request();
}

#[test]
fn reset_values_is_idempotent() {
    let mut h = harness();
    h.show_with_trending(25);

    h.controller.reset_values(FeedKind::Trending);
    let once = h.controller.feed(FeedKind::Trending).unwrap();
    let once = (once.items.len(), once.is_loading, once.exhausted);
    h.controller.reset_values(FeedKind::Trending);
    let twice = h.controller.feed(FeedKind::Trending).unwrap();
    let twice = (twice.items.len(), twice.is_loading, twice.exhausted);

    assert_eq!(once, (0, false, false));
    assert_eq!(once, twice);
}

#[test]
fn reset_during_a_fetch_ignores_its_response() {
    let mut h = harness();
    h.controller.show();
    let request = h.next_request();
    h.controller.reset_values(FeedKind::Trending);

    assert!(!h.deliver(&request, Ok(Page::new(items("trend", 0..25), true))));
    assert!(h.controller.active_data().is_empty());
    assert!(!h.controller.is_loading(FeedKind::Trending));
}

#[test]
fn viewport_near_the_end_loads_the_next_page() {
    let mut h = harness();
    h.show_with_trending(25);

    assert!(!h.controller.on_viewport(0..10));
    h.assert_no_request();

    assert!(h.controller.on_viewport(10..20));
    let next = h.next_request();
    assert_eq!(next.query.offset, 25);
    assert_eq!(h.controller.items(20..40).len(), 5);
}

#[test]
fn select_reports_the_item_and_closes() {
    let mut h = harness();
    h.show_with_trending(25);
    h.drain_events();

    let picked = h.controller.select(3).expect("item selected");
    assert_eq!(picked.id.as_str(), "trend-3");
    assert!(!h.controller.is_visible());
    assert_eq!(
        h.drain_events(),
        vec![SessionEvent::Selected(picked), SessionEvent::Closed]
    );
}

#[test]
fn commands_drive_the_same_lifecycle() {
    let mut h = harness();
    h.controller.handle_at(SessionCommand::Show, h.start);
    let trending = h.next_request();
    h.deliver(&trending, Ok(Page::new(items("trend", 0..25), true)));

    h.controller
        .handle_at(SessionCommand::QueryChanged("cat".to_string()), h.start);
    h.controller.pump_at(h.start + QUIET);
    let search = h.next_request();
    h.deliver(&search, Ok(Page::new(items("cat", 0..25), true)));

    match h.controller.active_view() {
        Some(ActiveView::Search { query, feed }) => {
            assert_eq!(query.as_str(), "cat");
            assert_eq!(feed.items.len(), 25);
        }
        other => panic!("expected search view, got {other:?}"),
    }

    h.controller.handle_at(SessionCommand::FetchMore, h.start);
    assert_eq!(h.next_request().query.feed, FeedKind::Search);

    h.controller
        .handle_at(SessionCommand::ResetValues(FeedKind::Search), h.start);
    assert!(h.controller.active_data().is_empty());

    h.controller.handle_at(SessionCommand::Close, h.start);
    assert!(h.controller.active_view().is_none());
}

#[test]
fn events_follow_the_session() {
    let mut h = harness();
    h.show_with_trending(25);
    h.type_and_settle("cat");

    assert_eq!(
        h.drain_events(),
        vec![
            SessionEvent::Shown,
            SessionEvent::FetchStarted {
                feed: FeedKind::Trending,
                offset: 0
            },
            SessionEvent::PageLoaded {
                feed: FeedKind::Trending,
                added: 25,
                exhausted: false
            },
            SessionEvent::QueryCommitted(Query::new("cat")),
            SessionEvent::Reset {
                feed: FeedKind::Search
            },
            SessionEvent::FetchStarted {
                feed: FeedKind::Search,
                offset: 0
            },
        ]
    );
}

#[test]
fn missing_worker_surfaces_a_transport_error() {
    let h = harness();
    let Harness {
        mut controller,
        commands,
        events,
        ..
    } = h;
    drop(commands);

    controller.show();
    let feed = controller.feed(FeedKind::Trending).unwrap();
    assert!(matches!(feed.error, Some(FetchError::Transport(_))));
    assert!(!feed.is_loading);
    assert!(
        events
            .try_iter()
            .any(|event| matches!(event, SessionEvent::FetchFailed { .. }))
    );
}
