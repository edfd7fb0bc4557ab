use std::thread;
use std::time::Duration;

use super::{FetchError, PageSource};
use crate::types::{FeedKind, Page, PageQuery, ResultItem};

const SAMPLE_SUBJECTS: &[&str] = &[
    "cat", "dog", "party", "dance", "wave", "thumbs up", "facepalm", "coffee", "rain", "space",
];

/// In-memory feed used for offline runs and tests.
///
/// The trending feed is served in insertion order; search matches titles
/// case-insensitively against the catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    trending: Vec<ResultItem>,
    catalog: Vec<ResultItem>,
    latency: Duration,
}

impl StaticSource {
    #[must_use]
    pub fn new(trending: Vec<ResultItem>, catalog: Vec<ResultItem>) -> Self {
        Self {
            trending,
            catalog,
            latency: Duration::ZERO,
        }
    }

    /// A generated catalog of `count` items, every other one of which is trending.
    #[must_use]
    pub fn sample(count: usize) -> Self {
        let catalog: Vec<ResultItem> = (0..count)
            .map(|index| {
                let subject = SAMPLE_SUBJECTS[index % SAMPLE_SUBJECTS.len()];
                ResultItem::new(
                    format!("sample-{index}"),
                    format!("{subject} #{index}"),
                    format!("https://example.invalid/gifs/sample-{index}"),
                )
            })
            .collect();
        let trending = catalog.iter().step_by(2).cloned().collect();
        Self::new(trending, catalog)
    }

    /// Sleep for `latency` before answering each request.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, query: &PageQuery) -> Result<Page, FetchError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        let needle = query.text.to_lowercase();
        let matches: Vec<&ResultItem> = match query.feed {
            FeedKind::Trending => self.trending.iter().collect(),
            FeedKind::Search => self
                .catalog
                .iter()
                .filter(|item| item.title.to_lowercase().contains(&needle))
                .collect(),
        };

        let start = query.offset.min(matches.len());
        let end = query.offset.saturating_add(query.limit).min(matches.len());
        let items = matches[start..end].iter().map(|item| (*item).clone()).collect();
        Ok(Page::new(items, end < matches.len()))
    }
}
