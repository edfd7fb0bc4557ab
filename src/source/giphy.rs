use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::{FetchError, PageSource};
use crate::types::{FeedKind, Page, PageQuery, Rendition, ResultItem};

pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com";

/// Longest server message kept in a [`FetchError::Server`].
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for [`GiphySource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiphyOptions {
    pub base_url: String,
    /// Content rating filter forwarded as `rating`; `None` uses the API default.
    pub rating: Option<String>,
    pub timeout: Duration,
}

impl Default for GiphyOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rating: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the Giphy trending and search endpoints.
pub struct GiphySource {
    client: Client,
    options: GiphyOptions,
}

impl GiphySource {
    pub fn new(options: GiphyOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("gifpick/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, options })
    }

    fn endpoint(&self, feed: FeedKind) -> String {
        let base = self.options.base_url.trim_end_matches('/');
        match feed {
            FeedKind::Trending => format!("{base}/v1/gifs/trending"),
            FeedKind::Search => format!("{base}/v1/gifs/search"),
        }
    }

    fn params(&self, query: &PageQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", query.api_key.to_string()),
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
        ];
        if query.feed == FeedKind::Search {
            params.push(("q", query.text.clone()));
        }
        if let Some(rating) = &self.options.rating {
            params.push(("rating", rating.clone()));
        }
        params
    }
}

impl PageSource for GiphySource {
    fn fetch(&self, query: &PageQuery) -> Result<Page, FetchError> {
        let url = self.endpoint(query.feed);
        debug!(feed = %query.feed, offset = query.offset, limit = query.limit, "requesting page");

        let response = self
            .client
            .get(&url)
            .query(&self.params(query))
            .send()
            .map_err(|err| FetchError::transport(err.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| FetchError::transport(err.without_url().to_string()))?;

        if !status.is_success() {
            return Err(FetchError::server(status.as_u16(), error_message(&body, status)));
        }

        parse_page(&body, query)
    }
}

fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        return message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Vec<Gif>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Gif {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    images: Option<Images>,
}

#[derive(Debug, Deserialize)]
struct Images {
    fixed_width: Option<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
    #[serde(default)]
    width: String,
    #[serde(default)]
    height: String,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total_count: Option<usize>,
    #[serde(default)]
    count: usize,
    #[serde(default)]
    offset: usize,
}

/// Decode a success payload into a [`Page`].
fn parse_page(body: &str, query: &PageQuery) -> Result<Page, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|err| FetchError::malformed(err.to_string()))?;

    let has_more = match &envelope.pagination {
        Some(Pagination {
            total_count: Some(total),
            count,
            offset,
        }) => offset + count < *total,
        // Without a total the only signal left is whether the page came back full.
        _ => envelope.data.len() >= query.limit,
    };

    let items = envelope.data.into_iter().map(Gif::into_item).collect();
    Ok(Page::new(items, has_more))
}

impl Gif {
    fn into_item(self) -> ResultItem {
        let preview = self
            .images
            .and_then(|images| images.fixed_width)
            .map(|image| Rendition {
                url: image.url,
                width: image.width.parse().unwrap_or(0),
                height: image.height.parse().unwrap_or(0),
            });
        ResultItem {
            id: self.id.into(),
            title: self.title,
            url: self.url,
            preview,
        }
    }
}
