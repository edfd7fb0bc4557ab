use std::fmt;

use serde::Serialize;

/// Stable identifier of a [`ResultItem`], used for de-duplication and keying.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A preview image the render surface may display for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendition {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A single entry of a media feed.
///
/// The pagination core never looks past [`ResultItem::id`]; the remaining
/// fields are payload for whoever renders the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub id: ItemId,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Rendition>,
}

impl ResultItem {
    /// Build an item without a preview rendition.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            preview: None,
        }
    }

    /// Attach a preview rendition to the item.
    #[must_use]
    pub fn with_preview(mut self, preview: Rendition) -> Self {
        self.preview = Some(preview);
        self
    }
}
