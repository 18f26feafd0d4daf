//! Wire model of the sticker catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A titled list of stickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    pub items: Vec<Item>,
}

impl Catalog {
    /// Item at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn position(&self, item_id: u64) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One sticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    /// Image location.
    pub source_url: String,
    pub overlay_name: String,
    /// Timestamp as sent by the server, kept verbatim. See [`Item::created`].
    pub created_at: String,
    pub category_id: u64,
}

impl Item {
    /// Parsed image location, if well-formed.
    pub fn source(&self) -> Option<Url> {
        Url::parse(&self.source_url).ok()
    }

    /// Creation time, if `created_at` is valid RFC 3339.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
