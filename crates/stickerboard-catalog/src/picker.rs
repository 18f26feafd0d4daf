//! State behind the sticker picker.
//!
//! Owns the loaded catalog and a thumbnail cache keyed by item id. All
//! methods run on the interaction thread; [`CatalogModel::update`] folds in
//! whatever the loader has finished since the last call.

use crate::error::CatalogError;
use crate::loader::{CatalogEvent, CatalogLoader};
use crate::model::{Catalog, Item};
use std::collections::{HashMap, HashSet};

/// Loading state of the catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    #[default]
    Idle,
    Loading,
    Loaded(Catalog),
    /// Message for the user.
    Failed(String),
}

/// What changed during [`CatalogModel::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerUpdate {
    /// The whole list changed.
    Reloaded,
    /// The thumbnail at this index became available.
    Item(usize),
    Failed,
}

pub struct CatalogModel {
    state: CatalogState,
    loader: CatalogLoader,
    thumbnails: HashMap<u64, Vec<u8>>,
    pending: HashSet<u64>,
    /// Thumbnails that failed to download; not retried until the next load.
    unavailable: HashSet<u64>,
}

impl CatalogModel {
    pub fn new(loader: CatalogLoader) -> Self {
        Self {
            state: CatalogState::Idle,
            loader,
            thumbnails: HashMap::new(),
            pending: HashSet::new(),
            unavailable: HashSet::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Start loading the catalog. Ignored while a load is in flight.
    ///
    /// Failed thumbnails become eligible for download again.
    pub fn load(&mut self) {
        if self.state == CatalogState::Loading {
            return;
        }
        self.unavailable.clear();
        self.state = CatalogState::Loading;
        self.loader.request_catalog();
    }

    /// Apply finished loader results.
    pub fn update(&mut self) -> Vec<PickerUpdate> {
        let mut updates = Vec::new();
        for event in self.loader.poll_events() {
            match event {
                CatalogEvent::Loaded(catalog) => {
                    self.thumbnails.clear();
                    self.pending.clear();
                    self.unavailable.clear();
                    self.state = CatalogState::Loaded(catalog);
                    updates.push(PickerUpdate::Reloaded);
                }
                CatalogEvent::Failed(e) => {
                    self.fail(&e);
                    updates.push(PickerUpdate::Failed);
                }
                CatalogEvent::Thumbnail { item_id, bytes } => {
                    self.pending.remove(&item_id);
                    let Some(index) = self.catalog().and_then(|c| c.position(item_id)) else {
                        continue;
                    };
                    self.thumbnails.insert(item_id, bytes);
                    updates.push(PickerUpdate::Item(index));
                }
                CatalogEvent::ThumbnailUnavailable { item_id } => {
                    self.pending.remove(&item_id);
                    self.unavailable.insert(item_id);
                }
            }
        }
        updates
    }

    fn fail(&mut self, error: &CatalogError) {
        log::error!("Sticker catalog unavailable: {}", error);
        self.state = CatalogState::Failed(error.user_message().to_string());
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            CatalogState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Number of items, zero until loaded.
    pub fn item_count(&self) -> usize {
        self.catalog().map_or(0, Catalog::len)
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.catalog()?.get(index)
    }

    /// Cached thumbnail for the item at `index`.
    ///
    /// On a miss the download is started, once, and `None` is returned; a
    /// later [`update`](Self::update) reports the index when it arrives. A
    /// failed download is not retried until the next [`load`](Self::load).
    pub fn thumbnail(&mut self, index: usize) -> Option<&[u8]> {
        let (id, source_url) = {
            let item = self.item(index)?;
            (item.id, item.source_url.clone())
        };
        if !self.thumbnails.contains_key(&id)
            && !self.unavailable.contains(&id)
            && self.pending.insert(id)
        {
            self.loader.request_thumbnail(id, source_url);
        }
        self.thumbnails.get(&id).map(Vec::as_slice)
    }

    /// Whether a thumbnail download for the item at `index` is in flight.
    pub fn is_pending(&self, index: usize) -> bool {
        self.item(index).is_some_and(|item| self.pending.contains(&item.id))
    }

    /// Drop pending results, e.g. when the picker is dismissed.
    pub fn cancel(&mut self) {
        self.loader.cancel();
        self.pending.clear();
        if self.state == CatalogState::Loading {
            self.state = CatalogState::Idle;
        }
    }
}
