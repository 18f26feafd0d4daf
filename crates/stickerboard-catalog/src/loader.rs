//! Background catalog loading.
//!
//! Network requests run on worker threads; results come back over a channel
//! and are drained with [`CatalogLoader::poll_events`] on the interaction
//! thread, which therefore never blocks on I/O.

use crate::error::CatalogError;
use crate::model::Catalog;
use crate::service::CatalogService;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::Duration;

/// Results delivered by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    Loaded(Catalog),
    Failed(CatalogError),
    Thumbnail { item_id: u64, bytes: Vec<u8> },
    ThumbnailUnavailable { item_id: u64 },
}

/// Runs catalog and thumbnail requests off the calling thread.
pub struct CatalogLoader {
    service: CatalogService,
    /// Channel for the current request generation. Dropped on cancel.
    channel: Option<(Sender<CatalogEvent>, Receiver<CatalogEvent>)>,
}

impl CatalogLoader {
    pub fn new(service: CatalogService) -> Self {
        Self {
            service,
            channel: None,
        }
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }

    fn sender(&mut self) -> Sender<CatalogEvent> {
        let (tx, _) = self.channel.get_or_insert_with(channel);
        tx.clone()
    }

    /// Start fetching the catalog.
    pub fn request_catalog(&mut self) {
        let event_tx = self.sender();
        let service = self.service.clone();
        thread::spawn(move || {
            let event = match service.fetch() {
                Ok(catalog) => CatalogEvent::Loaded(catalog),
                Err(e) => {
                    log::error!("Catalog fetch failed: {}", e);
                    CatalogEvent::Failed(e)
                }
            };
            if event_tx.send(event).is_err() {
                log::debug!("Catalog result discarded after cancel");
            }
        });
    }

    /// Start downloading a thumbnail.
    pub fn request_thumbnail(&mut self, item_id: u64, source_url: String) {
        let event_tx = self.sender();
        let service = self.service.clone();
        thread::spawn(move || {
            let event = match service.fetch_thumbnail(&source_url) {
                Some(bytes) => CatalogEvent::Thumbnail { item_id, bytes },
                None => CatalogEvent::ThumbnailUnavailable { item_id },
            };
            let _ = event_tx.send(event);
        });
    }

    /// Drain finished results without blocking.
    pub fn poll_events(&mut self) -> Vec<CatalogEvent> {
        match &self.channel {
            Some((_, rx)) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Block for up to `timeout` waiting for the next result.
    pub fn wait_event(&mut self, timeout: Duration) -> Option<CatalogEvent> {
        let (_, rx) = self.channel.as_ref()?;
        match rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Discard every in-flight request. Late results are dropped.
    pub fn cancel(&mut self) {
        if self.channel.take().is_some() {
            log::info!("Catalog requests cancelled");
        }
    }
}
