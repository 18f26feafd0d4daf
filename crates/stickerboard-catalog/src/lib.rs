//! Stickerboard Catalog
//!
//! Remote sticker catalog: the wire model, the HTTP service, background
//! loading and the picker state with its thumbnail cache.

pub mod error;
pub mod loader;
pub mod model;
pub mod picker;
pub mod service;

#[cfg(test)]
mod testing;

pub use error::{CatalogError, CatalogResult, LOAD_FAILED_MESSAGE};
pub use loader::{CatalogEvent, CatalogLoader};
pub use model::{Catalog, Item};
pub use picker::{CatalogModel, CatalogState, PickerUpdate};
pub use service::{
    CatalogEndpoint, CatalogService, HttpResponse, HttpTransport, ReqwestTransport,
};
