//! Catalog HTTP service.
//!
//! The service only knows about an [`HttpTransport`]; the real network client
//! lives in [`ReqwestTransport`] and tests substitute their own.

use crate::error::{CatalogError, CatalogResult};
use crate::model::Catalog;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "appostropheanalytics.herokuapp.com";
pub const DEFAULT_PATH: &str = "/scrl/test/overlays";

/// Where the catalog is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEndpoint {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl Default for CatalogEndpoint {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl CatalogEndpoint {
    /// Assemble the request URL.
    pub fn url(&self) -> CatalogResult<Url> {
        if self.scheme.is_empty() || self.host.is_empty() {
            return Err(CatalogError::UrlBuild(format!(
                "incomplete endpoint {}://{}",
                self.scheme, self.host
            )));
        }
        let mut url = Url::parse(&format!("{}://{}", self.scheme, self.host))?;
        url.set_path(&self.path);
        Ok(url)
    }
}

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking HTTP GET.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &Url) -> CatalogResult<HttpResponse>;
}

/// [`HttpTransport`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> CatalogResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> CatalogResult<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// Map a non-success status to an error.
///
/// Only 200 counts as success. Codes without a standard reason phrase are
/// reported as unrecognized.
pub fn check_status(status: u16) -> CatalogResult<()> {
    if status == StatusCode::OK.as_u16() {
        return Ok(());
    }
    let known = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .is_some();
    if known {
        Err(CatalogError::HttpStatus(status))
    } else {
        Err(CatalogError::UnrecognizedStatus(status))
    }
}

/// Decode a response body: a JSON array whose first element is the catalog.
pub fn decode_catalog(body: &[u8]) -> CatalogResult<Catalog> {
    let catalogs: Vec<Catalog> = serde_json::from_slice(body)?;
    catalogs
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::Decode("response contained no catalog".to_string()))
}

/// Fetches the catalog and its thumbnails.
#[derive(Clone)]
pub struct CatalogService {
    endpoint: CatalogEndpoint,
    transport: Arc<dyn HttpTransport>,
}

impl CatalogService {
    pub fn new(transport: impl HttpTransport + 'static) -> Self {
        Self::with_endpoint(CatalogEndpoint::default(), transport)
    }

    pub fn with_endpoint(endpoint: CatalogEndpoint, transport: impl HttpTransport + 'static) -> Self {
        Self {
            endpoint,
            transport: Arc::new(transport),
        }
    }

    /// Service talking to the default endpoint over the network.
    pub fn connect() -> CatalogResult<Self> {
        Ok(Self::new(ReqwestTransport::new()?))
    }

    pub fn endpoint(&self) -> &CatalogEndpoint {
        &self.endpoint
    }

    /// Fetch the catalog. Blocks the calling thread.
    pub fn fetch(&self) -> CatalogResult<Catalog> {
        let url = self.endpoint.url()?;
        log::info!("Fetching catalog from {}", url);
        let response = self.transport.get(&url)?;
        check_status(response.status)?;
        let catalog = decode_catalog(&response.body)?;
        log::info!("Catalog '{}' loaded with {} items", catalog.title, catalog.len());
        Ok(catalog)
    }

    /// Download thumbnail bytes. Any failure yields `None`.
    pub fn fetch_thumbnail(&self, source_url: &str) -> Option<Vec<u8>> {
        let url = match Url::parse(source_url) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Skipping thumbnail with bad URL {}: {}", source_url, e);
                return None;
            }
        };
        match self.transport.get(&url) {
            Ok(response) if response.status == 200 && !response.body.is_empty() => {
                Some(response.body)
            }
            Ok(response) => {
                log::debug!("Thumbnail {} unavailable, status {}", url, response.status);
                None
            }
            Err(e) => {
                log::debug!("Thumbnail {} failed: {}", url, e);
                None
            }
        }
    }
}
