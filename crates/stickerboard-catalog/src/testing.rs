//! In-memory transport and fixtures shared by the tests.

use crate::error::{CatalogError, CatalogResult};
use crate::service::{HttpResponse, HttpTransport};
use std::collections::HashMap;
use url::Url;

pub const CATALOG_JSON: &str = r#"[
    {
        "title": "Stickers",
        "items": [
            {
                "id": 268,
                "source_url": "https://scrl-addtext.b-cdn.net/1707669886150-s1.png",
                "overlay_name": "s1",
                "created_at": "2024-02-11T16:46:18.712Z",
                "category_id": 36
            },
            {
                "id": 269,
                "source_url": "https://scrl-addtext.b-cdn.net/1707669886151-s2.png",
                "overlay_name": "s2",
                "created_at": "2024-02-11T16:46:19.004Z",
                "category_id": 36
            },
            {
                "id": 270,
                "source_url": "https://scrl-addtext.b-cdn.net/1707669886152-s3.png",
                "overlay_name": "s3",
                "created_at": "2024-02-11T16:46:19.311Z",
                "category_id": 36
            }
        ]
    }
]"#;

/// Serves canned responses by URL. Unrouted URLs fail with a transport error.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, HttpResponse>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &Url) -> CatalogResult<HttpResponse> {
        self.routes
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| CatalogError::Transport(format!("no route for {}", url)))
    }
}
