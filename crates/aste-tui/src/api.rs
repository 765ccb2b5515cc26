// HTTP side of the auction site: the two authenticated POSTs and the hand-off
// to the live feed.
//
// Every POST carries the CSRF token read from the session cookie in the
// `X-CSRFToken` header, and the cookie itself so the server sees the session.
// Response bodies are decoded as JSON whatever the status code; the server
// reports bid rejections with a 4xx and a JSON body.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::debug;

use aste_core::board::Sequencer;
use aste_core::config::ServerConfig;
use aste_core::csrf::CSRF_HEADER;
use aste_core::live_feed;
use aste_core::page::PageEvent;
use aste_core::protocol::{BidRequest, BidResponse, TransportError, WishlistResponse};
use aste_core::wishlist;

use crate::live;

/// Calls the auction page makes against the server.
#[async_trait]
pub trait AuctionApi: Send + Sync + 'static {
    /// POST to the wishlist endpoint of an auction. The body is empty.
    async fn toggle_wishlist(&self, asta_id: &str) -> Result<WishlistResponse, TransportError>;

    /// POST a bid to the form's URL.
    async fn place_bid(
        &self,
        url: &str,
        request: &BidRequest,
    ) -> Result<BidResponse, TransportError>;

    /// Open the live feed for an auction and forward its events through `tx`
    /// until it closes.
    async fn stream_live(
        &self,
        asta_id: String,
        sequencer: Arc<Sequencer>,
        tx: mpsc::Sender<PageEvent>,
    );
}

// ---------------------------------------------------------------------------
// SiteClient
// ---------------------------------------------------------------------------

/// `AuctionApi` backed by the real site.
pub struct SiteClient {
    http: reqwest::Client,
    base_url: Url,
    secure: bool,
    host: String,
    csrf_token: Option<String>,
    cookie: Option<String>,
}

impl SiteClient {
    /// Create a client for `server`. `csrf_token` is sent on every POST when
    /// present; `cookie` is sent verbatim as the `Cookie` header.
    pub fn new(
        server: &ServerConfig,
        cookie: Option<String>,
        csrf_token: Option<String>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(&server.base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            secure: server.is_secure(),
            host: server.host().to_string(),
            csrf_token,
            cookie,
        })
    }

    /// Resolve a site-relative path such as `/asta/3/desideri/`.
    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Request(format!("bad url `{path}`: {e}")))
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }
        request
    }

    /// The live feed URL for an auction on this site.
    pub fn live_url(&self, asta_id: &str) -> String {
        live_feed::socket_url(self.secure, &self.host, asta_id)
    }
}

async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, TransportError> {
    let response = request
        .send()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;
    debug!(status = %response.status(), url = %response.url(), "response received");
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl AuctionApi for SiteClient {
    async fn toggle_wishlist(&self, asta_id: &str) -> Result<WishlistResponse, TransportError> {
        let url = self.resolve(&wishlist::endpoint(asta_id))?;
        send_json(self.post(url)).await
    }

    async fn place_bid(
        &self,
        url: &str,
        request: &BidRequest,
    ) -> Result<BidResponse, TransportError> {
        let url = self.resolve(url)?;
        send_json(self.post(url).json(request)).await
    }

    async fn stream_live(
        &self,
        asta_id: String,
        sequencer: Arc<Sequencer>,
        tx: mpsc::Sender<PageEvent>,
    ) {
        let url = self.live_url(&asta_id);
        live::run_feed(url, self.cookie.clone(), sequencer, tx).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
