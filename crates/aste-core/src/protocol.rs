// Wire types for the auction server's JSON endpoints.
//
// Field names follow the server's payloads verbatim (`importo`,
// `nuovo_prezzo`, `acquirente`), so the structs deserialize without renames.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A request that never produced a usable JSON body.
///
/// Covers network failures, rejected connections, and bodies that are not
/// JSON (e.g. an HTML error page from a CSRF rejection). Application-level
/// failures (`success: false`) are not errors; they are ordinary responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// A price as the server sends it: usually a pre-formatted string such as
/// `"12.50"`, occasionally a bare JSON number. Displayed exactly as received.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Text(s) => f.write_str(s),
            PriceValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A new current price and the bidder who set it.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub nuovo_prezzo: PriceValue,
    pub acquirente: String,
}

// ---------------------------------------------------------------------------
// Wishlist endpoint
// ---------------------------------------------------------------------------

/// Response of `POST /asta/{id}/desideri/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WishlistResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub added: bool,
}

// ---------------------------------------------------------------------------
// Bid endpoint
// ---------------------------------------------------------------------------

/// Body of a bid POST. The amount is sent as typed into the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidRequest {
    pub importo: String,
}

/// Response of a bid POST, success and failure shapes merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BidResponse {
    #[serde(default)]
    pub success: bool,
    pub nuovo_prezzo: Option<PriceValue>,
    pub acquirente: Option<String>,
    pub error: Option<String>,
}

impl BidResponse {
    /// The price update carried by a successful response, if both fields
    /// are present.
    pub fn price_update(&self) -> Option<PriceUpdate> {
        match (&self.nuovo_prezzo, &self.acquirente) {
            (Some(prezzo), Some(acquirente)) => Some(PriceUpdate {
                nuovo_prezzo: prezzo.clone(),
                acquirente: acquirente.clone(),
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
