// Bid form: amount input, error banner, and response handling.

use tracing::{error, warn};

use crate::board::{PriceBoard, Stamp};
use crate::protocol::{BidRequest, BidResponse, TransportError};

/// The `#error-message` element next to the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBanner {
    pub text: String,
    pub visible: bool,
}

/// The `#offerta-form` element and its `#importo-offerta` input.
#[derive(Debug, Clone, PartialEq)]
pub struct BidForm {
    /// `data-url` of the form: where bids are posted.
    pub url: String,
    /// Current value of the amount input.
    pub importo: String,
    pub error: ErrorBanner,
}

impl BidForm {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            importo: String::new(),
            error: ErrorBanner::default(),
        }
    }

    /// Type a character into the amount input. Only characters a numeric
    /// input accepts are taken; returns whether the input changed.
    pub fn type_char(&mut self, c: char) -> bool {
        if c.is_ascii_digit() || c == '.' {
            self.importo.push(c);
            true
        } else {
            false
        }
    }

    pub fn erase(&mut self) {
        self.importo.pop();
    }

    /// Body for submitting the current amount. The amount is sent as typed;
    /// validation belongs to the server.
    pub fn request(&self) -> BidRequest {
        BidRequest {
            importo: self.importo.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.importo.clear();
    }

    /// Apply the outcome of a bid submission.
    ///
    /// Success hides the banner, repaints the price board, and resets the
    /// form. Failure shows the server's error text and keeps the entered
    /// amount. Transport failures are logged and leave everything as is.
    pub fn apply(
        &mut self,
        board: &mut PriceBoard,
        result: Result<BidResponse, TransportError>,
        stamp: Stamp,
    ) {
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                error!(url = %self.url, "bid request failed: {e}");
                return;
            }
        };

        if response.success {
            self.error.visible = false;
            match response.price_update() {
                Some(update) => {
                    board.apply(&update, stamp);
                }
                None => warn!("bid accepted but response lacks nuovo_prezzo/acquirente"),
            }
            self.reset();
        } else {
            self.error.text = response.error.unwrap_or_default();
            self.error.visible = true;
        }
    }
}
