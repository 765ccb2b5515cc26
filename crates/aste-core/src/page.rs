// The auction page: every element the five behaviors touch, and the reducer
// that moves the page from one state to the next.
//
// `Page::load` plays the part of the page-load handler: it builds each
// element that the page contract declares and returns the effects needed to
// bring the page to life (open the live feed, start the countdown).
// `Page::handle` takes one event at a time and returns the effects the
// adapter must execute. Nothing in here performs I/O.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::bid::BidForm;
use crate::board::{PriceBoard, Stamp};
use crate::config::PageConfig;
use crate::countdown::{self, Countdown};
use crate::live_feed::{self, ConnectionStatus, LiveEvent, LiveFrame};
use crate::protocol::{BidRequest, BidResponse, TransportError, WishlistResponse};
use crate::slider::{Handle, PriceSlider};
use crate::wishlist::WishlistButton;

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// Input to the page reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    WishlistClicked {
        index: usize,
    },
    WishlistResponded {
        index: usize,
        result: Result<WishlistResponse, TransportError>,
    },
    ImportoTyped(char),
    ImportoErased,
    BidSubmitted,
    BidResponded {
        result: Result<BidResponse, TransportError>,
        stamp: Stamp,
    },
    CountdownTick {
        now: DateTime<Utc>,
    },
    Live(LiveEvent),
    SliderDragged {
        handle: Handle,
        value: f64,
    },
    SliderNudged {
        handle: Handle,
        steps: i64,
    },
}

/// Work the adapter performs on the page's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Authenticated POST to the wishlist endpoint of button `index`.
    PostWishlist { index: usize, asta_id: String },
    /// Authenticated POST of a bid to the form's URL.
    PostBid { url: String, request: BidRequest },
    /// Open the receive-only live connection for an auction.
    OpenLiveFeed { asta_id: String },
    /// Start the repeating countdown tick.
    StartCountdown,
}

/// State of the live connection element.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFeedState {
    pub asta_id: String,
    pub status: ConnectionStatus,
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub board: PriceBoard,
    pub wishlist: Vec<WishlistButton>,
    pub bid_form: Option<BidForm>,
    pub countdown: Option<Countdown>,
    pub live: Option<LiveFeedState>,
    pub slider: Option<PriceSlider>,
}

impl Page {
    /// Build the page from its contract and return the start-up effects.
    pub fn load(cfg: &PageConfig) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        let wishlist = cfg
            .wishlist
            .iter()
            .map(|w| WishlistButton::new(w.asta_id.clone(), w.added))
            .collect();

        let bid_form = cfg.offerta.as_ref().map(|o| BidForm::new(o.url.clone()));

        let countdown = cfg.countdown.as_ref().and_then(|c| {
            match countdown::parse_deadline(&c.fine_asta) {
                Some(deadline) => {
                    effects.push(Effect::StartCountdown);
                    Some(Countdown::new(deadline))
                }
                None => {
                    warn!("unparsable countdown deadline `{}`, countdown disabled", c.fine_asta);
                    None
                }
            }
        });

        let live = cfg
            .dettaglio
            .as_ref()
            .filter(|d| !d.asta_id.is_empty())
            .map(|d| {
                info!("connecting to live feed for auction {}", d.asta_id);
                effects.push(Effect::OpenLiveFeed {
                    asta_id: d.asta_id.clone(),
                });
                LiveFeedState {
                    asta_id: d.asta_id.clone(),
                    status: ConnectionStatus::Connecting,
                }
            });

        let slider = cfg
            .slider
            .as_ref()
            .map(|s| PriceSlider::mount(s.max_price.as_deref(), &s.prezzo_min, &s.prezzo_max));

        let page = Page {
            board: PriceBoard::new(cfg.prezzo_attuale.clone(), cfg.acquirente_attuale.clone()),
            wishlist,
            bid_form,
            countdown,
            live,
            slider,
        };
        (page, effects)
    }

    /// Apply one event. Events aimed at an element the page does not have
    /// are ignored.
    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::WishlistClicked { index } => match self.wishlist.get(index) {
                Some(button) => vec![Effect::PostWishlist {
                    index,
                    asta_id: button.asta_id.clone(),
                }],
                None => vec![],
            },
            PageEvent::WishlistResponded { index, result } => {
                if let Some(button) = self.wishlist.get_mut(index) {
                    button.apply(result);
                }
                vec![]
            }
            PageEvent::ImportoTyped(c) => {
                if let Some(form) = self.bid_form.as_mut() {
                    form.type_char(c);
                }
                vec![]
            }
            PageEvent::ImportoErased => {
                if let Some(form) = self.bid_form.as_mut() {
                    form.erase();
                }
                vec![]
            }
            PageEvent::BidSubmitted => match &self.bid_form {
                Some(form) => vec![Effect::PostBid {
                    url: form.url.clone(),
                    request: form.request(),
                }],
                None => vec![],
            },
            PageEvent::BidResponded { result, stamp } => {
                if let Some(form) = self.bid_form.as_mut() {
                    form.apply(&mut self.board, result, stamp);
                }
                vec![]
            }
            PageEvent::CountdownTick { now } => {
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.tick(now);
                }
                vec![]
            }
            PageEvent::Live(live_event) => {
                self.handle_live(live_event);
                vec![]
            }
            PageEvent::SliderDragged { handle, value } => {
                if let Some(slider) = self.slider.as_mut() {
                    slider.drag(handle, value);
                }
                vec![]
            }
            PageEvent::SliderNudged { handle, steps } => {
                if let Some(slider) = self.slider.as_mut() {
                    slider.nudge(handle, steps);
                }
                vec![]
            }
        }
    }

    fn handle_live(&mut self, event: LiveEvent) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        match event {
            LiveEvent::Opened => {
                info!("live connection for auction {} established", live.asta_id);
                live.status = ConnectionStatus::Open;
            }
            LiveEvent::Message { text, stamp } => {
                info!("live message received: {text}");
                match live_feed::classify(&text) {
                    LiveFrame::Update(update) => {
                        self.board.apply(&update, stamp);
                    }
                    LiveFrame::Ignored => {}
                    LiveFrame::Malformed(e) => warn!("error parsing live message: {e}"),
                }
            }
            LiveEvent::Closed { code } => {
                error!(
                    "live socket for auction {} closed unexpectedly, code {code}",
                    live.asta_id
                );
                live.status = ConnectionStatus::Closed { code };
            }
            LiveEvent::Error(e) => {
                error!("live socket error: {e}");
                live.status = ConnectionStatus::Failed;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
