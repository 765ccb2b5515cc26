// App orchestrator: owns the page and serializes every change to it.
//
// A single task selects over network results, user commands from the TUI and
// the one-second countdown interval. Each input becomes a `PageEvent`; the
// effects the page returns are executed here by spawning tasks on the
// `AuctionApi`, whose results come back through `net_rx`. After every change a
// snapshot of the page is pushed to the TUI.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use aste_core::board::Sequencer;
use aste_core::countdown::TICK_INTERVAL;
use aste_core::page::{Effect, Page, PageEvent};

use crate::api::AuctionApi;
use crate::protocol::{UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub page: Page,
    api: Arc<dyn AuctionApi>,
    sequencer: Arc<Sequencer>,
    net_tx: mpsc::Sender<PageEvent>,
    countdown_running: bool,
}

impl AppState {
    /// `net_tx` is the sending half of the channel `run` reads network
    /// results from.
    pub fn new(page: Page, api: Arc<dyn AuctionApi>, net_tx: mpsc::Sender<PageEvent>) -> Self {
        Self {
            page,
            api,
            sequencer: Arc::new(Sequencer::new()),
            net_tx,
            countdown_running: false,
        }
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown_running
    }

    /// Feed one event to the page and execute whatever it asks for.
    pub fn apply(&mut self, event: PageEvent) {
        for effect in self.page.handle(event) {
            self.execute(effect);
        }
    }

    /// Execute one effect. Network calls run in their own task; nothing
    /// in flight is ever cancelled.
    pub fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::PostWishlist { index, asta_id } => {
                let api = Arc::clone(&self.api);
                let tx = self.net_tx.clone();
                tokio::spawn(async move {
                    let result = api.toggle_wishlist(&asta_id).await;
                    if let Err(e) = &result {
                        debug!("wishlist call for auction {asta_id} failed: {e}");
                    }
                    let _ = tx.send(PageEvent::WishlistResponded { index, result }).await;
                });
            }
            Effect::PostBid { url, request } => {
                let api = Arc::clone(&self.api);
                let sequencer = Arc::clone(&self.sequencer);
                let tx = self.net_tx.clone();
                tokio::spawn(async move {
                    let result = api.place_bid(&url, &request).await;
                    let stamp = sequencer.stamp();
                    let _ = tx.send(PageEvent::BidResponded { result, stamp }).await;
                });
            }
            Effect::OpenLiveFeed { asta_id } => {
                let api = Arc::clone(&self.api);
                let sequencer = Arc::clone(&self.sequencer);
                let tx = self.net_tx.clone();
                tokio::spawn(async move {
                    api.stream_live(asta_id, sequencer, tx).await;
                });
            }
            Effect::StartCountdown => {
                self.countdown_running = true;
            }
        }
    }
}

fn command_event(cmd: UserCommand) -> Option<PageEvent> {
    match cmd {
        UserCommand::ToggleWishlist { index } => Some(PageEvent::WishlistClicked { index }),
        UserCommand::TypeImporto(c) => Some(PageEvent::ImportoTyped(c)),
        UserCommand::EraseImporto => Some(PageEvent::ImportoErased),
        UserCommand::SubmitBid => Some(PageEvent::BidSubmitted),
        UserCommand::NudgeSlider { handle, steps } => {
            Some(PageEvent::SliderNudged { handle, steps })
        }
        UserCommand::Quit => None,
    }
}

async fn push_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::PageSnapshot(Box::new(state.page.clone())))
        .await;
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the page until the user quits or the TUI goes away.
///
/// `startup` are the effects returned by `Page::load`.
pub async fn run(
    mut state: AppState,
    startup: Vec<Effect>,
    mut net_rx: mpsc::Receiver<PageEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    info!("application event loop started");

    for effect in startup {
        state.execute(effect);
    }
    push_snapshot(&state, &ui_tx).await;

    let mut countdown = tokio::time::interval(TICK_INTERVAL);
    countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the first repaint is one full
    // interval after load.
    countdown.tick().await;

    loop {
        tokio::select! {
            // --- Network results ---
            event = net_rx.recv() => {
                match event {
                    Some(event) => {
                        state.apply(event);
                        push_snapshot(&state, &ui_tx).await;
                    }
                    None => {
                        error!("network channel closed");
                        break;
                    }
                }
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd.and_then(command_event) {
                    Some(event) => {
                        state.apply(event);
                        push_snapshot(&state, &ui_tx).await;
                    }
                    None => {
                        info!("quit requested");
                        break;
                    }
                }
            }

            // --- Countdown ---
            _ = countdown.tick(), if state.countdown_running => {
                state.apply(PageEvent::CountdownTick { now: Utc::now() });
                push_snapshot(&state, &ui_tx).await;
            }
        }
    }

    info!("application event loop finished");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
