// TUI: layout, input handling, and widget rendering for the auction page.
//
// The TUI owns a `ViewState` holding the latest page snapshot plus purely
// local state (focus, wishlist selection, active slider handle). The app
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use aste_core::page::Page;
use aste_core::slider::Handle;

use crate::protocol::{UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    BidForm,
    Wishlist,
    Slider,
}

impl Focus {
    /// Next panel in `Tab` order.
    pub fn next(self) -> Self {
        match self {
            Focus::BidForm => Focus::Wishlist,
            Focus::Wishlist => Focus::Slider,
            Focus::Slider => Focus::BidForm,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state. `page` is replaced wholesale by every snapshot; the
/// other fields live only here.
pub struct ViewState {
    /// Latest page received from the app orchestrator.
    pub page: Page,
    pub focus: Focus,
    /// Highlighted row in the wishlist panel.
    pub wishlist_selected: usize,
    /// Slider handle moved by the arrow keys.
    pub active_handle: Handle,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            page: Page::default(),
            focus: Focus::BidForm,
            wishlist_selected: 0,
            active_handle: Handle::Low,
            confirm_quit: false,
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::PageSnapshot(page) => {
            state.page = *page;
            let len = state.page.wishlist.len();
            if state.wishlist_selected >= len {
                state.wishlist_selected = len.saturating_sub(1);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete page frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::auction::render(frame, layout.auction, state);
    widgets::bid_form::render(frame, layout.bid_form, state);
    widgets::slider::render(frame, layout.slider, state);
    widgets::wishlist::render(frame, layout.wishlist, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

/// Key hints for the focused panel.
fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::BidForm => " Tab:Focus | 0-9 .:Amount | Backspace:Erase | Enter:Bid | q:Quit",
        Focus::Wishlist => " Tab:Focus | Up/Down:Select | Enter/Space:Toggle | q:Quit",
        Focus::Slider => " Tab:Focus | Left/Right:Move | Space:Switch handle | q:Quit",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state.focus),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input and the render tick until the user
/// quits or the app orchestrator goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse, resize, focus: nothing to do.
                    }
                    Some(Err(e)) => {
                        warn!("terminal input error: {e}");
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
