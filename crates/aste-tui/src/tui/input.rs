// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState changes (focus, selection, active
// slider handle).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Focus, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Release and Repeat on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Tab => {
            view_state.focus = view_state.focus.next();
            return None;
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            return None;
        }
        _ => {}
    }

    match view_state.focus {
        Focus::BidForm => handle_bid_form(key_event),
        Focus::Wishlist => handle_wishlist(key_event, view_state),
        Focus::Slider => handle_slider(key_event, view_state),
    }
}

/// `y` or `q` confirms, `n` or `Esc` cancels, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_bid_form(key_event: KeyEvent) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => Some(UserCommand::TypeImporto(c)),
        KeyCode::Backspace => Some(UserCommand::EraseImporto),
        KeyCode::Enter => Some(UserCommand::SubmitBid),
        _ => None,
    }
}

fn handle_wishlist(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let len = view_state.page.wishlist.len();
    match key_event.code {
        KeyCode::Up => {
            view_state.wishlist_selected = view_state.wishlist_selected.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            if view_state.wishlist_selected + 1 < len {
                view_state.wishlist_selected += 1;
            }
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') if view_state.wishlist_selected < len => {
            Some(UserCommand::ToggleWishlist {
                index: view_state.wishlist_selected,
            })
        }
        _ => None,
    }
}

fn handle_slider(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    view_state.page.slider.as_ref()?;
    match key_event.code {
        KeyCode::Left => Some(UserCommand::NudgeSlider {
            handle: view_state.active_handle,
            steps: -1,
        }),
        KeyCode::Right => Some(UserCommand::NudgeSlider {
            handle: view_state.active_handle,
            steps: 1,
        }),
        KeyCode::Char(' ') => {
            view_state.active_handle = view_state.active_handle.other();
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
