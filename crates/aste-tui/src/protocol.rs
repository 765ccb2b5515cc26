// Messages between the TUI and the app orchestrator.

use aste_core::page::Page;
use aste_core::slider::Handle;

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Click the wishlist button at `index`.
    ToggleWishlist { index: usize },
    /// Type a character into the bid amount.
    TypeImporto(char),
    /// Erase the last character of the bid amount.
    EraseImporto,
    /// Submit the bid form.
    SubmitBid,
    /// Move a slider handle by whole steps.
    NudgeSlider { handle: Handle, steps: i64 },
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The page after the latest change.
    PageSnapshot(Box<Page>),
}
