// Wishlist toggle: one heart button per auction.

use tracing::{debug, error};

use crate::protocol::{TransportError, WishlistResponse};

/// Label of a button whose auction is in the wishlist.
pub const FILLED_HEART: &str = "♥";
/// Label of a button whose auction is not in the wishlist.
pub const OUTLINE_HEART: &str = "♡";

/// Class selector that identifies wishlist buttons on the page.
pub const BUTTON_CLASS: &str = "desideri-btn";

/// Visual variant of a wishlist button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Filled red button: the auction is in the wishlist.
    Danger,
    /// Outlined red button: the auction is not in the wishlist.
    OutlineDanger,
}

impl ButtonStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            ButtonStyle::Danger => "btn-danger",
            ButtonStyle::OutlineDanger => "btn-outline-danger",
        }
    }
}

/// URL of the toggle endpoint for an auction.
pub fn endpoint(asta_id: &str) -> String {
    format!("/asta/{asta_id}/desideri/")
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistButton {
    /// `data-asta-id` of the button.
    pub asta_id: String,
    pub style: ButtonStyle,
}

impl WishlistButton {
    /// Button in its server-rendered state.
    pub fn new(asta_id: impl Into<String>, added: bool) -> Self {
        Self {
            asta_id: asta_id.into(),
            style: if added {
                ButtonStyle::Danger
            } else {
                ButtonStyle::OutlineDanger
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self.style {
            ButtonStyle::Danger => FILLED_HEART,
            ButtonStyle::OutlineDanger => OUTLINE_HEART,
        }
    }

    /// Class list of the button element.
    pub fn classes(&self) -> [&'static str; 3] {
        ["btn", BUTTON_CLASS, self.style.class_name()]
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    pub fn endpoint(&self) -> String {
        endpoint(&self.asta_id)
    }

    /// Apply the outcome of a toggle request. Only a successful response
    /// repaints; transport failures are logged and everything else is a no-op.
    pub fn apply(&mut self, result: Result<WishlistResponse, TransportError>) {
        match result {
            Ok(WishlistResponse { success: true, added }) => {
                self.style = if added {
                    ButtonStyle::Danger
                } else {
                    ButtonStyle::OutlineDanger
                };
            }
            Ok(_) => {
                debug!(asta_id = %self.asta_id, "wishlist toggle rejected by server");
            }
            Err(e) => {
                error!(asta_id = %self.asta_id, "wishlist request failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(success: bool, added: bool) -> Result<WishlistResponse, TransportError> {
        Ok(WishlistResponse { success, added })
    }

    #[test]
    fn endpoint_format() {
        assert_eq!(endpoint("42"), "/asta/42/desideri/");
    }

    #[test]
    fn initial_state_follows_added_flag() {
        assert_eq!(WishlistButton::new("1", true).label(), FILLED_HEART);
        assert_eq!(WishlistButton::new("1", false).label(), OUTLINE_HEART);
    }

    #[test]
    fn added_true_fills_heart() {
        let mut b = WishlistButton::new("7", false);
        b.apply(ok(true, true));
        assert_eq!(b.label(), "♥");
        assert!(b.has_class("btn-danger"));
        assert!(!b.has_class("btn-outline-danger"));
    }

    #[test]
    fn added_false_outlines_heart() {
        let mut b = WishlistButton::new("7", true);
        b.apply(ok(true, false));
        assert_eq!(b.label(), "♡");
        assert!(b.has_class("btn-outline-danger"));
        assert!(!b.has_class("btn-danger"));
    }

    #[test]
    fn unsuccessful_response_changes_nothing() {
        let mut b = WishlistButton::new("7", true);
        b.apply(ok(false, false));
        assert_eq!(b.style, ButtonStyle::Danger);
    }

    #[test]
    fn transport_failure_changes_nothing() {
        let mut b = WishlistButton::new("7", false);
        b.apply(Err(TransportError::Request("connection refused".into())));
        assert_eq!(b.style, ButtonStyle::OutlineDanger);
    }

    #[test]
    fn keeps_identity_classes() {
        let b = WishlistButton::new("7", false);
        assert!(b.has_class("btn"));
        assert!(b.has_class(BUTTON_CLASS));
    }
}
