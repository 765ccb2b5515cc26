// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Auction (4 rows): price, bidder, countdown        |
// +-------------------------+------------------------+
// | Bid Form (5 rows)        | Wishlist               |
// +-------------------------+                        |
// | Price Slider (fill)      |                        |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each panel.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: live connection status.
    pub status_bar: Rect,
    /// Current price, current bidder and countdown.
    pub auction: Rect,
    pub bid_form: Rect,
    pub slider: Rect,
    /// Right column: wishlist buttons.
    pub wishlist: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(5), // auction
            Constraint::Min(10),   // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(horizontal[0]);

    AppLayout {
        status_bar: vertical[0],
        auction: vertical[1],
        bid_form: left[0],
        slider: left[1],
        wishlist: horizontal[1],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
