// TUI widget modules for each page panel.

pub mod auction;
pub mod bid_form;
pub mod quit_confirm;
pub mod slider;
pub mod status_bar;
pub mod wishlist;
