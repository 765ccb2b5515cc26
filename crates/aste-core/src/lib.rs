// Library root: the auction page model, its behaviors, and the wire types the
// page exchanges with the auction server. No I/O lives here; the adapter crate
// executes the effects these modules produce.

pub mod board;
pub mod bid;
pub mod config;
pub mod countdown;
pub mod csrf;
pub mod live_feed;
pub mod page;
pub mod protocol;
pub mod slider;
pub mod wishlist;
