// Library root: the terminal adapter for the auction page. Re-exports all
// modules so integration tests can drive the app loop and the network
// clients directly.

pub mod api;
pub mod app;
pub mod live;
pub mod protocol;
pub mod tui;
