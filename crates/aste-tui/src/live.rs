// WebSocket client for the auction's live price feed.
//
// The connection is receive-only: nothing is ever sent on it. A `LiveFeed`
// turns the raw frame stream into `LiveEvent`s and ends after reporting the
// close; once finished it stays finished.

use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use aste_core::board::Sequencer;
use aste_core::live_feed::LiveEvent;
use aste_core::page::PageEvent;

/// Close code reported when the connection ends without a close frame.
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// Close code reported when a close frame carries no status.
pub const NO_STATUS_RECEIVED: u16 = 1005;

/// A live connection to a real socket.
pub type SocketFeed = LiveFeed<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Receive side of a live connection.
pub struct LiveFeed<S> {
    stream: S,
    errored: bool,
    finished: bool,
}

impl<S> LiveFeed<S>
where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            errored: false,
            finished: false,
        }
    }

    /// Wait for the next event. Text frames are stamped from `sequencer` as
    /// they are read. Binary, ping and pong frames are skipped.
    ///
    /// A transport error is reported as `Error` and followed by
    /// `Closed { code: 1006 }`. After the close event this returns `None`
    /// forever.
    pub async fn next_event(&mut self, sequencer: &Sequencer) -> Option<LiveEvent> {
        if self.finished {
            return None;
        }
        if self.errored {
            self.finished = true;
            return Some(LiveEvent::Closed {
                code: ABNORMAL_CLOSURE,
            });
        }
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Some(LiveEvent::Message {
                        text: text.as_str().to_owned(),
                        stamp: sequencer.stamp(),
                    });
                }
                Some(Ok(Message::Close(frame))) => {
                    self.finished = true;
                    let code = frame
                        .map(|f| u16::from(f.code))
                        .unwrap_or(NO_STATUS_RECEIVED);
                    return Some(LiveEvent::Closed { code });
                }
                Some(Ok(_)) => {
                    // Binary, Ping, Pong, Frame: nothing for the page.
                }
                Some(Err(e)) => {
                    self.errored = true;
                    return Some(LiveEvent::Error(e.to_string()));
                }
                None => {
                    self.finished = true;
                    return Some(LiveEvent::Closed {
                        code: ABNORMAL_CLOSURE,
                    });
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<S> LiveFeed<S>
where
    S: Sink<Message> + Unpin,
{
    /// Close the connection from this side. The feed yields nothing more.
    pub async fn close(&mut self) {
        if self.stream.close().await.is_err() {
            debug!("live socket already closed");
        }
        self.finished = true;
    }
}

/// Open a live connection. The cookie string, when given, is sent with the
/// handshake so the server sees the same session as the HTTP calls.
pub async fn connect(url: &str, cookie: Option<&str>) -> Result<SocketFeed, WsError> {
    let mut request = url.into_client_request()?;
    if let Some(cookie) = cookie {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                request.headers_mut().insert(COOKIE, value);
            }
            Err(e) => warn!("cookie not usable as a header value, connecting without it: {e}"),
        }
    }
    let (ws_stream, _response) = tokio_tungstenite::connect_async(request).await?;
    Ok(LiveFeed::new(ws_stream))
}

/// Connect and forward every event of the feed through `tx` until the
/// connection closes or the receiver goes away. No reconnection is attempted.
pub async fn run_feed(
    url: String,
    cookie: Option<String>,
    sequencer: Arc<Sequencer>,
    tx: mpsc::Sender<PageEvent>,
) {
    let mut feed = match connect(&url, cookie.as_deref()).await {
        Ok(feed) => feed,
        Err(e) => {
            let _ = tx.send(PageEvent::Live(LiveEvent::Error(e.to_string()))).await;
            let _ = tx
                .send(PageEvent::Live(LiveEvent::Closed {
                    code: ABNORMAL_CLOSURE,
                }))
                .await;
            return;
        }
    };

    if tx.send(PageEvent::Live(LiveEvent::Opened)).await.is_err() {
        feed.close().await;
        return;
    }

    if !forward_events(&mut feed, &sequencer, &tx).await {
        debug!("page went away, dropping live connection");
        feed.close().await;
    }
}

/// Forward events from an open feed. Returns false if the receiver was
/// dropped before the feed finished.
pub async fn forward_events<S>(
    feed: &mut LiveFeed<S>,
    sequencer: &Sequencer,
    tx: &mpsc::Sender<PageEvent>,
) -> bool
where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    while let Some(event) = feed.next_event(sequencer).await {
        if tx.send(PageEvent::Live(event)).await.is_err() {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
