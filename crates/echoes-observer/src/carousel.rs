//! The landing-page hero carousel.
//!
//! A [`PhaseCarousel`] belongs to exactly one `WebSocket` connection. It is
//! created when the client connects, advanced by that connection's own
//! interval, and dropped with the connection. There is no process-wide
//! carousel, so nothing keeps ticking after the page goes away.

use std::fmt::Display;
use std::time::Duration;

use axum::extract::ws::Message;
use echoes_core::catalog;
use echoes_types::{PhaseCard, PhaseName};
use futures::{Sink, SinkExt, Stream, StreamExt};
use serde::Serialize;
use tokio::time::{MissedTickBehavior, interval_at};
use tracing::debug;

/// Cycles through the eight phases in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCarousel {
    current: PhaseName,
}

impl Default for PhaseCarousel {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseCarousel {
    /// A carousel showing the new moon.
    pub const fn new() -> Self {
        Self {
            current: PhaseName::NewMoon,
        }
    }

    /// The phase on screen.
    pub const fn current(&self) -> PhaseName {
        self.current
    }

    /// Move to the next phase and return it.
    pub const fn advance(&mut self) -> PhaseName {
        self.current = self.current.next();
        self.current
    }

    /// The frame describing the phase on screen.
    pub fn frame(&self) -> CarouselFrame {
        CarouselFrame {
            index: self.current.index(),
            card: catalog::card(self.current),
        }
    }
}

/// One carousel update pushed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselFrame {
    /// Position in the eight-phase cycle.
    pub index: usize,
    /// The card to show.
    #[serde(flatten)]
    pub card: PhaseCard,
}

/// Why a carousel session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client sent a close frame or its stream ended.
    ClientClosed,
    /// Writing to the client failed.
    SendFailed,
    /// Reading from the client failed.
    ReceiveFailed,
}

/// Drive one carousel session over a split socket.
///
/// Sends the current frame at once, then advances and sends a frame every
/// `period` until the client goes away. Returns how the session ended and
/// how many frames were sent.
pub async fn run_session<Tx, Rx, E>(mut tx: Tx, mut rx: Rx, period: Duration) -> (SessionEnd, u64)
where
    Tx: Sink<Message> + Unpin,
    Rx: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut carousel = PhaseCarousel::new();
    let mut sent: u64 = 0;

    if send_frame(&mut tx, &carousel).await.is_err() {
        return (SessionEnd::SendFailed, sent);
    }
    sent = sent.saturating_add(1);

    let start = tokio::time::Instant::now()
        .checked_add(period)
        .unwrap_or_else(tokio::time::Instant::now);
    let mut ticker = interval_at(start, period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                carousel.advance();
                if send_frame(&mut tx, &carousel).await.is_err() {
                    debug!("carousel client disconnected (send failed)");
                    return (SessionEnd::SendFailed, sent);
                }
                sent = sent.saturating_add(1);
            }
            msg = rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(frames = sent, "carousel client disconnected");
                        return (SessionEnd::ClientClosed, sent);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if tx.send(Message::Pong(data)).await.is_err() {
                            return (SessionEnd::SendFailed, sent);
                        }
                    }
                    Some(Err(e)) => {
                        debug!(error = %e, "carousel socket error");
                        return (SessionEnd::ReceiveFailed, sent);
                    }
                    // Clients have nothing to say to the carousel.
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

async fn send_frame<Tx>(tx: &mut Tx, carousel: &PhaseCarousel) -> Result<(), ()>
where
    Tx: Sink<Message> + Unpin,
{
    let Ok(json) = serde_json::to_string(&carousel.frame()) else {
        return Err(());
    };
    tx.send(Message::Text(json.into())).await.map_err(drop)
}
