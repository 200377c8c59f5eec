//! `WebSocket` handler for the landing-page carousel.
//!
//! Clients connect to `GET /ws/carousel` and receive a JSON
//! [`CarouselFrame`](crate::carousel::CarouselFrame) immediately and then
//! once per carousel interval. Each connection runs its own carousel; it
//! stops when the client disconnects.

use std::sync::Arc;

use axum::extract::ws::WebSocket;
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::StreamExt;
use tracing::debug;

use crate::carousel::run_session;
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and start a
/// carousel for it.
///
/// # Route
///
/// `GET /ws/carousel`
pub async fn ws_carousel(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    debug!("carousel client connected");
    let (tx, rx) = socket.split();
    let (end, frames) = run_session(tx, rx, state.carousel_interval).await;
    debug!(?end, frames, "carousel session ended");
}
