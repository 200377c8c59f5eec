//! Carousel sessions driven over in-memory channels instead of a socket.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::convert::Infallible;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::Message;
use echoes_observer::carousel::{SessionEnd, run_session};
use futures::StreamExt;
use futures::channel::mpsc;
use serde_json::Value;

const PERIOD: Duration = Duration::from_secs(3);

async fn next_label(frames: &mut mpsc::UnboundedReceiver<Message>) -> String {
    match frames.next().await {
        Some(Message::Text(text)) => {
            let frame: Value = serde_json::from_str(text.as_str()).unwrap();
            frame["label"].as_str().unwrap().to_owned()
        }
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn frames_advance_each_interval_until_client_leaves() {
    let (frame_tx, mut frame_rx) = mpsc::unbounded::<Message>();
    let (client_tx, client_rx) = mpsc::unbounded::<Result<Message, Infallible>>();
    let session = tokio::spawn(run_session(frame_tx, client_rx, PERIOD));

    let mut labels = Vec::new();
    for _ in 0..3 {
        labels.push(next_label(&mut frame_rx).await);
    }
    assert_eq!(labels, ["New Moon", "Waxing Crescent", "First Quarter"]);

    drop(client_tx);
    let (end, frames) = session.await.unwrap();
    assert_eq!(end, SessionEnd::ClientClosed);
    assert_eq!(frames, 3);
}

#[tokio::test(start_paused = true)]
async fn first_frame_is_immediate() {
    let (frame_tx, mut frame_rx) = mpsc::unbounded::<Message>();
    let (_client_tx, client_rx) = mpsc::unbounded::<Result<Message, Infallible>>();
    let session = tokio::spawn(run_session(frame_tx, client_rx, PERIOD));

    let started = tokio::time::Instant::now();
    assert_eq!(next_label(&mut frame_rx).await, "New Moon");
    assert!(started.elapsed() < PERIOD);
    session.abort();
}

#[tokio::test(start_paused = true)]
async fn close_frame_ends_session() {
    let (frame_tx, mut frame_rx) = mpsc::unbounded::<Message>();
    let (client_tx, client_rx) = mpsc::unbounded::<Result<Message, Infallible>>();
    let session = tokio::spawn(run_session(frame_tx, client_rx, PERIOD));

    assert_eq!(next_label(&mut frame_rx).await, "New Moon");
    client_tx.unbounded_send(Ok(Message::Close(None))).unwrap();

    let (end, frames) = session.await.unwrap();
    assert_eq!(end, SessionEnd::ClientClosed);
    assert_eq!(frames, 1);
}

#[tokio::test(start_paused = true)]
async fn ping_is_answered() {
    let (frame_tx, mut frame_rx) = mpsc::unbounded::<Message>();
    let (client_tx, client_rx) = mpsc::unbounded::<Result<Message, Infallible>>();
    client_tx
        .unbounded_send(Ok(Message::Ping(Bytes::from_static(b"hi"))))
        .unwrap();
    let session = tokio::spawn(run_session(frame_tx, client_rx, PERIOD));

    assert_eq!(next_label(&mut frame_rx).await, "New Moon");
    match frame_rx.next().await {
        Some(Message::Pong(data)) => assert_eq!(&data[..], b"hi"),
        other => panic!("expected pong, got {other:?}"),
    }
    session.abort();
}

#[tokio::test(start_paused = true)]
async fn gone_client_stops_session() {
    let (frame_tx, frame_rx) = mpsc::unbounded::<Message>();
    let (_client_tx, client_rx) = mpsc::unbounded::<Result<Message, Infallible>>();
    drop(frame_rx);

    let (end, frames) = run_session(frame_tx, client_rx, PERIOD).await;
    assert_eq!(end, SessionEnd::SendFailed);
    assert_eq!(frames, 0);
}
