//! Web front end for the Echoes moon-phase service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Pages** rendered with `minijinja`: the landing page (`/`) and the
//!   date form with its report (`/results`)
//! - **JSON endpoints** under `/api` for phases, weather and full reports
//! - **`WebSocket` endpoint** (`/ws/carousel`) streaming the landing-page
//!   carousel, one independent carousel per connection
//!
//! # Architecture
//!
//! Handlers share an immutable [`AppState`] holding the
//! [`ReportService`](echoes_core::ReportService). Every date answer comes
//! from the service's fallback chains, so handlers only fail on bad input
//! or template bugs.

pub mod carousel;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, shutdown_signal, start_server};
pub use state::AppState;
