//! Error types for the server binary.
//!
//! [`AppError`] is the top-level error that `main` propagates with `?`.

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: echoes_core::ConfigError,
    },

    /// Page templates or shared state could not be built.
    #[error("startup error: {source}")]
    Startup {
        /// The underlying observer error.
        #[from]
        source: echoes_observer::error::ObserverError,
    },

    /// The HTTP server failed to bind or crashed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: echoes_observer::ServerError,
    },
}
