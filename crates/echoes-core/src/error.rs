//! Error types for configuration loading, data-source attempts, and user
//! input.
//!
//! Only [`ReportError`] ever reaches a visitor. [`SourceError`] values are
//! logged by the chains and swallowed; the chain moves on to its next
//! source and always ends in a local one.

use echoes_types::DataOrigin;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// A single data-source attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The request could not be sent or the body could not be read.
    #[error("{origin} request failed: {message}")]
    Http {
        /// Source that was queried.
        origin: DataOrigin,
        /// Transport error text.
        message: String,
    },

    /// The source answered with a non-success status code.
    #[error("{origin} returned HTTP {status}")]
    Status {
        /// Source that was queried.
        origin: DataOrigin,
        /// HTTP status code.
        status: u16,
    },

    /// The response arrived but did not contain usable data.
    #[error("{origin} response malformed: {reason}")]
    Malformed {
        /// Source that was queried.
        origin: DataOrigin,
        /// What was wrong with it.
        reason: String,
    },

    /// The source did not answer within its deadline.
    #[error("{origin} timed out after {timeout_ms}ms")]
    Timeout {
        /// Source that was queried.
        origin: DataOrigin,
        /// The deadline that was exceeded.
        timeout_ms: u64,
    },

    /// The source declined to answer (disabled, stubbed failure).
    #[error("{origin} unavailable: {reason}")]
    Unavailable {
        /// Source that was queried.
        origin: DataOrigin,
        /// Why it is unavailable.
        reason: String,
    },
}

impl SourceError {
    /// Shorthand for a [`SourceError::Malformed`].
    pub fn malformed(origin: DataOrigin, reason: impl Into<String>) -> Self {
        Self::Malformed {
            origin,
            reason: reason.into(),
        }
    }

    /// The source the failed attempt was made against.
    pub const fn origin(&self) -> DataOrigin {
        match self {
            Self::Http { origin, .. }
            | Self::Status { origin, .. }
            | Self::Malformed { origin, .. }
            | Self::Timeout { origin, .. }
            | Self::Unavailable { origin, .. } => *origin,
        }
    }
}

/// The visitor's date input was rejected.
///
/// The `Display` text is shown on the page as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// No date was submitted.
    #[error("Please enter your date of birth")]
    MissingDate,

    /// The input is not a `YYYY-MM-DD` calendar date.
    #[error("Please enter a valid date (YYYY-MM-DD), got '{0}'")]
    InvalidDate(String),

    /// The date is after today.
    #[error("Date cannot be in the future")]
    FutureDate,
}
