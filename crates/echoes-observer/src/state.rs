//! Shared application state for the observer server.
//!
//! Everything here is immutable once the server starts; handlers share it
//! through an `Arc` without locking.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use echoes_core::{EchoesConfig, ReportService};

use crate::error::ObserverError;
use crate::pages::Pages;

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    /// Builds phase, weather and image answers.
    pub reports: Arc<ReportService>,
    /// Compiled page templates.
    pub pages: Pages,
    /// How long each carousel frame stays on screen.
    pub carousel_interval: Duration,
    /// Fixed "today", for tests. `None` means the server's UTC date.
    pub today_override: Option<NaiveDate>,
}

impl AppState {
    /// Create state around an existing report service.
    pub fn new(reports: Arc<ReportService>, carousel_interval: Duration) -> Result<Self, ObserverError> {
        Ok(Self {
            reports,
            pages: Pages::new()?,
            carousel_interval,
            today_override: None,
        })
    }

    /// Build state, and every data-source chain, from config.
    pub fn from_config(config: &EchoesConfig) -> Result<Self, ObserverError> {
        Self::new(
            Arc::new(ReportService::from_config(config)),
            Duration::from_millis(config.carousel.interval_ms),
        )
    }

    /// Pin "today" to a fixed date.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today_override = Some(today);
        self
    }

    /// The date future-date checks compare against.
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}
