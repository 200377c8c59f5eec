//! HTTP handlers for the pages and the JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Landing page: carousel, phase grid, today's moon |
//! | `GET` | `/results?date=` | Date form; with `date`, the report or an error |
//! | `GET` | `/api/phases` | The eight phase cards |
//! | `GET` | `/api/phase?date=` | Phase for a date |
//! | `GET` | `/api/weather?date=` | Weather for a date |
//! | `GET` | `/api/report?date=` | Full report for a date |
//! | `GET` | `/api/current` | Today's phase and image |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use echoes_core::{catalog, parse_requested_date};
use echoes_types::{CalendarDate, CurrentMoon, MoonReport, PhaseCard, ResolvedPhase, WeatherReport};
use tracing::debug;

use crate::carousel::PhaseCarousel;
use crate::error::ObserverError;
use crate::pages::ResultsView;
use crate::state::AppState;

/// Query parameters carrying the visitor's date.
#[derive(Debug, Default, serde::Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; validated by the handler.
    pub date: Option<String>,
}

impl DateQuery {
    fn validate(&self, state: &AppState) -> Result<CalendarDate, ObserverError> {
        Ok(parse_requested_date(self.date.as_deref(), state.today())?)
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Render the landing page.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ObserverError> {
    let current = state.reports.current(state.today()).await;
    let page = state.pages.index(
        &PhaseCarousel::new().frame(),
        state.carousel_interval.as_millis(),
        &catalog::cards(),
        &current,
    )?;
    Ok(Html(page))
}

/// Render the results page.
///
/// Without a `date` parameter this is just the form. Input errors are
/// shown inline with a 400 status.
pub async fn results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Response, ObserverError> {
    let today = state.today().format("%Y-%m-%d").to_string();
    let Some(input) = query.date.as_deref() else {
        let page = state.pages.results(&ResultsView {
            today,
            date_input: None,
            outcome: None,
        })?;
        return Ok(Html(page).into_response());
    };

    match parse_requested_date(Some(input), state.today()) {
        Ok(date) => {
            let report = state.reports.build(date).await;
            let page = state.pages.results(&ResultsView {
                today,
                date_input: Some(input),
                outcome: Some(Ok(&report)),
            })?;
            Ok(Html(page).into_response())
        }
        Err(e) => {
            debug!(input, error = %e, "rejected date input");
            let page = state.pages.results(&ResultsView {
                today,
                date_input: Some(input),
                outcome: Some(Err(&e)),
            })?;
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

/// The eight phase cards in cycle order.
pub async fn list_phases() -> Json<Vec<PhaseCard>> {
    Json(catalog::cards())
}

/// Phase for `?date=`.
pub async fn get_phase(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ResolvedPhase>, ObserverError> {
    let date = query.validate(&state)?;
    Ok(Json(state.reports.phase(date).await))
}

/// Weather for `?date=`.
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<WeatherReport>, ObserverError> {
    let date = query.validate(&state)?;
    Ok(Json(state.reports.weather(date).await))
}

/// Full report for `?date=`.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<MoonReport>, ObserverError> {
    let date = query.validate(&state)?;
    Ok(Json(state.reports.build(date).await))
}

/// Today's phase and image.
pub async fn get_current(State(state): State<Arc<AppState>>) -> Json<CurrentMoon> {
    Json(state.reports.current(state.today()).await)
}
