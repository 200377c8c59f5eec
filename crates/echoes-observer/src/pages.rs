//! HTML page rendering via `minijinja`.
//!
//! Templates are compiled into the binary from `templates/`. The `.html`
//! template names turn on HTML auto-escaping.

use echoes_core::ReportError;
use echoes_types::{CurrentMoon, MoonReport, PhaseCard};
use minijinja::{Environment, context};

use crate::carousel::CarouselFrame;
use crate::error::ObserverError;

const INDEX: &str = "index.html";
const RESULTS: &str = "results.html";

/// Compiled page templates.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Compile the built-in templates.
    pub fn new() -> Result<Self, ObserverError> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../templates/base.html.j2"))?;
        env.add_template(INDEX, include_str!("../templates/index.html.j2"))?;
        env.add_template(RESULTS, include_str!("../templates/results.html.j2"))?;
        Ok(Self { env })
    }

    /// The landing page: carousel, phase grid and today's moon.
    pub fn index(
        &self,
        first_frame: &CarouselFrame,
        interval_ms: u128,
        cards: &[PhaseCard],
        current: &CurrentMoon,
    ) -> Result<String, ObserverError> {
        let page = self.env.get_template(INDEX)?.render(context! {
            frame => first_frame,
            interval_ms => u64::try_from(interval_ms).unwrap_or(u64::MAX),
            cards => cards,
            current => current,
            current_date => current.date.to_string(),
            illumination_pct => percent(current.phase.descriptor.illumination),
        })?;
        Ok(page)
    }

    /// The results page in one of its three states: empty form, report, or
    /// input error.
    pub fn results(&self, view: &ResultsView<'_>) -> Result<String, ObserverError> {
        let (report, error) = match view.outcome {
            None => (None, None),
            Some(Ok(report)) => (Some(report), None),
            Some(Err(e)) => (None, Some(e.to_string())),
        };
        let page = self.env.get_template(RESULTS)?.render(context! {
            today => &view.today,
            date_input => view.date_input,
            report => report,
            illumination_pct => report.map(|r| percent(r.phase.descriptor.illumination)),
            error => error,
        })?;
        Ok(page)
    }
}

/// What the results page is showing.
#[derive(Debug)]
pub struct ResultsView<'a> {
    /// Latest selectable date, `YYYY-MM-DD`.
    pub today: String,
    /// What the visitor typed, echoed back into the form.
    pub date_input: Option<&'a str>,
    /// `None` before a date is submitted.
    pub outcome: Option<Result<&'a MoonReport, &'a ReportError>>,
}

// Illumination is in [0, 1], so the rounded percentage fits a u8.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use echoes_types::{
        CalendarDate, DataOrigin, LunarPhaseDescriptor, PhaseName, ResolvedPhase, WeatherCondition,
        WeatherReport,
    };

    use super::*;

    fn report() -> MoonReport {
        MoonReport {
            date: CalendarDate::from_parts(2000, 1, 6),
            phase: ResolvedPhase {
                descriptor: LunarPhaseDescriptor {
                    phase_name: PhaseName::NewMoon,
                    illumination: 0.994,
                    age_days: 0.5,
                    phase_angle: 6.1,
                },
                origin: DataOrigin::Calculated,
            },
            weather: WeatherReport {
                temperature_c: 12,
                conditions: WeatherCondition::PartlyCloudy,
                cloud_cover_pct: 40,
                origin: DataOrigin::Synthetic,
            },
            image_url: "https://example.com/<moon>.jpg".to_owned(),
            image_origin: DataOrigin::Catalog,
            description: "On Thursday, January 6, 2000, the moon was in its new moon phase.".to_owned(),
            download_name: "moon-2000-01-06.jpg".to_owned(),
        }
    }

    #[test]
    fn templates_compile() {
        assert!(Pages::new().is_ok());
    }

    #[test]
    fn report_page_shows_phase_and_weather() {
        let pages = Pages::new().unwrap();
        let report = report();
        let html = pages
            .results(&ResultsView {
                today: "2024-06-01".to_owned(),
                date_input: Some("2000-01-06"),
                outcome: Some(Ok(&report)),
            })
            .unwrap();
        assert!(html.contains("New Moon"));
        assert!(html.contains("Partly Cloudy"));
        assert!(html.contains("99%"));
        assert!(html.contains("moon-2000-01-06.jpg"));
        assert!(html.contains("&lt;moon&gt;"), "image url should be escaped");
    }

    #[test]
    fn error_page_shows_message() {
        let pages = Pages::new().unwrap();
        let html = pages
            .results(&ResultsView {
                today: "2024-06-01".to_owned(),
                date_input: Some("2999-01-01"),
                outcome: Some(Err(&ReportError::FutureDate)),
            })
            .unwrap();
        assert!(html.contains("Date cannot be in the future"));
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent(0.994), 99);
        assert_eq!(percent(1.2), 100);
        assert_eq!(percent(-0.1), 0);
    }
}
