//! Configuration, data-source chains, and report assembly for Echoes.
//!
//! Every value in a report comes from a chain: an ordered list of remote
//! sources, each bounded by its own timeout, that ends in a local source
//! which cannot fail. Visitors therefore always get an answer; remote
//! failures only show up in the logs and in the `origin` tags.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `echoes-config.yaml`.
//! - [`error`] -- Config, source-attempt and user-input errors.
//! - [`phase_source`] / [`farmsense`] -- Remote phase sources.
//! - [`resolver`] -- [`PhaseResolver`], ending in the local calculator.
//! - [`weather`] / [`open_meteo`] / [`synthetic`] -- [`WeatherChain`],
//!   ending in seeded synthetic weather.
//! - [`images`] / [`catalog`] -- [`ImageChain`], ending in the built-in table.
//! - [`report`] -- Date validation and [`ReportService`].
//!
//! [`PhaseResolver`]: resolver::PhaseResolver
//! [`WeatherChain`]: weather::WeatherChain
//! [`ImageChain`]: images::ImageChain
//! [`ReportService`]: report::ReportService

pub mod attempt;
pub mod catalog;
pub mod config;
pub mod error;
pub mod farmsense;
pub mod images;
pub mod open_meteo;
pub mod phase_source;
pub mod report;
pub mod resolver;
pub mod synthetic;
pub mod weather;

pub use attempt::SourceAttempt;
pub use config::EchoesConfig;
pub use error::{ConfigError, ReportError, SourceError};
pub use images::ImageChain;
pub use phase_source::{PhaseSource, StubPhaseSource};
pub use report::{ReportService, parse_requested_date};
pub use resolver::{PhaseAttempt, PhaseResolver};
pub use synthetic::SyntheticWeather;
pub use weather::{WeatherChain, WeatherSource};
