//! Weather panels for Homeboard.
//!
//! Fetches current conditions and the short-range forecast from an
//! OpenWeatherMap-style API and normalizes each payload into a fixed-shape,
//! display-ready record. Any failure yields the complete fallback record,
//! never an error and never a partially-populated record.

pub mod client;
pub mod types;

pub use client::WeatherClient;
pub use types::*;
