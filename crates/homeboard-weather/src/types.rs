use serde::{Deserialize, Serialize};

/// Icon substituted when a refresh fails
pub const FALLBACK_ICON: &str = "01d";
/// Description substituted when a refresh fails
pub const FALLBACK_DESCRIPTION: &str = "Error";

/// Unit system requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
        }
    }
}

/// Current conditions, normalized for display.
///
/// Always fully populated: a failed refresh produces [`WeatherRecord::fallback`]
/// rather than a record with some fields missing. Wind fields may individually
/// be `None` on a successful refresh when the provider omits them; `None`
/// renders as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature_f: Option<i64>,
    pub description: String,
    pub icon_code: String,
    pub wind_speed_knots: Option<f64>,
    pub wind_direction_deg: Option<f64>,
}

impl WeatherRecord {
    /// The record shown when a refresh fails for any reason.
    pub fn fallback() -> Self {
        Self {
            temperature_f: None,
            description: FALLBACK_DESCRIPTION.to_string(),
            icon_code: FALLBACK_ICON.to_string(),
            wind_speed_knots: None,
            wind_direction_deg: None,
        }
    }

    /// Display text for the temperature, e.g. "73°F"
    pub fn temperature_text(&self) -> String {
        temperature_text(self.temperature_f)
    }

    /// Display text for the wind line, e.g. "Wind: 5.8 kn, 180°"
    pub fn wind_text(&self) -> String {
        wind_text(self.wind_speed_knots, self.wind_direction_deg)
    }
}

/// First entry of the forecast series, normalized for display.
///
/// Same all-or-nothing invariant as [`WeatherRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub temperature_f: Option<i64>,
    pub temperature_min_f: Option<i64>,
    pub temperature_max_f: Option<i64>,
    pub description: String,
    pub icon_code: String,
    pub wind_speed_knots: Option<f64>,
    pub wind_direction_deg: Option<f64>,
}

impl ForecastRecord {
    /// The record shown when a refresh fails for any reason.
    pub fn fallback() -> Self {
        Self {
            temperature_f: None,
            temperature_min_f: None,
            temperature_max_f: None,
            description: FALLBACK_DESCRIPTION.to_string(),
            icon_code: FALLBACK_ICON.to_string(),
            wind_speed_knots: None,
            wind_direction_deg: None,
        }
    }

    /// Display text for the temperature, e.g. "73°F"
    pub fn temperature_text(&self) -> String {
        temperature_text(self.temperature_f)
    }

    /// Display text for the high/low line, e.g. "75°F / 61°F"
    pub fn high_low_text(&self) -> String {
        format!(
            "{} / {}",
            temperature_text(self.temperature_max_f),
            temperature_text(self.temperature_min_f)
        )
    }

    /// Display text for the wind line, e.g. "Wind: 5.8 kn, 180°"
    pub fn wind_text(&self) -> String {
        wind_text(self.wind_speed_knots, self.wind_direction_deg)
    }
}

/// URL of the provider's icon image for a normalized icon code.
pub fn icon_url(icon_code: &str) -> String {
    format!("http://openweathermap.org/img/wn/{icon_code}@2x.png")
}

fn temperature_text(temperature: Option<i64>) -> String {
    match temperature {
        Some(t) => format!("{t}°F"),
        None => "N/A".to_string(),
    }
}

fn wind_text(speed_knots: Option<f64>, direction_deg: Option<f64>) -> String {
    let speed = match speed_knots {
        Some(s) => s.to_string(),
        None => "N/A".to_string(),
    };
    let direction = match direction_deg {
        Some(d) => d.to_string(),
        None => "N/A".to_string(),
    };
    format!("Wind: {speed} kn, {direction}°")
}

/// Round a provider temperature to the nearest whole degree
/// (half-away-from-zero).
pub(crate) fn round_temp(value: f64) -> i64 {
    value.round() as i64
}

/// Convert meters per second to knots, rounded to one decimal.
pub(crate) fn mps_to_knots(mps: f64) -> f64 {
    (mps * 1.94384 * 10.0).round() / 10.0
}

/// Title-case a provider description, e.g. "clear sky" -> "Clear Sky".
pub(crate) fn title_case(description: &str) -> String {
    description
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Provider returned status {status}")]
    Provider { status: u16 },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knots_conversion_rounds_to_one_decimal() {
        assert_eq!(mps_to_knots(5.0), 9.7);
        assert_eq!(mps_to_knots(0.0), 0.0);
        assert_eq!(mps_to_knots(3.0), 5.8);
    }

    #[test]
    fn test_temperature_rounding_is_half_away_from_zero() {
        assert_eq!(round_temp(72.6), 73);
        assert_eq!(round_temp(72.4), 72);
        assert_eq!(round_temp(72.5), 73);
        assert_eq!(round_temp(68.5), 69);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case("light intensity drizzle"), "Light Intensity Drizzle");
        assert_eq!(title_case("MIST"), "Mist");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_fallback_records_are_fully_populated() {
        let weather = WeatherRecord::fallback();
        assert_eq!(weather.temperature_f, None);
        assert_eq!(weather.description, "Error");
        assert_eq!(weather.icon_code, "01d");
        assert_eq!(weather.wind_speed_knots, None);
        assert_eq!(weather.wind_direction_deg, None);

        let forecast = ForecastRecord::fallback();
        assert_eq!(forecast.temperature_min_f, None);
        assert_eq!(forecast.temperature_max_f, None);
        assert_eq!(forecast.description, "Error");
        assert_eq!(forecast.icon_code, "01d");
    }

    #[test]
    fn test_display_text_substitutes_na() {
        let record = WeatherRecord::fallback();
        assert_eq!(record.temperature_text(), "N/A");
        assert_eq!(record.wind_text(), "Wind: N/A kn, N/A°");

        let record = WeatherRecord {
            temperature_f: Some(73),
            description: "Clear Sky".to_string(),
            icon_code: "01d".to_string(),
            wind_speed_knots: Some(5.8),
            wind_direction_deg: Some(180.0),
        };
        assert_eq!(record.temperature_text(), "73°F");
        assert_eq!(record.wind_text(), "Wind: 5.8 kn, 180°");
    }

    #[test]
    fn test_high_low_text() {
        let record = ForecastRecord {
            temperature_f: Some(70),
            temperature_min_f: Some(61),
            temperature_max_f: Some(75),
            description: "Few Clouds".to_string(),
            icon_code: "02d".to_string(),
            wind_speed_knots: None,
            wind_direction_deg: None,
        };
        assert_eq!(record.high_low_text(), "75°F / 61°F");
        assert_eq!(ForecastRecord::fallback().high_low_text(), "N/A / N/A");
    }

    #[test]
    fn test_icon_url_convention() {
        assert_eq!(icon_url("10n"), "http://openweathermap.org/img/wn/10n@2x.png");
    }

    #[test]
    fn test_units_query_values() {
        assert_eq!(Units::Imperial.as_query(), "imperial");
        assert_eq!(Units::Metric.as_query(), "metric");
    }
}
