//! OpenWeatherMap-style HTTP client and payload normalization.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::{
    mps_to_knots, round_temp, title_case, ForecastRecord, Units, WeatherError, WeatherRecord,
};

/// Default provider host
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against a non-default host (tests, proxies).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Fetch and normalize current conditions for `city`.
    ///
    /// # Errors
    /// Network failures, non-2xx provider statuses, and payloads missing the
    /// expected fields are returned as typed errors; callers that want the
    /// display contract use [`WeatherClient::current_or_fallback`].
    pub async fn current(&self, city: &str, units: Units) -> Result<WeatherRecord, WeatherError> {
        let payload: CurrentPayload = self.fetch(CURRENT_PATH, city, units).await?;
        normalize_current(&payload)
    }

    /// Fetch the forecast series for `city` and normalize its first entry.
    ///
    /// The nearest upcoming bucket stands in for the day's outlook; the rest
    /// of the series is ignored.
    ///
    /// # Errors
    /// Same contract as [`WeatherClient::current`].
    pub async fn forecast(&self, city: &str, units: Units) -> Result<ForecastRecord, WeatherError> {
        let payload: ForecastPayload = self.fetch(FORECAST_PATH, city, units).await?;
        normalize_forecast(&payload)
    }

    /// [`WeatherClient::current`], degraded to the fallback record on any failure.
    pub async fn current_or_fallback(&self, city: &str, units: Units) -> WeatherRecord {
        match self.current(city, units).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(city, error = %e, "current weather refresh failed");
                WeatherRecord::fallback()
            }
        }
    }

    /// [`WeatherClient::forecast`], degraded to the fallback record on any failure.
    pub async fn forecast_or_fallback(&self, city: &str, units: Units) -> ForecastRecord {
        match self.forecast(city, units).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(city, error = %e, "forecast refresh failed");
                ForecastRecord::fallback()
            }
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        city: &str,
        units: Units,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", units.as_query()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Provider {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    main: CurrentMain,
    weather: Vec<Condition>,
    #[serde(default)]
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

// Wind is frequently partial or absent; a non-numeric value in either field
// must not fail the whole payload.
#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default, deserialize_with = "lenient_f64")]
    speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    main: ForecastMain,
    weather: Vec<Condition>,
    #[serde(default)]
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn normalize_current(payload: &CurrentPayload) -> Result<WeatherRecord, WeatherError> {
    let condition = payload
        .weather
        .first()
        .ok_or_else(|| WeatherError::Malformed("weather conditions array is empty".to_string()))?;

    Ok(WeatherRecord {
        temperature_f: Some(round_temp(payload.main.temp)),
        description: title_case(&condition.description),
        icon_code: condition.icon.clone(),
        wind_speed_knots: payload.wind.speed.map(mps_to_knots),
        wind_direction_deg: payload.wind.deg,
    })
}

fn normalize_forecast(payload: &ForecastPayload) -> Result<ForecastRecord, WeatherError> {
    let entry = payload
        .list
        .first()
        .ok_or_else(|| WeatherError::Malformed("forecast list is empty".to_string()))?;

    let condition = entry
        .weather
        .first()
        .ok_or_else(|| WeatherError::Malformed("weather conditions array is empty".to_string()))?;

    Ok(ForecastRecord {
        temperature_f: Some(round_temp(entry.main.temp)),
        temperature_min_f: Some(round_temp(entry.main.temp_min)),
        temperature_max_f: Some(round_temp(entry.main.temp_max)),
        description: title_case(&condition.description),
        icon_code: condition.icon.clone(),
        wind_speed_knots: entry.wind.speed.map(mps_to_knots),
        wind_direction_deg: entry.wind.deg,
    })
}
