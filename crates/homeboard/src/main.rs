mod sink;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;

use homeboard_commute::DirectionsClient;
use homeboard_core::{Config, UnitSystem};
use homeboard_panels::{Panel, PanelUpdate, Scheduler};
use homeboard_weather::{Units, WeatherClient};

use sink::TerminalSink;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    homeboard_core::init()?;

    // Configuration errors are the only failures allowed to halt startup
    let (config, _validation) = Config::load_validated()?;

    let panels = build_panels(&config)?;
    let sink = Arc::new(TerminalSink);
    let shutdown = CancellationToken::new();
    let scheduler = Scheduler::new(panels).start(sink, shutdown.clone());

    tracing::info!("Homeboard started");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    shutdown.cancel();
    scheduler.wait().await;

    Ok(())
}

/// Build the panel table: clock, current weather, forecast, commute.
fn build_panels(config: &Config) -> Result<Vec<Panel>> {
    // Validation has already vetted the timezone and credentials; these
    // cannot fail for a config that passed load_validated().
    let tz: Tz = config
        .clock
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid timezone: {e}"))?;

    let weather_key = config
        .weather
        .api_key
        .clone()
        .context("Weather API key missing")?;
    let weather_client = match &config.weather.base_url {
        Some(base_url) => WeatherClient::with_base_url(weather_key, base_url)?,
        None => WeatherClient::new(weather_key)?,
    };
    let units = match config.weather.units {
        UnitSystem::Imperial => Units::Imperial,
        UnitSystem::Metric => Units::Metric,
    };

    let maps_key = config
        .commute
        .api_key
        .clone()
        .context("Directions API key missing")?;
    let directions_client = match &config.commute.base_url {
        Some(base_url) => DirectionsClient::with_base_url(maps_key, base_url)?,
        None => DirectionsClient::new(maps_key)?,
    };

    let clock = Panel::new(
        "clock",
        Duration::from_millis(config.clock.refresh_ms),
        move || async move { PanelUpdate::Clock(homeboard_time::current_time(tz)) },
    );

    let city = config.weather.city.clone();
    let current_client = weather_client.clone();
    let weather = Panel::new(
        "weather",
        Duration::from_millis(config.weather.refresh_ms),
        move || {
            let client = current_client.clone();
            let city = city.clone();
            async move { PanelUpdate::Weather(client.current_or_fallback(&city, units).await) }
        },
    );

    let city = config.weather.city.clone();
    let forecast = Panel::new(
        "forecast",
        Duration::from_millis(config.weather.forecast_refresh_ms),
        move || {
            let client = weather_client.clone();
            let city = city.clone();
            async move { PanelUpdate::Forecast(client.forecast_or_fallback(&city, units).await) }
        },
    );

    let origin = config.commute.origin.clone();
    let destination = config.commute.destination.clone();
    let commute = Panel::new(
        "commute",
        Duration::from_millis(config.commute.refresh_ms),
        move || {
            let client = directions_client.clone();
            let origin = origin.clone();
            let destination = destination.clone();
            async move {
                PanelUpdate::Commute(client.routes_or_empty(&origin, &destination).await)
            }
        },
    );

    Ok(vec![clock, weather, forecast, commute])
}
