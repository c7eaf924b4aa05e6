use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use homeboard_commute::RouteOption;
use homeboard_weather::{ForecastRecord, WeatherRecord};

/// Payload published to the display sink after a refresh.
///
/// Each update is a fresh immutable value; the sink owns it exclusively once
/// published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PanelUpdate {
    Clock(String),
    Weather(WeatherRecord),
    Forecast(ForecastRecord),
    Commute(Vec<RouteOption>),
}

pub(crate) type PanelOp =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = PanelUpdate> + Send>> + Send + Sync>;

/// One dashboard panel: a name, a refresh interval, and the bound operation
/// producing its next update.
///
/// The interval is fixed at construction and never changes at runtime.
#[derive(Clone)]
pub struct Panel {
    pub(crate) name: String,
    pub(crate) interval: Duration,
    pub(crate) op: PanelOp,
}

impl Panel {
    pub fn new<F, Fut>(name: impl Into<String>, interval: Duration, op: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PanelUpdate> + Send + 'static,
    {
        Self {
            name: name.into(),
            interval,
            op: Arc::new(move || Box::pin(op())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
