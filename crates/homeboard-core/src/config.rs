use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the weather provider credential.
pub const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";
/// Environment variable holding the directions provider credential.
pub const MAPS_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Unit system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Clock panel settings
    #[serde(default)]
    pub clock: ClockConfig,

    /// Weather and forecast panel settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Commute panel settings
    #[serde(default)]
    pub commute: CommuteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// IANA timezone identifier for the displayed wall clock
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Refresh interval in milliseconds
    #[serde(default = "default_clock_refresh_ms")]
    pub refresh_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            refresh_ms: default_clock_refresh_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// City query string for the weather provider
    #[serde(default = "default_city")]
    pub city: String,

    /// Unit system passed to the weather provider
    #[serde(default)]
    pub units: UnitSystem,

    /// Current-weather refresh interval in milliseconds
    #[serde(default = "default_panel_refresh_ms")]
    pub refresh_ms: u64,

    /// Forecast refresh interval in milliseconds
    #[serde(default = "default_panel_refresh_ms")]
    pub forecast_refresh_ms: u64,

    /// Override for the provider base URL (testing / proxies)
    #[serde(default)]
    pub base_url: Option<String>,

    /// API credential, injected from the environment at load time.
    /// Never read from or written to the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            units: UnitSystem::default(),
            refresh_ms: default_panel_refresh_ms(),
            forecast_refresh_ms: default_panel_refresh_ms(),
            base_url: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteConfig {
    /// Commute origin address
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Commute destination address
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Refresh interval in milliseconds
    #[serde(default = "default_panel_refresh_ms")]
    pub refresh_ms: u64,

    /// Override for the provider base URL (testing / proxies)
    #[serde(default)]
    pub base_url: Option<String>,

    /// API credential, injected from the environment at load time.
    /// Never read from or written to the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for CommuteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            destination: default_destination(),
            refresh_ms: default_panel_refresh_ms(),
            base_url: None,
            api_key: None,
        }
    }
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_city() -> String {
    "Olney".to_string()
}

fn default_origin() -> String {
    "ORIGIN ADDRESS".to_string()
}

fn default_destination() -> String {
    "DESTINATION ADDRESS".to_string()
}

fn default_clock_refresh_ms() -> u64 {
    1_000
}

fn default_panel_refresh_ms() -> u64 {
    5 * 60 * 1_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            weather: WeatherConfig::default(),
            commute: CommuteConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist.
    ///
    /// Provider credentials are injected from the environment after the file
    /// is read; they are never persisted.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.weather.api_key = std::env::var(OPENWEATHER_KEY_ENV).ok();
        config.commute.api_key = std::env::var(MAPS_KEY_ENV).ok();

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Validate clock settings
        if self.clock.timezone.parse::<chrono_tz::Tz>().is_err() {
            result.add_error(
                "clock.timezone",
                format!("Not an IANA timezone identifier: {}", self.clock.timezone),
            );
        }
        self.validate_interval(self.clock.refresh_ms, "clock.refresh_ms", &mut result);

        // Validate weather settings
        if self.weather.city.trim().is_empty() {
            result.add_error("weather.city", "City must not be empty");
        }
        if self.weather.api_key.is_none() {
            result.add_error(
                "weather.api_key",
                format!("Missing credential; set {}", OPENWEATHER_KEY_ENV),
            );
        }
        self.validate_interval(self.weather.refresh_ms, "weather.refresh_ms", &mut result);
        self.validate_interval(
            self.weather.forecast_refresh_ms,
            "weather.forecast_refresh_ms",
            &mut result,
        );
        if self.weather.refresh_ms < 60_000 {
            result.add_warning(
                "weather.refresh_ms",
                "Refreshing more than once a minute may exceed provider rate limits",
            );
        }
        if let Some(url) = &self.weather.base_url {
            self.validate_url(url, "weather.base_url", &mut result);
        }

        // Validate commute settings
        if self.commute.origin.trim().is_empty() {
            result.add_error("commute.origin", "Origin address must not be empty");
        }
        if self.commute.destination.trim().is_empty() {
            result.add_error("commute.destination", "Destination address must not be empty");
        }
        if self.commute.api_key.is_none() {
            result.add_error(
                "commute.api_key",
                format!("Missing credential; set {}", MAPS_KEY_ENV),
            );
        }
        self.validate_interval(self.commute.refresh_ms, "commute.refresh_ms", &mut result);
        if let Some(url) = &self.commute.base_url {
            self.validate_url(url, "commute.base_url", &mut result);
        }

        result
    }

    /// Validate a refresh interval field
    fn validate_interval(&self, interval_ms: u64, field_name: &str, result: &mut ValidationResult) {
        if interval_ms == 0 {
            result.add_error(field_name, "Refresh interval must be greater than 0");
        } else if interval_ms > 24 * 60 * 60 * 1_000 {
            result.add_warning(field_name, "Refresh interval is more than 24 hours");
        }
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("homeboard");

        Ok(config_dir.join("config.toml"))
    }
}
