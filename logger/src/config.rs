use crate::errors::{Error, Result};
use std::env;
use std::time::Duration;

/// Immutable runtime configuration, read once at startup.
///
/// Optional fields left unset latch the dependent activity off for the
/// process lifetime; nothing re-reads the environment later.
#[derive(Debug, Clone)]
pub struct Config {
    pub broker: String,
    pub port: u16,
    pub username: String,
    pub key: String,

    pub feed_temperature: Option<String>,
    pub feed_humidity: Option<String>,
    pub feed_outdoor_temperature: Option<String>,
    pub feed_outdoor_humidity: Option<String>,

    pub weather_location: Option<String>,
    pub weather_api_key: Option<String>,

    pub sample_interval: Duration,
    pub weather_interval: Duration,
    pub liveness_interval: Duration,
    /// Display variants refresh the readout on this cadence; `None` when no
    /// display is attached.
    pub display_interval: Option<Duration>,
    pub tick: Duration,
    pub net_timeout: Duration,

    pub metrics_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let username = env::var("AIO_USERNAME")
            .map_err(|_| Error::Config("AIO_USERNAME is not set".to_string()))?;
        let key = env::var("AIO_KEY").map_err(|_| Error::Config("AIO_KEY is not set".to_string()))?;

        let display_secs = numeric("DISPLAY_INTERVAL_SECS", 0);

        Ok(Self {
            broker: env::var("MQTT_BROKER").unwrap_or_else(|_| "io.adafruit.com".to_string()),
            port: env::var("MQTT_PORT")
                .unwrap_or_else(|_| "1883".to_string())
                .parse()
                .unwrap_or(1883),
            username,
            key,
            feed_temperature: optional_or("FEED_TEMPERATURE", "temperature"),
            feed_humidity: optional_or("FEED_HUMIDITY", "humidity"),
            feed_outdoor_temperature: optional("FEED_OUTDOOR_TEMPERATURE"),
            feed_outdoor_humidity: optional("FEED_OUTDOOR_HUMIDITY"),
            weather_location: optional("WEATHER_LOCATION"),
            weather_api_key: optional("OPENWEATHER_API_KEY"),
            sample_interval: Duration::from_secs(numeric("SAMPLE_INTERVAL_SECS", 120)),
            weather_interval: Duration::from_secs(numeric("WEATHER_INTERVAL_SECS", 600)),
            liveness_interval: Duration::from_secs(numeric("LIVENESS_INTERVAL_SECS", 4)),
            display_interval: (display_secs > 0).then(|| Duration::from_secs(display_secs)),
            tick: Duration::from_millis(numeric("TICK_MS", 250)),
            net_timeout: Duration::from_secs(numeric("NET_TIMEOUT_SECS", 10)),
            metrics_addr: env::var("METRICS_ADDR").unwrap_or_else(|_| "0.0.0.0:9100".to_string()),
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Like `optional`, but unset falls back to a default; an explicitly empty
/// value still disables the feed.
fn optional_or(name: &str, default: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if value.is_empty() => None,
        Ok(value) => Some(value),
        Err(_) => Some(default.to_string()),
    }
}

fn numeric(name: &str, default: u64) -> u64 {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}
