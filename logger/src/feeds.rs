use crate::config::Config;
use tracing::{info, warn};

/// Keys for the two local room feeds
#[derive(Debug, Clone)]
pub struct LocalFeeds {
    pub temperature: String,
    pub humidity: String,
}

/// Keys for the two outdoor reference feeds
#[derive(Debug, Clone)]
pub struct OutdoorFeeds {
    pub temperature: String,
    pub humidity: String,
}

/// Feed keys resolved once at startup. `None` latches the dependent
/// activity off for the life of the process; nothing re-resolves later.
#[derive(Debug, Clone)]
pub struct FeedSelection {
    pub local: Option<LocalFeeds>,
    pub outdoor: Option<OutdoorFeeds>,
}

impl FeedSelection {
    pub fn resolve(config: &Config) -> Self {
        let local = match (
            resolve_key(config.feed_temperature.as_deref()),
            resolve_key(config.feed_humidity.as_deref()),
        ) {
            (Some(temperature), Some(humidity)) => Some(LocalFeeds {
                temperature,
                humidity,
            }),
            _ => {
                warn!("local feeds not resolved, room sampling disabled");
                None
            }
        };

        let outdoor = if config.weather_location.is_none() || config.weather_api_key.is_none() {
            info!("no weather location or API key configured, outdoor polling disabled");
            None
        } else {
            match (
                resolve_key(config.feed_outdoor_temperature.as_deref()),
                resolve_key(config.feed_outdoor_humidity.as_deref()),
            ) {
                (Some(temperature), Some(humidity)) => Some(OutdoorFeeds {
                    temperature,
                    humidity,
                }),
                _ => {
                    warn!("outdoor feeds not resolved, outdoor polling disabled");
                    None
                }
            }
        };

        Self { local, outdoor }
    }
}

fn resolve_key(key: Option<&str>) -> Option<String> {
    let key = key?;
    if valid_feed_key(key) {
        Some(key.to_string())
    } else {
        warn!("invalid feed key {:?}", key);
        None
    }
}

/// The cloud service's feed-key alphabet: lowercase ASCII alphanumerics,
/// dashes, and dots (group.feed form).
pub fn valid_feed_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
}
