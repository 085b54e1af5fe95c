use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fresh reading from the room sensor, in the sensor's native units
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

/// Outdoor reference reading, already in the units we publish
#[derive(Debug, Clone, Copy)]
pub struct WeatherReading {
    pub temperature_f: f64,
    pub humidity_pct: f64,
}

/// The slice of the OpenWeather response body we care about.
/// Everything else in the payload is ignored by serde.
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    pub main: WeatherMain,
}

#[derive(Debug, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub humidity: f64,
}

/// Sample payload published to a cloud feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedSample {
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

impl FeedSample {
    pub fn now(value: f64) -> Self {
        Self {
            value,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_sample_payload_shape() {
        let sample = FeedSample::now(72.5);
        let json = serde_json::to_value(&sample).unwrap();

        assert_eq!(json["value"], 72.5);
        assert!(json["created_at"].is_string());
    }
}
