use crate::errors::Result;
use crate::model::{WeatherReading, WeatherResponse};
use tracing::debug;

/// Source of the outdoor reference reading.
pub trait WeatherSource {
    async fn fetch(&self) -> Result<WeatherReading>;
}

// Imperial units so the outdoor feed lines up with the Fahrenheit samples
// from the room sensor.
const UNITS: &str = "imperial";

pub fn weather_url(location: &str, api_key: &str) -> String {
    format!(
        "http://api.openweathermap.org/data/2.5/weather?q={}&units={}&appid={}",
        location, UNITS, api_key
    )
}

/// OpenWeather current-conditions endpoint over plain HTTP.
pub struct OpenWeather {
    http: reqwest::Client,
    url: String,
}

impl OpenWeather {
    pub fn new(location: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: weather_url(location, api_key),
        }
    }
}

impl WeatherSource for OpenWeather {
    async fn fetch(&self) -> Result<WeatherReading> {
        debug!("retrieving outdoor weather");
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        parse_weather(&body)
    }
}

/// Pulls the two published fields out of a full OpenWeather body.
pub fn parse_weather(body: &[u8]) -> Result<WeatherReading> {
    let response: WeatherResponse = serde_json::from_slice(body)?;
    Ok(WeatherReading {
        temperature_f: response.main.temp,
        humidity_pct: response.main.humidity,
    })
}
