use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sensor error: {0}")]
    Sensor(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network operation timed out")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, Error>;
