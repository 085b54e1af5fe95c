use crate::config::Config;
use crate::errors::Result;
use crate::metrics::PUBLISH_LATENCY_SECONDS;
use crate::model::FeedSample;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

/// Publishes scalar samples to named cloud feeds.
pub trait FeedClient {
    async fn publish(&self, feed_key: &str, value: f64) -> Result<()>;
}

/// MQTT-backed feed client. Each sample goes to `{username}/feeds/{key}` as
/// a JSON payload with QoS 1; the service records one data point per
/// message on that feed.
pub struct MqttFeedClient {
    client: AsyncClient,
    username: String,
}

impl MqttFeedClient {
    pub fn connect(config: &Config) -> Self {
        let client_id = format!("logger-{}", uuid::Uuid::new_v4());
        info!("Connecting to MQTT broker at {}:{}", config.broker, config.port);

        let mut mqtt_options = MqttOptions::new(client_id, &config.broker, config.port);
        mqtt_options.set_keep_alive(Duration::from_secs(30));
        mqtt_options.set_credentials(config.username.clone(), config.key.clone());
        mqtt_options.set_clean_session(true);

        let (client, mut eventloop) = AsyncClient::new(mqtt_options, 64);

        // rumqttc reconnects on its own; the poll task just keeps draining.
        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT eventloop error: {}", e);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        Self {
            client,
            username: config.username.clone(),
        }
    }
}

pub fn feed_topic(username: &str, feed_key: &str) -> String {
    format!("{}/feeds/{}", username, feed_key)
}

impl FeedClient for MqttFeedClient {
    async fn publish(&self, feed_key: &str, value: f64) -> Result<()> {
        let topic = feed_topic(&self.username, feed_key);
        let payload = serde_json::to_string(&FeedSample::now(value))?;

        let start = Instant::now();
        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await?;
        PUBLISH_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());

        Ok(())
    }
}
