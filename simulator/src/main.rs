mod readings;

use chrono::{DateTime, Utc};
use clap::Parser;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

/// Publishes synthetic samples to the four household feeds, for exercising
/// dashboards and the broker without a device on the network.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, env = "MQTT_BROKER", default_value = "localhost")]
    broker: String,

    #[arg(long, env = "MQTT_PORT", default_value_t = 1883)]
    port: u16,

    #[arg(long, env = "AIO_USERNAME", default_value = "household")]
    username: String,

    #[arg(long, env = "AIO_KEY", default_value = "")]
    key: String,

    #[arg(long, env = "FEED_TEMPERATURE", default_value = "temperature")]
    feed_temperature: String,

    #[arg(long, env = "FEED_HUMIDITY", default_value = "humidity")]
    feed_humidity: String,

    #[arg(
        long,
        env = "FEED_OUTDOOR_TEMPERATURE",
        default_value = "temperature-outdoor"
    )]
    feed_outdoor_temperature: String,

    #[arg(
        long,
        env = "FEED_OUTDOOR_HUMIDITY",
        default_value = "humidity-outdoor"
    )]
    feed_outdoor_humidity: String,

    /// Seconds between simulated sample cycles
    #[arg(long, env = "INTERVAL_SECS", default_value_t = 10)]
    interval_secs: u64,

    /// Stop after this many cycles; 0 runs forever
    #[arg(long, env = "CYCLES", default_value_t = 0)]
    cycles: u64,
}

#[derive(Debug, Serialize)]
struct Sample {
    value: f64,
    created_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("Starting household feed simulator");
    info!(
        "Broker: {}:{}, interval: {}s",
        args.broker, args.port, args.interval_secs
    );

    let client_id = format!("sim-{}", uuid::Uuid::new_v4());
    let mut mqtt_options = MqttOptions::new(&client_id, &args.broker, args.port);
    mqtt_options.set_keep_alive(Duration::from_secs(30));
    mqtt_options.set_clean_session(true);
    if !args.key.is_empty() {
        mqtt_options.set_credentials(args.username.clone(), args.key.clone());
    }

    let (client, mut eventloop) = AsyncClient::new(mqtt_options, 64);

    // Spawn eventloop handler
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

    tokio::time::sleep(Duration::from_secs(2)).await;
    info!("Connected to MQTT broker, publishing samples");

    let mut cycle = 0u64;
    loop {
        let (indoor_t, indoor_h, outdoor_t, outdoor_h) = {
            let mut rng = rand::thread_rng();
            let (indoor_t, indoor_h) = readings::indoor(&mut rng);
            let (outdoor_t, outdoor_h) = readings::outdoor(&mut rng);
            (indoor_t, indoor_h, outdoor_t, outdoor_h)
        };

        publish(&client, &args.username, &args.feed_temperature, indoor_t).await;
        publish(&client, &args.username, &args.feed_humidity, indoor_h).await;
        publish(
            &client,
            &args.username,
            &args.feed_outdoor_temperature,
            outdoor_t,
        )
        .await;
        publish(
            &client,
            &args.username,
            &args.feed_outdoor_humidity,
            outdoor_h,
        )
        .await;

        cycle += 1;
        if cycle % 100 == 0 {
            info!("Completed {} sample cycles", cycle);
        }
        if args.cycles > 0 && cycle >= args.cycles {
            info!("Done after {} cycles", cycle);
            break;
        }

        tokio::time::sleep(Duration::from_secs(args.interval_secs)).await;
    }
}

async fn publish(client: &AsyncClient, username: &str, feed_key: &str, value: f64) {
    let topic = format!("{}/feeds/{}", username, feed_key);
    let sample = Sample {
        value,
        created_at: Utc::now(),
    };
    let payload = match serde_json::to_string(&sample) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to serialize sample: {}", e);
            return;
        }
    };

    match client.publish(&topic, QoS::AtLeastOnce, false, payload).await {
        Ok(_) => {}
        Err(e) => warn!("Failed to publish to {}: {}", topic, e),
    }
}
