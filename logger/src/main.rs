mod config;
mod control;
mod errors;
mod feeds;
mod health;
mod indicator;
mod metrics;
mod model;
mod mqtt;
mod schedule;
mod sensor;
mod weather;

use axum::{routing::get, Router};
use config::Config;
use control::Controller;
use feeds::FeedSelection;
use indicator::ConsoleIndicator;
use mqtt::MqttFeedClient;
use sensor::SimulatedSensor;
use tracing::{error, info};
use weather::OpenWeather;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting room logger");
    info!("MQTT broker: {}:{}", config.broker, config.port);
    info!(
        "sample interval: {}s, weather interval: {}s, liveness interval: {}s",
        config.sample_interval.as_secs(),
        config.weather_interval.as_secs(),
        config.liveness_interval.as_secs()
    );

    metrics::init_metrics();

    let selection = FeedSelection::resolve(&config);

    let weather = match (
        &selection.outdoor,
        &config.weather_location,
        &config.weather_api_key,
    ) {
        (Some(_), Some(location), Some(api_key)) => {
            info!("will poll outdoor weather for {}", location);
            Some(OpenWeather::new(location, api_key))
        }
        _ => None,
    };

    let publisher = MqttFeedClient::connect(&config);

    // The hardware sensor and indicator drivers plug in behind these traits;
    // the simulated pair keeps the binary runnable end to end on a bare host.
    let controller = Controller::new(
        &config,
        selection,
        SimulatedSensor,
        publisher,
        weather,
        ConsoleIndicator,
    );

    let app = Router::new().route("/metrics", get(metrics_handler));
    let listener = tokio::net::TcpListener::bind(&config.metrics_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", config.metrics_addr, e);
            std::process::exit(1);
        });

    info!("metrics endpoint listening on {}", config.metrics_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap_or_else(|e| {
            error!("metrics server error: {}", e);
        });
    });

    tokio::select! {
        _ = controller.run() => {
            error!("control loop terminated");
        }
        _ = server_handle => {
            error!("metrics server terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}

async fn metrics_handler() -> String {
    metrics::gather_metrics()
}
