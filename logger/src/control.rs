use crate::config::Config;
use crate::errors::{Error, Result};
use crate::feeds::{FeedSelection, LocalFeeds, OutdoorFeeds};
use crate::health::Health;
use crate::indicator::{self, Indicator};
use crate::metrics::{
    HEALTHY, SAMPLES_PUBLISHED_TOTAL, SAMPLE_FAILURES_TOTAL, WEATHER_FAILURES_TOTAL,
    WEATHER_POLLS_TOTAL,
};
use crate::mqtt::FeedClient;
use crate::schedule::Schedule;
use crate::sensor::{celsius_to_fahrenheit, Sensor};
use crate::weather::WeatherSource;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

/// How long the liveness flash holds its color before going dark again
const FLASH: Duration = Duration::from_millis(250);

/// Owns the drivers, the per-activity schedules, and the shared health
/// flag, and drives everything from one cooperative loop.
///
/// Activities never run concurrently: a tick runs each due activity once,
/// highest priority first (room sample, weather poll, display refresh,
/// liveness flash). The flash is lowest priority and can be starved when
/// the others are slow, which a coarse-cadence device can live with.
pub struct Controller<S, P, W, I> {
    sensor: S,
    publisher: P,
    weather: Option<W>,
    indicator: I,

    local_feeds: Option<LocalFeeds>,
    outdoor_feeds: Option<OutdoorFeeds>,

    sample_schedule: Schedule,
    weather_schedule: Schedule,
    display_schedule: Option<Schedule>,
    liveness_schedule: Schedule,

    health: Health,
    tick_quantum: Duration,
    net_timeout: Duration,
}

impl<S, P, W, I> Controller<S, P, W, I>
where
    S: Sensor,
    P: FeedClient,
    W: WeatherSource,
    I: Indicator,
{
    pub fn new(
        config: &Config,
        feeds: FeedSelection,
        sensor: S,
        publisher: P,
        weather: Option<W>,
        indicator: I,
    ) -> Self {
        Self {
            sensor,
            publisher,
            weather,
            indicator,
            local_feeds: feeds.local,
            outdoor_feeds: feeds.outdoor,
            sample_schedule: Schedule::new(config.sample_interval),
            weather_schedule: Schedule::new(config.weather_interval),
            display_schedule: config.display_interval.map(Schedule::new),
            liveness_schedule: Schedule::new(config.liveness_interval),
            health: Health::default(),
            tick_quantum: config.tick,
            net_timeout: config.net_timeout,
        }
    }

    pub async fn run(mut self) {
        info!("control loop started");
        loop {
            let now = Instant::now();
            self.tick(now).await;
            sleep(self.tick_quantum).await;
        }
    }

    /// One scheduling pass: run every due activity once, in priority order.
    /// `now` is captured before each activity runs, so a slow network call
    /// does not push out its own next deadline.
    pub async fn tick(&mut self, now: Instant) {
        if self.sample_schedule.is_due(now) {
            if let Some(feeds) = self.local_feeds.clone() {
                self.sample_schedule.mark_run(now);
                self.sample_and_publish(&feeds).await;
            }
        }

        if self.weather_schedule.is_due(now) && self.weather.is_some() {
            if let Some(feeds) = self.outdoor_feeds.clone() {
                self.weather_schedule.mark_run(now);
                self.poll_weather(&feeds).await;
            }
        }

        let display_due = self.display_schedule.map_or(false, |s| s.is_due(now));
        if display_due {
            if let Some(schedule) = &mut self.display_schedule {
                schedule.mark_run(now);
            }
            self.refresh_display();
        }

        if self.liveness_schedule.is_due(now) {
            self.liveness_schedule.mark_run(now);
            self.flash_liveness().await;
        }
    }

    /// Read the room sensor and send both values, each as its own publish.
    /// A failed send degrades health but never stops the other one.
    async fn sample_and_publish(&mut self, feeds: &LocalFeeds) {
        let measurement = match self.sensor.read() {
            Ok(m) => m,
            Err(e) => {
                warn!("sensor read failed: {}", e);
                SAMPLE_FAILURES_TOTAL.inc();
                self.set_health(false);
                return;
            }
        };

        let temperature_f = celsius_to_fahrenheit(measurement.temperature_c);
        let humidity_pct = measurement.humidity_pct;

        // Red while the temperature sample is in flight
        self.indicator.set_color(indicator::RED);
        info!(
            "publishing temperature {:.1}F to feed {}",
            temperature_f, feeds.temperature
        );
        let sent = with_timeout(
            self.net_timeout,
            self.publisher.publish(&feeds.temperature, temperature_f),
        )
        .await;
        self.note_sample_outcome("temperature", sent);

        // Blue while the humidity sample is in flight
        self.indicator.set_color(indicator::BLUE);
        info!(
            "publishing humidity {:.0}% to feed {}",
            humidity_pct, feeds.humidity
        );
        let sent = with_timeout(
            self.net_timeout,
            self.publisher.publish(&feeds.humidity, humidity_pct),
        )
        .await;
        self.note_sample_outcome("humidity", sent);

        // Dark again no matter how the sends went
        self.indicator.set_color(indicator::BLACK);
    }

    fn note_sample_outcome(&mut self, what: &str, outcome: Result<()>) {
        match outcome {
            Ok(()) => {
                SAMPLES_PUBLISHED_TOTAL.inc();
                self.set_health(true);
            }
            Err(e) => {
                error!("{} publish failed: {}", what, e);
                SAMPLE_FAILURES_TOTAL.inc();
                self.set_health(false);
            }
        }
    }

    /// Fetch the outdoor reading and forward it to the outdoor feeds. The
    /// first error aborts the rest of the cycle; the next attempt is the
    /// normally scheduled one.
    async fn poll_weather(&mut self, feeds: &OutdoorFeeds) {
        // Yellow for the whole outdoor refresh
        self.indicator.set_color(indicator::YELLOW);

        match self.fetch_and_publish_outdoor(feeds).await {
            Ok(()) => {
                WEATHER_POLLS_TOTAL.inc();
                self.set_health(true);
            }
            Err(e) => {
                error!("weather refresh failed: {}", e);
                WEATHER_FAILURES_TOTAL.inc();
                self.set_health(false);
            }
        }

        self.indicator.set_color(indicator::BLACK);
    }

    async fn fetch_and_publish_outdoor(&self, feeds: &OutdoorFeeds) -> Result<()> {
        let source = match &self.weather {
            Some(source) => source,
            None => return Ok(()),
        };

        let reading = with_timeout(self.net_timeout, source.fetch()).await?;
        info!(
            "publishing outdoor temperature {:.1}F to feed {}",
            reading.temperature_f, feeds.temperature
        );
        with_timeout(
            self.net_timeout,
            self.publisher.publish(&feeds.temperature, reading.temperature_f),
        )
        .await?;

        info!(
            "publishing outdoor humidity {:.0}% to feed {}",
            reading.humidity_pct, feeds.humidity
        );
        with_timeout(
            self.net_timeout,
            self.publisher.publish(&feeds.humidity, reading.humidity_pct),
        )
        .await?;

        Ok(())
    }

    /// Re-read the sensor and repaint the readout. Display variants only;
    /// health belongs to the publish activities, so a failure here is
    /// logged and skipped.
    fn refresh_display(&mut self) {
        match self.sensor.read() {
            Ok(m) => {
                let line = format!(
                    "{:.0}F {:.0}%",
                    celsius_to_fahrenheit(m.temperature_c),
                    m.humidity_pct
                );
                self.indicator.show(&line);
            }
            Err(e) => warn!("sensor read failed during display refresh: {}", e),
        }
    }

    /// Brief green flash when healthy, orange when degraded. Continuous
    /// visual proof the loop has not hung, even without network or display.
    async fn flash_liveness(&mut self) {
        let color = if self.health.is_healthy() {
            indicator::GREEN
        } else {
            indicator::ORANGE
        };
        self.indicator.set_color(color);
        sleep(FLASH).await;
        self.indicator.set_color(indicator::BLACK);
        debug!("alive, health {:?}", self.health);
    }

    fn set_health(&mut self, ok: bool) {
        self.health.record(ok);
        HEALTHY.set(if self.health.is_healthy() { 1.0 } else { 0.0 });
    }
}

async fn with_timeout<T>(limit: Duration, task: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, task).await {
        Ok(outcome) => outcome,
        Err(_) => Err(Error::Timeout),
    }
}
