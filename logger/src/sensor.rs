use crate::errors::Result;
use crate::model::Measurement;
use rand::Rng;

/// Local temperature/humidity sensor behind the I2C bus.
///
/// A read can fail on a bus or communication fault; the control loop treats
/// that as a transient error of the current cycle.
pub trait Sensor {
    fn read(&mut self) -> Result<Measurement>;
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Stand-in for the hardware driver: plausible household readings with a
/// small chance of an outlier, so the loop and the feeds can be exercised
/// on a machine without a sensor on the bus.
pub struct SimulatedSensor;

impl Sensor for SimulatedSensor {
    fn read(&mut self) -> Result<Measurement> {
        let mut rng = rand::thread_rng();

        let temperature_c = if rng.gen_bool(0.05) {
            rng.gen_range(-10.0..45.0)
        } else {
            rng.gen_range(15.0..35.0)
        };

        let humidity_pct = if rng.gen_bool(0.05) {
            rng.gen_range(0.0..100.0)
        } else {
            rng.gen_range(30.0..80.0)
        };

        Ok(Measurement {
            temperature_c,
            humidity_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_freezing_point() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
    }

    #[test]
    fn test_conversion_boiling_point() {
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn test_conversion_crossover_point() {
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn test_simulated_readings_in_range() {
        let mut sensor = SimulatedSensor;

        for _ in 0..100 {
            let m = sensor.read().unwrap();
            assert!(m.temperature_c >= -10.0 && m.temperature_c < 45.0);
            assert!(m.humidity_pct >= 0.0 && m.humidity_pct < 100.0);
        }
    }
}
