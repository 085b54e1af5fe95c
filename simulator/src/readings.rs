use rand::Rng;

/// Synthetic indoor reading, already in publish units (Fahrenheit, percent).
pub fn indoor(rng: &mut impl Rng) -> (f64, f64) {
    let temperature_f = if rng.gen_bool(0.05) {
        rng.gen_range(20.0..110.0) // 5% outliers
    } else {
        rng.gen_range(59.0..95.0) // Normal range
    };

    let humidity_pct = if rng.gen_bool(0.05) {
        rng.gen_range(0.0..100.0) // 5% outliers
    } else {
        rng.gen_range(30.0..80.0) // Normal range
    };

    (temperature_f, humidity_pct)
}

/// Synthetic outdoor reading; wider swings than indoors.
pub fn outdoor(rng: &mut impl Rng) -> (f64, f64) {
    let temperature_f = rng.gen_range(-10.0..100.0);
    let humidity_pct = rng.gen_range(10.0..100.0);
    (temperature_f, humidity_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indoor_readings_in_range() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let (temperature_f, humidity_pct) = indoor(&mut rng);
            assert!((20.0..110.0).contains(&temperature_f));
            assert!((0.0..100.0).contains(&humidity_pct));
        }
    }

    #[test]
    fn test_outdoor_readings_in_range() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let (temperature_f, humidity_pct) = outdoor(&mut rng);
            assert!((-10.0..100.0).contains(&temperature_f));
            assert!((10.0..100.0).contains(&humidity_pct));
        }
    }
}
