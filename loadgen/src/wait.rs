//! Pacing between consecutive task executions of one user

use rand::Rng;
use std::time::Duration;

use crate::error::LoadGenError;

/// Closed range a user sleeps for after each task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    min: Duration,
    max: Duration,
}

impl WaitTime {
    /// Uniform wait in `[min_secs, max_secs]`.
    ///
    /// Both bounds must be representable as a `Duration`.
    pub fn between(min_secs: f64, max_secs: f64) -> Result<Self, LoadGenError> {
        let invalid = || LoadGenError::InvalidWaitTime {
            min: min_secs,
            max: max_secs,
        };
        let min = Duration::try_from_secs_f64(min_secs).map_err(|_| invalid())?;
        let max = Duration::try_from_secs_f64(max_secs).map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(Self { min, max })
    }

    /// Always wait exactly `duration`
    pub fn constant(duration: Duration) -> Self {
        Self {
            min: duration,
            max: duration,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw the next wait
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let secs = rng.random_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        // f64 rounding can land just outside the bounds
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max)
            .clamp(self.min, self.max)
    }
}

impl Default for WaitTime {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(1),
            max: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_is_one_to_two_seconds() {
        let wait = WaitTime::default();
        assert_eq!(wait.min(), Duration::from_secs(1));
        assert_eq!(wait.max(), Duration::from_secs(2));
    }

    #[test]
    fn test_samples_stay_in_range() {
        let wait = WaitTime::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10_000 {
            let d = wait.sample(&mut rng);
            assert!(d >= Duration::from_secs(1), "sample {:?} below range", d);
            assert!(d <= Duration::from_secs(2), "sample {:?} above range", d);
        }
    }

    #[test]
    fn test_samples_are_spread_uniformly() {
        let wait = WaitTime::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // Ten 100ms buckets over [1s, 2s]
        let mut buckets = [0usize; 10];
        let n = 20_000;
        for _ in 0..n {
            let offset = wait.sample(&mut rng).as_secs_f64() - 1.0;
            let idx = ((offset * 10.0) as usize).min(9);
            buckets[idx] += 1;
        }

        let expected = n / 10;
        for (i, count) in buckets.iter().enumerate() {
            let deviation = (*count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.1, "bucket {} has {} samples", i, count);
        }

        let mean = {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            (0..n).map(|_| wait.sample(&mut rng).as_secs_f64()).sum::<f64>() / n as f64
        };
        assert!((mean - 1.5).abs() < 0.02, "mean was {}", mean);
    }

    #[test]
    fn test_constant_wait() {
        let wait = WaitTime::constant(Duration::from_millis(250));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(wait.sample(&mut rng), Duration::from_millis(250));
    }

    #[test]
    fn test_huge_but_valid_bounds_sample_without_panicking() {
        let wait = WaitTime::between(1.0, 1e15).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..1_000 {
            let d = wait.sample(&mut rng);
            assert!(d >= wait.min() && d <= wait.max());
        }
    }

    #[test]
    fn test_rejects_invalid_ranges() {
        assert!(WaitTime::between(2.0, 1.0).is_err());
        assert!(WaitTime::between(-1.0, 1.0).is_err());
        assert!(WaitTime::between(0.0, f64::INFINITY).is_err());
        assert!(WaitTime::between(f64::NAN, 1.0).is_err());
        assert!(WaitTime::between(1.0, 1e20).is_err());
        assert!(WaitTime::between(1e20, 1e20).is_err());
        assert!(WaitTime::between(0.0, 0.0).is_ok());
    }
}
