//! Sampling cadence and window expiry gates.
//!
//! Both checks are pure functions of caller-supplied timestamps, so the
//! surrounding loop can spin as fast or as unevenly as it likes: the sample
//! interval gates sensor reads, and the window duration alone decides when a
//! session ends. A session that runs long under jitter cannot overflow the
//! buffer (the write path drops on full) but may under-fill it.

use std::time::{Duration, Instant};

/// Interval and duration gates for one capture deployment.
#[derive(Debug, Clone, Copy)]
pub struct SampleClock {
    sample_interval: Duration,
    window_duration: Duration,
}

impl SampleClock {
    pub fn new(sample_interval: Duration, window_duration: Duration) -> Self {
        Self {
            sample_interval,
            window_duration,
        }
    }

    /// True iff at least one sample interval has passed since `last_sample`.
    ///
    /// This is the sole sampling gate; it decouples the sensor read rate
    /// from however fast the control loop spins.
    pub fn sample_due(&self, now: Instant, last_sample: Instant) -> bool {
        now.duration_since(last_sample) >= self.sample_interval
    }

    /// True iff the capture window that started at `session_start` is over.
    pub fn window_elapsed(&self, now: Instant, session_start: Instant) -> bool {
        now.duration_since(session_start) >= self.window_duration
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    pub fn window_duration(&self) -> Duration {
        self.window_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_due_at_exact_interval() {
        let clock = SampleClock::new(Duration::from_millis(10), Duration::from_secs(2));
        let base = Instant::now();

        assert!(!clock.sample_due(base, base));
        assert!(!clock.sample_due(base + Duration::from_millis(9), base));
        assert!(clock.sample_due(base + Duration::from_millis(10), base));
        assert!(clock.sample_due(base + Duration::from_millis(25), base));
    }

    #[test]
    fn test_window_elapsed_at_exact_duration() {
        let clock = SampleClock::new(Duration::from_millis(10), Duration::from_secs(2));
        let base = Instant::now();

        assert!(!clock.window_elapsed(base + Duration::from_millis(1999), base));
        assert!(clock.window_elapsed(base + Duration::from_secs(2), base));
    }
}
