//! Simulated latency and failure for search requests.
//!
//! Each request asks a [`FaultPolicy`] for a fresh [`FaultDecision`] before it
//! answers. The decision is drawn per call and shares no state with other
//! requests, so concurrent requests never see each other's faults. The search
//! itself never consults the policy; the handler applies the decision around
//! an already computed payload.

use std::fmt;
use std::time::Duration;

/// Outcome of one fault draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultDecision {
    /// Answer with the simulated failure instead of the payload.
    pub fail: bool,
    /// How long to wait before answering.
    pub delay: Duration,
}

impl FaultDecision {
    pub fn pass() -> Self {
        Self::default()
    }

    /// Sleep for the decided delay, then report whether to fail.
    ///
    /// Uses the tokio timer, so other requests keep running meanwhile.
    pub async fn apply(self) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.fail
    }
}

/// Source of per-request fault decisions.
pub trait FaultPolicy: Send + Sync + fmt::Debug {
    fn decide(&self) -> FaultDecision;
}

/// Never delays, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultPolicy for NoFaults {
    fn decide(&self) -> FaultDecision {
        FaultDecision::pass()
    }
}

/// Fails with a fixed probability and waits a uniformly random delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomFaults {
    failure_rate: f64,
    max_delay: Duration,
}

impl Default for RandomFaults {
    fn default() -> Self {
        Self {
            failure_rate: 0.25,
            max_delay: Duration::from_millis(500),
        }
    }
}

impl RandomFaults {
    /// Set the failure probability, clamped to [0, 1].
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the ceiling of the uniform delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl FaultPolicy for RandomFaults {
    fn decide(&self) -> FaultDecision {
        // `fastrand::f64` is in [0, 1), so a rate of 1.0 always fails and 0.0 never does.
        let fail = fastrand::f64() < self.failure_rate;
        let max_ms = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(fastrand::u64(0..=max_ms));
        FaultDecision { fail, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_faults_passes() {
        assert_eq!(NoFaults.decide(), FaultDecision::pass());
    }

    #[test]
    fn rate_one_always_fails() {
        let policy = RandomFaults::default()
            .with_failure_rate(1.0)
            .with_max_delay(Duration::ZERO);
        for _ in 0..200 {
            let d = policy.decide();
            assert!(d.fail);
            assert_eq!(d.delay, Duration::ZERO);
        }
    }

    #[test]
    fn rate_zero_never_fails() {
        let policy = RandomFaults::default().with_failure_rate(0.0);
        assert!((0..200).all(|_| !policy.decide().fail));
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(
            RandomFaults::default().with_failure_rate(3.0).failure_rate(),
            1.0
        );
        assert_eq!(
            RandomFaults::default().with_failure_rate(-1.0).failure_rate(),
            0.0
        );
        assert_eq!(
            RandomFaults::default()
                .with_failure_rate(f64::NAN)
                .failure_rate(),
            0.0
        );
    }

    #[test]
    fn delay_stays_within_bound() {
        let max = Duration::from_millis(40);
        let policy = RandomFaults::default().with_max_delay(max);
        for _ in 0..500 {
            assert!(policy.decide().delay <= max);
        }
    }

    #[test]
    fn failure_rate_is_roughly_honoured() {
        let policy = RandomFaults::default().with_failure_rate(0.25);
        let failures = (0..10_000).filter(|_| policy.decide().fail).count();
        // Binomial(10_000, 0.25) has a standard deviation near 43.
        assert!((2_000..3_000).contains(&failures), "{failures} failures");
    }

    #[tokio::test]
    async fn apply_sleeps_then_reports() {
        let decision = FaultDecision {
            fail: true,
            delay: Duration::from_millis(20),
        };
        let start = tokio::time::Instant::now();
        assert!(decision.apply().await);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn apply_without_delay_passes_through() {
        assert!(!FaultDecision::pass().apply().await);
    }
}
