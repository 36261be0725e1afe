//! Render throttling
//!
//! Sensors can deliver data far faster than the panel is worth repainting.
//! [`RenderThrottle`] repaints the sensor data page at most once per
//! interval, independent of how often readings change.

use core::time::Duration;

use log::{error, trace};

use crate::config::MissingReadingPolicy;
use crate::pages::sensor_data;
use crate::sensors::Readings;
use crate::ui::Renderer;

#[derive(Debug, Clone, Copy)]
pub struct RenderThrottle {
    interval: Duration,
    last_render: Duration,
}

impl RenderThrottle {
    /// The first repaint happens once `interval` has passed since boot.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_render: Duration::ZERO,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the last repaint.
    pub const fn last_render(&self) -> Duration {
        self.last_render
    }

    /// Whether a repaint is due at `now`.
    pub fn is_due(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_render) >= self.interval
    }

    /// Repaint the sensor data page if the interval has elapsed.
    ///
    /// Returns `true` when a frame was drawn. A failed commit is logged and
    /// still counts as a repaint so the throttle keeps its cadence.
    pub fn poll<R: Renderer>(
        &mut self,
        now: Duration,
        readings: &Readings,
        policy: MissingReadingPolicy,
        renderer: &mut R,
    ) -> bool {
        if !self.is_due(now) {
            return false;
        }

        self.last_render = now;
        trace!("Repainting sensor data at {} ms", now.as_millis());

        if let Err(e) = sensor_data::draw(renderer, readings, policy) {
            error!("Failed to update display: {:?}", e);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRenderer;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn poll_at(throttle: &mut RenderThrottle, renderer: &mut MockRenderer, ms: u64) -> bool {
        throttle.poll(
            Duration::from_millis(ms),
            &Readings::default(),
            MissingReadingPolicy::ShowDefault,
            renderer,
        )
    }

    #[test]
    fn no_render_before_first_interval() {
        let mut throttle = RenderThrottle::new(INTERVAL);
        let mut renderer = MockRenderer::new();

        assert!(!poll_at(&mut throttle, &mut renderer, 0));
        assert!(!poll_at(&mut throttle, &mut renderer, 499));
        assert_eq!(renderer.commits(), 0);

        assert!(poll_at(&mut throttle, &mut renderer, 500));
        assert_eq!(renderer.commits(), 1);
    }

    #[test]
    fn calls_closer_than_interval_commit_at_most_once() {
        let mut throttle = RenderThrottle::new(INTERVAL);
        let mut renderer = MockRenderer::new();

        for start in [1000_u64, 1500, 2345] {
            for delta in [1_u64, 250, 499] {
                let mut throttle = throttle;
                let mut renderer = MockRenderer::new();
                poll_at(&mut throttle, &mut renderer, start);
                poll_at(&mut throttle, &mut renderer, start + delta);
                assert!(renderer.commits() <= 1, "start {start} delta {delta}");
            }
        }

        assert!(poll_at(&mut throttle, &mut renderer, 1000));
        assert!(!poll_at(&mut throttle, &mut renderer, 1499));
        assert_eq!(renderer.commits(), 1);
        assert_eq!(throttle.last_render(), Duration::from_millis(1000));
    }

    #[test]
    fn interval_elapsed_commits_once_and_advances_timestamp() {
        for delta in [500_u64, 501, 1200] {
            let mut throttle = RenderThrottle::new(INTERVAL);
            let mut renderer = MockRenderer::new();

            assert!(poll_at(&mut throttle, &mut renderer, 600));
            let commits = renderer.commits();

            assert!(poll_at(&mut throttle, &mut renderer, 600 + delta));
            assert_eq!(renderer.commits(), commits + 1);
            assert_eq!(
                throttle.last_render(),
                Duration::from_millis(600 + delta)
            );
        }
    }

    #[test]
    fn failed_commit_keeps_cadence() {
        let mut throttle = RenderThrottle::new(INTERVAL);
        let mut renderer = MockRenderer::new();
        renderer.fail_commits(true);

        assert!(poll_at(&mut throttle, &mut renderer, 700));
        assert_eq!(throttle.last_render(), Duration::from_millis(700));
        assert!(!poll_at(&mut throttle, &mut renderer, 900));
    }
}
