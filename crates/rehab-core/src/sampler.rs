//! Last-wins frame sampler.
//!
//! The camera produces frames far faster than the classifier should be
//! called. The sampler keeps only the freshest frame and releases it at most
//! once per interval; everything in between is dropped.

use std::time::{Duration, Instant};

/// Default minimum spacing between released frames.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct FrameSampler<T> {
    min_interval: Duration,
    last_release: Option<Instant>,
    pending: Option<T>,
    dropped: u64,
}

impl<T> FrameSampler<T> {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_release: None,
            pending: None,
            dropped: 0,
        }
    }

    /// Offers a frame captured at `now`.
    ///
    /// The frame replaces any pending one. It is returned immediately when the
    /// interval since the last release has elapsed, otherwise it waits for
    /// [`Self::poll`] or is superseded by the next offer.
    pub fn offer(&mut self, frame: T, now: Instant) -> Option<T> {
        if self.pending.replace(frame).is_some() {
            self.dropped += 1;
        }
        self.poll(now)
    }

    /// Releases the pending frame if the interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_none() || !self.is_ready(now) {
            return None;
        }
        self.last_release = Some(now);
        self.pending.take()
    }

    /// Whether a frame offered at `now` would be released.
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last_release {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        }
    }

    /// Number of frames superseded before they were released.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Forgets the pending frame and the release timestamp.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_release = None;
    }
}

impl<T> Default for FrameSampler<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_released_immediately() {
        let mut sampler = FrameSampler::default();
        let t0 = Instant::now();
        assert_eq!(sampler.offer(1, t0), Some(1));
    }

    #[test]
    fn test_frames_within_interval_are_held() {
        let mut sampler = FrameSampler::new(Duration::from_millis(200));
        let t0 = Instant::now();
        assert_eq!(sampler.offer(1, t0), Some(1));
        assert_eq!(sampler.offer(2, t0 + Duration::from_millis(50)), None);
        assert_eq!(sampler.offer(3, t0 + Duration::from_millis(120)), None);
        assert_eq!(sampler.dropped(), 1);

        // Only the freshest frame survives.
        assert_eq!(sampler.poll(t0 + Duration::from_millis(199)), None);
        assert_eq!(sampler.poll(t0 + Duration::from_millis(200)), Some(3));
        assert_eq!(sampler.poll(t0 + Duration::from_millis(500)), None);
    }

    #[test]
    fn test_one_release_per_interval() {
        let mut sampler = FrameSampler::new(Duration::from_millis(200));
        let t0 = Instant::now();
        let mut released = Vec::new();
        // 30 fps for one second
        for i in 0..30u64 {
            if let Some(frame) = sampler.offer(i, t0 + Duration::from_millis(i * 33)) {
                released.push(frame);
            }
        }
        assert_eq!(released.len(), 5);
        assert_eq!(released[0], 0);
        assert!(released.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_reset_clears_pending() {
        let mut sampler = FrameSampler::new(Duration::from_millis(200));
        let t0 = Instant::now();
        sampler.offer(1, t0);
        sampler.offer(2, t0 + Duration::from_millis(10));
        sampler.reset();
        assert_eq!(sampler.poll(t0 + Duration::from_millis(300)), None);
        assert_eq!(sampler.offer(3, t0 + Duration::from_millis(301)), Some(3));
    }
}
