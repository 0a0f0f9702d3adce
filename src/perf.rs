//! Frame timing
//!
//! Keeps a rolling window of paint durations so the runtime can report
//! frame rate in the logs.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const FRAME_HISTORY_SIZE: usize = 60;

/// How often the runtime logs a summary
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct FrameStats {
    frame_start: Option<Instant>,
    frame_times: VecDeque<Duration>,
    total_frames: u64,
    last_report: Instant,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_start: None,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY_SIZE),
            total_frames: 0,
            last_report: Instant::now(),
        }
    }
}

impl FrameStats {
    #[inline]
    pub fn start_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    #[inline]
    pub fn record_frame_time(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.push_frame_time(start.elapsed());
        }
    }

    pub fn push_frame_time(&mut self, elapsed: Duration) {
        self.frame_times.push_back(elapsed);
        if self.frame_times.len() > FRAME_HISTORY_SIZE {
            self.frame_times.pop_front();
        }
        self.total_frames += 1;
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn avg_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.frame_times.iter().sum();
        total / self.frame_times.len() as u32
    }

    /// Frames per second implied by the average paint time
    pub fn fps(&self) -> f64 {
        let avg = self.avg_frame_time();
        if avg.as_secs_f64() > 0.0 {
            1.0 / avg.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Log a summary at most once per [`REPORT_INTERVAL`]
    pub fn maybe_report(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_report) < REPORT_INTERVAL {
            return false;
        }
        self.last_report = now;
        tracing::debug!(
            frames = self.total_frames,
            avg_us = self.avg_frame_time().as_micros() as u64,
            fps = self.fps(),
            "Frame stats"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = FrameStats::default();
        assert_eq!(stats.avg_frame_time(), Duration::ZERO);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_average_and_fps() {
        let mut stats = FrameStats::default();
        stats.push_frame_time(Duration::from_millis(10));
        stats.push_frame_time(Duration::from_millis(30));
        assert_eq!(stats.avg_frame_time(), Duration::from_millis(20));
        assert!((stats.fps() - 50.0).abs() < 1e-9);
        assert_eq!(stats.total_frames(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stats = FrameStats::default();
        for _ in 0..FRAME_HISTORY_SIZE {
            stats.push_frame_time(Duration::from_millis(100));
        }
        for _ in 0..FRAME_HISTORY_SIZE {
            stats.push_frame_time(Duration::from_millis(1));
        }
        assert_eq!(stats.avg_frame_time(), Duration::from_millis(1));
        assert_eq!(stats.total_frames(), 2 * FRAME_HISTORY_SIZE as u64);
    }

    #[test]
    fn test_report_is_rate_limited() {
        let mut stats = FrameStats::default();
        let start = Instant::now();
        assert!(!stats.maybe_report(start));
        let later = start + REPORT_INTERVAL + Duration::from_millis(1);
        assert!(stats.maybe_report(later));
        assert!(!stats.maybe_report(later));
    }
}
