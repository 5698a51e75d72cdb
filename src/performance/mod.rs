//! # Frame Timing
//!
//! Rolling frame-time statistics for the render loop. The host brackets each
//! simulated frame with [`PerformanceMonitor::begin_frame`] and
//! [`PerformanceMonitor::end_frame`] and periodically logs the summary.
//!
//! ```
//! use particle_network::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//! monitor.begin_frame();
//! // ... advance and draw ...
//! monitor.end_frame();
//! assert_eq!(monitor.sample_count(), 1);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Aggregated frame statistics
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMetrics {
    /// Frames per second implied by the average frame time
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    /// Vertices submitted in the last frame
    pub vertex_count: u32,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            vertex_count: 0,
        }
    }
}

/// Performance monitoring system
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    frame_start: Option<Instant>,
    current_metrics: FrameMetrics,
    last_report: Instant,
    report_interval: Duration,
}

impl PerformanceMonitor {
    /// Keeps ~2 seconds of samples at 60fps and reports every 5 seconds
    pub fn new() -> Self {
        Self::with_config(120, Duration::from_secs(5))
    }

    pub fn with_config(max_samples: usize, report_interval: Duration) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            current_metrics: FrameMetrics::default(),
            last_report: Instant::now(),
            report_interval,
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame and update metrics
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record(start.elapsed());
        }
    }

    /// Adds a frame time sample and refreshes the metrics
    pub fn record(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total_time / self.frame_times.len() as u32;
        let avg_frame_time_ms = avg_frame_time.as_secs_f32() * 1000.0;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) =
            (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn set_vertex_count(&mut self, vertex_count: u32) {
        self.current_metrics.vertex_count = vertex_count;
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.current_metrics
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Returns true at most once per report interval, and only with samples
    pub fn should_report(&mut self) -> bool {
        if self.frame_times.is_empty() || self.last_report.elapsed() < self.report_interval {
            return false;
        }
        self.last_report = Instant::now();
        true
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let m = &self.current_metrics;
        format!(
            "{:.1} fps, frame {:.2}ms (min {:.2}ms, max {:.2}ms), {} vertices",
            m.fps, m.frame_time_ms, m.min_frame_time_ms, m.max_frame_time_ms, m.vertex_count
        )
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = FrameMetrics::default();
        self.frame_start = None;
        self.last_report = Instant::now();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_from_samples() {
        let mut monitor = PerformanceMonitor::with_config(10, Duration::from_secs(1));
        monitor.record(Duration::from_millis(10));
        monitor.record(Duration::from_millis(20));
        monitor.record(Duration::from_millis(30));

        let m = monitor.metrics();
        assert!((m.frame_time_ms - 20.0).abs() < 1e-3);
        assert!((m.fps - 50.0).abs() < 1e-2);
        assert!((m.min_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((m.max_frame_time_ms - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut monitor = PerformanceMonitor::with_config(2, Duration::from_secs(1));
        monitor.record(Duration::from_millis(100));
        monitor.record(Duration::from_millis(10));
        monitor.record(Duration::from_millis(10));

        assert_eq!(monitor.sample_count(), 2);
        assert!((monitor.metrics().max_frame_time_ms - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_report_throttled() {
        let mut monitor = PerformanceMonitor::with_config(4, Duration::ZERO);
        assert!(!monitor.should_report());
        monitor.record(Duration::from_millis(16));
        assert!(monitor.should_report());

        let mut slow = PerformanceMonitor::with_config(4, Duration::from_secs(3600));
        slow.record(Duration::from_millis(16));
        assert!(!slow.should_report());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut monitor = PerformanceMonitor::new();
        monitor.begin_frame();
        monitor.end_frame();
        monitor.reset();
        assert_eq!(monitor.sample_count(), 0);
        assert_eq!(monitor.metrics(), &FrameMetrics::default());
    }
}
