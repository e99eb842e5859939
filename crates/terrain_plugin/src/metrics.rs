//! Engine-agnostic metrics collection for terrain streaming.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use terrain_plugin::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Read after an update:
//! let metrics = streamer.metrics();
//! println!("{:.1} us/pass", metrics.avg_pass_timing_us());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::streaming::UpdateStats;

/// LOD buckets tracked individually; deeper buckets share the last slot.
pub const TRACKED_LODS: usize = 8;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window of recent values (timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128) // ~2 seconds of passes at 60fps
    }
}

/// Streaming statistics accumulated over the streamer's lifetime.
#[derive(Debug, Clone, Default)]
pub struct StreamingMetrics {
    // Per LOD bucket (index = lod_index, clamped)
    /// Chunks built at each LOD bucket.
    pub chunks_per_lod: [u64; TRACKED_LODS],
    /// Triangles generated at each LOD bucket.
    pub triangles_per_lod: [u64; TRACKED_LODS],

    // Pool
    pub total_created: u64,
    pub total_reused: u64,
    pub total_destroyed: u64,
    pub total_culled: u64,
    /// Chunks held by the pool after the last pass.
    pub live_chunks: usize,
    /// Active chunks after the last pass.
    pub active_chunks: usize,

    // Timing
    /// Per-chunk generation times in microseconds.
    pub chunk_timings: RollingWindow<u64>,
    /// Whole update pass times in microseconds.
    pub pass_timings: RollingWindow<u64>,
    pub last_pass_us: u64,
}

impl StreamingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset windows and gauges. Cumulative totals are kept.
    pub fn reset(&mut self) {
        self.chunk_timings.clear();
        self.pass_timings.clear();
        self.last_pass_us = 0;
        self.live_chunks = 0;
        self.active_chunks = 0;
    }

    /// Record one built chunk.
    pub fn record_chunk(&mut self, lod_index: usize, triangles: usize, timing_us: u64) {
        if !is_enabled() {
            return;
        }

        let lod = lod_index.min(TRACKED_LODS - 1);
        self.chunks_per_lod[lod] += 1;
        self.triangles_per_lod[lod] += triangles as u64;
        self.chunk_timings.push(timing_us);
    }

    /// Record the outcome of one update pass.
    pub fn record_pass(&mut self, stats: &UpdateStats, live_chunks: usize) {
        if !is_enabled() {
            return;
        }

        self.total_created += stats.created as u64;
        self.total_reused += stats.reused as u64;
        self.total_destroyed += stats.destroyed as u64;
        self.total_culled += stats.culled as u64;
        self.live_chunks = live_chunks;
        self.active_chunks = stats.active;
        self.pass_timings.push(stats.elapsed_us);
        self.last_pass_us = stats.elapsed_us;
    }

    pub fn total_chunks_built(&self) -> u64 {
        self.chunks_per_lod.iter().sum()
    }

    pub fn total_triangles(&self) -> u64 {
        self.triangles_per_lod.iter().sum()
    }

    /// Fraction of built chunks that reused recycled storage.
    pub fn reuse_ratio(&self) -> f64 {
        let built = self.total_created + self.total_reused;
        if built == 0 {
            0.0
        } else {
            self.total_reused as f64 / built as f64
        }
    }

    pub fn avg_chunk_timing_us(&self) -> f64 {
        self.chunk_timings.average()
    }

    pub fn avg_pass_timing_us(&self) -> f64 {
        self.pass_timings.average()
    }
}
