//! Engine-agnostic metrics for regenerate passes.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use mask_mesh::metrics::{GenerationMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // After each pass:
//! metrics.record(&generated);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::pipeline::Generated;

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

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Window keeping at most `capacity` values. A zero capacity never
    /// stores anything.
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

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when no value has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop every value, keeping the capacity.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Most recently pushed value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Sum of the held values, `T::default()` when empty.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Mean of the held values, 0.0 when empty.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Smallest and largest held values, None when empty.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

/// 64 samples: about one second of history at 60 passes per second.
impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Statistics accumulated across regenerate passes.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetrics {
    // Timing (microseconds)
    /// Thresholding the sample grid into a mask.
    pub mask_timings: RollingWindow<u64>,
    /// Packed and adaptive tree construction.
    pub tree_timings: RollingWindow<u64>,
    /// Marching squares plus leaf quad emission.
    pub march_timings: RollingWindow<u64>,
    /// Whole pass, finalize included.
    pub total_timings: RollingWindow<u64>,

    // Counters
    /// Passes recorded since the last reset.
    pub passes: u64,
    /// Triangles emitted across all recorded passes.
    pub total_triangles: u64,
    /// Cells the adaptive trees dropped across all recorded passes.
    pub total_dropped_cells: u64,

    // Last pass snapshot
    /// Contour triangles of the most recent pass.
    pub last_triangles: usize,
    /// Ambiguous windows (cases 5 and 10) of the most recent pass.
    pub last_saddles: usize,
    /// Adaptive tree height of the most recent pass.
    pub last_tree_height: u32,
    /// Approximate contour mesh memory (positions, normals, UVs, indices).
    pub last_mesh_bytes: usize,
}

impl GenerationMetrics {
    /// Create empty metrics with default window sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters and windows.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold one pass into the metrics. No-op unless [`is_enabled`].
    pub fn record(&mut self, generated: &Generated) {
        if !is_enabled() {
            return;
        }
        self.record_unchecked(generated);
    }

    /// Fold one pass in regardless of the toggles.
    fn record_unchecked(&mut self, generated: &Generated) {
        let timing = &generated.timing;
        self.mask_timings.push(timing.mask_us);
        self.tree_timings.push(timing.tree_us);
        self.march_timings.push(timing.march_us);
        self.total_timings.push(timing.total_us);

        let triangles = generated.mesh.triangle_count();
        self.passes += 1;
        self.total_triangles += triangles as u64;
        self.total_dropped_cells += generated.tree.dropped_cells() as u64;

        self.last_triangles = triangles;
        self.last_saddles = generated.march_stats.saddles;
        self.last_tree_height = generated.tree.tree_height();
        self.last_mesh_bytes = generated.mesh.memory_bytes();
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
