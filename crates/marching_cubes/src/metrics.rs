//! Extraction statistics.
//!
//! Counters are always filled in. Wall-clock timing is feature-gated and
//! runtime-toggled so that disabled builds never touch the clock.
//!
//! ```ignore
//! use marching_cubes::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//! ```

use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

/// Runtime toggle for timing collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if timing collection is enabled (both compile-time and runtime).
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

/// Counters gathered by one `polygonize` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolygonizeStats {
  /// Cubes visited by the scan.
  pub cubes_scanned: u64,

  /// Cubes whose corner mask was neither 0 nor 255.
  pub active_cubes: u64,

  /// Sum of per-cube triangle counts.
  pub triangles: u64,

  /// Vertex records emitted by cubes before deduplication.
  pub vertex_records: u64,

  /// Records dropped because their edge already held a vertex.
  pub duplicate_vertices: u64,

  pub unique_vertices: u64,

  /// Wall-clock time of the whole extraction in microseconds.
  /// Zero unless timing collection is enabled.
  pub elapsed_us: u64,
}

impl PolygonizeStats {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the per-cube outcome of one marched cube.
  #[inline]
  pub fn record_cube(&mut self, triangles: usize, vertex_records: usize) {
    self.cubes_scanned += 1;
    if triangles > 0 {
      self.active_cubes += 1;
    }
    self.triangles += triangles as u64;
    self.vertex_records += vertex_records as u64;
  }

  /// Fold the counters of another scan (an x-slab) into this one.
  pub fn merge(&mut self, other: &PolygonizeStats) {
    self.cubes_scanned += other.cubes_scanned;
    self.active_cubes += other.active_cubes;
    self.triangles += other.triangles;
    self.vertex_records += other.vertex_records;
    self.duplicate_vertices += other.duplicate_vertices;
    self.unique_vertices += other.unique_vertices;
  }

  /// Record the extraction time.
  pub fn record_timing(&mut self, elapsed_us: u64) {
    if is_enabled() {
      self.elapsed_us = elapsed_us;
    }
  }

  /// Fraction of emitted vertex records that were shared with a neighbour.
  pub fn sharing_ratio(&self) -> f64 {
    if self.vertex_records == 0 {
      0.0
    } else {
      self.duplicate_vertices as f64 / self.vertex_records as f64
    }
  }
}
