//! Test utilities for pipeline and streaming tests.
//!
//! Provides analytic density fields whose surfaces are known in advance.

use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec3;

use crate::config::{LodProfile, TerrainConfig};
use crate::density::DensityField;

// =============================================================================
// Analytic density fields
// =============================================================================

/// Ball centred at a point. Density is 0.5 on the sphere, rising inward.
pub struct SphereDensity {
  pub center: Vec3,
  pub radius: f32,
}

impl SphereDensity {
  pub fn new(center: Vec3, radius: f32) -> Self {
    Self { center, radius }
  }
}

impl DensityField for SphereDensity {
  fn evaluate(&self, point: Vec3) -> f32 {
    0.5 + (self.radius - (point - self.center).length()) * 0.1
  }
}

/// Flat ground at `height`. Density is 0.5 on the plane, rising downward.
pub struct GroundDensity {
  pub height: f32,
}

impl DensityField for GroundDensity {
  fn evaluate(&self, point: Vec3) -> f32 {
    0.5 + (self.height - point.y) * 0.1
  }
}

/// Same value everywhere.
pub struct ConstantDensity(pub f32);

impl DensityField for ConstantDensity {
  fn evaluate(&self, _point: Vec3) -> f32 {
    self.0
  }

  fn amplitude_bound(&self) -> Option<f32> {
    Some(self.0.abs())
  }
}

/// Wraps a field and counts evaluations.
pub struct CountingDensity<D> {
  pub inner: D,
  pub calls: AtomicUsize,
}

impl<D> CountingDensity<D> {
  pub fn new(inner: D) -> Self {
    Self {
      inner,
      calls: AtomicUsize::new(0),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::Relaxed)
  }
}

impl<D: DensityField> DensityField for CountingDensity<D> {
  fn evaluate(&self, point: Vec3) -> f32 {
    self.calls.fetch_add(1, Ordering::Relaxed);
    self.inner.evaluate(point)
  }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Small chunks so tests stay fast: 8 voxels over 10 world units.
pub fn small_config() -> TerrainConfig {
  TerrainConfig::default()
    .with_voxels_per_axis(8)
    .with_chunk_size(10.0)
    .with_view_distance(25.0)
    .with_lod_profiles(vec![
      LodProfile::new(15.0, 1).with_material(1),
      LodProfile::new(1000.0, 2).with_material(2),
    ])
}
