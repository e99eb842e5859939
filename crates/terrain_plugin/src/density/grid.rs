//! Per-chunk density grid.
//!
//! Samples the field at `points_per_axis³` lattice points. X-slabs are
//! sampled in parallel with rayon; see [`crate::constants`] for the layout.

use glam::Vec3;
use rayon::prelude::*;

use super::DensityField;
use crate::constants::coord_to_index;

/// Scalar samples for one chunk. Transient: owned by the generation pass that
/// produced it.
#[derive(Clone, Debug)]
pub struct DensityGrid {
  points: usize,
  origin: Vec3,
  spacing: f32,
  samples: Vec<f32>,
}

impl DensityGrid {
  /// Sample `density` on a `points³` lattice starting at `origin`.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "density::sample_grid"))]
  pub fn sample<D: DensityField + ?Sized>(
    density: &D,
    origin: Vec3,
    spacing: f32,
    points: usize,
  ) -> Self {
    let mut samples = vec![0.0f32; points * points * points];

    if points > 0 {
      samples
        .par_chunks_mut(points * points)
        .enumerate()
        .for_each(|(x, slab)| {
          for y in 0..points {
            for z in 0..points {
              let offset = Vec3::new(x as f32, y as f32, z as f32) * spacing;
              slab[y * points + z] = density.evaluate(origin + offset);
            }
          }
        });
    }

    Self {
      points,
      origin,
      spacing,
      samples,
    }
  }

  /// Build a grid in grid-index space (origin zero, unit spacing).
  pub fn from_fn(points: usize, f: impl Fn(usize, usize, usize) -> f32) -> Self {
    let mut samples = Vec::with_capacity(points * points * points);
    for x in 0..points {
      for y in 0..points {
        for z in 0..points {
          samples.push(f(x, y, z));
        }
      }
    }

    Self {
      points,
      origin: Vec3::ZERO,
      spacing: 1.0,
      samples,
    }
  }

  #[inline]
  pub fn points_per_axis(&self) -> usize {
    self.points
  }

  /// Number of cubes along each axis at full resolution.
  #[inline]
  pub fn voxels_per_axis(&self) -> usize {
    self.points.saturating_sub(1)
  }

  #[inline]
  pub fn origin(&self) -> Vec3 {
    self.origin
  }

  #[inline]
  pub fn spacing(&self) -> f32 {
    self.spacing
  }

  #[inline]
  pub fn samples(&self) -> &[f32] {
    &self.samples
  }

  #[inline(always)]
  pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
    self.samples[coord_to_index(x, y, z, self.points)]
  }

  /// World-space position of a lattice point.
  #[inline]
  pub fn world_position(&self, x: usize, y: usize, z: usize) -> Vec3 {
    self.origin + Vec3::new(x as f32, y as f32, z as f32) * self.spacing
  }

  /// True if samples lie on both sides of `surface_level`.
  ///
  /// A grid without a crossing cannot produce any triangle.
  pub fn has_surface_crossing(&self, surface_level: f32) -> bool {
    let mut below = false;
    let mut above = false;
    for &s in &self.samples {
      if s < surface_level {
        below = true;
      } else {
        above = true;
      }
      if below && above {
        return true;
      }
    }
    false
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
