//! TerrainConfig - chunk resolution, LOD profiles and world layout.

use glam::UVec3;

use crate::constants::DEFAULT_VOXELS_PER_AXIS;
use crate::error::ConfigError;
use crate::marching_cubes::{CapacityPolicy, ExtractConfig};
use crate::types::MaterialId;

/// One LOD bucket.
///
/// Chunks whose centre is closer than `max_active_distance` fall into this
/// bucket (unless an earlier bucket already matched).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodProfile {
  pub max_active_distance: f32,
  /// Cube stride; must evenly divide the voxels per axis.
  pub lod_modifier: usize,
  pub material: MaterialId,
}

impl LodProfile {
  pub fn new(max_active_distance: f32, lod_modifier: usize) -> Self {
    Self {
      max_active_distance,
      lod_modifier,
      material: 0,
    }
  }

  pub fn with_material(mut self, material: MaterialId) -> Self {
    self.material = material;
    self
  }
}

/// How the set of chunks is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldMode {
  /// Chunks stream in and out around the viewpoint.
  Streaming { view_distance: f32 },

  /// A static lattice of `dimensions` chunks from the origin, all at LOD 0.
  Fixed { dimensions: UVec3 },
}

/// Surface shape parameters that can change at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSettings {
  pub surface_level: f32,
  pub smooth: bool,
  pub invert: bool,
}

impl Default for ShapeSettings {
  fn default() -> Self {
    Self {
      surface_level: 0.5,
      smooth: true,
      invert: false,
    }
  }
}

/// Configuration for a terrain world.
#[derive(Clone, Debug)]
pub struct TerrainConfig {
  /// Cubes per chunk axis at LOD 0.
  pub voxels_per_axis: usize,

  /// Chunk edge length in world units.
  pub chunk_size: f32,

  pub shape: ShapeSettings,

  pub mode: WorldMode,

  /// Ordered by increasing `max_active_distance`.
  pub lod_profiles: Vec<LodProfile>,

  /// Attach a collider handle to every chunk.
  pub use_collisions: bool,

  pub capacity: CapacityPolicy,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      voxels_per_axis: DEFAULT_VOXELS_PER_AXIS,
      chunk_size: 32.0,
      shape: ShapeSettings::default(),
      mode: WorldMode::Streaming {
        view_distance: 128.0,
      },
      lod_profiles: vec![LodProfile::new(64.0, 1), LodProfile::new(128.0, 2)],
      use_collisions: false,
      capacity: CapacityPolicy::Grow,
    }
  }
}

impl TerrainConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_voxels_per_axis(mut self, voxels: usize) -> Self {
    self.voxels_per_axis = voxels;
    self
  }

  pub fn with_chunk_size(mut self, size: f32) -> Self {
    self.chunk_size = size;
    self
  }

  pub fn with_shape(mut self, shape: ShapeSettings) -> Self {
    self.shape = shape;
    self
  }

  pub fn with_view_distance(mut self, view_distance: f32) -> Self {
    self.mode = WorldMode::Streaming { view_distance };
    self
  }

  pub fn with_fixed_dimensions(mut self, dimensions: UVec3) -> Self {
    self.mode = WorldMode::Fixed { dimensions };
    self
  }

  pub fn with_lod_profiles(mut self, profiles: Vec<LodProfile>) -> Self {
    self.lod_profiles = profiles;
    self
  }

  pub fn with_collisions(mut self, use_collisions: bool) -> Self {
    self.use_collisions = use_collisions;
    self
  }

  pub fn with_capacity(mut self, capacity: CapacityPolicy) -> Self {
    self.capacity = capacity;
    self
  }

  /// Check every setup invariant.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.voxels_per_axis == 0 {
      return Err(ConfigError::ZeroVoxels);
    }
    if !(self.chunk_size.is_finite() && self.chunk_size > 0.0) {
      return Err(ConfigError::InvalidChunkSize(self.chunk_size));
    }
    if let WorldMode::Streaming { view_distance } = self.mode {
      if !(view_distance.is_finite() && view_distance > 0.0) {
        return Err(ConfigError::InvalidViewDistance(view_distance));
      }
    }
    if self.lod_profiles.is_empty() {
      return Err(ConfigError::EmptyLodProfiles);
    }
    for (i, profile) in self.lod_profiles.iter().enumerate() {
      if profile.lod_modifier == 0 || self.voxels_per_axis % profile.lod_modifier != 0 {
        return Err(ConfigError::IndivisibleLod {
          profile: i,
          lod_modifier: profile.lod_modifier,
          voxels_per_axis: self.voxels_per_axis,
        });
      }
      if i > 0 && profile.max_active_distance <= self.lod_profiles[i - 1].max_active_distance {
        return Err(ConfigError::UnorderedLodProfiles(i));
      }
    }
    if self.capacity == CapacityPolicy::Fixed(0) {
      return Err(ConfigError::ZeroCapacity);
    }
    Ok(())
  }

  /// Density samples per chunk axis.
  #[inline]
  pub fn points_per_axis(&self) -> usize {
    crate::constants::points_per_axis(self.voxels_per_axis)
  }

  /// World-space distance between neighbouring density samples.
  #[inline]
  pub fn voxel_spacing(&self) -> f32 {
    self.chunk_size / self.voxels_per_axis as f32
  }

  /// LOD bucket for a squared distance: the first profile whose squared max
  /// distance exceeds it, else the last profile.
  pub fn lod_index_for(&self, sqr_distance: f32) -> usize {
    self
      .lod_profiles
      .iter()
      .position(|p| sqr_distance < p.max_active_distance * p.max_active_distance)
      .unwrap_or(self.lod_profiles.len().saturating_sub(1))
  }

  /// Extraction settings for a LOD bucket.
  pub fn extract_config(&self, lod_index: usize) -> ExtractConfig {
    let lod_modifier = self
      .lod_profiles
      .get(lod_index)
      .map_or(1, |p| p.lod_modifier);

    ExtractConfig {
      surface_level: self.shape.surface_level,
      smooth: self.shape.smooth,
      invert: self.shape.invert,
      lod_modifier,
      voxel_scale: self.voxel_spacing(),
      capacity: self.capacity,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
