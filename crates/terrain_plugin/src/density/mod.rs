//! Scalar density fields and per-chunk density grids.
//!
//! A [`DensityField`] maps a world-space point to a scalar. The surface sits
//! where the field crosses the configured surface level.
//!
//! Two strategies ship with the crate:
//! - [`NoiseDensity`]: weighted sum of noise octaves (procedural)
//! - [`TextureDensity`]: lookups into a tiling grayscale noise texture
//!
//! Both build their 3D value from six 2D lookups (see
//! [`noise2d::sample_symmetric`]), so the field has no preferred plane.

pub mod grid;
pub mod noise2d;
pub mod octaves;
pub mod texture;

use std::sync::Arc;

use glam::Vec3;

pub use grid::DensityGrid;
pub use noise2d::{Noise2D, PerlinNoise2D};
pub use octaves::{DensityOctave, NoiseDensity};
pub use texture::{NoiseTexture, TextureDensity};

/// Capability to evaluate a scalar density at world-space points.
///
/// Implementations must be pure: the same point always yields the same value,
/// and concurrent calls from rayon workers are allowed.
pub trait DensityField: Send + Sync {
  /// Density at a world-space point.
  fn evaluate(&self, point: Vec3) -> f32;

  /// Upper bound on `|evaluate(p)|` over all points, if known.
  fn amplitude_bound(&self) -> Option<f32> {
    None
  }
}

/// Allow boxed trait objects to be used as density fields.
///
/// Engine bridges select a strategy at runtime and store it as
/// `Box<dyn DensityField>`.
impl DensityField for Box<dyn DensityField> {
  fn evaluate(&self, point: Vec3) -> f32 {
    (**self).evaluate(point)
  }

  fn amplitude_bound(&self) -> Option<f32> {
    (**self).amplitude_bound()
  }
}

impl<T: DensityField + ?Sized> DensityField for Arc<T> {
  fn evaluate(&self, point: Vec3) -> f32 {
    (**self).evaluate(point)
  }

  fn amplitude_bound(&self) -> Option<f32> {
    (**self).amplitude_bound()
  }
}

/// Strategy selection for runtime-configured worlds.
#[derive(Clone, Debug)]
pub enum DensitySettings {
  /// Perlin octave sum.
  Noise {
    seed: u32,
    global_scale: f32,
    octaves: Vec<DensityOctave>,
  },
  /// Tiling texture lookups.
  Texture {
    texture: NoiseTexture,
    texels_per_unit: f32,
  },
}

impl DensitySettings {
  /// Instantiate the selected strategy.
  pub fn build(self) -> Box<dyn DensityField> {
    match self {
      DensitySettings::Noise {
        seed,
        global_scale,
        octaves,
      } => Box::new(NoiseDensity::new(PerlinNoise2D::new(seed), global_scale, octaves)),
      DensitySettings::Texture {
        texture,
        texels_per_unit,
      } => Box::new(TextureDensity::new(texture, texels_per_unit)),
    }
  }
}

impl Default for DensitySettings {
  fn default() -> Self {
    DensitySettings::Noise {
      seed: 0,
      global_scale: 1.0,
      octaves: vec![DensityOctave::default()],
    }
  }
}
