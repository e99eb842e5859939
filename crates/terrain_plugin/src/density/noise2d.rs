//! 2D coherent noise providers and the six-lookup 3D symmetrization.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Deterministic 2D coherent noise in `[0, 1]`.
pub trait Noise2D: Send + Sync {
  fn sample(&self, x: f32, y: f32) -> f32;
}

/// Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinNoise2D {
  perlin: Perlin,
}

impl PerlinNoise2D {
  pub fn new(seed: u32) -> Self {
    Self {
      perlin: Perlin::new(seed),
    }
  }
}

impl Default for PerlinNoise2D {
  fn default() -> Self {
    Self::new(Perlin::DEFAULT_SEED)
  }
}

impl Noise2D for PerlinNoise2D {
  #[inline]
  fn sample(&self, x: f32, y: f32) -> f32 {
    let value = self.perlin.get([x as f64, y as f64]) as f32;
    (value * 0.5 + 0.5).clamp(0.0, 1.0)
  }
}

/// 3D noise as the average of six 2D lookups.
///
/// ```text
/// (x,y) (y,x)   (y,z) (z,y)   (x,z) (z,x)
///   └─ XY ─┘      └─ YZ ─┘      └─ XZ ─┘
/// ```
///
/// Both argument orders are sampled for every plane, so swapping any two
/// input axes leaves the result unchanged.
#[inline]
pub fn sample_symmetric<N: Noise2D + ?Sized>(noise: &N, p: Vec3) -> f32 {
  let xy = noise.sample(p.x, p.y);
  let yx = noise.sample(p.y, p.x);
  let yz = noise.sample(p.y, p.z);
  let zy = noise.sample(p.z, p.y);
  let xz = noise.sample(p.x, p.z);
  let zx = noise.sample(p.z, p.x);

  (xy + yx + yz + zy + xz + zx) / 6.0
}

#[cfg(test)]
#[path = "noise2d_test.rs"]
mod noise2d_test;
