//! Texture-lookup density: the procedural noise replaced by a tiling
//! grayscale texture.

use glam::Vec3;

use super::noise2d::{sample_symmetric, Noise2D};
use super::DensityField;
use crate::error::ConfigError;

/// Tiling grayscale texture with values in `[0, 1]`.
///
/// Texels are stored row-major (`y * width + x`). Sampling is bilinear with
/// wrap addressing, in texel units.
#[derive(Clone, Debug)]
pub struct NoiseTexture {
  width: usize,
  height: usize,
  texels: Vec<f32>,
}

impl NoiseTexture {
  /// Wrap an existing texel buffer. Values are clamped to `[0, 1]`.
  pub fn new(width: usize, height: usize, mut texels: Vec<f32>) -> Result<Self, ConfigError> {
    let expected = width * height;
    if expected == 0 || texels.len() != expected {
      return Err(ConfigError::TextureSize {
        width,
        height,
        expected,
        actual: texels.len(),
      });
    }

    for t in &mut texels {
      *t = t.clamp(0.0, 1.0);
    }

    Ok(Self {
      width,
      height,
      texels,
    })
  }

  /// Build a texture from a per-texel function. Dimensions of zero are
  /// raised to one.
  pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> Self {
    let width = width.max(1);
    let height = height.max(1);
    let texels = (0..height)
      .flat_map(|y| (0..width).map(move |x| (x, y)))
      .map(|(x, y)| f(x, y).clamp(0.0, 1.0))
      .collect();

    Self {
      width,
      height,
      texels,
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  #[inline]
  fn texel(&self, x: i64, y: i64) -> f32 {
    let x = x.rem_euclid(self.width as i64) as usize;
    let y = y.rem_euclid(self.height as i64) as usize;
    self.texels[y * self.width + x]
  }
}

impl Noise2D for NoiseTexture {
  #[inline]
  fn sample(&self, x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let top = self.texel(ix, iy) * (1.0 - tx) + self.texel(ix + 1, iy) * tx;
    let bottom = self.texel(ix, iy + 1) * (1.0 - tx) + self.texel(ix + 1, iy + 1) * tx;
    top * (1.0 - ty) + bottom * ty
  }
}

/// Density read from a [`NoiseTexture`] with the same six-lookup
/// symmetrization as the procedural variant.
#[derive(Clone, Debug)]
pub struct TextureDensity {
  pub texture: NoiseTexture,
  /// Texels spanned by one world unit.
  pub texels_per_unit: f32,
}

impl TextureDensity {
  pub fn new(texture: NoiseTexture, texels_per_unit: f32) -> Self {
    Self {
      texture,
      texels_per_unit,
    }
  }
}

impl DensityField for TextureDensity {
  #[inline]
  fn evaluate(&self, point: Vec3) -> f32 {
    sample_symmetric(&self.texture, point * self.texels_per_unit)
  }

  fn amplitude_bound(&self) -> Option<f32> {
    Some(1.0)
  }
}

#[cfg(test)]
#[path = "texture_test.rs"]
mod texture_test;
