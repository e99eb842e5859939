//! Procedural density: a weighted sum of noise octaves.

use glam::Vec3;

use super::noise2d::{sample_symmetric, Noise2D, PerlinNoise2D};
use super::DensityField;

/// One layer of the octave sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityOctave {
  pub frequency: f32,
  pub amplitude: f32,
  pub offset: Vec3,
}

impl DensityOctave {
  pub fn new(frequency: f32, amplitude: f32, offset: Vec3) -> Self {
    Self {
      frequency,
      amplitude,
      offset,
    }
  }
}

impl Default for DensityOctave {
  fn default() -> Self {
    Self::new(1.0, 1.0, Vec3::ZERO)
  }
}

/// Octave sum over a 2D noise provider.
///
/// ```text
/// density(p) = Σ noise3((p + offset_i) * frequency_i * global_scale) * amplitude_i
/// ```
#[derive(Clone, Debug)]
pub struct NoiseDensity<N: Noise2D = PerlinNoise2D> {
  pub noise: N,
  pub global_scale: f32,
  pub octaves: Vec<DensityOctave>,
}

impl<N: Noise2D> NoiseDensity<N> {
  pub fn new(noise: N, global_scale: f32, octaves: Vec<DensityOctave>) -> Self {
    Self {
      noise,
      global_scale,
      octaves,
    }
  }

  pub fn with_octave(mut self, octave: DensityOctave) -> Self {
    self.octaves.push(octave);
    self
  }
}

impl<N: Noise2D> DensityField for NoiseDensity<N> {
  #[inline]
  fn evaluate(&self, point: Vec3) -> f32 {
    self
      .octaves
      .iter()
      .map(|o| {
        let p = (point + o.offset) * o.frequency * self.global_scale;
        sample_symmetric(&self.noise, p) * o.amplitude
      })
      .sum()
  }

  fn amplitude_bound(&self) -> Option<f32> {
    Some(self.octaves.iter().map(|o| o.amplitude.abs()).sum())
  }
}

#[cfg(test)]
#[path = "octaves_test.rs"]
mod octaves_test;
