//! Cube configuration index from corner samples.
//!
//! Bit `i` of the result is set when corner `i` is classified as below the
//! surface. With `invert`, the classification becomes its exact complement,
//! so the inverted index is `!index` for every cube.

/// Build the 8-bit configuration index.
///
/// - normal: bit set if `sample < surface_level`
/// - inverted: bit set if `sample >= surface_level`
#[inline]
pub fn build(samples: &[f32; 8], surface_level: f32, invert: bool) -> u8 {
  let mut mask = 0u8;
  for (i, &s) in samples.iter().enumerate() {
    if (s < surface_level) != invert {
      mask |= 1 << i;
    }
  }
  mask
}

#[cfg(test)]
#[path = "corner_mask_test.rs"]
mod corner_mask_test;
