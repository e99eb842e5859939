use super::*;

fn sample_points() -> impl Iterator<Item = Vec3> {
  (0..200).map(|i| {
    let f = i as f32;
    Vec3::new(f * 0.731 - 50.0, f * 0.287 + 1.3, (f * 1.93).sin() * 40.0)
  })
}

#[test]
fn test_evaluate_deterministic() {
  let density = NoiseDensity::new(
    PerlinNoise2D::new(11),
    0.5,
    vec![
      DensityOctave::new(0.1, 1.0, Vec3::ZERO),
      DensityOctave::new(0.4, 0.25, Vec3::new(13.0, -7.0, 2.5)),
    ],
  );
  let copy = density.clone();

  for p in sample_points() {
    assert_eq!(density.evaluate(p), copy.evaluate(p));
  }
}

#[test]
fn test_evaluate_within_amplitude_bound() {
  let density = NoiseDensity::new(
    PerlinNoise2D::new(5),
    1.0,
    vec![
      DensityOctave::new(0.05, 2.0, Vec3::ZERO),
      DensityOctave::new(0.2, -0.75, Vec3::splat(3.3)),
      DensityOctave::new(1.7, 0.1, Vec3::X),
    ],
  );
  let bound = density.amplitude_bound().unwrap();
  assert!((bound - 2.85).abs() < 1e-6);

  for p in sample_points() {
    assert!(density.evaluate(p).abs() <= bound + 1e-5);
  }
}

#[test]
fn test_no_octaves_is_zero() {
  let density = NoiseDensity::new(PerlinNoise2D::default(), 1.0, Vec::new());
  assert_eq!(density.evaluate(Vec3::new(1.5, 2.5, 3.5)), 0.0);
  assert_eq!(density.amplitude_bound(), Some(0.0));
}

#[test]
fn test_amplitude_scales_linearly() {
  let unit = NoiseDensity::new(PerlinNoise2D::new(2), 1.0, vec![DensityOctave::default()]);
  let doubled = NoiseDensity::new(
    PerlinNoise2D::new(2),
    1.0,
    vec![DensityOctave::new(1.0, 2.0, Vec3::ZERO)],
  );

  for p in sample_points().take(20) {
    assert!((doubled.evaluate(p) - 2.0 * unit.evaluate(p)).abs() < 1e-5);
  }
}

#[test]
fn test_offset_shifts_input() {
  let offset = Vec3::new(0.37, 0.0, 0.0);
  let shifted = NoiseDensity::new(
    PerlinNoise2D::new(4),
    1.0,
    vec![DensityOctave::new(1.0, 1.0, offset)],
  );
  let plain = NoiseDensity::new(PerlinNoise2D::new(4), 1.0, vec![DensityOctave::default()]);

  let p = Vec3::new(1.1, 2.2, 3.3);
  assert!((shifted.evaluate(p) - plain.evaluate(p + offset)).abs() < 1e-6);
}

#[test]
fn test_with_octave_appends() {
  let density = NoiseDensity::new(PerlinNoise2D::default(), 1.0, Vec::new())
    .with_octave(DensityOctave::default())
    .with_octave(DensityOctave::new(2.0, 0.5, Vec3::ZERO));
  assert_eq!(density.octaves.len(), 2);
  assert_eq!(density.amplitude_bound(), Some(1.5));
}
