//! Tests for Stage 1: Presample

use glam::Vec3;

use super::{presample_batch, presample_chunk};
use crate::chunk::ChunkCoord;
use crate::pipeline::test_utils::*;
use crate::pipeline::types::ChunkRequest;

#[test]
fn test_all_above_returns_none() {
  let config = small_config();
  let output = presample_chunk(
    ChunkRequest::new(ChunkCoord::ORIGIN, 0),
    &ConstantDensity(0.9),
    &config,
  );
  assert!(output.grid.is_none(), "Homogeneous chunk should return None");
}

#[test]
fn test_all_below_returns_none() {
  let config = small_config();
  let output = presample_chunk(
    ChunkRequest::new(ChunkCoord::ORIGIN, 0),
    &ConstantDensity(0.1),
    &config,
  );
  assert!(output.grid.is_none());
}

#[test]
fn test_surface_chunk_returns_grid() {
  let config = small_config();
  let ground = GroundDensity { height: 4.3 };
  let request = ChunkRequest::new(ChunkCoord::ORIGIN, 0);

  let output = presample_chunk(request, &ground, &config);

  assert_eq!(output.request, request);
  let grid = output.grid.expect("Ground crossing chunk should return Some");
  assert_eq!(grid.points_per_axis(), 9);
  assert_eq!(grid.spacing(), 1.25);
}

#[test]
fn test_grid_origin_follows_coord() {
  let config = small_config();
  let ground = GroundDensity { height: -15.7 };
  let output = presample_chunk(
    ChunkRequest::new(ChunkCoord::new(1, -2, 3), 0),
    &ground,
    &config,
  );

  let grid = output.grid.expect("chunk spans y in [-20, -10]");
  assert_eq!(grid.origin(), Vec3::new(10.0, -20.0, 30.0));
}

#[test]
fn test_chunk_above_ground_is_empty() {
  let config = small_config();
  let ground = GroundDensity { height: 4.3 };
  let output = presample_chunk(ChunkRequest::new(ChunkCoord::new(0, 1, 0), 0), &ground, &config);
  assert!(output.grid.is_none());
}

#[test]
fn test_batch_preserves_order() {
  let config = small_config();
  let ground = GroundDensity { height: 4.3 };
  let requests: Vec<_> = (-2..3)
    .map(|y| ChunkRequest::new(ChunkCoord::new(0, y, 0), 0))
    .collect();

  let outputs = presample_batch(requests.clone(), &ground, &config);

  assert_eq!(outputs.len(), requests.len());
  for (output, request) in outputs.iter().zip(&requests) {
    assert_eq!(output.request, *request);
  }
  let with_grid: Vec<_> = outputs.iter().filter(|o| o.grid.is_some()).collect();
  assert_eq!(with_grid.len(), 1);
  assert_eq!(with_grid[0].request.coord, ChunkCoord::ORIGIN);
}

#[test]
fn test_batch_empty() {
  let config = small_config();
  assert!(presample_batch(Vec::new(), &ConstantDensity(0.0), &config).is_empty());
}

#[test]
fn test_samples_every_point_once() {
  let config = small_config();
  let counting = CountingDensity::new(ConstantDensity(0.0));
  let _ = presample_chunk(ChunkRequest::new(ChunkCoord::ORIGIN, 0), &counting, &config);
  assert_eq!(counting.calls(), 9 * 9 * 9);
}
