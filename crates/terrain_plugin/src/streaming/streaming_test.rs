//! Tests for the streaming pass.

use std::collections::HashSet;

use glam::{UVec3, Vec3};

use super::*;
use crate::chunk::ColliderHandle;
use crate::config::LodProfile;
use crate::density::DensitySettings;
use crate::frustum::AlwaysVisible;
use crate::pipeline::test_utils::*;

fn ground() -> GroundDensity {
  GroundDensity { height: 4.3 }
}

fn streamer(config: TerrainConfig) -> ChunkStreamer<GroundDensity> {
  match ChunkStreamer::new(config, ground()) {
    Ok(s) => s,
    Err(e) => panic!("config rejected: {e}"),
  }
}

/// One LOD bucket covering everything, view distance 50.
fn wide_config() -> TerrainConfig {
  small_config()
    .with_view_distance(50.0)
    .with_lod_profiles(vec![LodProfile::new(1000.0, 1)])
}

fn assert_within_view(s: &ChunkStreamer<GroundDensity>, viewpoint: Vec3, view: f32) {
  let size = s.config().chunk_size;
  for chunk in s.active_chunks() {
    let sqr = chunk.coord.center(size).distance_squared(viewpoint);
    assert!(sqr <= view * view, "{:?} outside view distance", chunk.coord);
  }
}

fn coords(s: &ChunkStreamer<GroundDensity>) -> HashSet<ChunkCoord> {
  s.active_chunks().map(|c| c.coord).collect()
}

// =============================================================================
// Streaming passes
// =============================================================================

#[test]
fn test_first_pass_fills_view_sphere() {
  let mut s = streamer(small_config());
  let stats = s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  // Centres (x + 0.5) * 10 within 25 of the origin.
  assert_eq!(stats.created, 56);
  assert_eq!(stats.reused, 0);
  assert_eq!(stats.recycled, 0);
  assert_eq!(stats.active, 56);
  assert_eq!(s.active_count(), 56);
  assert_eq!(stats.anchor, ChunkCoord::ORIGIN);
  assert_within_view(&s, Vec3::ZERO, 25.0);
}

#[test]
fn test_active_coords_unique_and_keyed() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  s.update(Vec3::new(7.0, -3.0, 12.0), &AlwaysVisible).unwrap();

  let unique = coords(&s);
  assert_eq!(unique.len(), s.active_count());
  for coord in unique {
    assert_eq!(s.chunk(coord).map(|c| c.coord), Some(coord));
    assert!(s.is_active(coord));
  }
}

#[test]
fn test_stationary_update_is_noop() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  let before = coords(&s);

  let stats = s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  assert_eq!(stats.built(), 0);
  assert_eq!(stats.recycled, 0);
  assert_eq!(coords(&s), before);
}

#[test]
fn test_teleport_reuses_every_chunk() {
  let mut s = streamer(wide_config());
  let first = s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  let allocated = s.pool().allocations();
  assert_eq!(allocated, first.created as u64);

  let far = Vec3::new(1000.0, 0.0, 0.0);
  let stats = s.update(far, &AlwaysVisible).unwrap();

  assert_eq!(stats.anchor, ChunkCoord::new(100, 0, 0));
  assert_eq!(stats.recycled, first.active);
  assert_eq!(stats.reused, first.active);
  assert_eq!(stats.created, 0);
  assert_eq!(stats.destroyed, 0);
  assert_eq!(s.pool().allocations(), allocated);
  assert_eq!(s.active_count(), first.active);
  assert_within_view(&s, far, 50.0);
  assert!(coords(&s).iter().all(|c| c.0.x >= 95));
}

#[test]
fn test_recycle_queue_empty_after_pass() {
  let mut s = streamer(small_config());
  let path = [
    Vec3::ZERO,
    Vec3::new(10.0, 0.0, 0.0),
    Vec3::new(40.0, 5.0, -20.0),
    Vec3::new(-300.0, 0.0, 0.0),
  ];

  for viewpoint in path {
    let stats = s.update(viewpoint, &AlwaysVisible).unwrap();
    assert_eq!(s.pool().free_count(), 0);
    assert_eq!(s.pool().live_count(), s.active_count());
    assert_eq!(stats.recycled, stats.reused + stats.destroyed);
    assert_within_view(&s, viewpoint, 25.0);
  }
}

#[test]
fn test_lattice_step_swaps_leaving_for_entering() {
  let mut s = streamer(wide_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  let stats = s.update(Vec3::new(10.0, 0.0, 0.0), &AlwaysVisible).unwrap();

  assert!(stats.recycled > 0);
  assert_eq!(stats.reused, stats.recycled);
  assert_eq!(stats.created, 0);
  assert_eq!(stats.destroyed, 0);
}

#[test]
fn test_culled_candidates_not_activated() {
  let mut s = streamer(small_config());
  let positive_x = |center: Vec3, _size: f32| center.x > 0.0;

  let stats = s.update(Vec3::ZERO, &positive_x).unwrap();

  assert_eq!(stats.culled, 28);
  assert_eq!(stats.active, 28);
  assert!(s.active_chunks().all(|c| c.coord.center(10.0).x > 0.0));
}

#[test]
fn test_culled_chunks_appear_when_visible() {
  let mut s = streamer(small_config());
  let positive_x = |center: Vec3, _size: f32| center.x > 0.0;
  s.update(Vec3::ZERO, &positive_x).unwrap();

  let stats = s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  assert_eq!(stats.created, 28);
  assert_eq!(stats.culled, 0);
  assert_eq!(s.active_count(), 56);
}

#[test]
fn test_lod_bucket_change_rebuilds_chunk() {
  let mut s = streamer(small_config());
  let coord = ChunkCoord::new(-1, 0, 0);

  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  let near = s.chunk(coord).unwrap();
  assert_eq!(near.lod_index, 0);
  assert_eq!(near.material, 1);

  // Centre (-5, 5, 5) is now sqrt(339) away: past the 15 unit bucket.
  let stats = s.update(Vec3::new(12.0, 0.0, 0.0), &AlwaysVisible).unwrap();
  let far = s.chunk(coord).unwrap();

  assert_eq!(far.lod_index, 1);
  assert_eq!(far.material, 2);
  assert!(stats.recycled > 0);
  assert!(stats.reused > 0);
}

#[test]
fn test_lod_index_matches_distance() {
  let mut s = streamer(small_config());
  let viewpoint = Vec3::new(3.0, 1.0, -4.0);
  s.update(viewpoint, &AlwaysVisible).unwrap();

  for chunk in s.active_chunks() {
    let sqr = chunk.coord.center(10.0).distance_squared(viewpoint);
    assert_eq!(chunk.lod_index, s.config().lod_index_for(sqr));
  }
}

#[test]
fn test_surface_chunks_have_geometry() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  let surface = s.chunk(ChunkCoord::ORIGIN).unwrap();
  assert!(!surface.mesh.is_empty());
  assert_eq!(surface.mesh_revision, 1);

  let sky = s.chunk(ChunkCoord::new(0, 1, 0)).unwrap();
  assert!(sky.mesh.is_empty());
}

// =============================================================================
// Fixed mode
// =============================================================================

#[test]
fn test_fixed_mode_builds_lattice_once() {
  let config = small_config().with_fixed_dimensions(UVec3::new(2, 1, 3));
  let mut s = streamer(config);

  let stats = s.update(Vec3::new(500.0, 0.0, 0.0), &AlwaysVisible).unwrap();
  assert_eq!(stats.created, 6);
  assert_eq!(s.active_count(), 6);
  for chunk in s.active_chunks() {
    assert_eq!(chunk.lod_index, 0);
    assert_eq!(chunk.material, 1);
    assert!(chunk.coord.0.x < 2 && chunk.coord.0.y == 0 && chunk.coord.0.z < 3);
    assert!(chunk.coord.0.cmpge(glam::IVec3::ZERO).all());
  }

  let again = s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  assert_eq!(again.built(), 0);
  assert_eq!(again.active, 6);
}

#[test]
fn test_regenerate_applies_new_shape() {
  let config = small_config().with_fixed_dimensions(UVec3::new(2, 1, 2));
  let mut s = streamer(config);
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  s.set_shape(ShapeSettings {
    smooth: false,
    ..ShapeSettings::default()
  });
  let stats = s.regenerate().unwrap();

  assert_eq!(stats.triangles, 4 * 128);
  assert_eq!(s.active_count(), 4);
  for chunk in s.active_chunks() {
    assert_eq!(chunk.mesh_revision, 2);
    for v in &chunk.mesh.vertices {
      // Midpoint of the crossing edge: 3.5 samples * 1.25 spacing.
      assert!((v.position[1] - 4.375).abs() < 1e-4);
    }
  }
}

// =============================================================================
// Toggles and lifecycle
// =============================================================================

#[test]
fn test_paused_streaming_keeps_active_set() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  let before = coords(&s);

  s.set_streaming_enabled(false);
  assert!(!s.is_streaming_enabled());
  let stats = s.update(Vec3::new(1000.0, 0.0, 0.0), &AlwaysVisible).unwrap();
  assert_eq!(stats.built(), 0);
  assert_eq!(stats.recycled, 0);
  assert_eq!(coords(&s), before);

  s.set_streaming_enabled(true);
  let stats = s.update(Vec3::new(1000.0, 0.0, 0.0), &AlwaysVisible).unwrap();
  assert_eq!(stats.recycled, before.len());
}

#[test]
fn test_collisions_follow_mesh_revision() {
  let mut s = streamer(small_config().with_collisions(true));
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  for chunk in s.active_chunks() {
    assert_eq!(
      chunk.collider,
      Some(ColliderHandle {
        revision: chunk.mesh_revision
      })
    );
  }
}

#[test]
fn test_no_collider_without_collisions() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  assert!(s.active_chunks().all(|c| c.collider.is_none()));
}

#[test]
fn test_shutdown_destroys_everything() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();

  assert_eq!(s.shutdown(), 56);
  assert_eq!(s.active_count(), 0);
  assert_eq!(s.pool().live_count(), 0);
  assert_eq!(s.pool().destructions(), 56);
}

#[test]
fn test_invalid_config_rejected() {
  let result = ChunkStreamer::new(small_config().with_voxels_per_axis(0), ground());
  assert!(matches!(result, Err(ConfigError::ZeroVoxels)));

  let result = ChunkStreamer::new(
    small_config().with_lod_profiles(vec![LodProfile::new(10.0, 3)]),
    ground(),
  );
  assert!(matches!(result, Err(ConfigError::IndivisibleLod { .. })));
}

#[test]
fn test_boxed_density_field() {
  let density = DensitySettings::default().build();
  let mut s = match ChunkStreamer::new(small_config(), density) {
    Ok(s) => s,
    Err(e) => panic!("config rejected: {e}"),
  };

  let stats = s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  assert_eq!(stats.active, 56);
}

#[test]
fn test_duplicate_of_active_chunk_rejects_batch() {
  let mut s = streamer(small_config());
  s.update(Vec3::ZERO, &AlwaysVisible).unwrap();
  let before = coords(&s);
  let allocated = s.pool().allocations();

  let fresh = ChunkCoord::new(40, 0, 0);
  let requests = vec![
    ChunkRequest::new(fresh, 1),
    ChunkRequest::new(ChunkCoord::ORIGIN, 0),
  ];
  let mut stats = UpdateStats::default();
  let result = s.build(requests, &mut stats);

  assert!(matches!(result, Err(TerrainError::DuplicateChunk(c)) if c == ChunkCoord::ORIGIN));
  assert!(!s.is_active(fresh));
  assert_eq!(coords(&s), before);
  assert_eq!(s.pool().allocations(), allocated);
  assert_eq!(stats.built(), 0);
}

#[test]
fn test_repeated_request_rejects_batch() {
  let mut s = streamer(small_config());
  let coord = ChunkCoord::new(3, 0, 3);
  let requests = vec![ChunkRequest::new(coord, 0), ChunkRequest::new(coord, 0)];
  let mut stats = UpdateStats::default();

  let result = s.build(requests, &mut stats);

  assert!(matches!(result, Err(TerrainError::DuplicateChunk(c)) if c == coord));
  assert_eq!(s.active_count(), 0);
  assert_eq!(s.pool().live_count(), 0);
}
