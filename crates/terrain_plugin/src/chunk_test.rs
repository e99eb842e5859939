use super::*;

#[test]
fn test_nearest_rounds_per_axis() {
  assert_eq!(ChunkCoord::nearest(Vec3::ZERO, 10.0), ChunkCoord::ORIGIN);
  assert_eq!(
    ChunkCoord::nearest(Vec3::new(14.9, -15.1, 4.0), 10.0),
    ChunkCoord::new(1, -2, 0)
  );
  assert_eq!(
    ChunkCoord::nearest(Vec3::new(1000.0, 0.0, 0.0), 32.0),
    ChunkCoord::new(31, 0, 0)
  );
}

#[test]
fn test_origin_and_center() {
  let coord = ChunkCoord::new(2, -1, 0);
  assert_eq!(coord.origin(8.0), Vec3::new(16.0, -8.0, 0.0));
  assert_eq!(coord.center(8.0), Vec3::new(20.0, -4.0, 4.0));
}

#[test]
fn test_offset() {
  let coord = ChunkCoord::new(1, 1, 1).offset(IVec3::new(-1, 2, 0));
  assert_eq!(coord, ChunkCoord::new(0, 3, 1));
  assert_eq!(ChunkCoord::from(IVec3::ONE), ChunkCoord::new(1, 1, 1));
}

#[test]
fn test_write_mesh_bumps_revision_and_collider() {
  let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
  let mut chunk = Chunk::default();

  chunk.write_mesh(&[tri], 3, true);
  assert_eq!(chunk.mesh.triangle_count(), 1);
  assert_eq!(chunk.material, 3);
  assert_eq!(chunk.mesh_revision, 1);
  assert_eq!(chunk.collider, Some(ColliderHandle { revision: 1 }));

  chunk.write_mesh(&[tri, tri], 3, true);
  assert_eq!(chunk.mesh.triangle_count(), 2);
  assert_eq!(chunk.collider, Some(ColliderHandle { revision: 2 }));

  chunk.write_mesh(&[], 0, false);
  assert!(chunk.mesh.is_empty());
  assert_eq!(chunk.collider, None);
}

#[test]
fn test_reset_keeps_capacity() {
  let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
  let mut chunk = Chunk::default();
  chunk.write_mesh(&vec![tri; 32], 0, true);
  chunk.active = true;
  let capacity = chunk.mesh.vertices.capacity();

  chunk.reset(ChunkCoord::new(5, 0, 0), 1);

  assert_eq!(chunk.coord, ChunkCoord::new(5, 0, 0));
  assert_eq!(chunk.lod_index, 1);
  assert!(chunk.mesh.is_empty());
  assert!(chunk.collider.is_none());
  assert!(!chunk.active);
  assert_eq!(chunk.mesh.vertices.capacity(), capacity);
}
