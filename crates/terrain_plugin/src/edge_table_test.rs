use super::*;

fn tri_edges(cube_index: usize) -> impl Iterator<Item = usize> {
  TRI_TABLE[cube_index]
    .iter()
    .take_while(|&&e| e >= 0)
    .map(|&e| e as usize)
}

#[test]
fn test_edge_table_homogeneous() {
  assert_eq!(EDGE_TABLE[0], 0, "All above should have no edges");
  assert_eq!(EDGE_TABLE[255], 0, "All below should have no edges");
}

#[test]
fn test_edge_table_known_entries() {
  assert_eq!(EDGE_TABLE[1], 0x109);
  assert_eq!(EDGE_TABLE[2], 0x203);
  assert_eq!(EDGE_TABLE[3], 0x30a);
  assert_eq!(EDGE_TABLE[15], 0xf00);
  assert_eq!(EDGE_TABLE[0xf0], 0xf00);
}

#[test]
fn test_edge_table_single_corner() {
  for corner in 0..8 {
    let mask = 1u8 << corner;
    let edge_count = EDGE_TABLE[mask as usize].count_ones();
    assert_eq!(
      edge_count, 3,
      "Corner {} should have 3 edges, got {}",
      corner, edge_count
    );
  }
}

#[test]
fn test_edge_table_complement_symmetry() {
  for i in 0..256 {
    assert_eq!(
      EDGE_TABLE[i],
      EDGE_TABLE[255 - i],
      "Edge masks should be equal for {} and {}",
      i,
      255 - i
    );
  }
}

#[test]
fn test_tri_table_uses_exactly_crossed_edges() {
  for cube_index in 0..256 {
    let mut used = 0u16;
    for edge in tri_edges(cube_index) {
      assert!(edge < 12);
      used |= 1 << edge;
    }
    assert_eq!(
      used, EDGE_TABLE[cube_index],
      "Triangles for configuration {} must reference exactly the crossed edges",
      cube_index
    );
  }
}

#[test]
fn test_tri_table_triangle_counts() {
  for cube_index in 0..256 {
    let count = tri_edges(cube_index).count();
    assert_eq!(count % 3, 0, "Configuration {} has a partial triangle", cube_index);
    assert!(count / 3 <= crate::constants::MAX_TRIANGLES_PER_VOXEL);
    assert!(
      TRI_TABLE[cube_index][count..].iter().all(|&e| e == -1),
      "Configuration {} must be -1 padded after terminator",
      cube_index
    );
  }
}

#[test]
fn test_edge_corners_are_unit_edges() {
  for edge in &EDGE_CORNERS {
    let a = corner_position(edge[0]);
    let b = corner_position(edge[1]);
    let dist: f32 = (0..3).map(|i| (a[i] - b[i]).abs()).sum();
    assert_eq!(dist, 1.0, "Edge {:?} must join adjacent corners", edge);
  }
}

#[test]
fn test_corner_position() {
  assert_eq!(corner_position(0), [0.0, 0.0, 0.0]);
  assert_eq!(corner_position(1), [1.0, 0.0, 0.0]);
  assert_eq!(corner_position(2), [1.0, 1.0, 0.0]);
  assert_eq!(corner_position(4), [0.0, 0.0, 1.0]);
  assert_eq!(corner_position(6), [1.0, 1.0, 1.0]);
}
