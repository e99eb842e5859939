//! Edge vertex placement.

use glam::Vec3;

use crate::constants::CORNER_OFFSETS;
use crate::edge_table::EDGE_CORNERS;

/// Edge endpoints ordered lower corner first.
///
/// Interpolating from the lower corner makes neighbouring cubes produce
/// bit-identical vertices for a shared edge.
pub const CANONICAL_EDGES: [[usize; 2]; 12] = canonical_edges();

const fn corner_sum(corner: usize) -> usize {
  let [x, y, z] = CORNER_OFFSETS[corner];
  x + y + z
}

const fn canonical_edges() -> [[usize; 2]; 12] {
  let mut edges = [[0usize; 2]; 12];
  let mut i = 0;
  while i < 12 {
    let a = EDGE_CORNERS[i][0] as usize;
    let b = EDGE_CORNERS[i][1] as usize;
    edges[i] = if corner_sum(a) <= corner_sum(b) { [a, b] } else { [b, a] };
    i += 1;
  }
  edges
}

/// Smallest interpolation parameter a smooth vertex may take.
///
/// A sample exactly at the surface level would otherwise put the vertex on
/// the grid corner, where every crossed edge of that corner meets and the
/// triangles between them collapse.
pub const EDGE_T_MARGIN: f32 = 1.0e-3;

/// Position of the surface crossing on the edge `p0 → p1`.
///
/// Smooth mode interpolates linearly on the samples, kept strictly inside
/// the edge by [`EDGE_T_MARGIN`]. A near-zero sample difference falls back
/// to the midpoint, as does non-smooth mode.
#[inline]
pub fn edge_vertex(p0: Vec3, p1: Vec3, v0: f32, v1: f32, surface_level: f32, smooth: bool) -> Vec3 {
  if !smooth {
    return (p0 + p1) * 0.5;
  }

  let delta = v1 - v0;
  if delta.abs() < f32::EPSILON {
    return (p0 + p1) * 0.5;
  }

  let t = ((surface_level - v0) / delta).clamp(EDGE_T_MARGIN, 1.0 - EDGE_T_MARGIN);
  p0 + (p1 - p0) * t
}

#[cfg(test)]
#[path = "vertex_calc_test.rs"]
mod vertex_calc_test;
