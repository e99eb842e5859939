//! Grid layout constants for density sampling and cube iteration.
//!
//! A chunk with `V` voxels per axis is sampled at `V + 1` points per axis so
//! that every cube has all eight corners inside the grid.
//!
//! # Density Grid Layout
//!
//! ```text
//!  point index:  0     1     2    ...   V-1    V
//!                │     │     │           │     │
//!                └─cube 0─┘  └── ... ──┘ └cube V-1┘
//!
//!  With lod_modifier = s, only cubes whose base is a multiple of s are
//!  visited, and each visited cube spans s grid steps:
//!
//!  s = 2:        0───────────2───────────4  ...
//!                └─ cube 0 ──┘└─ cube 2 ─┘
//! ```
//!
//! # Memory Layout
//!
//! ```text
//! Grid memory layout (row-major, Z innermost):
//!
//! Content: [0,0,0][0,0,1]...[0,0,V][0,1,0]...[0,V,V][1,0,0]...
//!          └────── Z ──────┘└────── Z ──────┘
//!
//! index = (x * P + y) * P + z      where P = V + 1
//! ```
//!
//! X-major slabs are contiguous, which lets sampling split the grid into
//! `P` independent slices for rayon.

/// Upper bound on triangles a single marching cube can emit.
pub const MAX_TRIANGLES_PER_VOXEL: usize = 5;

/// Default voxels per chunk axis.
pub const DEFAULT_VOXELS_PER_AXIS: usize = 32;

/// Number of density samples per axis for a given voxel resolution.
#[inline(always)]
pub const fn points_per_axis(voxels_per_axis: usize) -> usize {
  voxels_per_axis + 1
}

/// Convert 3D grid coordinates to a linear index.
///
/// Layout: X is major axis (stride P²), Y is middle (stride P), Z is minor
/// (stride 1).
#[inline(always)]
pub const fn coord_to_index(x: usize, y: usize, z: usize, points: usize) -> usize {
  (x * points + y) * points + z
}

/// Convert a linear index back to 3D grid coordinates.
#[inline(always)]
pub const fn index_to_coord(idx: usize, points: usize) -> (usize, usize, usize) {
  let z = idx % points;
  let y = (idx / points) % points;
  let x = idx / (points * points);
  (x, y, z)
}

/// Unit offsets of the 8 cube corners relative to the cube base.
///
/// Corner numbering follows the classic marching cubes tables:
/// - 0 = (0,0,0)
/// - 1 = (1,0,0)
/// - 2 = (1,1,0)
/// - 3 = (0,1,0)
/// - 4 = (0,0,1)
/// - 5 = (1,0,1)
/// - 6 = (1,1,1)
/// - 7 = (0,1,1)
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
  [0, 0, 0],
  [1, 0, 0],
  [1, 1, 0],
  [0, 1, 0],
  [0, 0, 1],
  [1, 0, 1],
  [1, 1, 1],
  [0, 1, 1],
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
