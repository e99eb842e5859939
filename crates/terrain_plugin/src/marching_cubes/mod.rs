//! Marching Cubes isosurface extraction.
//!
//! Converts a [`DensityGrid`] into a triangle list at the surface level.
//!
//! # Algorithm Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  grid: DensityGrid       - (V+1)³ scalar samples                │
//! │  config: ExtractConfig   - level, smooth, invert, LOD stride    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              PHASE 1: Cube Classification (per x-slab)          │
//! │  For every s-th cube (s = lod_modifier):                        │
//! │    Load 8 samples at base + CORNER_OFFSETS * s                  │
//! │    Build 8-bit configuration index                              │
//! │    Early-out if EDGE_TABLE[index] == 0                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Edge Vertices                       │
//! │    For each crossed edge: interpolate (smooth) or midpoint      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Triangulation                       │
//! │    Emit TRI_TABLE[index] triples until the -1 terminator        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 4: Capacity                            │
//! │    Concatenate slabs in x order, apply CapacityPolicy           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Slabs are independent and run in parallel with rayon. Because slab
//! results are concatenated in order, output is identical to a sequential
//! x, y, z sweep.

mod corner_mask;
mod vertex_calc;

pub use corner_mask::build as cube_index;
pub use vertex_calc::edge_vertex;

use glam::Vec3;
use rayon::prelude::*;

use crate::constants::{CORNER_OFFSETS, MAX_TRIANGLES_PER_VOXEL};
use crate::density::DensityGrid;
use crate::edge_table::{EDGE_TABLE, TRI_TABLE};
use crate::types::{Triangle, TriangleBuffer};
use vertex_calc::CANONICAL_EDGES;

/// What to do when an extraction produces more triangles than allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
  /// Grow the output as needed.
  #[default]
  Grow,

  /// Keep at most this many triangles, dropping the rest with a warning.
  Fixed(usize),
}

impl CapacityPolicy {
  /// Worst-case bound for a chunk: every voxel emitting five triangles.
  pub fn reference(voxels_per_axis: usize) -> Self {
    CapacityPolicy::Fixed(voxels_per_axis.pow(3) * MAX_TRIANGLES_PER_VOXEL)
  }
}

/// Configuration for one extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfig {
  /// Density value the surface passes through.
  pub surface_level: f32,

  /// Interpolate vertices along edges instead of using midpoints.
  pub smooth: bool,

  /// Flip the inside/outside classification.
  pub invert: bool,

  /// Visit every n-th cube along each axis.
  pub lod_modifier: usize,

  /// Scale applied to grid coordinates to get chunk-local positions.
  pub voxel_scale: f32,

  pub capacity: CapacityPolicy,
}

impl Default for ExtractConfig {
  fn default() -> Self {
    Self {
      surface_level: 0.5,
      smooth: true,
      invert: false,
      lod_modifier: 1,
      voxel_scale: 1.0,
      capacity: CapacityPolicy::Grow,
    }
  }
}

impl ExtractConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_surface_level(mut self, level: f32) -> Self {
    self.surface_level = level;
    self
  }

  pub fn with_smooth(mut self, smooth: bool) -> Self {
    self.smooth = smooth;
    self
  }

  pub fn with_invert(mut self, invert: bool) -> Self {
    self.invert = invert;
    self
  }

  pub fn with_lod_modifier(mut self, lod_modifier: usize) -> Self {
    self.lod_modifier = lod_modifier;
    self
  }

  pub fn with_voxel_scale(mut self, scale: f32) -> Self {
    self.voxel_scale = scale;
    self
  }

  pub fn with_capacity(mut self, capacity: CapacityPolicy) -> Self {
    self.capacity = capacity;
    self
  }
}

/// Extract the isosurface of `grid` as a triangle list.
///
/// # Arguments
///
/// * `grid` - Density samples for one chunk
/// * `config` - Surface level, interpolation mode, LOD stride and capacity
///
/// # Returns
///
/// Triangles in chunk-local space, in cube sweep order.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "marching_cubes::extract"))]
pub fn extract(grid: &DensityGrid, config: &ExtractConfig) -> TriangleBuffer {
  let stride = config.lod_modifier.max(1);
  let cubes = grid.voxels_per_axis() / stride;

  let slabs: Vec<Vec<Triangle>> = (0..cubes)
    .into_par_iter()
    .map(|ix| extract_slab(grid, config, ix * stride, stride, cubes))
    .collect();

  let total: usize = slabs.iter().map(Vec::len).sum();
  let mut triangles = Vec::with_capacity(total);
  for slab in slabs {
    triangles.extend(slab);
  }

  let mut dropped = 0;
  if let CapacityPolicy::Fixed(max) = config.capacity {
    if triangles.len() > max {
      dropped = triangles.len() - max;
      triangles.truncate(max);
      tracing::warn!(
        kept = max,
        dropped,
        "triangle capacity exceeded, extraction truncated"
      );
    }
  }

  TriangleBuffer { triangles, dropped }
}

/// Process every cube whose base lies at grid x = `x`.
fn extract_slab(
  grid: &DensityGrid,
  config: &ExtractConfig,
  x: usize,
  stride: usize,
  cubes: usize,
) -> Vec<Triangle> {
  let mut out = Vec::new();

  for iy in 0..cubes {
    for iz in 0..cubes {
      process_cube(grid, config, [x, iy * stride, iz * stride], stride, &mut out);
    }
  }

  out
}

/// Classify one cube and emit its triangles.
#[inline]
fn process_cube(
  grid: &DensityGrid,
  config: &ExtractConfig,
  base: [usize; 3],
  stride: usize,
  out: &mut Vec<Triangle>,
) {
  let corner = |i: usize| {
    let [ox, oy, oz] = CORNER_OFFSETS[i];
    [base[0] + ox * stride, base[1] + oy * stride, base[2] + oz * stride]
  };

  let samples: [f32; 8] = std::array::from_fn(|i| {
    let [x, y, z] = corner(i);
    grid.get(x, y, z)
  });

  let index = corner_mask::build(&samples, config.surface_level, config.invert) as usize;
  let edge_mask = EDGE_TABLE[index];
  if edge_mask == 0 {
    return;
  }

  let mut edge_points = [Vec3::ZERO; 12];
  for (edge, &[c0, c1]) in CANONICAL_EDGES.iter().enumerate() {
    if edge_mask & (1 << edge) == 0 {
      continue;
    }
    let p0 = Vec3::from_array(corner(c0).map(|c| c as f32));
    let p1 = Vec3::from_array(corner(c1).map(|c| c as f32));
    edge_points[edge] = edge_vertex(
      p0,
      p1,
      samples[c0],
      samples[c1],
      config.surface_level,
      config.smooth,
    ) * config.voxel_scale;
  }

  for tri in TRI_TABLE[index].chunks_exact(3) {
    if tri[0] < 0 {
      break;
    }
    out.push(Triangle::new(
      edge_points[tri[0] as usize],
      edge_points[tri[1] as usize],
      edge_points[tri[2] as usize],
    ));
  }
}
