//! Stage 1: Presample
//!
//! Samples the full density grid for a chunk and detects homogeneous
//! chunks. Homogeneous chunks (no surface crossing) skip meshing entirely.

use rayon::prelude::*;
use web_time::Instant;

use super::types::{ChunkRequest, PresampleOutput};
use crate::config::TerrainConfig;
use crate::density::{DensityField, DensityGrid};

/// Presample a single chunk: sample the grid, check for a crossing.
pub fn presample_chunk<D: DensityField + ?Sized>(
  request: ChunkRequest,
  density: &D,
  config: &TerrainConfig,
) -> PresampleOutput {
  let start = Instant::now();

  let grid = DensityGrid::sample(
    density,
    request.coord.origin(config.chunk_size),
    config.voxel_spacing(),
    config.points_per_axis(),
  );

  let grid = if grid.has_surface_crossing(config.shape.surface_level) {
    Some(grid)
  } else {
    tracing::trace!(coord = ?request.coord, "homogeneous chunk, skipping extraction");
    None
  };

  PresampleOutput {
    request,
    grid,
    timing_us: start.elapsed().as_micros() as u64,
  }
}

/// Presample multiple chunks in parallel using rayon.
///
/// Results maintain the same order as inputs.
pub fn presample_batch<D: DensityField + ?Sized>(
  requests: Vec<ChunkRequest>,
  density: &D,
  config: &TerrainConfig,
) -> Vec<PresampleOutput> {
  if requests.is_empty() {
    return Vec::new();
  }

  requests
    .into_par_iter()
    .map(|request| presample_chunk(request, density, config))
    .collect()
}

#[cfg(test)]
#[path = "presample_test.rs"]
mod presample_test;
