//! Stage 2: Meshing
//!
//! Thin wrapper around `marching_cubes::extract()` that:
//! - Processes inputs in parallel via rayon
//! - Picks the extraction stride from the chunk's LOD bucket
//! - Tracks timing per chunk

use rayon::prelude::*;
use web_time::Instant;

use super::types::{ChunkMesh, PresampleOutput};
use crate::config::TerrainConfig;
use crate::marching_cubes;
use crate::types::TriangleBuffer;

/// Mesh a single presampled chunk.
pub fn mesh_chunk(input: PresampleOutput, config: &TerrainConfig) -> ChunkMesh {
  let start = Instant::now();

  let triangles = match &input.grid {
    Some(grid) => {
      let extract = config.extract_config(input.request.lod_index);
      marching_cubes::extract(grid, &extract)
    }
    None => TriangleBuffer::new(),
  };

  if triangles.is_truncated() {
    tracing::debug!(
      coord = ?input.request.coord,
      dropped = triangles.dropped,
      "chunk mesh truncated"
    );
  }

  ChunkMesh {
    request: input.request,
    triangles,
    timing_us: input.timing_us + start.elapsed().as_micros() as u64,
  }
}

/// Mesh multiple chunks in parallel using rayon.
///
/// Results maintain the same order as inputs for deterministic output.
pub fn mesh_batch(inputs: Vec<PresampleOutput>, config: &TerrainConfig) -> Vec<ChunkMesh> {
  if inputs.is_empty() {
    return Vec::new();
  }

  inputs
    .into_par_iter()
    .map(|input| mesh_chunk(input, config))
    .collect()
}

#[cfg(test)]
#[path = "meshing_test.rs"]
mod meshing_test;
