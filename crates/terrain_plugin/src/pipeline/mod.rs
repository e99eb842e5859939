//! Chunk generation pipeline: density sampling followed by extraction.
//!
//! See [`types`] for the stage diagram.

pub mod meshing;
pub mod presample;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use types::{ChunkMesh, ChunkRequest, PresampleOutput};

use crate::config::TerrainConfig;
use crate::density::DensityField;

/// Run both stages for a batch of chunks.
///
/// Results maintain the same order as inputs.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "pipeline::generate_batch"))]
pub fn generate_batch<D: DensityField + ?Sized>(
  requests: Vec<ChunkRequest>,
  density: &D,
  config: &TerrainConfig,
) -> Vec<ChunkMesh> {
  let sampled = {
    #[cfg(feature = "instrument")]
    let _span = tracing::info_span!("presample_stage").entered();
    presample::presample_batch(requests, density, config)
  };

  #[cfg(feature = "instrument")]
  let _span = tracing::info_span!("meshing_stage").entered();
  meshing::mesh_batch(sampled, config)
}

/// Generate a single chunk.
pub fn generate_chunk<D: DensityField + ?Sized>(
  request: ChunkRequest,
  density: &D,
  config: &TerrainConfig,
) -> ChunkMesh {
  meshing::mesh_chunk(presample::presample_chunk(request, density, config), config)
}
