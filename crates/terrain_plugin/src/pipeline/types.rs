//! Pipeline I/O types for chunk generation.
//!
//! ```text
//!                        CHUNK GENERATION PIPELINE
//!                        =========================
//!
//!   Vec<ChunkRequest> { coord, lod_index }
//!          │
//!          ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ STAGE 1: PRESAMPLE                                                  │
//! │ Input:  Vec<ChunkRequest> + DensityField + TerrainConfig            │
//! │ Output: Vec<PresampleOutput>                                        │
//! │                                                                     │
//! │ Sample (V+1)³ density grid at the chunk origin.                     │
//! │ No sample on the other side of the surface level → grid = None.     │
//! └──────────────────────────────┬──────────────────────────────────────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ STAGE 2: MESHING                                                    │
//! │ Input:  Vec<PresampleOutput>                                        │
//! │ Output: Vec<ChunkMesh>                                              │
//! │                                                                     │
//! │ marching_cubes::extract() with the LOD bucket's stride.             │
//! │ Homogeneous chunks produce an empty triangle buffer.                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both stages run in parallel across chunks with rayon. Grids are dropped
//! at the end of the meshing stage.

use crate::chunk::ChunkCoord;
use crate::density::DensityGrid;
use crate::types::TriangleBuffer;

/// A chunk to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRequest {
  pub coord: ChunkCoord,
  pub lod_index: usize,
}

impl ChunkRequest {
  pub fn new(coord: ChunkCoord, lod_index: usize) -> Self {
    Self { coord, lod_index }
  }
}

/// Output from presampling a single chunk.
#[derive(Debug)]
pub struct PresampleOutput {
  pub request: ChunkRequest,

  /// Sampled grid, or `None` if no surface can pass through the chunk.
  pub grid: Option<DensityGrid>,

  /// Sampling time in microseconds.
  pub timing_us: u64,
}

/// Extracted triangles for one chunk.
#[derive(Debug)]
pub struct ChunkMesh {
  pub request: ChunkRequest,
  pub triangles: TriangleBuffer,

  /// Sampling plus extraction time in microseconds.
  pub timing_us: u64,
}
