//! Error types for configuration, pooling, and streaming.

use thiserror::Error;

use crate::chunk::ChunkCoord;
use crate::pool::ChunkHandle;

/// Invalid terrain configuration. Fatal at setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
  #[error("voxels per axis must be at least 1")]
  ZeroVoxels,

  #[error("chunk size must be positive and finite, got {0}")]
  InvalidChunkSize(f32),

  #[error("view distance must be positive and finite, got {0}")]
  InvalidViewDistance(f32),

  #[error("at least one LOD profile is required")]
  EmptyLodProfiles,

  #[error("LOD profile {profile}: modifier {lod_modifier} does not evenly divide {voxels_per_axis} voxels per axis")]
  IndivisibleLod {
    profile: usize,
    lod_modifier: usize,
    voxels_per_axis: usize,
  },

  #[error("LOD profile {0} must have a larger max distance than the profile before it")]
  UnorderedLodProfiles(usize),

  #[error("fixed triangle capacity must be at least 1")]
  ZeroCapacity,

  #[error("texture of {width}x{height} needs {expected} texels, got {actual}")]
  TextureSize {
    width: usize,
    height: usize,
    expected: usize,
    actual: usize,
  },
}

/// Misuse of a [`ChunkHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
  #[error("{0:?} does not belong to this pool or was destroyed")]
  UnknownHandle(ChunkHandle),

  #[error("{0:?} is not active")]
  NotActive(ChunkHandle),
}

/// Errors surfaced by [`ChunkStreamer`](crate::streaming::ChunkStreamer).
#[derive(Debug, Error)]
pub enum TerrainError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Pool(#[from] PoolError),

  #[error("chunk {0:?} is already active")]
  DuplicateChunk(ChunkCoord),
}
