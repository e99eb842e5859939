//! terrain_plugin - Framework/engine independent procedural terrain
//!
//! This crate streams chunks of Marching Cubes terrain around a moving
//! viewpoint. A scalar density field is sampled on a regular lattice per
//! chunk and the surface at a configurable level is extracted as triangles.
//!
//! # Features
//!
//! - **Marching Cubes**: Table-driven isosurface extraction with smooth or
//!   midpoint vertex placement and watertight shared edges
//! - **Density Fields**: Octave-summed Perlin noise or a wrapped 2D noise
//!   texture, sampled symmetrically into 3D
//! - **LOD Buckets**: Distance-based extraction stride with per-bucket
//!   materials
//! - **Chunk Pooling**: Recycle-before-create reuse of chunk storage
//! - **Frustum Culling**: Plane/AABB rejection of candidate chunks
//!
//! # Example
//!
//! ```ignore
//! use terrain_plugin::{AlwaysVisible, ChunkStreamer, DensitySettings, TerrainConfig};
//!
//! let config = TerrainConfig::default().with_view_distance(96.0);
//! let mut streamer = ChunkStreamer::new(config, DensitySettings::default().build())?;
//!
//! let stats = streamer.update(camera_position, &AlwaysVisible)?;
//! for chunk in streamer.active_chunks() {
//!     upload(chunk.coord, &chunk.mesh);
//! }
//! ```

pub mod constants;
pub mod edge_table;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{
  coord_to_index, index_to_coord, points_per_axis, CORNER_OFFSETS, DEFAULT_VOXELS_PER_AXIS,
  MAX_TRIANGLES_PER_VOXEL,
};
pub use edge_table::{EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};
pub use error::{ConfigError, PoolError, TerrainError};
pub use types::{MaterialId, MeshOutput, MinMaxAABB, Triangle, TriangleBuffer, Vertex};

// Configuration
pub mod config;
pub use config::{LodProfile, ShapeSettings, TerrainConfig, WorldMode};

// Density fields and lattice sampling
pub mod density;
pub use density::{
  DensityField, DensityGrid, DensityOctave, DensitySettings, Noise2D, NoiseDensity, NoiseTexture,
  PerlinNoise2D, TextureDensity,
};

// Marching Cubes extraction
pub mod marching_cubes;
pub use marching_cubes::{CapacityPolicy, ExtractConfig};

// Chunk identity and pooled storage
pub mod chunk;
pub mod pool;
pub use chunk::{Chunk, ChunkCoord, ColliderHandle};
pub use pool::{ChunkHandle, ChunkResourcePool};

// Visibility culling
pub mod frustum;
pub use frustum::{AlwaysVisible, Frustum, Plane, Visibility};

// Parallel chunk generation
pub mod pipeline;
pub use pipeline::{ChunkMesh, ChunkRequest};

// Streaming around a viewpoint
pub mod streaming;
pub use streaming::{ChunkStreamer, UpdateStats};

// Engine-agnostic statistics
pub mod metrics;
