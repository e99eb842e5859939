//! ChunkStreamer - keeps the active chunk set around a moving viewpoint.
//!
//! # Update Pass
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. ANCHOR     viewpoint snapped to nearest chunk-lattice coordinate  │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │ 2. RETIRE     active chunk out of range OR LOD bucket changed        │
//! │               → recycle handle, forget coordinate                    │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │ 3. SCAN       anchor ± r on every axis, r = ceil(view / chunk_size)  │
//! │               keep: not active, centre in range, box visible         │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │ 4. BUILD      density + extraction for all candidates (rayon)        │
//! │               acquire handle (recycled first), write mesh            │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │ 5. RELEASE    destroy recycled handles nobody reused                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Chunk lifecycle: `Inactive → Active → {Retained | Recycled} → Inactive`.
//!
//! In [`WorldMode::Fixed`] the first update builds a static lattice at
//! LOD 0 and later updates leave it alone.

use std::collections::{HashMap, HashSet};

use glam::{IVec3, Vec3};
use web_time::Instant;

use crate::chunk::{Chunk, ChunkCoord};
use crate::config::{ShapeSettings, TerrainConfig, WorldMode};
use crate::density::DensityField;
use crate::error::{ConfigError, PoolError, TerrainError};
use crate::frustum::Visibility;
#[cfg(feature = "metrics")]
use crate::metrics::StreamingMetrics;
use crate::pipeline::{self, ChunkMesh, ChunkRequest};
use crate::pool::{ChunkHandle, ChunkResourcePool};

/// What one pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
  pub anchor: ChunkCoord,
  /// Active chunks retired in step 2.
  pub recycled: usize,
  /// Chunks built from fresh allocations.
  pub created: usize,
  /// Chunks built on recycled storage.
  pub reused: usize,
  /// Recycled chunks destroyed at the end of the pass.
  pub destroyed: usize,
  /// In-range candidates rejected by the visibility test.
  pub culled: usize,
  /// Active chunks after the pass.
  pub active: usize,
  /// Triangles written this pass.
  pub triangles: usize,
  pub elapsed_us: u64,
}

impl UpdateStats {
  /// Chunks that received a new mesh this pass.
  pub fn built(&self) -> usize {
    self.created + self.reused
  }
}

/// Streams terrain chunks around a viewpoint.
///
/// Type parameter `D` allows compile-time density specialization for hot
/// paths. Engine bridges may use `Box<dyn DensityField>` instead.
pub struct ChunkStreamer<D: DensityField> {
  config: TerrainConfig,
  density: D,
  pool: ChunkResourcePool,
  active: HashMap<ChunkCoord, ChunkHandle>,
  streaming_enabled: bool,
  fixed_built: bool,
  #[cfg(feature = "metrics")]
  metrics: StreamingMetrics,
}

impl<D: DensityField> ChunkStreamer<D> {
  /// Create a streamer. Fails if the configuration is invalid.
  pub fn new(config: TerrainConfig, density: D) -> Result<Self, ConfigError> {
    config.validate()?;

    Ok(Self {
      config,
      density,
      pool: ChunkResourcePool::new(),
      active: HashMap::new(),
      streaming_enabled: true,
      fixed_built: false,
      #[cfg(feature = "metrics")]
      metrics: StreamingMetrics::default(),
    })
  }

  pub fn config(&self) -> &TerrainConfig {
    &self.config
  }

  pub fn density(&self) -> &D {
    &self.density
  }

  pub fn pool(&self) -> &ChunkResourcePool {
    &self.pool
  }

  #[cfg(feature = "metrics")]
  pub fn metrics(&self) -> &StreamingMetrics {
    &self.metrics
  }

  /// Number of active chunks.
  pub fn active_count(&self) -> usize {
    self.active.len()
  }

  pub fn is_active(&self, coord: ChunkCoord) -> bool {
    self.active.contains_key(&coord)
  }

  /// Active chunk at a coordinate.
  pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
    self.active.get(&coord).and_then(|&h| self.pool.get(h))
  }

  /// All active chunks, in no particular order.
  pub fn active_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
    self.active.values().filter_map(|&h| self.pool.get(h))
  }

  /// Pause or resume streaming. While paused, updates leave the active set
  /// untouched.
  pub fn set_streaming_enabled(&mut self, enabled: bool) {
    self.streaming_enabled = enabled;
  }

  pub fn is_streaming_enabled(&self) -> bool {
    self.streaming_enabled
  }

  /// Change surface parameters. Existing meshes keep their old shape until
  /// [`regenerate`](Self::regenerate) or until they are rebuilt by streaming.
  pub fn set_shape(&mut self, shape: ShapeSettings) {
    self.config.shape = shape;
  }

  /// Run one pass for the current viewpoint.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "streaming::update"))]
  pub fn update<V: Visibility + ?Sized>(
    &mut self,
    viewpoint: Vec3,
    visibility: &V,
  ) -> Result<UpdateStats, TerrainError> {
    match self.config.mode {
      WorldMode::Fixed { .. } if self.fixed_built => Ok(self.idle_stats(viewpoint)),
      WorldMode::Fixed { dimensions } => {
        let requests = (0..dimensions.x as i32)
          .flat_map(|x| (0..dimensions.y as i32).map(move |y| (x, y)))
          .flat_map(|(x, y)| (0..dimensions.z as i32).map(move |z| ChunkCoord::new(x, y, z)))
          .map(|coord| ChunkRequest::new(coord, 0))
          .collect();

        let start = Instant::now();
        let mut stats = UpdateStats::default();
        self.build(requests, &mut stats)?;
        self.fixed_built = true;
        self.finish(stats, start, "fixed lattice built")
      }
      WorldMode::Streaming { .. } if !self.streaming_enabled => Ok(self.idle_stats(viewpoint)),
      WorldMode::Streaming { view_distance } => self.stream(viewpoint, view_distance, visibility),
    }
  }

  /// Rebuild every active chunk in place with the current shape settings.
  ///
  /// Coordinates and LOD buckets are kept.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "streaming::regenerate"))]
  pub fn regenerate(&mut self) -> Result<UpdateStats, TerrainError> {
    let start = Instant::now();
    let mut stats = UpdateStats::default();

    let requests = self
      .active
      .iter()
      .map(|(&coord, &handle)| {
        let chunk = self.pool.get(handle).ok_or(PoolError::UnknownHandle(handle))?;
        Ok(ChunkRequest::new(coord, chunk.lod_index))
      })
      .collect::<Result<Vec<_>, PoolError>>()?;

    for mesh in pipeline::generate_batch(requests, &self.density, &self.config) {
      let Some(&handle) = self.active.get(&mesh.request.coord) else {
        continue;
      };
      self.write(handle, &mesh)?;
      stats.triangles += mesh.triangles.len();
    }

    self.finish(stats, start, "chunks regenerated")
  }

  /// Destroy every chunk. Returns the number destroyed.
  pub fn shutdown(&mut self) -> usize {
    self.active.clear();
    self.fixed_built = false;
    let destroyed = self.pool.destroy_all();
    if destroyed > 0 {
      tracing::info!(destroyed, "terrain chunks released");
    }
    destroyed
  }

  // ===========================================================================
  // Pass steps
  // ===========================================================================

  fn stream<V: Visibility + ?Sized>(
    &mut self,
    viewpoint: Vec3,
    view_distance: f32,
    visibility: &V,
  ) -> Result<UpdateStats, TerrainError> {
    let start = Instant::now();
    let size = self.config.chunk_size;
    let sqr_view = view_distance * view_distance;

    let mut stats = UpdateStats {
      anchor: ChunkCoord::nearest(viewpoint, size),
      ..UpdateStats::default()
    };

    // Step 2: retire chunks out of range or in the wrong bucket.
    let mut retired = Vec::new();
    for (&coord, &handle) in &self.active {
      let chunk = self.pool.get(handle).ok_or(PoolError::UnknownHandle(handle))?;
      let sqr = coord.center(size).distance_squared(viewpoint);
      if sqr > sqr_view || self.config.lod_index_for(sqr) != chunk.lod_index {
        retired.push(coord);
      }
    }
    for coord in retired {
      if let Some(handle) = self.active.remove(&coord) {
        self.pool.recycle(handle)?;
        stats.recycled += 1;
      }
    }

    // Step 3: scan the neighbourhood of the anchor.
    let radius = (view_distance / size).ceil() as i32;
    let mut requests = Vec::new();
    for x in -radius..=radius {
      for y in -radius..=radius {
        for z in -radius..=radius {
          let coord = stats.anchor.offset(IVec3::new(x, y, z));
          if self.active.contains_key(&coord) {
            continue;
          }

          let center = coord.center(size);
          let sqr = center.distance_squared(viewpoint);
          if sqr > sqr_view {
            continue;
          }
          if !visibility.box_visible(center, size) {
            stats.culled += 1;
            continue;
          }

          requests.push(ChunkRequest::new(coord, self.config.lod_index_for(sqr)));
        }
      }
    }

    // Step 4: generate and place.
    if let Err(err) = self.build(requests, &mut stats) {
      self.pool.destroy_recycled();
      return Err(err);
    }

    // Step 5: nothing may stay queued past the pass.
    stats.destroyed = self.pool.destroy_recycled();

    self.finish(stats, start, "streaming pass")
  }

  /// Generate meshes for new chunks and place them on pooled storage.
  ///
  /// A request for an active coordinate, or two requests for the same one,
  /// rejects the whole batch before anything is generated.
  fn build(&mut self, requests: Vec<ChunkRequest>, stats: &mut UpdateStats) -> Result<(), TerrainError> {
    if requests.is_empty() {
      return Ok(());
    }

    let mut seen = HashSet::with_capacity(requests.len());
    for request in &requests {
      if self.active.contains_key(&request.coord) || !seen.insert(request.coord) {
        return Err(TerrainError::DuplicateChunk(request.coord));
      }
    }

    for mesh in pipeline::generate_batch(requests, &self.density, &self.config) {
      let coord = mesh.request.coord;
      let (handle, reused) = self.pool.acquire();
      if reused {
        stats.reused += 1;
      } else {
        stats.created += 1;
      }

      self
        .pool
        .get_mut(handle)
        .ok_or(PoolError::UnknownHandle(handle))?
        .reset(coord, mesh.request.lod_index);
      self.write(handle, &mesh)?;
      self.active.insert(coord, handle);
      stats.triangles += mesh.triangles.len();
    }

    Ok(())
  }

  /// Write a generated mesh into the chunk behind `handle` and mark it
  /// active.
  fn write(&mut self, handle: ChunkHandle, mesh: &ChunkMesh) -> Result<(), PoolError> {
    let material = self
      .config
      .lod_profiles
      .get(mesh.request.lod_index)
      .map_or(0, |p| p.material);
    let use_collisions = self.config.use_collisions;

    let chunk = self
      .pool
      .get_mut(handle)
      .ok_or(PoolError::UnknownHandle(handle))?;
    chunk.write_mesh(&mesh.triangles.triangles, material, use_collisions);
    chunk.active = true;

    #[cfg(feature = "metrics")]
    self.metrics.record_chunk(
      mesh.request.lod_index,
      mesh.triangles.len(),
      mesh.timing_us,
    );

    Ok(())
  }

  fn idle_stats(&self, viewpoint: Vec3) -> UpdateStats {
    UpdateStats {
      anchor: ChunkCoord::nearest(viewpoint, self.config.chunk_size),
      active: self.active.len(),
      ..UpdateStats::default()
    }
  }

  fn finish(
    &mut self,
    mut stats: UpdateStats,
    start: Instant,
    message: &'static str,
  ) -> Result<UpdateStats, TerrainError> {
    stats.active = self.active.len();
    stats.elapsed_us = start.elapsed().as_micros() as u64;

    #[cfg(feature = "metrics")]
    self.metrics.record_pass(&stats, self.pool.live_count());

    tracing::debug!(
      anchor = ?stats.anchor.0,
      created = stats.created,
      reused = stats.reused,
      recycled = stats.recycled,
      destroyed = stats.destroyed,
      culled = stats.culled,
      active = stats.active,
      triangles = stats.triangles,
      elapsed_us = stats.elapsed_us,
      "{}",
      message
    );

    Ok(stats)
  }
}

impl<D: DensityField> Drop for ChunkStreamer<D> {
  fn drop(&mut self) {
    self.shutdown();
  }
}

#[cfg(test)]
#[path = "streaming_test.rs"]
mod streaming_test;
