//! Chunk identity and per-chunk render state.

use glam::{IVec3, Vec3};

use crate::types::{MaterialId, MeshOutput, Triangle};

/// Chunk position on the chunk lattice (not world units).
///
/// World-space minimum corner = `coord * chunk_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec3);

impl ChunkCoord {
  pub const ORIGIN: ChunkCoord = ChunkCoord(IVec3::ZERO);

  #[inline]
  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self(IVec3::new(x, y, z))
  }

  /// Lattice coordinate nearest to a world-space point.
  #[inline]
  pub fn nearest(point: Vec3, chunk_size: f32) -> Self {
    Self((point / chunk_size).round().as_ivec3())
  }

  /// World-space minimum corner.
  #[inline]
  pub fn origin(self, chunk_size: f32) -> Vec3 {
    self.0.as_vec3() * chunk_size
  }

  /// World-space centre.
  #[inline]
  pub fn center(self, chunk_size: f32) -> Vec3 {
    self.origin(chunk_size) + Vec3::splat(chunk_size * 0.5)
  }

  /// Offset by a lattice delta.
  #[inline]
  pub fn offset(self, delta: IVec3) -> Self {
    Self(self.0 + delta)
  }
}

impl From<IVec3> for ChunkCoord {
  fn from(v: IVec3) -> Self {
    Self(v)
  }
}

/// Physics collider attachment for a chunk.
///
/// `revision` advances every time the chunk mesh is rewritten, telling the
/// physics bridge to rebuild its shape from [`Chunk::mesh`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColliderHandle {
  pub revision: u64,
}

/// A terrain chunk: lattice position, LOD bucket and render-ready mesh.
#[derive(Debug, Default)]
pub struct Chunk {
  pub coord: ChunkCoord,
  /// Index into the configured LOD profiles.
  pub lod_index: usize,
  /// Material of the LOD profile the mesh was built with.
  pub material: MaterialId,
  pub mesh: MeshOutput,
  /// Incremented on every mesh write.
  pub mesh_revision: u64,
  /// Present when collisions are enabled.
  pub collider: Option<ColliderHandle>,
  pub active: bool,
}

impl Chunk {
  /// Write freshly extracted triangles into the mesh, reusing buffer
  /// capacity.
  pub fn write_mesh(&mut self, triangles: &[Triangle], material: MaterialId, with_collider: bool) {
    self.mesh.write_triangles(triangles);
    self.material = material;
    self.mesh_revision += 1;

    self.collider = if with_collider {
      Some(ColliderHandle {
        revision: self.mesh_revision,
      })
    } else {
      None
    };
  }

  /// Reset for reuse under a new coordinate. Buffer capacity is kept.
  pub fn reset(&mut self, coord: ChunkCoord, lod_index: usize) {
    self.coord = coord;
    self.lod_index = lod_index;
    self.mesh.clear();
    self.collider = None;
    self.active = false;
  }
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;
