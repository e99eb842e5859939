//! Core data types for isosurface extraction and chunk meshes.

use glam::Vec3;

/// Opaque material reference attached to a LOD profile.
///
/// Rendering bridges map this to their own material handles.
pub type MaterialId = u16;

/// A triangle in chunk-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub a: Vec3,
  pub b: Vec3,
  pub c: Vec3,
}

impl Triangle {
  pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
    Self { a, b, c }
  }

  /// Vertex `i` in winding order, or `None` past the third.
  #[inline]
  pub fn get(&self, i: usize) -> Option<Vec3> {
    self.vertices().get(i).copied()
  }

  /// Vertices in emission order.
  #[inline]
  pub fn vertices(&self) -> [Vec3; 3] {
    [self.a, self.b, self.c]
  }

  /// Unnormalized face normal (`(b - a) × (c - a)`).
  #[inline]
  pub fn cross(&self) -> Vec3 {
    (self.b - self.a).cross(self.c - self.a)
  }

  /// Triangle area.
  #[inline]
  pub fn area(&self) -> f32 {
    self.cross().length() * 0.5
  }
}

/// Triangle list produced by one extraction.
///
/// `dropped` counts triangles discarded by a fixed capacity policy.
#[derive(Clone, Debug, Default)]
pub struct TriangleBuffer {
  pub triangles: Vec<Triangle>,
  pub dropped: usize,
}

impl TriangleBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.triangles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  /// True if a capacity limit discarded geometry.
  pub fn is_truncated(&self) -> bool {
    self.dropped > 0
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
    self.triangles.iter()
  }
}

/// Output vertex with render attributes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// Vertex position in chunk-local coordinates.
  pub position: [f32; 3],

  /// Surface normal (unit vector).
  pub normal: [f32; 3],
}

impl Default for Vertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }

  /// Check if a point lies inside (inclusive).
  pub fn contains(&self, point: [f32; 3]) -> bool {
    (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Render-ready chunk mesh.
///
/// Vertices are unshared: each triangle owns three consecutive vertices and
/// indices run sequentially, so normals are flat per face.
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
  /// Output vertices with positions and normals.
  pub vertices: Vec<Vertex>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a mesh from a triangle list.
  pub fn from_triangles(triangles: &[Triangle]) -> Self {
    let mut output = Self::new();
    output.write_triangles(triangles);
    output
  }

  /// Replace contents with a triangle list, reusing allocated capacity.
  pub fn write_triangles(&mut self, triangles: &[Triangle]) {
    self.clear();
    self.vertices.reserve(triangles.len() * 3);
    self.indices.reserve(triangles.len() * 3);

    for tri in triangles {
      let normal = tri.cross().normalize_or(Vec3::Y).to_array();
      for p in tri.vertices() {
        let position = p.to_array();
        self.indices.push(self.vertices.len() as u32);
        self.vertices.push(Vertex { position, normal });
        self.bounds.encapsulate(position);
      }
    }
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
