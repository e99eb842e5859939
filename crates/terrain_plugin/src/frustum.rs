//! View-frustum visibility for chunk culling.
//!
//! The streamer only asks one question: is a chunk's bounding box possibly
//! visible? [`Visibility`] captures that, so engines can pass their own
//! frustum, a [`Frustum`] built from a view-projection matrix, or
//! [`AlwaysVisible`] to disable culling.

use glam::{Mat4, Vec3, Vec4};

/// Visibility test for a cube-shaped chunk bounding box.
pub trait Visibility {
  /// True if the axis-aligned cube centred at `center` with edge length
  /// `size` may be visible.
  fn box_visible(&self, center: Vec3, size: f32) -> bool;
}

/// Disables culling.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysVisible;

impl Visibility for AlwaysVisible {
  #[inline]
  fn box_visible(&self, _center: Vec3, _size: f32) -> bool {
    true
  }
}

impl<F: Fn(Vec3, f32) -> bool> Visibility for F {
  #[inline]
  fn box_visible(&self, center: Vec3, size: f32) -> bool {
    self(center, size)
  }
}

/// A plane defined by normal and distance from origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
  pub normal: Vec3,
  pub distance: f32,
}

impl Plane {
  pub fn new(normal: Vec3, distance: f32) -> Self {
    Self { normal, distance }
  }

  /// Signed distance from point to plane (positive = in front).
  #[inline]
  pub fn distance_to_point(&self, point: Vec3) -> f32 {
    self.normal.dot(point) + self.distance
  }

  fn from_coefficients(plane: Vec4) -> Self {
    let normal = plane.truncate();
    let len = normal.length();
    Self {
      normal: normal / len,
      distance: plane.w / len,
    }
  }
}

/// View frustum with 6 inward-facing planes (near, far, left, right, top,
/// bottom).
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
  pub planes: [Plane; 6],
}

impl Frustum {
  /// Extract frustum planes from a view-projection matrix.
  ///
  /// Expects the `[0, 1]` clip depth range produced by glam's `*_rh` and
  /// `*_lh` projections.
  pub fn from_view_projection(vp: &Mat4) -> Self {
    let row0 = vp.row(0);
    let row1 = vp.row(1);
    let row2 = vp.row(2);
    let row3 = vp.row(3);

    Self {
      planes: [
        Plane::from_coefficients(row2),
        Plane::from_coefficients(row3 - row2),
        Plane::from_coefficients(row3 + row0),
        Plane::from_coefficients(row3 - row0),
        Plane::from_coefficients(row3 - row1),
        Plane::from_coefficients(row3 + row1),
      ],
    }
  }

  /// Check if point is inside frustum.
  pub fn contains_point(&self, point: Vec3) -> bool {
    self
      .planes
      .iter()
      .all(|plane| plane.distance_to_point(point) >= 0.0)
  }

  /// Conservative AABB test.
  ///
  /// For each plane, the corner furthest along the plane normal (p-vertex)
  /// decides: if it is behind the plane, the whole box is outside.
  pub fn intersects_aabb(&self, min: Vec3, max: Vec3) -> bool {
    self.planes.iter().all(|plane| {
      let p = Vec3::select(plane.normal.cmpge(Vec3::ZERO), max, min);
      plane.distance_to_point(p) >= 0.0
    })
  }
}

impl Visibility for Frustum {
  #[inline]
  fn box_visible(&self, center: Vec3, size: f32) -> bool {
    let half = Vec3::splat(size * 0.5);
    self.intersects_aabb(center - half, center + half)
  }
}

#[cfg(test)]
#[path = "frustum_test.rs"]
mod frustum_test;
