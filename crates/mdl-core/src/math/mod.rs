//! Transform factories and vector helpers.
//!
//! All scene math is double precision. Points are homogeneous column vectors
//! and transforms multiply from the left (`world = m * local`).

pub mod transform;

pub use transform::{rotation, scale, translation, Axis, Transform};

use glam::{DVec3, DVec4};

/// Build a homogeneous point column (w = 1).
pub fn point(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 1.0)
}

/// Drop the homogeneous coordinate of a column.
pub fn to_vec3(col: DVec4) -> DVec3 {
    DVec3::new(col.x, col.y, col.z)
}

/// Surface normal of the triangle `a, b, c` (counter-clockwise front face).
///
/// Not normalized; the magnitude is twice the triangle area.
pub fn surface_normal(a: DVec4, b: DVec4, c: DVec4) -> DVec3 {
    let ab = to_vec3(b) - to_vec3(a);
    let ac = to_vec3(c) - to_vec3(a);
    ab.cross(ac)
}
