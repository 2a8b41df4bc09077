//! Translation, scale and rotation matrices.

use glam::{DMat4, DVec3};

/// A 4x4 homogeneous affine map.
pub type Transform = DMat4;

/// Principal rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Convert from the numeric axis index used in compiled scripts (0, 1, 2).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Build a translation matrix.
pub fn translation(dx: f64, dy: f64, dz: f64) -> Transform {
    DMat4::from_translation(DVec3::new(dx, dy, dz))
}

/// Build a (possibly non-uniform) scale matrix.
pub fn scale(sx: f64, sy: f64, sz: f64) -> Transform {
    DMat4::from_scale(DVec3::new(sx, sy, sz))
}

/// Build a right-handed rotation about a principal axis.
pub fn rotation(axis: Axis, radians: f64) -> Transform {
    match axis {
        Axis::X => DMat4::from_rotation_x(radians),
        Axis::Y => DMat4::from_rotation_y(radians),
        Axis::Z => DMat4::from_rotation_z(radians),
    }
}
