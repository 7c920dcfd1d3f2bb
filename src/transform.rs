//! Model matrix composition.
//!
//! Every object in the desk scene is placed with a scale, three independent Euler angles and a
//! translation. They are always combined in the same order, see [`COMPOSITION_ORDER`]. This is
//! how the scene was laid out, not a general rotation convention: changing the order moves
//! objects.

use glam::{Mat4, Vec3};

/// `M = T * Rz * Ry * Rx * S` with column vectors, so local geometry is scaled first, then
/// rotated about X, Y and Z, then translated.
pub const COMPOSITION_ORDER: &str = "T * Rz * Ry * Rx * S";

/// Placement of a single draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    pub scale: Vec3,
    /// X, Y and Z rotation in degrees.
    pub rotation_degrees: Vec3,
    pub translation: Vec3,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }
}

impl TransformParams {
    /// Scale and translation only.
    pub const fn new(scale: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees: Vec3::ZERO,
            translation,
        }
    }

    pub const fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation_degrees = Vec3::new(x, y, z);
        self
    }
}

pub fn compose(params: &TransformParams) -> Mat4 {
    let rotation = params.rotation_degrees;
    Mat4::from_translation(params.translation)
        * Mat4::from_rotation_z(rotation.z.to_radians())
        * Mat4::from_rotation_y(rotation.y.to_radians())
        * Mat4::from_rotation_x(rotation.x.to_radians())
        * Mat4::from_scale(params.scale)
}
