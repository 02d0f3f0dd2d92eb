// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use prism_core::math::{Mat4, Vec3};

/// Position, Euler rotation and scale of a drawable object.
///
/// The world matrix is derived on demand and never cached, since update code
/// may move the object between two draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation (position) of the object.
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new `Transform` with a given position, rotation, and scale.
    pub const fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a `Transform` with a uniform scale and no rotation.
    pub const fn from_position_scale(position: Vec3, scale: f32) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::splat(scale))
    }

    /// Creates the identity `Transform`.
    pub const fn identity() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE)
    }

    /// Calculates the world matrix: `T(position) * Rx * Ry * Rz * S(scale)`.
    pub fn world_matrix(&self) -> Mat4 {
        compute_world_matrix(self.position, self.rotation, self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composes a world matrix in the single canonical order used for every
/// object: scale first, then X, Y, Z rotations, then translation.
pub fn compute_world_matrix(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation_rotation_scale(position, rotation, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use prism_core::math::FRAC_PI_2;

    #[test]
    fn test_world_matrix_is_deterministic() {
        let t = Transform::new(
            Vec3::new(1.5, -2.0, 3.25),
            Vec3::new(0.3, 1.1, -0.7),
            Vec3::new(2.0, 0.5, 1.0),
        );
        let a = t.world_matrix();
        let b = t.world_matrix();
        assert_eq!(bytemuck::bytes_of(&a), bytemuck::bytes_of(&b));
    }

    #[test]
    fn test_world_matrix_scales_before_rotating_and_translating() {
        let t = Transform::new(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, FRAC_PI_2, 0.0),
            Vec3::new(2.0, 1.0, 1.0),
        );
        let p = t.world_matrix().transform_point3(Vec3::X);
        // (1,0,0) -> scaled to (2,0,0) -> Ry(90deg) to (0,0,-2) -> translated.
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_identity_transform() {
        assert_eq!(Transform::default().world_matrix(), Mat4::IDENTITY);
    }
}
