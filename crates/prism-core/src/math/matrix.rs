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

//! Provides the 4x4 matrix type used for world, view and projection transforms.

use super::vector::{Vec3, Vec4};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Matrices compose right-to-left: `A * B` applies `B` first. The memory layout
/// matches WGSL's `mat4x4<f32>`, so a `Mat4` can be uploaded as-is.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[3]` holds the translation.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec4::ZERO; 4],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0].get(index),
            self.cols[1].get(index),
            self.cols[2].get(index),
            self.cols[3].get(index),
        )
    }

    /// Creates a translation matrix.
    #[inline]
    pub const fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(v.x, v.y, v.z, 1.0))
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation around the X axis.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation around the Y axis.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::Y,
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation around the Z axis.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(c, s, 0.0, 0.0),
            Vec4::new(-s, c, 0.0, 0.0),
            Vec4::Z,
            Vec4::W,
        )
    }

    /// Creates the rotation `Rx(x) * Ry(y) * Rz(z)` from Euler angles.
    ///
    /// The Z rotation is applied to a point first and the X rotation last.
    #[inline]
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        Self::from_rotation_x(angles.x)
            * Self::from_rotation_y(angles.y)
            * Self::from_rotation_z(angles.z)
    }

    /// Composes `T(translation) * Rx * Ry * Rz * S(scale)`.
    ///
    /// A point is scaled first, then rotated, then translated.
    #[inline]
    pub fn from_translation_rotation_scale(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self::from_translation(translation) * Self::from_euler_xyz(rotation) * Self::from_scale(scale)
    }

    /// Creates a right-handed perspective projection with a `[0, 1]` depth range.
    ///
    /// # Arguments
    ///
    /// * `fov_y_radians`: Vertical field of view in radians.
    /// * `aspect_ratio`: Width divided by height of the viewport.
    /// * `z_near`: Distance to the near clipping plane, must be positive.
    /// * `z_far`: Distance to the far clipping plane, must be greater than `z_near`.
    #[inline]
    pub fn perspective_rh_zo(fov_y_radians: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let range = z_near - z_far;
        Self::from_cols(
            Vec4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, z_far / range, -1.0),
            Vec4::new(0.0, 0.0, (z_near * z_far) / range, 0.0),
        )
    }

    /// Returns the transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            self.get_row(0),
            self.get_row(1),
            self.get_row(2),
            self.get_row(3),
        )
    }

    /// Transforms a point (`w = 1`) and returns the result without perspective divide.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).truncate()
    }

    /// Returns the translation stored in the last column.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, FRAC_PI_2, PI};

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat4_approx_eq(a: Mat4, b: Mat4) -> bool {
        (0..4).all(|c| (0..4).all(|r| approx_eq(a.cols[c].get(r), b.cols[c].get(r))))
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_rotation_y(0.3);
        assert!(mat4_approx_eq(m * Mat4::IDENTITY, m));
        assert!(mat4_approx_eq(Mat4::IDENTITY * m, m));
    }

    #[test]
    fn test_rotations_are_right_handed() {
        assert!(vec3_approx_eq(
            Mat4::from_rotation_x(FRAC_PI_2).transform_point3(Vec3::Y),
            Vec3::Z
        ));
        assert!(vec3_approx_eq(
            Mat4::from_rotation_y(FRAC_PI_2).transform_point3(Vec3::Z),
            Vec3::X
        ));
        assert!(vec3_approx_eq(
            Mat4::from_rotation_z(FRAC_PI_2).transform_point3(Vec3::X),
            Vec3::Y
        ));
    }

    #[test]
    fn test_trs_applies_scale_then_rotation_then_translation() {
        let m = Mat4::from_translation_rotation_scale(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, FRAC_PI_2, 0.0),
            Vec3::splat(2.0),
        );
        // (0,0,1) -> scale (0,0,2) -> rotY(90) (2,0,0) -> translate (12,0,0)
        assert!(vec3_approx_eq(m.transform_point3(Vec3::Z), Vec3::new(12.0, 0.0, 0.0)));
    }

    #[test]
    fn test_euler_order_is_x_then_y_then_z_from_the_left() {
        let angles = Vec3::new(0.4, -1.1, 2.3);
        let expected = Mat4::from_rotation_x(angles.x)
            * Mat4::from_rotation_y(angles.y)
            * Mat4::from_rotation_z(angles.z);
        assert_eq!(Mat4::from_euler_xyz(angles), expected);
    }

    #[test]
    fn test_matrix_product_is_not_commutative() {
        let t = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let r = Mat4::from_rotation_y(PI);
        let p = Vec3::ZERO;
        assert!(vec3_approx_eq((t * r).transform_point3(p), Vec3::new(5.0, 0.0, 0.0)));
        assert!(vec3_approx_eq((r * t).transform_point3(p), Vec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_perspective_maps_near_and_far_to_zero_and_one() {
        let proj = Mat4::perspective_rh_zo(FRAC_PI_2, 16.0 / 9.0, 0.1, 100.0);
        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!(approx_eq(near.z / near.w, 0.0));
        assert!(approx_eq(far.z / far.w, 1.0));
    }

    #[test]
    fn test_transpose_swaps_rows_and_columns() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let t = m.transpose();
        assert_eq!(t.get_row(3), Vec4::new(1.0, 2.0, 3.0, 1.0));
    }
}
