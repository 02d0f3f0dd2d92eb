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

use crate::config::CameraRecord;
use prism_core::math::{degrees_to_radians, Mat4, Vec3, EPSILON};

/// A free perspective camera driven by pitch and yaw.
///
/// `rotation.x` is the pitch (positive looks up), `rotation.y` the yaw
/// (positive turns left, counter-clockwise seen from above) and `rotation.z`
/// is stored but unused. At zero rotation the camera looks down `-Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position.
    pub position: Vec3,
    /// Pitch, yaw and unused roll, in radians.
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport width over height.
    pub aspect_ratio: f32,
    /// Near clip distance.
    pub z_near: f32,
    /// Far clip distance.
    pub z_far: f32,
}

impl Camera {
    /// Creates a camera at the origin with the given projection.
    pub fn new(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y_degrees,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Builds a camera from its document record.
    pub fn from_record(record: &CameraRecord, aspect_ratio: f32) -> Self {
        let mut camera = Self::new(
            record.projection.fov,
            aspect_ratio,
            record.projection.near,
            record.projection.far,
        );
        camera.set_position(record.position.into());
        camera.set_rotation(record.rotation.into());
        camera
    }

    /// Moves the camera to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Sets pitch, yaw and roll.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Replaces all projection parameters.
    pub fn set_projection(&mut self, fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) {
        self.fov_y_degrees = fov_y_degrees;
        self.aspect_ratio = aspect_ratio;
        self.z_near = z_near;
        self.z_far = z_far;
    }

    /// Updates the aspect ratio from a surface size. A zero height is ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Translates the camera by `delta`.
    pub fn add_to_position(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Adds `delta` to pitch, yaw and roll.
    pub fn add_to_rotation(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Copies position and rotation from another camera, keeping this projection.
    pub fn copy_pose_from(&mut self, other: &Camera) {
        self.position = other.position;
        self.rotation = other.rotation;
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        let (sin_p, cos_p) = self.rotation.x.sin_cos();
        let (sin_y, cos_y) = self.rotation.y.sin_cos();
        Vec3::new(-cos_p * sin_y, sin_p, -cos_p * cos_y)
    }

    /// Opposite of [`forward`](Self::forward).
    pub fn back(&self) -> Vec3 {
        -self.forward()
    }

    /// Horizontal unit vector to the right of the view direction.
    pub fn right(&self) -> Vec3 {
        let right = self.forward().cross(Vec3::Y);
        if right.length_squared() > EPSILON {
            right.normalize()
        } else {
            // Looking straight up or down: only the yaw defines "right".
            let (sin_y, cos_y) = self.rotation.y.sin_cos();
            Vec3::new(cos_y, 0.0, -sin_y)
        }
    }

    /// Opposite of [`right`](Self::right).
    pub fn left(&self) -> Vec3 {
        -self.right()
    }

    /// World-to-view matrix: `Rx(-pitch) * Ry(-yaw) * T(-position)`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.rotation.x)
            * Mat4::from_rotation_y(-self.rotation.y)
            * Mat4::from_translation(-self.position)
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_zo(
            degrees_to_radians(self.fov_y_degrees),
            self.aspect_ratio,
            self.z_near,
            self.z_far,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60.0, 16.0 / 9.0, 0.01, 5000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use prism_core::math::{Vec4, FRAC_PI_2};

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-5);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = Camera::default();
        assert_vec3_eq(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_vec3_eq(camera.right(), Vec3::X);
        assert_vec3_eq(camera.left(), -Vec3::X);
        assert_vec3_eq(camera.back(), Vec3::Z);
    }

    #[test]
    fn test_positive_yaw_turns_left() {
        let mut camera = Camera::default();
        camera.set_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert_vec3_eq(camera.forward(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_right_when_looking_straight_up() {
        let mut camera = Camera::default();
        camera.set_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert_vec3_eq(camera.right(), Vec3::X);
    }

    #[test]
    fn test_view_matrix_maps_forward_point_onto_negative_z() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(3.0, 1.0, -2.0));
        camera.set_rotation(Vec3::new(0.4, -1.2, 0.0));
        let target = camera.position + camera.forward() * 5.0;
        let in_view = camera.view_matrix() * Vec4::from_vec3(target, 1.0);
        assert_abs_diff_eq!(in_view.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(in_view.y, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(in_view.z, -5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_projection_only_changes_projection() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        camera.set_projection(90.0, 1.0, 0.5, 100.0);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.fov_y_degrees, 90.0);
        camera.add_to_position(Vec3::X);
        assert_eq!(camera.fov_y_degrees, 90.0);
        assert_eq!(camera.z_far, 100.0);
    }

    #[test]
    fn test_aspect_ratio_ignores_zero_height() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(800, 0);
        assert_abs_diff_eq!(camera.aspect_ratio, 16.0 / 9.0);
        camera.set_aspect_ratio(800, 400);
        assert_abs_diff_eq!(camera.aspect_ratio, 2.0);
    }
}
