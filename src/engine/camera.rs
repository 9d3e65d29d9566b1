// Third-person follow camera
//
// Camera model:
//   - Sits `back` units behind the avatar along its facing and `height` above it
//   - Looks at a point `look_height` above the avatar's feet
//   - Eye position eases toward its goal each frame so turns don't snap

use glam::{Mat4, Vec3};

use crate::game::avatar::forward_from_yaw;

pub struct FollowCamera {
    /// Current eye position. Private: only moved by follow().
    eye: Vec3,
    /// Current look-at point.
    target: Vec3,

    /// Distance behind the avatar on the XZ plane.
    pub back: f32,
    /// Eye height above the avatar.
    pub height: f32,
    /// Look-at height above the avatar's feet.
    pub look_height: f32,

    /// Fraction of the remaining gap closed per second (0 = frozen, large = snap).
    pub stiffness: f32,

    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowCamera {
    pub fn new() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, -5.0),
            target: Vec3::Y,
            back: 5.0,
            height: 2.0,
            look_height: 1.0,
            stiffness: 8.0,
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Where the eye wants to be for an avatar at `position` facing `yaw`.
    pub fn goal_eye(&self, position: Vec3, yaw: f32) -> Vec3 {
        position - forward_from_yaw(yaw) * self.back + Vec3::Y * self.height
    }

    /// Ease toward the follow pose. Call once per frame before rendering.
    pub fn follow(&mut self, position: Vec3, yaw: f32, dt: f32) {
        let goal_eye = self.goal_eye(position, yaw);
        let goal_target = position + Vec3::Y * self.look_height;
        let t = (self.stiffness * dt.max(0.0)).min(1.0);
        self.eye = self.eye.lerp(goal_eye, t);
        self.target = self.target.lerp(goal_target, t);
    }

    /// Jump straight to the follow pose (spawn, teleports).
    pub fn snap(&mut self, position: Vec3, yaw: f32) {
        self.eye = self.goal_eye(position, yaw);
        self.target = position + Vec3::Y * self.look_height;
    }

    pub fn eye(&self) -> Vec3 { self.eye }
    pub fn target(&self) -> Vec3 { self.target }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix ready to upload to the GPU.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
