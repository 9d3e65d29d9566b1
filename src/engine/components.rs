// ECS components for the render mirror.
// Every drawable thing is an entity with a Transform and a Color; the
// renderer queries them once per frame to build instance data.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::game::AgentId;

/// Placement of a box instance in 3D space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y in radians.
    pub yaw: f32,
    /// Full box extents along each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// RGB color for rendering
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// From a 0xRRGGBB literal.
    pub fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    pub fn scaled(self, k: f32) -> Self {
        Self { r: self.r * k, g: self.g * k, b: self.b * k }
    }
}

/// Marks the entity mirroring the player avatar.
#[derive(Component, Debug, Clone, Copy)]
pub struct AvatarMarker;

/// Links an entity to the simulation agent it mirrors.
#[derive(Component, Debug, Clone, Copy)]
pub struct AgentMarker {
    pub id: AgentId,
}

/// Terrain tiles and trees. Spawned once, never synced.
#[derive(Component, Debug, Clone, Copy)]
pub struct StaticScenery;
