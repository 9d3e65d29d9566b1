// ECS systems that mirror simulation snapshots into render entities.
// The simulation owns the truth; these functions only copy it out.

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::components::*;
use crate::game::scenery::Tree;
use crate::game::{AgentId, HeightField, Snapshot, VisualState};

const AVATAR_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);
const AGENT_SIZE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const TRUNK_SIZE: Vec3 = Vec3::new(1.0, 4.0, 1.0);
const CROWN_SIZE: Vec3 = Vec3::new(3.5, 3.0, 3.5);

fn avatar_color(flash: bool) -> Color {
    if flash { Color::hex(0xff2020) } else { Color::hex(0x00ff00) }
}

fn agent_color(visual: VisualState) -> Color {
    match visual {
        VisualState::Normal => Color::hex(0xb01818),
        VisualState::Flinching => Color::hex(0xffffff),
        VisualState::Defeated => Color::hex(0x404040),
    }
}

/// Spawn terrain tiles and trees. Call once after world construction.
///
/// Terrain is drawn as a grid of flat boxes, each sitting at the height
/// sampled at its centre. `tile` is the tile edge length in world units.
pub fn spawn_scenery(world: &mut World, terrain: &HeightField, trees: &[Tree], half_extent: f32, tile: f32) {
    let tiles = (2.0 * half_extent / tile).ceil() as i32;
    let ground = Color::hex(0x228b22);
    let amp = terrain.amplitude().max(f32::EPSILON);
    for i in 0..tiles {
        for j in 0..tiles {
            let x = -half_extent + (i as f32 + 0.5) * tile;
            let z = -half_extent + (j as f32 + 0.5) * tile;
            let h = terrain.height(x, z);
            // Shade by elevation so hills read without lighting.
            let shade = 0.75 + 0.25 * (h / amp);
            world.spawn((
                Transform::from_position(Vec3::new(x, h - 0.05, z)).with_scale(Vec3::new(tile, 0.1, tile)),
                ground.scaled(shade),
                StaticScenery,
            ));
        }
    }

    for tree in trees {
        let base = tree.position;
        world.spawn((
            Transform::from_position(base + Vec3::Y * TRUNK_SIZE.y * 0.5).with_scale(TRUNK_SIZE),
            Color::hex(0x8b4513),
            StaticScenery,
        ));
        world.spawn((
            Transform::from_position(base + Vec3::Y * (TRUNK_SIZE.y + CROWN_SIZE.y * 0.4)).with_scale(CROWN_SIZE),
            Color::hex(0x006400),
            StaticScenery,
        ));
    }
}

/// Copy the latest snapshot into the avatar and agent entities, spawning
/// entities for new agents and despawning those the simulation removed.
pub fn sync_snapshot(world: &mut World, snapshot: &Snapshot) {
    let avatar = &snapshot.avatar;
    let avatar_transform = Transform {
        position: avatar.position + Vec3::Y * AVATAR_SIZE.y * 0.5,
        yaw: avatar.yaw,
        scale: AVATAR_SIZE,
    };
    let mut query = world.query_filtered::<(&mut Transform, &mut Color), With<AvatarMarker>>();
    let mut found = false;
    for (mut transform, mut color) in query.iter_mut(world) {
        *transform = avatar_transform;
        *color = avatar_color(avatar.damage_flash);
        found = true;
    }
    if !found {
        world.spawn((avatar_transform, avatar_color(avatar.damage_flash), AvatarMarker));
    }

    let mut live: HashMap<AgentId, Transform> = HashMap::with_capacity(snapshot.agents.len());
    let mut colors: HashMap<AgentId, Color> = HashMap::with_capacity(snapshot.agents.len());
    for agent in &snapshot.agents {
        // Defeated agents sink into the ground for their last frame.
        let lift = if agent.visual == VisualState::Defeated { 0.1 } else { AGENT_SIZE.y * 0.5 };
        live.insert(agent.id, Transform {
            position: agent.position + Vec3::Y * lift,
            yaw: agent.yaw,
            scale: AGENT_SIZE,
        });
        colors.insert(agent.id, agent_color(agent.visual));
    }

    let mut stale = Vec::new();
    let mut query = world.query::<(Entity, &AgentMarker, &mut Transform, &mut Color)>();
    for (entity, marker, mut transform, mut color) in query.iter_mut(world) {
        match live.remove(&marker.id) {
            Some(t) => {
                *transform = t;
                if let Some(c) = colors.get(&marker.id) {
                    *color = *c;
                }
            }
            None => stale.push(entity),
        }
    }

    for entity in stale {
        world.despawn(entity);
    }
    for (id, transform) in live {
        let color = colors.get(&id).copied().unwrap_or_else(|| agent_color(VisualState::Normal));
        world.spawn((transform, color, AgentMarker { id }));
    }
}

/// Every drawable entity's transform and color, in query order.
pub fn collect_instances(world: &mut World) -> Vec<(Transform, Color)> {
    let mut query = world.query::<(&Transform, &Color)>();
    query.iter(world).map(|(t, c)| (*t, *c)).collect()
}
