// Player melee resolution: a forward-facing cone test on the XZ plane.
// Stateless; the caller applies the resulting damage.

use glam::Vec2;

use super::agent::{planar_offset, Agent};
use super::avatar::AvatarState;

/// A landed strike against one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub damage: u32,
    pub distance: f32,
    /// Angle between the avatar's facing and the direction to the target.
    pub angle: f32,
}

/// Decide whether the avatar's strike lands on `agent`.
///
/// Lands when `distance < attack_range` and `angle < attack_angle / 2`.
/// Defeated agents are never hit. A target standing exactly on the avatar
/// counts as dead ahead.
pub fn resolve(avatar: &AvatarState, agent: &Agent) -> Option<Hit> {
    if agent.is_defeated() || agent.health() == 0 {
        return None;
    }
    let tuning = avatar.tuning();

    let offset = planar_offset(avatar.position, agent.position);
    let distance = offset.length();
    if distance >= tuning.attack_range {
        return None;
    }

    let facing = Vec2::new(avatar.forward().x, avatar.forward().z);
    let angle = match offset.try_normalize() {
        Some(dir) => facing.dot(dir).clamp(-1.0, 1.0).acos(),
        None => 0.0,
    };
    if angle < tuning.attack_angle_rad() * 0.5 {
        Some(Hit { damage: tuning.attack_damage, distance, angle })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::agent::AgentId;
    use crate::game::config::{AgentConfig, AvatarConfig};
    use glam::Vec3;
    use rstest::{fixture, rstest};

    const EPS: f32 = 1e-3;

    #[fixture]
    fn avatar() -> AvatarState {
        AvatarState::new(Vec3::ZERO, AvatarConfig::default())
    }

    fn agent_at(x: f32, z: f32) -> Agent {
        Agent::new(AgentId(9), Vec3::new(x, 0.0, z), AgentConfig::default())
    }

    fn polar(distance: f32, angle: f32) -> Agent {
        agent_at(distance * angle.sin(), distance * angle.cos())
    }

    #[rstest]
    fn target_dead_ahead_inside_range_is_hit(avatar: AvatarState) {
        let range = avatar.tuning().attack_range;
        let hit = resolve(&avatar, &agent_at(0.0, range - EPS)).expect("should land");
        assert_eq!(hit.damage, 25);
        assert!(hit.angle.abs() < 1e-3);
    }

    #[rstest]
    fn target_just_beyond_range_is_missed(avatar: AvatarState) {
        let range = avatar.tuning().attack_range;
        assert!(resolve(&avatar, &agent_at(0.0, range + EPS)).is_none());
    }

    #[rstest]
    #[case::left(1.0)]
    #[case::right(-1.0)]
    fn target_just_outside_half_angle_is_missed(avatar: AvatarState, #[case] side: f32) {
        let range = avatar.tuning().attack_range;
        let half = avatar.tuning().attack_angle_rad() * 0.5;
        assert!(resolve(&avatar, &polar(range - EPS, side * (half + 0.01))).is_none());
        assert!(resolve(&avatar, &polar(range - EPS, side * (half - 0.01))).is_some());
    }

    #[rstest]
    fn target_behind_is_missed(avatar: AvatarState) {
        assert!(resolve(&avatar, &agent_at(0.0, -1.0)).is_none());
    }

    #[rstest]
    fn cone_follows_avatar_yaw(mut avatar: AvatarState) {
        avatar.yaw = std::f32::consts::FRAC_PI_2;
        assert!(resolve(&avatar, &agent_at(2.0, 0.0)).is_some());
        assert!(resolve(&avatar, &agent_at(0.0, 2.0)).is_none());
    }

    #[rstest]
    fn elevation_is_ignored(avatar: AvatarState) {
        let mut agent = agent_at(0.0, 2.0);
        agent.position.y = 40.0;
        assert!(resolve(&avatar, &agent).is_some());
    }

    #[rstest]
    fn coincident_target_is_hit(avatar: AvatarState) {
        assert!(resolve(&avatar, &agent_at(0.0, 0.0)).is_some());
    }

    #[rstest]
    fn defeated_target_is_not_hit(avatar: AvatarState) {
        let mut agent = agent_at(0.0, 1.0);
        agent.take_damage(30, 0.0);
        assert!(resolve(&avatar, &agent).is_none());
    }
}
