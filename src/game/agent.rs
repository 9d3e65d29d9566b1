// Hostile agent and its perception/pursuit/attack state machine.
//
// Every tick the state is re-derived from the current XZ distance to the
// avatar; there is no hysteresis between Pursuing and Attacking.
//
//   d >  detection_radius                 → Idle
//   attack_radius < d <= detection_radius → Pursuing (step toward avatar)
//   d <= attack_radius                    → Attacking (stand, strike on cooldown)
//   health == 0                           → Defeated (terminal)

use glam::{Vec2, Vec3};
use log::{debug, trace};

use super::avatar::AvatarState;
use super::config::AgentConfig;
use super::terrain::HeightField;

/// Stable identifier handed out by the registry at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorState {
    Idle,
    Pursuing,
    Attacking,
    Defeated,
}

/// Cosmetic state for the renderer. Carries no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    Flinching,
    Defeated,
}

#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    pub position: Vec3,
    pub yaw: f32,
    health: u32,
    state: BehaviorState,
    last_attack_at: Option<f64>,
    flinch_until: Option<f64>,
    tuning: AgentConfig,
}

/// Horizontal offset from `from` to `to`, ignoring elevation.
pub(crate) fn planar_offset(from: Vec3, to: Vec3) -> Vec2 {
    Vec2::new(to.x - from.x, to.z - from.z)
}

impl Agent {
    pub fn new(id: AgentId, position: Vec3, tuning: AgentConfig) -> Self {
        Self {
            id,
            position,
            yaw: 0.0,
            health: tuning.max_health,
            state: BehaviorState::Idle,
            last_attack_at: None,
            flinch_until: None,
            tuning,
        }
    }

    pub fn id(&self) -> AgentId { self.id }
    pub fn health(&self) -> u32 { self.health }
    pub fn max_health(&self) -> u32 { self.tuning.max_health }
    pub fn state(&self) -> BehaviorState { self.state }
    pub fn is_defeated(&self) -> bool { self.state == BehaviorState::Defeated }

    pub fn visual_state(&self) -> VisualState {
        if self.is_defeated() {
            VisualState::Defeated
        } else if self.flinch_until.is_some() {
            VisualState::Flinching
        } else {
            VisualState::Normal
        }
    }

    /// Subtract damage, clamped at zero. Reaching zero is terminal; a
    /// defeated agent ignores further damage.
    pub fn take_damage(&mut self, amount: u32, now: f64) {
        if self.is_defeated() {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = BehaviorState::Defeated;
            self.flinch_until = None;
            debug!("agent {:?} defeated", self.id);
        } else {
            self.flinch_until = Some(now + self.tuning.flinch_duration as f64);
        }
    }

    /// Advance one tick: revert an expired flinch, pick the state from the
    /// distance to the avatar, then act on it.
    pub fn update(&mut self, avatar: &mut AvatarState, terrain: &HeightField, now: f64) {
        if self.is_defeated() {
            return;
        }
        if self.flinch_until.is_some_and(|until| now >= until) {
            self.flinch_until = None;
        }

        let offset = planar_offset(self.position, avatar.position);
        let distance = offset.length();
        let next = if distance > self.tuning.detection_radius {
            BehaviorState::Idle
        } else if distance > self.tuning.attack_radius {
            BehaviorState::Pursuing
        } else {
            BehaviorState::Attacking
        };
        if next != self.state {
            debug!("agent {:?}: {:?} -> {:?} at d={:.2}", self.id, self.state, next, distance);
            self.state = next;
        }

        match self.state {
            BehaviorState::Idle | BehaviorState::Defeated => {}
            BehaviorState::Pursuing => {
                let dir = offset / distance;
                self.yaw = dir.x.atan2(dir.y);
                self.position.x += dir.x * self.tuning.speed;
                self.position.z += dir.y * self.tuning.speed;
                self.position.y = terrain.height(self.position.x, self.position.z);
            }
            BehaviorState::Attacking => {
                if distance > 0.0 {
                    self.yaw = offset.x.atan2(offset.y);
                }
                self.try_strike(avatar, now);
            }
        }
    }

    fn try_strike(&mut self, avatar: &mut AvatarState, now: f64) {
        if avatar.is_defeated() {
            return;
        }
        let ready = match self.last_attack_at {
            None => true,
            Some(last) => now - last > self.tuning.attack_cooldown as f64,
        };
        if ready {
            avatar.take_damage(self.tuning.attack_damage, now);
            self.last_attack_at = Some(now);
            trace!(
                "agent {:?} hits avatar for {}, avatar health {}",
                self.id,
                self.tuning.attack_damage,
                avatar.health()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{AvatarConfig, TerrainConfig};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    const EPS: f32 = 1e-3;

    #[fixture]
    fn terrain() -> HeightField {
        HeightField::new(&TerrainConfig { amplitude: 0.0, ..TerrainConfig::default() }).unwrap()
    }

    fn avatar() -> AvatarState {
        AvatarState::new(Vec3::ZERO, AvatarConfig::default())
    }

    fn agent_at(z: f32) -> Agent {
        Agent::new(AgentId(1), Vec3::new(0.0, 0.0, z), AgentConfig::default())
    }

    #[rstest]
    fn health_is_clamped_at_zero() {
        let mut agent = agent_at(5.0);
        agent.take_damage(1000, 0.0);
        assert_eq!(agent.health(), 0);
        assert_eq!(agent.state(), BehaviorState::Defeated);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(29)]
    #[case(30)]
    #[case(u32::MAX)]
    fn health_stays_in_range(#[case] amount: u32) {
        let mut agent = agent_at(5.0);
        agent.take_damage(amount, 0.0);
        assert!(agent.health() <= agent.max_health());
    }

    #[rstest]
    fn defeated_agent_ignores_damage() {
        let mut agent = agent_at(5.0);
        agent.take_damage(30, 0.0);
        agent.take_damage(5, 0.1);
        assert_eq!(agent.health(), 0);
        assert_eq!(agent.state(), BehaviorState::Defeated);
        assert_eq!(agent.visual_state(), VisualState::Defeated);
    }

    #[rstest]
    fn non_lethal_hit_flinches_then_reverts(terrain: HeightField) {
        let mut agent = agent_at(50.0);
        let mut avatar = avatar();
        agent.take_damage(10, 1.0);
        assert_eq!(agent.health(), 20);
        assert_eq!(agent.visual_state(), VisualState::Flinching);

        agent.update(&mut avatar, &terrain, 1.1);
        assert_eq!(agent.visual_state(), VisualState::Flinching);
        agent.update(&mut avatar, &terrain, 1.25);
        assert_eq!(agent.visual_state(), VisualState::Normal);
    }

    #[rstest]
    fn just_inside_detection_starts_pursuit(terrain: HeightField) {
        let radius = AgentConfig::default().detection_radius;
        let mut agent = agent_at(radius - EPS);
        let mut avatar = avatar();
        agent.update(&mut avatar, &terrain, 0.0);
        assert_eq!(agent.state(), BehaviorState::Pursuing);
        assert!(agent.position.z < radius - EPS);
    }

    #[rstest]
    fn just_outside_detection_stays_idle(terrain: HeightField) {
        let radius = AgentConfig::default().detection_radius;
        let mut agent = agent_at(radius + EPS);
        let mut avatar = avatar();
        agent.update(&mut avatar, &terrain, 0.0);
        assert_eq!(agent.state(), BehaviorState::Idle);
        assert_relative_eq!(agent.position.z, radius + EPS);
    }

    #[rstest]
    fn pursuit_faces_and_approaches_avatar(terrain: HeightField) {
        let mut agent = Agent::new(AgentId(2), Vec3::new(4.0, 0.0, 0.0), AgentConfig::default());
        let mut avatar = avatar();
        agent.update(&mut avatar, &terrain, 0.0);
        assert_relative_eq!(agent.position.x, 4.0 - AgentConfig::default().speed, epsilon = 1e-6);
        // Facing -X.
        assert_relative_eq!(agent.yaw, -std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
    }

    #[rstest]
    fn attacking_agent_stands_and_strikes_on_cooldown(terrain: HeightField) {
        let mut agent = agent_at(1.0);
        let mut avatar = avatar();
        agent.update(&mut avatar, &terrain, 0.0);
        assert_eq!(agent.state(), BehaviorState::Attacking);
        assert_eq!(avatar.health(), 90);
        assert!(avatar.is_flashing(0.0));
        assert_relative_eq!(agent.position.z, 1.0);

        // Cooldown is strict: exactly one cooldown later is too soon.
        agent.update(&mut avatar, &terrain, 1.0);
        assert_eq!(avatar.health(), 90);
        agent.update(&mut avatar, &terrain, 1.01);
        assert_eq!(avatar.health(), 80);
    }

    #[rstest]
    fn flinch_does_not_interrupt_pursuit(terrain: HeightField) {
        let mut agent = agent_at(5.0);
        let mut avatar = avatar();
        agent.take_damage(10, 0.0);
        agent.update(&mut avatar, &terrain, 0.05);
        assert_eq!(agent.visual_state(), VisualState::Flinching);
        assert_eq!(agent.state(), BehaviorState::Pursuing);
        assert_relative_eq!(agent.position.z, 5.0 - AgentConfig::default().speed, epsilon = 1e-6);
    }

    #[rstest]
    fn flinch_does_not_stop_a_strike(terrain: HeightField) {
        let mut agent = agent_at(1.0);
        let mut avatar = avatar();
        agent.take_damage(10, 0.0);
        agent.update(&mut avatar, &terrain, 0.05);
        assert_eq!(agent.visual_state(), VisualState::Flinching);
        assert_eq!(agent.state(), BehaviorState::Attacking);
        assert_eq!(avatar.health(), 90);
    }

    #[rstest]
    fn coincident_agent_attacks_without_nan(terrain: HeightField) {
        let mut agent = agent_at(0.0);
        let mut avatar = avatar();
        agent.update(&mut avatar, &terrain, 0.0);
        assert_eq!(agent.state(), BehaviorState::Attacking);
        assert!(agent.yaw.is_finite());
        assert!(agent.position.is_finite());
    }

    #[rstest]
    fn defeated_agent_is_inert(terrain: HeightField) {
        let mut agent = agent_at(1.0);
        let mut avatar = avatar();
        agent.take_damage(30, 0.0);
        agent.update(&mut avatar, &terrain, 0.5);
        assert_eq!(agent.state(), BehaviorState::Defeated);
        assert_eq!(avatar.health(), avatar.max_health());
    }
}
