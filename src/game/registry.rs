// Owner of the live agent set.
//
// update_all is two-phase: every live agent is advanced first, then the
// collection is compacted. Agents only ever reach Defeated through the
// avatar's strike, which resolves outside update_all, so anything Defeated
// at compaction time was already Defeated before this pass began and has
// had one snapshot to show it.

use glam::Vec3;
use log::{debug, info};

use super::agent::{Agent, AgentId};
use super::avatar::AvatarState;
use super::combat::{self, Hit};
use super::config::AgentConfig;
use super::error::SimError;
use super::terrain::HeightField;

#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    next_id: u32,
    tuning: AgentConfig,
}

impl AgentRegistry {
    pub fn new(tuning: AgentConfig) -> Self {
        Self {
            agents: Vec::new(),
            next_id: 0,
            tuning,
        }
    }

    /// Create an agent at (x, z), standing on the terrain.
    pub fn spawn(&mut self, x: f32, z: f32, terrain: &HeightField) -> Result<AgentId, SimError> {
        if !x.is_finite() || !z.is_finite() {
            return Err(SimError::NonFiniteCoordinate { x, z });
        }
        let id = AgentId(self.next_id);
        self.next_id += 1;
        let position = Vec3::new(x, terrain.height(x, z), z);
        self.agents.push(Agent::new(id, position, self.tuning.clone()));
        debug!("spawned agent {:?} at {:?}", id, position);
        Ok(id)
    }

    /// Advance every live agent, then drop the ones already defeated.
    pub fn update_all(&mut self, avatar: &mut AvatarState, terrain: &HeightField, now: f64) {
        for agent in &mut self.agents {
            agent.update(avatar, terrain, now);
        }

        let before = self.agents.len();
        self.agents.retain(|agent| !agent.is_defeated());
        let pruned = before - self.agents.len();
        if pruned > 0 {
            info!("removed {} defeated agent(s), {} remaining", pruned, self.agents.len());
        }
    }

    /// Resolve one accepted player strike against every live agent.
    /// The cone may catch several agents; each takes full damage.
    pub fn apply_strike(&mut self, avatar: &AvatarState, now: f64) -> Vec<(AgentId, Hit)> {
        let mut hits = Vec::new();
        for agent in &mut self.agents {
            if let Some(hit) = combat::resolve(avatar, agent) {
                agent.take_damage(hit.damage, now);
                hits.push((agent.id(), hit));
            }
        }
        hits
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id() == id)
    }

    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agents still able to fight (excludes ones awaiting removal).
    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|agent| !agent.is_defeated()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::agent::BehaviorState;
    use crate::game::config::{AvatarConfig, TerrainConfig};
    use rstest::{fixture, rstest};

    #[fixture]
    fn terrain() -> HeightField {
        HeightField::new(&TerrainConfig::default()).unwrap()
    }

    fn avatar() -> AvatarState {
        AvatarState::new(Vec3::ZERO, AvatarConfig::default())
    }

    #[rstest]
    fn spawn_places_agent_on_terrain(terrain: HeightField) {
        let mut registry = AgentRegistry::new(AgentConfig::default());
        let id = registry.spawn(7.5, -3.0, &terrain).unwrap();
        let agent = registry.get(id).unwrap();
        assert_eq!(agent.position.y, terrain.height(7.5, -3.0));
        assert_eq!(agent.health(), 30);
    }

    #[rstest]
    #[case(f32::NAN, 0.0)]
    #[case(0.0, f32::INFINITY)]
    #[case(f32::NEG_INFINITY, f32::NAN)]
    fn spawn_rejects_non_finite_coordinates(terrain: HeightField, #[case] x: f32, #[case] z: f32) {
        let mut registry = AgentRegistry::new(AgentConfig::default());
        assert!(matches!(
            registry.spawn(x, z, &terrain),
            Err(SimError::NonFiniteCoordinate { .. })
        ));
        assert!(registry.is_empty());
    }

    #[rstest]
    fn ids_are_unique(terrain: HeightField) {
        let mut registry = AgentRegistry::new(AgentConfig::default());
        let a = registry.spawn(1.0, 1.0, &terrain).unwrap();
        let b = registry.spawn(1.0, 1.0, &terrain).unwrap();
        assert_ne!(a, b);
    }

    #[rstest]
    fn defeated_agent_survives_until_next_update(terrain: HeightField) {
        let mut registry = AgentRegistry::new(AgentConfig::default());
        let id = registry.spawn(0.0, 40.0, &terrain).unwrap();
        let mut avatar = avatar();

        registry.get_mut(id).unwrap().take_damage(30, 0.0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_count(), 0);
        assert_eq!(registry.get(id).unwrap().state(), BehaviorState::Defeated);

        registry.update_all(&mut avatar, &terrain, 0.1);
        assert!(registry.get(id).is_none());
    }

    #[rstest]
    fn strike_hits_every_agent_in_cone(terrain: HeightField) {
        let mut registry = AgentRegistry::new(AgentConfig::default());
        let ahead = registry.spawn(0.0, 2.0, &terrain).unwrap();
        let ahead_left = registry.spawn(0.5, 2.5, &terrain).unwrap();
        let behind = registry.spawn(0.0, -2.0, &terrain).unwrap();
        let avatar = avatar();

        let hits = registry.apply_strike(&avatar, 0.0);
        let ids: Vec<AgentId> = hits.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![ahead, ahead_left]);
        assert_eq!(registry.get(ahead).unwrap().health(), 5);
        assert_eq!(registry.get(ahead_left).unwrap().health(), 5);
        assert_eq!(registry.get(behind).unwrap().health(), 30);
    }

    #[rstest]
    fn idle_agents_do_not_move(terrain: HeightField) {
        let mut registry = AgentRegistry::new(AgentConfig::default());
        let id = registry.spawn(0.0, 80.0, &terrain).unwrap();
        let before = registry.get(id).unwrap().position;
        let mut avatar = avatar();
        for step in 0..10 {
            registry.update_all(&mut avatar, &terrain, step as f64 * 0.016);
        }
        assert_eq!(registry.get(id).unwrap().position, before);
        assert_eq!(avatar.health(), avatar.max_health());
    }
}
