// The World aggregate and the per-frame simulation tick.
//
// Tick order:
//   1. terminal?            → Halted, nothing mutates
//      avatar health == 0   → GameOver, nothing mutates
//   2. advance clock by dt
//   3. avatar locomotion, attack request gated by cooldown
//   4. registry update      → agent AI, agent strikes, prune previously defeated
//   5. player strike        → cone test against the live set
//   6. avatar health == 0   → GameOver once, terminal from the next call on
//
// The player strike resolves after the registry update so an agent it
// defeats appears as Defeated in this tick's snapshot and is pruned by the
// next one.

use glam::Vec3;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::agent::AgentId;
use super::avatar::{AvatarState, Intent};
use super::config::GameConfig;
use super::error::SimError;
use super::registry::AgentRegistry;
use super::scenery::{self, Tree};
use super::snapshot::{AgentView, AvatarView, Snapshot};
use super::terrain::HeightField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick ran and the avatar is still standing.
    Running,
    /// The avatar is defeated, whether by this tick or before it. Returned
    /// exactly once.
    GameOver,
    /// The world is terminal; nothing was updated.
    Halted,
}

#[derive(Debug, Clone)]
pub struct World {
    config: GameConfig,
    terrain: HeightField,
    avatar: AvatarState,
    agents: AgentRegistry,
    trees: Vec<Tree>,
    now: f64,
    ticks: u64,
    terminal: bool,
}

impl World {
    /// Build the terrain, place the avatar at the origin, and populate trees
    /// and agents according to the map's placement policy.
    pub fn new(config: GameConfig) -> Result<Self, SimError> {
        let mut world = Self::empty(config)?;

        let mut rng = StdRng::seed_from_u64(world.config.map.placement_seed);
        let tree_points = scenery::scatter(world.config.map.tree_count, &world.config.map, &mut rng);
        world.trees = scenery::plant_trees(&tree_points, &world.terrain);

        let agent_points = scenery::scatter(world.config.map.agent_count, &world.config.map, &mut rng);
        for p in agent_points {
            world.spawn_agent(p.x, p.y)?;
        }

        info!(
            "world ready: {} trees, {} agents, terrain seed {}",
            world.trees.len(),
            world.agents.len(),
            world.config.terrain.seed
        );
        Ok(world)
    }

    /// A world with terrain and avatar only. Agents are added with
    /// [`World::spawn_agent`].
    pub fn empty(config: GameConfig) -> Result<Self, SimError> {
        config.validate()?;
        let terrain = HeightField::new(&config.terrain)?;
        let spawn = Vec3::new(0.0, terrain.height(0.0, 0.0), 0.0);
        let avatar = AvatarState::new(spawn, config.avatar.clone());
        let agents = AgentRegistry::new(config.agent.clone());
        Ok(Self {
            config,
            terrain,
            avatar,
            agents,
            trees: Vec::new(),
            now: 0.0,
            ticks: 0,
            terminal: false,
        })
    }

    pub fn spawn_agent(&mut self, x: f32, z: f32) -> Result<AgentId, SimError> {
        self.agents.spawn(x, z, &self.terrain)
    }

    /// Run one frame of simulation.
    pub fn tick(&mut self, intent: &Intent, dt: f32) -> TickOutcome {
        if self.terminal {
            return TickOutcome::Halted;
        }
        if self.avatar.is_defeated() {
            // Health reached zero outside a tick: stop before anything moves.
            self.terminal = true;
            info!("avatar already defeated at t={:.1}s", self.now);
            return TickOutcome::GameOver;
        }

        if dt.is_finite() && dt > 0.0 {
            self.now += dt as f64;
        }
        self.ticks += 1;
        let now = self.now;

        self.avatar.update(intent);
        let strike = intent.attack_requested && self.avatar.try_begin_attack(now);

        self.agents.update_all(&mut self.avatar, &self.terrain, now);

        if strike {
            let hits = self.agents.apply_strike(&self.avatar, now);
            debug!("strike at t={:.3}: {} hit(s)", now, hits.len());
            for (id, hit) in &hits {
                trace!("  {:?}: {} dmg at d={:.2} angle={:.2}", id, hit.damage, hit.distance, hit.angle);
            }
        }

        if self.avatar.is_defeated() {
            self.terminal = true;
            info!("avatar defeated after {} ticks ({:.1}s)", self.ticks, now);
            return TickOutcome::GameOver;
        }
        TickOutcome::Running
    }

    pub fn snapshot(&self) -> Snapshot {
        let now = self.now;
        let avatar = AvatarView {
            position: self.avatar.position,
            yaw: self.avatar.yaw,
            health: self.avatar.health(),
            max_health: self.avatar.max_health(),
            attacking: self.avatar.is_attacking(now),
            damage_flash: self.avatar.is_flashing(now),
        };
        let agents = self
            .agents
            .iter()
            .map(|agent| AgentView {
                id: agent.id(),
                position: agent.position,
                yaw: agent.yaw,
                health: agent.health(),
                max_health: agent.max_health(),
                state: agent.state(),
                visual: agent.visual_state(),
            })
            .collect();
        Snapshot { time: now, avatar, agents, game_over: self.terminal }
    }

    pub fn config(&self) -> &GameConfig { &self.config }
    pub fn terrain(&self) -> &HeightField { &self.terrain }
    pub fn avatar(&self) -> &AvatarState { &self.avatar }
    #[cfg(test)]
    pub(crate) fn avatar_mut(&mut self) -> &mut AvatarState { &mut self.avatar }
    pub fn agents(&self) -> &AgentRegistry { &self.agents }
    pub fn trees(&self) -> &[Tree] { &self.trees }
    pub fn now(&self) -> f64 { self.now }
    pub fn is_game_over(&self) -> bool { self.terminal }
}
