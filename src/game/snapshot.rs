// Render-ready view of the world after a tick. Plain data; the renderer
// never touches simulation state directly.

use glam::Vec3;

use super::agent::{AgentId, BehaviorState, VisualState};

#[derive(Debug, Clone, PartialEq)]
pub struct AvatarView {
    pub position: Vec3,
    pub yaw: f32,
    pub health: u32,
    pub max_health: u32,
    /// Inside the post-attack busy-window.
    pub attacking: bool,
    /// Recently hit by an agent.
    pub damage_flash: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Vec3,
    pub yaw: f32,
    pub health: u32,
    pub max_health: u32,
    pub state: BehaviorState,
    pub visual: VisualState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub avatar: AvatarView,
    pub agents: Vec<AgentView>,
    pub game_over: bool,
}

impl Snapshot {
    pub fn agents_remaining(&self) -> usize {
        self.agents.iter().filter(|a| a.visual != VisualState::Defeated).count()
    }
}
