// Simulation core: terrain, avatar, hostile agents and melee combat.
// Pure per-frame logic with no rendering or windowing dependencies.

pub mod agent;
pub mod avatar;
pub mod combat;
pub mod config;
pub mod error;
pub mod registry;
pub mod scenery;
pub mod snapshot;
pub mod terrain;
pub mod world;

// Re-export commonly used items
pub use agent::{Agent, AgentId, BehaviorState, VisualState};
pub use avatar::{AvatarState, Intent};
pub use config::GameConfig;
pub use error::{ConfigError, SimError};
pub use registry::AgentRegistry;
pub use snapshot::{AgentView, AvatarView, Snapshot};
pub use terrain::HeightField;
pub use world::{TickOutcome, World};
