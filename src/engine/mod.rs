// Engine module - presentation helpers around the simulation core
// Input, camera, ECS render mirror and HUD. Nothing here mutates the game.

pub mod camera;
pub mod components;
pub mod hud;
pub mod input;
pub mod systems;

// Re-export commonly used items
pub use components::*;
