// Elfwood: a single-player exploration/combat game on procedural terrain.

pub mod engine;
pub mod game;
pub mod logging;
