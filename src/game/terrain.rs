// Deterministic terrain height field.
//
// Fractal value noise: each octave interpolates hashed lattice values with a
// quintic fade, so the surface is continuous everywhere. Octave sums are
// divided by the total octave weight, which keeps the raw noise inside
// [-1, 1] and the final height inside [-amplitude, amplitude].

use super::config::TerrainConfig;
use super::error::{ConfigError, SimError};

#[derive(Debug, Clone)]
pub struct HeightField {
    seed: u32,
    scale: f32,
    amplitude: f32,
    octaves: u32,
    persistence: f32,
}

impl HeightField {
    pub fn new(config: &TerrainConfig) -> Result<Self, SimError> {
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(ConfigError::NotPositive { field: "terrain.scale", value: config.scale }.into());
        }
        if !config.amplitude.is_finite() {
            return Err(ConfigError::NonFinite { field: "terrain.amplitude", value: config.amplitude }.into());
        }
        Ok(Self {
            seed: config.seed,
            scale: config.scale,
            amplitude: config.amplitude.abs(),
            octaves: config.octaves.max(1),
            persistence: if config.persistence.is_finite() { config.persistence.max(0.0) } else { 0.5 },
        })
    }

    pub fn scale(&self) -> f32 { self.scale }
    pub fn amplitude(&self) -> f32 { self.amplitude }

    /// Terrain elevation at world (x, z).
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let nx = x / self.scale;
        let nz = z / self.scale;

        let mut total = 0.0f32;
        let mut weight = 1.0f32;
        let mut frequency = 1.0f32;
        let mut max_weight = 0.0f32;
        for octave in 0..self.octaves {
            let seed = self.seed.wrapping_add(octave.wrapping_mul(1013));
            total += value_noise_2d(nx * frequency, nz * frequency, seed) * weight;
            max_weight += weight;
            weight *= self.persistence;
            frequency *= 2.0;
        }

        if max_weight <= 0.0 {
            return 0.0;
        }
        (total / max_weight).clamp(-1.0, 1.0) * self.amplitude
    }
}

// ============================================================================
// NOISE PRIMITIVES
// ============================================================================

/// 2D integer lattice hash → [0, 1].
fn lattice_value(i: i32, j: i32, seed: u32) -> f32 {
    let mut x = (i as u64).wrapping_mul(0x27d4_eb2d);
    x ^= (j as u64).wrapping_mul(0x1656_6791_9E37_79F9);
    x ^= (seed as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    (x as f64 / u64::MAX as f64) as f32
}

/// Single-octave value noise in [-1, 1].
fn value_noise_2d(x: f32, y: f32, seed: u32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let tx = x - x.floor();
    let ty = y - y.floor();
    // quintic fade for C2 continuity across cell borders
    let sx = tx * tx * tx * (tx * (tx * 6.0 - 15.0) + 10.0);
    let sy = ty * ty * ty * (ty * (ty * 6.0 - 15.0) + 10.0);

    let c00 = lattice_value(xi, yi, seed);
    let c10 = lattice_value(xi.wrapping_add(1), yi, seed);
    let c01 = lattice_value(xi, yi.wrapping_add(1), seed);
    let c11 = lattice_value(xi.wrapping_add(1), yi.wrapping_add(1), seed);

    let a = c00 + (c10 - c00) * sx;
    let b = c01 + (c11 - c01) * sx;
    (a + (b - a) * sy) * 2.0 - 1.0
}
