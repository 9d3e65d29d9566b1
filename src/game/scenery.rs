// Static scenery and the placement policy shared by trees and agents.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::config::MapConfig;
use super::terrain::HeightField;

/// A tree: trunk base on the terrain surface. Never mutated after placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub position: Vec3,
}

/// Give up on a slot after this many rejected candidates.
const MAX_ATTEMPTS: usize = 64;

/// Uniformly scatter up to `count` points inside the map square, keeping the
/// spawn clearing around the origin empty.
///
/// Returns fewer than `count` points only when the clearing covers nearly
/// the whole map.
pub fn scatter(count: usize, map: &MapConfig, rng: &mut impl Rng) -> Vec<Vec2> {
    let half = map.half_extent;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        for _ in 0..MAX_ATTEMPTS {
            let p = Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
            if p.length() >= map.spawn_clearing {
                out.push(p);
                break;
            }
        }
    }
    out
}

pub fn plant_trees(points: &[Vec2], terrain: &HeightField) -> Vec<Tree> {
    points
        .iter()
        .map(|p| Tree { position: Vec3::new(p.x, terrain.height(p.x, p.y), p.y) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::TerrainConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[rstest]
    fn scatter_respects_bounds_and_clearing() {
        let map = MapConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let points = scatter(200, &map, &mut rng);
        assert_eq!(points.len(), 200);
        for p in points {
            assert!(p.x.abs() <= map.half_extent && p.y.abs() <= map.half_extent);
            assert!(p.length() >= map.spawn_clearing);
        }
    }

    #[rstest]
    fn scatter_is_reproducible_for_a_seed() {
        let map = MapConfig::default();
        let a = scatter(10, &map, &mut StdRng::seed_from_u64(11));
        let b = scatter(10, &map, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[rstest]
    fn oversized_clearing_yields_nothing() {
        let map = MapConfig { half_extent: 5.0, spawn_clearing: 100.0, ..MapConfig::default() };
        assert!(scatter(5, &map, &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[rstest]
    fn trees_stand_on_terrain() {
        let terrain = HeightField::new(&TerrainConfig::default()).unwrap();
        let trees = plant_trees(&[Vec2::new(3.0, -8.0)], &terrain);
        assert_eq!(trees[0].position.y, terrain.height(3.0, -8.0));
    }
}
