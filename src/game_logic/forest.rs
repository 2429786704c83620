//! Procedural forest layout: trees, the rocks beside them, and leaf clusters

use crate::game_logic::bounds::{ObstacleShape, ROCK_SCALE, TRUNK_HEIGHT};
use crate::game_logic::errors::{DarkwoodError, DarkwoodResult};
use crate::resources::GameSettings;
use bevy::prelude::*;
use rand::Rng;

/// Rocks rest at this height regardless of their parent tree
const ROCK_CENTER_Y: f32 = 1.0;
/// Height of the canopy leaf clusters
const CANOPY_Y: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Tree,
    Rock,
}

impl ObstacleKind {
    pub fn shape(self) -> ObstacleShape {
        match self {
            ObstacleKind::Tree => ObstacleShape::TRUNK,
            ObstacleKind::Rock => ObstacleShape::ROCK,
        }
    }
}

/// A solid obstacle placed once during generation. Position and scale never change.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestObstacle {
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
}

impl ForestObstacle {
    pub fn tree(x: f32, z: f32) -> Self {
        Self {
            kind: ObstacleKind::Tree,
            position: Vec3::new(x, TRUNK_HEIGHT * 0.5, z),
            scale: Vec3::ONE,
            visible: true,
        }
    }

    pub fn rock(x: f32, z: f32) -> Self {
        Self {
            kind: ObstacleKind::Rock,
            position: Vec3::new(x, ROCK_CENTER_Y, z),
            scale: Vec3::splat(ROCK_SCALE),
            visible: true,
        }
    }
}

/// Generated forest. Leaves are decoration only and never collide.
#[derive(Debug, Clone, Default)]
pub struct ForestLayout {
    pub obstacles: Vec<ForestObstacle>,
    pub leaf_clusters: Vec<Vec3>,
}

impl ForestLayout {
    pub fn tree_count(&self) -> usize {
        self.count(ObstacleKind::Tree)
    }

    pub fn rock_count(&self) -> usize {
        self.count(ObstacleKind::Rock)
    }

    fn count(&self, kind: ObstacleKind) -> usize {
        self.obstacles.iter().filter(|o| o.kind == kind).count()
    }
}

/// Square keep-out zone on the ground plane, measured on x and z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearing {
    pub center: Vec2,
    pub half_extent: f32,
}

impl Clearing {
    /// Strict comparison: a point exactly on the edge is outside
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (x - self.center.x).abs() < self.half_extent && (z - self.center.y).abs() < self.half_extent
    }
}

/// Parameters for forest generation
#[derive(Debug, Clone, Copy)]
pub struct ForestConfig {
    pub tree_count: u32,
    pub rock_chance: f32,
    pub rock_jitter: f32,
    pub field_half_extent: f32,
    pub clearing: Clearing,
    pub max_placement_attempts: u32,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self::from(&GameSettings::default())
    }
}

impl From<&GameSettings> for ForestConfig {
    fn from(settings: &GameSettings) -> Self {
        Self {
            tree_count: settings.tree_count,
            rock_chance: settings.rock_chance.get(),
            rock_jitter: settings.rock_jitter.get(),
            field_half_extent: settings.field_half_extent.get(),
            clearing: Clearing {
                center: settings.clearing_center(),
                half_extent: settings.clearing_half_extent.get(),
            },
            max_placement_attempts: settings.max_placement_attempts,
        }
    }
}

/// Uniform sample in `[-half_extent, half_extent)`
pub fn sample_field_coordinate<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> f32 {
    rng.r#gen::<f32>() * half_extent * 2.0 - half_extent
}

/// Scatter trees over the field, keeping the clearing empty, and drop a rock
/// beside each tree with `rock_chance` probability.
///
/// Rocks are jittered around their parent and are not kept out of the clearing.
pub fn generate_forest<R: Rng + ?Sized>(
    config: &ForestConfig,
    rng: &mut R,
) -> DarkwoodResult<ForestLayout> {
    let mut layout = ForestLayout {
        obstacles: Vec::with_capacity(config.tree_count as usize * 2),
        leaf_clusters: Vec::with_capacity(config.tree_count as usize * 4),
    };

    for index in 0..config.tree_count as usize {
        let (x, z) = place_tree(config, rng, index)?;

        layout.obstacles.push(ForestObstacle::tree(x, z));
        layout.leaf_clusters.extend([
            Vec3::new(x, CANOPY_Y, z),
            Vec3::new(x + 1.0, CANOPY_Y, z),
            Vec3::new(x - 1.0, CANOPY_Y, z),
            Vec3::new(x, CANOPY_Y, z + 1.0),
        ]);

        if rng.r#gen::<f32>() < config.rock_chance {
            let rock_x = x + sample_field_coordinate(rng, config.rock_jitter);
            let rock_z = z + sample_field_coordinate(rng, config.rock_jitter);
            layout.obstacles.push(ForestObstacle::rock(rock_x, rock_z));
        }
    }

    Ok(layout)
}

fn place_tree<R: Rng + ?Sized>(
    config: &ForestConfig,
    rng: &mut R,
    index: usize,
) -> DarkwoodResult<(f32, f32)> {
    for _ in 0..config.max_placement_attempts {
        let x = sample_field_coordinate(rng, config.field_half_extent);
        let z = sample_field_coordinate(rng, config.field_half_extent);
        if !config.clearing.contains(x, z) {
            return Ok((x, z));
        }
    }

    Err(DarkwoodError::PlacementExhausted {
        index,
        attempts: config.max_placement_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_no_tree_inside_clearing() {
        let config = ForestConfig::default();
        let mut rng = Pcg64::seed_from_u64(7);

        let layout = generate_forest(&config, &mut rng).unwrap();

        assert_eq!(layout.tree_count(), 400);
        for tree in layout.obstacles.iter().filter(|o| o.kind == ObstacleKind::Tree) {
            assert!(!config.clearing.contains(tree.position.x, tree.position.z));
            assert!(tree.position.x >= -80.0 && tree.position.x < 80.0);
            assert!(tree.position.z >= -80.0 && tree.position.z < 80.0);
        }
    }

    #[test]
    fn test_same_seed_same_forest() {
        let config = ForestConfig::default();
        let first = generate_forest(&config, &mut Pcg64::seed_from_u64(42)).unwrap();
        let second = generate_forest(&config, &mut Pcg64::seed_from_u64(42)).unwrap();

        assert_eq!(first.obstacles, second.obstacles);
        assert_eq!(first.leaf_clusters, second.leaf_clusters);
    }

    #[test]
    fn test_rock_chance_extremes() {
        let mut config = ForestConfig {
            tree_count: 50,
            rock_chance: 0.0,
            ..ForestConfig::default()
        };
        let none = generate_forest(&config, &mut Pcg64::seed_from_u64(1)).unwrap();
        assert_eq!(none.rock_count(), 0);

        config.rock_chance = 1.0;
        let all = generate_forest(&config, &mut Pcg64::seed_from_u64(1)).unwrap();
        assert_eq!(all.rock_count(), 50);
    }

    #[test]
    fn test_rocks_stay_near_parent_tree() {
        let config = ForestConfig {
            tree_count: 100,
            rock_chance: 1.0,
            ..ForestConfig::default()
        };
        let layout = generate_forest(&config, &mut Pcg64::seed_from_u64(3)).unwrap();

        // With every tree getting a rock, each rock directly follows its tree
        for pair in layout.obstacles.chunks(2) {
            let (tree, rock) = (&pair[0], &pair[1]);
            assert_eq!(tree.kind, ObstacleKind::Tree);
            assert_eq!(rock.kind, ObstacleKind::Rock);
            assert!((rock.position.x - tree.position.x).abs() <= 2.5 + 1e-3);
            assert!((rock.position.z - tree.position.z).abs() <= 2.5 + 1e-3);
            assert_eq!(rock.position.y, 1.0);
            assert_eq!(rock.scale, Vec3::splat(1.5));
        }
    }

    #[test]
    fn test_four_leaf_clusters_per_tree() {
        let config = ForestConfig {
            tree_count: 10,
            ..ForestConfig::default()
        };
        let layout = generate_forest(&config, &mut Pcg64::seed_from_u64(9)).unwrap();

        assert_eq!(layout.leaf_clusters.len(), 40);
        assert!(layout.leaf_clusters.iter().all(|leaf| leaf.y == 6.0));
    }

    #[test]
    fn test_unplaceable_tree_reports_error() {
        let config = ForestConfig {
            tree_count: 1,
            clearing: Clearing {
                center: Vec2::ZERO,
                half_extent: 500.0,
            },
            max_placement_attempts: 25,
            ..ForestConfig::default()
        };

        let result = generate_forest(&config, &mut Pcg64::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(DarkwoodError::PlacementExhausted { index: 0, attempts: 25 })
        ));
    }

    #[test]
    fn test_clearing_edge_is_outside() {
        let clearing = Clearing {
            center: Vec2::new(0.0, -30.0),
            half_extent: 10.0,
        };

        assert!(clearing.contains(0.0, -30.0));
        assert!(clearing.contains(9.9, -21.0));
        assert!(!clearing.contains(10.0, -30.0));
        assert!(!clearing.contains(0.0, -20.0));
        assert!(!clearing.contains(0.0, 20.0));
    }
}
