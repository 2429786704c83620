//! Flat collision index over the static obstacle field

use crate::game_logic::bounds::{aabb_contains_point, ObstacleShape};
use crate::game_logic::forest::{ForestObstacle, ObstacleKind};
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

/// Core trait for anything that vetoes movement into its bounds
pub trait Obstacle: Send + Sync {
    fn shape(&self) -> ObstacleShape;

    fn world_position(&self) -> Vec3;

    fn world_scale(&self) -> Vec3 {
        Vec3::ONE
    }

    /// Bounds derived from the current transform on every call
    fn bounding_box(&self) -> Aabb3d {
        self.shape()
            .bounding_box(self.world_position(), self.world_scale())
    }

    fn contains_point(&self, world_pos: Vec3) -> bool {
        aabb_contains_point(&self.bounding_box(), world_pos)
    }
}

impl Obstacle for ForestObstacle {
    fn shape(&self) -> ObstacleShape {
        self.kind.shape()
    }

    fn world_position(&self) -> Vec3 {
        self.position
    }

    fn world_scale(&self) -> Vec3 {
        self.scale
    }
}

/// Every solid obstacle in registration order. Queries are a linear scan, which
/// is fine for a few hundred entries queried twice a frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionIndex {
    obstacles: Vec<ForestObstacle>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle, returning its index
    pub fn register(&mut self, obstacle: ForestObstacle) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> &[ForestObstacle] {
        &self.obstacles
    }

    pub fn get(&self, index: usize) -> Option<&ForestObstacle> {
        self.obstacles.get(index)
    }

    /// True if any registered obstacle contains the point. Visibility is ignored.
    ///
    /// ```
    /// use bevy::prelude::Vec3;
    /// use darkwood::game_logic::collision::CollisionIndex;
    /// use darkwood::game_logic::forest::ForestObstacle;
    ///
    /// let mut index = CollisionIndex::new();
    /// index.register(ForestObstacle::tree(0.0, 0.0));
    ///
    /// assert!(index.would_collide(Vec3::new(0.2, 1.6, -0.3)));
    /// assert!(!index.would_collide(Vec3::new(0.0, 1.6, 2.0)));
    /// ```
    pub fn would_collide(&self, candidate: Vec3) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.contains_point(candidate))
    }

    /// Flip every tree and rock to the inverse of the first tree's visibility.
    /// Returns the new visibility, or `None` when there are no trees.
    pub fn toggle_visibility(&mut self) -> Option<bool> {
        let first_tree_visible = self
            .obstacles
            .iter()
            .find(|o| o.kind == ObstacleKind::Tree)?
            .visible;
        let visible = !first_tree_visible;

        for obstacle in &mut self.obstacles {
            obstacle.visible = visible;
        }

        Some(visible)
    }
}

impl FromIterator<ForestObstacle> for CollisionIndex {
    fn from_iter<I: IntoIterator<Item = ForestObstacle>>(iter: I) -> Self {
        Self {
            obstacles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> CollisionIndex {
        [
            ForestObstacle::tree(0.0, 0.0),
            ForestObstacle::rock(10.0, 0.0),
            ForestObstacle::tree(-10.0, 5.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_index_never_collides() {
        let index = CollisionIndex::new();

        assert!(index.is_empty());
        assert!(!index.would_collide(Vec3::ZERO));
    }

    #[test]
    fn test_trunk_blocks_at_eye_height() {
        let index = sample_index();

        assert!(index.would_collide(Vec3::new(0.5, 1.6, 0.5)));
        assert!(!index.would_collide(Vec3::new(0.51, 1.6, 0.0)));
        // Above the canopy line the trunk no longer blocks
        assert!(!index.would_collide(Vec3::new(0.0, 5.5, 0.0)));
    }

    #[test]
    fn test_scaled_rock_blocks() {
        let index = sample_index();

        assert!(index.would_collide(Vec3::new(11.3, 1.6, 1.3)));
        assert!(!index.would_collide(Vec3::new(11.5, 1.6, 0.0)));
    }

    #[test]
    fn test_register_returns_sequential_indices() {
        let mut index = CollisionIndex::new();

        assert_eq!(index.register(ForestObstacle::tree(1.0, 1.0)), 0);
        assert_eq!(index.register(ForestObstacle::rock(2.0, 2.0)), 1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(1).map(|o| o.kind), Some(ObstacleKind::Rock));
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let mut index = sample_index();
        let original: Vec<bool> = index.obstacles().iter().map(|o| o.visible).collect();

        assert_eq!(index.toggle_visibility(), Some(false));
        assert!(index.obstacles().iter().all(|o| !o.visible));

        assert_eq!(index.toggle_visibility(), Some(true));
        let restored: Vec<bool> = index.obstacles().iter().map(|o| o.visible).collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_toggle_keeps_positions_and_collisions() {
        let mut index = sample_index();
        let before = index.clone();
        let probe = Vec3::new(0.0, 1.6, 0.0);

        index.toggle_visibility();

        assert!(index.would_collide(probe));
        for (a, b) in before.obstacles().iter().zip(index.obstacles()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.scale, b.scale);
        }
    }

    #[test]
    fn test_toggle_resyncs_diverged_visibility() {
        let mut index = sample_index();
        index.obstacles[1].visible = false;

        // First tree is visible, so everything becomes hidden
        assert_eq!(index.toggle_visibility(), Some(false));
        assert!(index.obstacles().iter().all(|o| !o.visible));
    }

    #[test]
    fn test_toggle_without_trees_is_noop() {
        let mut index: CollisionIndex = [ForestObstacle::rock(0.0, 0.0)].into_iter().collect();

        assert_eq!(index.toggle_visibility(), None);
        assert!(index.obstacles()[0].visible);
    }
}
