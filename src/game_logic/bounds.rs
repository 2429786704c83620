//! Obstacle shapes, their axis-aligned bounds, and ray/point queries against them

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

/// Tree trunk frustum dimensions
pub const TRUNK_TOP_RADIUS: f32 = 0.2;
pub const TRUNK_BOTTOM_RADIUS: f32 = 0.5;
pub const TRUNK_HEIGHT: f32 = 5.0;

/// Circumradius of the unscaled rock dodecahedron
pub const ROCK_RADIUS: f32 = 1.0;
pub const ROCK_SCALE: f32 = 1.5;

/// Target block dimensions, sized to match the player's eye height
pub const TARGET_BLOCK_SIZE: Vec3 = Vec3::new(0.5, 1.6, 0.5);

/// Largest coordinate of a unit-circumradius dodecahedron vertex: phi / sqrt(3)
const DODECAHEDRON_AXIS_EXTENT: f32 = 0.934_172_4;

/// Geometric shapes that make up the obstacle field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleShape {
    /// Upright conical frustum, widest at the base
    Frustum {
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
    },
    /// Regular dodecahedron given by its circumradius
    Dodecahedron { radius: f32 },
    Cuboid { size: Vec3 },
}

impl ObstacleShape {
    pub const TRUNK: Self = Self::Frustum {
        top_radius: TRUNK_TOP_RADIUS,
        bottom_radius: TRUNK_BOTTOM_RADIUS,
        height: TRUNK_HEIGHT,
    };

    pub const ROCK: Self = Self::Dodecahedron {
        radius: ROCK_RADIUS,
    };

    /// Half extents of the unscaled shape's bounding box
    pub fn half_extents(&self) -> Vec3 {
        match self {
            Self::Frustum {
                top_radius,
                bottom_radius,
                height,
            } => {
                let radius = top_radius.max(*bottom_radius);
                Vec3::new(radius, height * 0.5, radius)
            }
            Self::Dodecahedron { radius } => Vec3::splat(radius * DODECAHEDRON_AXIS_EXTENT),
            Self::Cuboid { size } => *size * 0.5,
        }
    }

    /// Bounding box of the shape placed at `center` with a per-axis `scale`
    pub fn bounding_box(&self, center: Vec3, scale: Vec3) -> Aabb3d {
        Aabb3d::new(center, self.half_extents() * scale.abs())
    }
}

/// Pentagonal faces of a regular dodecahedron with circumradius `radius`, each
/// as its outward normal and five corners wound counter-clockwise seen from outside.
///
/// The corner coordinates peak at `radius * phi / sqrt(3)` on every axis, which is
/// exactly the half extent `ObstacleShape::Dodecahedron` reports.
pub fn dodecahedron_faces(radius: f32) -> Vec<(Vec3, [Vec3; 5])> {
    let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
    let inv_phi = phi.recip();
    let scale = radius / 3.0_f32.sqrt();

    let mut corners = Vec::with_capacity(20);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    let mut normals = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            corners.push(Vec3::new(0.0, a * inv_phi, b * phi));
            corners.push(Vec3::new(a * inv_phi, b * phi, 0.0));
            corners.push(Vec3::new(a * phi, 0.0, b * inv_phi));

            normals.push(Vec3::new(0.0, a * phi, b).normalize());
            normals.push(Vec3::new(a * phi, b, 0.0).normalize());
            normals.push(Vec3::new(a, 0.0, b * phi).normalize());
        }
    }

    normals
        .into_iter()
        .map(|normal| {
            // The five corners furthest along a face normal form that face
            let mut ranked = corners.clone();
            ranked.sort_by(|a, b| b.dot(normal).total_cmp(&a.dot(normal)));
            let mut face = [ranked[0], ranked[1], ranked[2], ranked[3], ranked[4]];

            let center = face.iter().copied().sum::<Vec3>() / 5.0;
            let u = (face[0] - center).normalize();
            let w = normal.cross(u);
            let angle = |corner: &Vec3| {
                let offset = *corner - center;
                offset.dot(w).atan2(offset.dot(u))
            };
            face.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

            (normal, face.map(|corner| corner * scale))
        })
        .collect()
}

/// Inclusive point containment: a point on a face counts as inside
pub fn aabb_contains_point(aabb: &Aabb3d, point: Vec3) -> bool {
    let min = Vec3::from(aabb.min);
    let max = Vec3::from(aabb.max);
    point.cmpge(min).all() && point.cmple(max).all()
}

/// Distance along the ray to where it first touches the box, if it does at all.
///
/// Axis-parallel rays only hit when the origin already lies inside that axis's
/// slab, bounds included. Hits behind the origin are ignored, and so is an
/// origin strictly inside the box: only outward-facing surfaces are struck.
/// An origin on a face still reports distance zero.
///
/// ```
/// use bevy::math::bounding::Aabb3d;
/// use bevy::prelude::Vec3;
/// use darkwood::game_logic::bounds::ray_box_distance;
///
/// let block = Aabb3d::new(Vec3::new(0.0, 0.8, 0.0), Vec3::new(0.25, 0.8, 0.25));
/// let hit = ray_box_distance(Vec3::new(0.0, 1.6, 10.0), Vec3::NEG_Z, &block);
/// assert_eq!(hit, Some(9.75));
/// ```
pub fn ray_box_distance(origin: Vec3, direction: Vec3, aabb: &Aabb3d) -> Option<f32> {
    let min = Vec3::from(aabb.min);
    let max = Vec3::from(aabb.max);

    if origin.cmpgt(min).all() && origin.cmplt(max).all() {
        return None;
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() <= f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = d.recip();
        let t0 = (min[axis] - o) * inv;
        let t1 = (max[axis] - o) * inv;
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));

        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}
