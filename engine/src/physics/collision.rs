//! Collision detection module
//!
//! Narrow-phase overlap tests for the three shapes the world supports:
//! spheres (projectiles), boxes (robots, walls, props) and infinite planes
//! (ground, kill plane).
//!
//! Boxes are oriented in every test: sphere-versus-box works in the box's
//! local frame, box-versus-box runs a separating axis test.
//!
//! # Example
//!
//! ```ignore
//! use woborms_engine::physics::collision::sphere_cuboid;
//! use glam::{Quat, Vec3};
//!
//! let hit = sphere_cuboid(Vec3::new(0.0, 0.0, 1.1), 0.2, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
//! assert!(hit.is_some());
//! ```

use glam::{Mat3, Quat, Vec3};

use super::types::{RigidBody, Shape};

/// Result of a narrow-phase test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    /// Unit normal pointing from the first shape towards the second
    pub normal: Vec3,
    /// Penetration depth along `normal` (>= 0)
    pub depth: f32,
    /// Approximate world-space contact point
    pub point: Vec3,
}

impl Manifold {
    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Sphere versus sphere. Normal points from sphere 1 to sphere 2.
pub fn sphere_sphere(c1: Vec3, r1: f32, c2: Vec3, r2: f32) -> Option<Manifold> {
    let delta = c2 - c1;
    let dist_sq = delta.length_squared();
    let radii = r1 + r2;
    if dist_sq > radii * radii {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-6 { delta / dist } else { Vec3::Y };
    Some(Manifold {
        normal,
        depth: radii - dist,
        point: c1 + normal * r1,
    })
}

/// Sphere versus oriented box. Normal points from the box towards the sphere.
///
/// # Arguments
/// * `center`, `radius` - The sphere
/// * `box_pos`, `box_rot`, `half_extents` - The box, in world space
pub fn sphere_cuboid(
    center: Vec3,
    radius: f32,
    box_pos: Vec3,
    box_rot: Quat,
    half_extents: Vec3,
) -> Option<Manifold> {
    let inv = box_rot.inverse();
    let local = inv * (center - box_pos);
    let closest = local.clamp(-half_extents, half_extents);
    let d = local - closest;
    let dist_sq = d.length_squared();

    if dist_sq > radius * radius {
        return None;
    }

    let (normal_local, depth) = if dist_sq > 1e-12 {
        let dist = dist_sq.sqrt();
        (d / dist, radius - dist)
    } else {
        // Centre inside the box: push out through the nearest face
        let gaps = half_extents - local.abs();
        if gaps.x <= gaps.y && gaps.x <= gaps.z {
            (Vec3::X * local.x.signum(), gaps.x + radius)
        } else if gaps.y <= gaps.z {
            (Vec3::Y * local.y.signum(), gaps.y + radius)
        } else {
            (Vec3::Z * local.z.signum(), gaps.z + radius)
        }
    };

    Some(Manifold {
        normal: box_rot * normal_local,
        depth,
        point: box_pos + box_rot * closest,
    })
}

/// Sphere versus plane. Normal is the plane normal (plane towards sphere).
pub fn sphere_plane(center: Vec3, radius: f32, plane_point: Vec3, plane_normal: Vec3) -> Option<Manifold> {
    let n = plane_normal.normalize_or_zero();
    let dist = (center - plane_point).dot(n);
    if dist >= radius {
        return None;
    }
    Some(Manifold {
        normal: n,
        depth: radius - dist,
        point: center - n * dist,
    })
}

/// World-space AABB of an oriented box, returned as (min, max).
pub fn cuboid_aabb(pos: Vec3, rot: Quat, half_extents: Vec3) -> (Vec3, Vec3) {
    let m = Mat3::from_quat(rot);
    let extent = Vec3::new(
        m.x_axis.x.abs() * half_extents.x + m.y_axis.x.abs() * half_extents.y + m.z_axis.x.abs() * half_extents.z,
        m.x_axis.y.abs() * half_extents.x + m.y_axis.y.abs() * half_extents.y + m.z_axis.y.abs() * half_extents.z,
        m.x_axis.z.abs() * half_extents.x + m.y_axis.z.abs() * half_extents.y + m.z_axis.z.abs() * half_extents.z,
    );
    (pos - extent, pos + extent)
}

/// Oriented box versus oriented box (separating axis test).
///
/// The world AABBs reject distant pairs first. The contact normal points
/// from box 1 to box 2 along the axis of least penetration; face axes win
/// ties over edge axes.
pub fn cuboid_cuboid(
    pos1: Vec3,
    rot1: Quat,
    half1: Vec3,
    pos2: Vec3,
    rot2: Quat,
    half2: Vec3,
) -> Option<Manifold> {
    let (min1, max1) = cuboid_aabb(pos1, rot1, half1);
    let (min2, max2) = cuboid_aabb(pos2, rot2, half2);
    let overlap = max1.min(max2) - min1.max(min2);
    if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
        return None;
    }

    let m1 = Mat3::from_quat(rot1);
    let m2 = Mat3::from_quat(rot2);
    let axes1 = [m1.x_axis, m1.y_axis, m1.z_axis];
    let axes2 = [m2.x_axis, m2.y_axis, m2.z_axis];

    let mut candidates = Vec::with_capacity(15);
    candidates.extend(axes1);
    candidates.extend(axes2);
    for a in axes1 {
        for b in axes2 {
            candidates.push(a.cross(b));
        }
    }

    let delta = pos2 - pos1;
    let mut best: Option<(Vec3, f32)> = None;
    for axis in candidates {
        let len_sq = axis.length_squared();
        if len_sq < 1e-8 {
            continue;
        }
        let n = axis / len_sq.sqrt();
        let reach = |axes: &[Vec3; 3], half: Vec3| {
            axes[0].dot(n).abs() * half.x + axes[1].dot(n).abs() * half.y + axes[2].dot(n).abs() * half.z
        };
        let dist = delta.dot(n);
        let depth = reach(&axes1, half1) + reach(&axes2, half2) - dist.abs();
        if depth <= 0.0 {
            return None;
        }
        if best.is_none_or(|(_, d)| depth < d) {
            best = Some((n * sign_or_one(dist), depth));
        }
    }

    let (normal, depth) = best?;
    Some(Manifold {
        normal,
        depth,
        point: (min1.max(min2) + max1.min(max2)) * 0.5,
    })
}

/// Box versus plane. Normal is the plane normal (plane towards box).
pub fn cuboid_plane(
    pos: Vec3,
    rot: Quat,
    half_extents: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Manifold> {
    let n = plane_normal.normalize_or_zero();
    let m = Mat3::from_quat(rot);
    let projected = m.x_axis.dot(n).abs() * half_extents.x
        + m.y_axis.dot(n).abs() * half_extents.y
        + m.z_axis.dot(n).abs() * half_extents.z;
    let dist = (pos - plane_point).dot(n);
    if dist >= projected {
        return None;
    }
    Some(Manifold {
        normal: n,
        depth: projected - dist,
        point: pos - n * dist,
    })
}

/// Dispatch the narrow-phase test for two bodies.
///
/// Returns a manifold whose normal points from `a` towards `b`, or `None`
/// when the shapes do not overlap. Plane-versus-plane never collides.
pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<Manifold> {
    match (a.shape, b.shape) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            sphere_sphere(a.position, ra, b.position, rb)
        }
        (Shape::Sphere { radius }, Shape::Cuboid { half_extents }) => {
            sphere_cuboid(a.position, radius, b.position, b.rotation, half_extents).map(Manifold::flipped)
        }
        (Shape::Cuboid { half_extents }, Shape::Sphere { radius }) => {
            sphere_cuboid(b.position, radius, a.position, a.rotation, half_extents)
        }
        (Shape::Sphere { radius }, Shape::Plane { normal }) => {
            sphere_plane(a.position, radius, b.position, normal).map(Manifold::flipped)
        }
        (Shape::Plane { normal }, Shape::Sphere { radius }) => {
            sphere_plane(b.position, radius, a.position, normal)
        }
        (Shape::Cuboid { half_extents: ha }, Shape::Cuboid { half_extents: hb }) => {
            cuboid_cuboid(a.position, a.rotation, ha, b.position, b.rotation, hb)
        }
        (Shape::Cuboid { half_extents }, Shape::Plane { normal }) => {
            cuboid_plane(a.position, a.rotation, half_extents, b.position, normal).map(Manifold::flipped)
        }
        (Shape::Plane { normal }, Shape::Cuboid { half_extents }) => {
            cuboid_plane(b.position, b.rotation, half_extents, a.position, normal)
        }
        (Shape::Plane { .. }, Shape::Plane { .. }) => None,
    }
}

fn sign_or_one(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_sphere_sphere_overlap() {
        let m = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(m.normal, Vec3::X);
        assert!((m.depth - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_sphere_apart() {
        assert!(sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_sphere_cuboid_face() {
        let m = sphere_cuboid(Vec3::new(0.0, 0.0, 1.1), 0.2, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE).unwrap();
        assert!((m.normal - Vec3::Z).length() < 1e-5);
        assert!((m.depth - 0.1).abs() < 1e-5);
        assert!((m.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_cuboid_respects_rotation() {
        // A thin box rotated 45 degrees around Y no longer reaches along +X
        let half = Vec3::new(1.0, 1.0, 0.1);
        let rot = Quat::from_rotation_y(FRAC_PI_4);
        assert!(sphere_cuboid(Vec3::new(0.0, 0.0, 1.0), 0.1, Vec3::ZERO, Quat::IDENTITY, half).is_none());
        assert!(sphere_cuboid(Vec3::new(0.6, 0.0, -0.6), 0.1, Vec3::ZERO, rot, half).is_some());
    }

    #[test]
    fn test_sphere_inside_cuboid_pushes_out_nearest_face() {
        let m = sphere_cuboid(Vec3::new(0.0, 0.9, 0.0), 0.2, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE).unwrap();
        assert_eq!(m.normal, Vec3::Y);
        assert!((m.depth - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_plane() {
        let m = sphere_plane(Vec3::new(3.0, 0.1, 2.0), 0.2, Vec3::ZERO, Vec3::Y).unwrap();
        assert_eq!(m.normal, Vec3::Y);
        assert!((m.depth - 0.1).abs() < 1e-5);
        assert!(sphere_plane(Vec3::new(0.0, 5.0, 0.0), 0.2, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_sphere_far_below_plane_still_collides() {
        // Tunnelling through a plane is impossible: the whole lower half-space is solid
        assert!(sphere_plane(Vec3::new(0.0, -50.0, 0.0), 0.2, Vec3::ZERO, Vec3::Y).is_some());
    }

    #[test]
    fn test_cuboid_cuboid_least_axis() {
        let m = cuboid_cuboid(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::ONE,
            Vec3::new(1.8, 0.0, 0.0),
            Quat::IDENTITY,
            Vec3::ONE,
        )
        .unwrap();
        assert_eq!(m.normal, Vec3::X);
        assert!((m.depth - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_cuboid_cuboid_diagonal_wall_clears_nearby_box() {
        // A long wall at 45 degrees has a huge AABB, but the box beside it is clear
        let wall_rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let wall = Vec3::new(9.0, 1.0, 0.225);
        let near = cuboid_cuboid(Vec3::ZERO, wall_rot, wall, Vec3::new(3.0, 1.0, 3.0), Quat::IDENTITY, Vec3::ONE);
        assert!(near.is_none());
        let through = cuboid_cuboid(Vec3::ZERO, wall_rot, wall, Vec3::new(2.0, 1.0, -2.0), Quat::IDENTITY, Vec3::ONE);
        assert!(through.is_some());
    }

    #[test]
    fn test_cuboid_aabb_rotated_quarter_turn() {
        let (min, max) = cuboid_aabb(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(2.0, 1.0, 0.5),
        );
        assert!((max.x - 0.5).abs() < 1e-5);
        assert!((max.z - 2.0).abs() < 1e-5);
        assert!((min.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cuboid_plane() {
        let m = cuboid_plane(Vec3::new(0.0, 0.9, 0.0), Quat::IDENTITY, Vec3::ONE, Vec3::ZERO, Vec3::Y).unwrap();
        assert!((m.depth - 0.1).abs() < 1e-5);
        assert!(cuboid_plane(Vec3::new(0.0, 1.5, 0.0), Quat::IDENTITY, Vec3::ONE, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_collide_normal_points_from_a_to_b() {
        let ball = RigidBody::dynamic(Shape::Sphere { radius: 0.2 }, Vec3::new(0.0, 0.1, 0.0), 1.0, Vec3::ZERO);
        let ground = RigidBody::fixed(Shape::Plane { normal: Vec3::Y }, Vec3::ZERO);
        let m = collide(&ball, &ground).unwrap();
        assert_eq!(m.normal, -Vec3::Y);
        let m = collide(&ground, &ball).unwrap();
        assert_eq!(m.normal, Vec3::Y);
    }
}
