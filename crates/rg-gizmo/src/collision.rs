//! Gizmo collision detection
//!
//! Ray casting against handle colliders. Every shape is tested in its node's
//! local space: the world ray is carried through the inverse world matrix, the
//! closed-form test runs there, and the hit point is carried back out so that
//! reported distances are world-space regardless of node scale.

use glam::{Mat4, Vec3};
use rg_core::{Collider, LayerMask, NodeId, Scene};

/// A half-line in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction, normalized for world rays
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Carry the ray through `matrix` without renormalizing, so `t` keeps
    /// meaning the same point on both sides
    fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// A collider struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Node owning the collider
    pub node: NodeId,
    /// World-space distance from the ray origin
    pub distance: f32,
}

/// Every collider on a layer in `mask` that `ray` passes through, nearest first.
pub fn raycast_all(scene: &Scene, ray: &Ray, mask: LayerMask) -> Vec<RaycastHit> {
    let mut hits: Vec<RaycastHit> = scene
        .nodes()
        .filter(|node| mask.contains(node.layer))
        .filter_map(|node| {
            let collider = node.collider.as_ref()?;
            let world = scene.world_matrix(node.id)?;
            let distance = intersect_collider(collider, &world, ray)?;
            Some(RaycastHit {
                node: node.id,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// World distance at which `ray` first meets `collider` placed at `world`.
pub fn intersect_collider(collider: &Collider, world: &Mat4, ray: &Ray) -> Option<f32> {
    if world.determinant().abs() < f32::EPSILON {
        return None;
    }
    let local = ray.transformed(&world.inverse());
    let t = match *collider {
        Collider::Cylinder { start, end, radius } => {
            ray_cylinder_intersection(local.origin, local.direction, start, end, radius)
        }
        Collider::Ring {
            normal,
            radius,
            thickness,
        } => ray_ring_intersection(
            local.origin,
            local.direction,
            Vec3::ZERO,
            normal,
            radius,
            thickness,
        ),
        Collider::Cuboid { half_extents } => {
            ray_box_intersection(local.origin, local.direction, -half_extents, half_extents)
        }
        Collider::Sphere { radius } => {
            ray_sphere_intersection(local.origin, local.direction, Vec3::ZERO, radius)
        }
    }?;
    Some((ray.at(t) - ray.origin).length())
}

/// Ray-cylinder intersection test.
///
/// Projects the ray into the plane perpendicular to the cylinder axis, solves
/// the resulting quadratic for the infinite cylinder, then rejects hits outside
/// the segment between `cylinder_start` and `cylinder_end`.
///
/// `ray_dir` need not be normalized; the returned `t` is in units of `ray_dir`.
pub fn ray_cylinder_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    cylinder_start: Vec3,
    cylinder_end: Vec3,
    radius: f32,
) -> Option<f32> {
    let cylinder_axis = (cylinder_end - cylinder_start).normalize();
    let cylinder_length = (cylinder_end - cylinder_start).length();

    // d = ray_dir - (ray_dir · axis) * axis
    let d = ray_dir - cylinder_axis * ray_dir.dot(cylinder_axis);
    // o = offset - (offset · axis) * axis
    let offset = ray_origin - cylinder_start;
    let o = offset - cylinder_axis * offset.dot(cylinder_axis);

    // at² + bt + c = 0
    let a = d.dot(d);
    if a < 1e-12 {
        // Ray runs along the axis
        return None;
    }
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)]
        .into_iter()
        .filter(|t| *t >= 0.0)
        .find(|t| {
            let projection = (ray_origin + ray_dir * *t - cylinder_start).dot(cylinder_axis);
            (0.0..=cylinder_length).contains(&projection)
        })
}

/// Ray-ring intersection test.
///
/// Intersects the ray with the ring's plane and accepts the hit when its
/// distance from `ring_center` is within `thickness` of `ring_radius`.
pub fn ray_ring_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    ring_center: Vec3,
    ring_normal: Vec3,
    ring_radius: f32,
    thickness: f32,
) -> Option<f32> {
    let denom = ray_dir.dot(ring_normal);

    // Nearly parallel to the plane
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (ring_center - ray_origin).dot(ring_normal) / denom;
    if t < 0.0 {
        return None;
    }

    let distance_from_center = (ray_origin + ray_dir * t - ring_center).length();
    ((distance_from_center - ring_radius).abs() <= thickness).then_some(t)
}

/// Ray-box intersection (slab test) against an axis-aligned box.
pub fn ray_box_intersection(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        if dir.abs() < 1e-12 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - origin) / dir;
        let t2 = (max[axis] - origin) / dir;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Ray-sphere intersection test.
pub fn ray_sphere_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = ray_origin - center;
    let a = ray_dir.dot(ray_dir);
    let b = 2.0 * oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a < 1e-12 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)]
        .into_iter()
        .find(|t| *t >= 0.0)
}
