use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::interactable::ObjectId;
use crate::world::StoreWorld;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub object: ObjectId,
    pub distance: f64,
    pub point: Vec3,
}

/// Deterministic ray picking over the eligible object set.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Hits at exactly the same distance tie-break on the lower object id.
///
/// Notes:
/// - Intersection uses object bounds (`StoreWorld::bounds`); eligible
///   objects without bounds are skipped.
/// - Only ids in `eligible` are tested, never the full world; that is what
///   makes zone gating effective.
pub fn pick_ray(world: &StoreWorld, ray: Ray, eligible: &[ObjectId]) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;
    let mut best: Option<(f64, ObjectId)> = None;

    for &object in eligible {
        let Some(bounds) = world.bounds(object) else {
            continue;
        };
        let Some(t) = ray_aabb_hit_t(ray.origin, dir, bounds.min, bounds.max) else {
            continue;
        };

        best = match best {
            None => Some((t, object)),
            Some((bt, bo)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| object.cmp(&bo));
                if ord.is_lt() { Some((t, object)) } else { Some((bt, bo)) }
            }
        };
    }

    let (t, object) = best?;
    Some(PickHit {
        object,
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

/// Slabs intersection; returns entry distance along the ray.
fn ray_aabb_hit_t(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f64> {
    let mut t_min = 0.0_f64;
    let mut t_max = f64::INFINITY;

    let origin = [origin.x, origin.y, origin.z];
    let dir = [dir.x, dir.y, dir.z];
    let lo = [min.x, min.y, min.z];
    let hi = [max.x, max.y, max.z];

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < 1e-12 {
            if o < lo[axis] || o > hi[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (lo[axis] - o) * inv;
        let mut t2 = (hi[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}
