use glam::{Mat4, Vec2, Vec3};

/// A world-space ray. `direction` is kept normalized.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Express the ray in the local space of an object with `world` transform.
    ///
    /// The local direction is not renormalized, so a parameter `t` found in
    /// local space maps back to the same point along the world ray.
    pub fn to_local(&self, world: &Mat4) -> (Vec3, Vec3) {
        let inv = world.inverse();
        (
            inv.transform_point3(self.origin),
            inv.transform_vector3(self.direction),
        )
    }
}

/// Convert canvas pixel coordinates to normalized device coordinates.
///
/// Returns `None` for non-finite input, an empty viewport, or a point
/// outside the viewport.
pub fn screen_to_ndc(sx: f32, sy: f32, width: u32, height: u32) -> Option<Vec2> {
    if !sx.is_finite() || !sy.is_finite() || width == 0 || height == 0 {
        return None;
    }
    let w = width as f32;
    let h = height as f32;
    if sx < 0.0 || sy < 0.0 || sx > w || sy > h {
        return None;
    }
    Some(Vec2::new((2.0 * sx / w) - 1.0, 1.0 - (2.0 * sy / h)))
}

/// Slab test against an axis-aligned box centered at the local origin.
///
/// Returns the nearest non-negative ray parameter.
pub fn ray_box(origin: Vec3, dir: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let h = half_extents[axis];
        if d.abs() < 1e-8 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (-h - o) * inv;
        let mut t1 = (h - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

/// Intersect with a disc of `radius` lying in the local XY plane.
pub fn ray_disc(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    if dir.z.abs() < 1e-8 {
        return None;
    }
    let t = -origin.z / dir.z;
    if t < 0.0 {
        return None;
    }
    let p = origin + dir * t;
    (p.x * p.x + p.y * p.y <= radius * radius).then_some(t)
}
