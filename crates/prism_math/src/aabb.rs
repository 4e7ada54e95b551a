use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self { x, y, z }
    }

    /// Create an AABB from a center point and per-axis half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self::from_points(center - h, center + h)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Slab-method intersection of a ray with the box.
    ///
    /// Returns the parameter interval `[t_enter, t_exit]` where the ray is
    /// inside all three slabs, or `None` when the per-axis intervals do not
    /// overlap. A zero direction component yields an unbounded slab interval
    /// when the origin lies between the two planes of that axis and a miss
    /// otherwise, so no NaN ever enters the comparison.
    pub fn hit_interval(&self, r: &Ray) -> Option<Interval> {
        let mut ray_t = Interval::UNIVERSE;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let origin = r.origin[axis];
            let dir = r.direction[axis];

            let axis_t = if dir == 0.0 {
                if !slab.contains(origin) {
                    return None;
                }
                Interval::UNIVERSE
            } else {
                let adinv = 1.0 / dir;
                let mut t0 = (slab.min - origin) * adinv;
                let mut t1 = (slab.max - origin) * adinv;
                if adinv < 0.0 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                Interval::new(t0, t1)
            };

            ray_t = ray_t.intersect(&axis_t);
            if ray_t.is_empty() {
                return None;
            }
        }

        Some(ray_t)
    }
}
