use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::tuple::{Point, EPSILON};
use derive_more::Constructor;

/// Axis-aligned box in some parent frame. Groups cache one of these over
/// their children and cull rays with the slab test before recursing.
#[derive(Debug, Constructor, Copy, Clone, Eq, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Neutral element for `merge`.
    pub fn empty() -> Self {
        Self::new(
            Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }

    pub fn infinite() -> Self {
        Self::new(
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        )
    }

    pub fn add_point(&mut self, p: Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn merge(&mut self, other: Self) {
        if other == Self::empty() {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    fn is_finite(&self) -> bool {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
        .iter()
        .all(|c| c.is_finite())
    }

    /// Maps the eight corners through `transform` and re-wraps them. A box
    /// with an unbounded extent cannot be cornered, so it stays infinite;
    /// an empty box stays empty.
    pub fn transform(&self, transform: &Matrix4) -> Self {
        if *self == Self::empty() {
            return *self;
        }
        if !self.is_finite() {
            return Self::infinite();
        }

        let corners = [
            Point::new(self.min.x, self.min.y, self.min.z),
            Point::new(self.max.x, self.min.y, self.min.z),
            Point::new(self.min.x, self.max.y, self.min.z),
            Point::new(self.min.x, self.min.y, self.max.z),
            Point::new(self.max.x, self.max.y, self.min.z),
            Point::new(self.max.x, self.min.y, self.max.z),
            Point::new(self.min.x, self.max.y, self.max.z),
            Point::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut result = Self::empty();
        for corner in corners {
            result.add_point(transform * corner);
        }
        result
    }

    pub fn intersects(&self, ray: &Ray) -> bool {
        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x, self.min.x, self.max.x);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y, self.min.y, self.max.y);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z, self.min.z, self.max.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        tmin <= tmax
    }
}

fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let tmin_numerator = min - origin;
    let tmax_numerator = max - origin;

    let (mut tmin, mut tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (
            tmin_numerator * f64::INFINITY,
            tmax_numerator * f64::INFINITY,
        )
    };

    if tmin > tmax {
        std::mem::swap(&mut tmin, &mut tmax);
    }

    (tmin, tmax)
}
