use crate::ray::Ray;
use crate::tuple::{approx_cmp, approx_eq, Point, Vector, EPSILON};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Double-napped cone with its apex at the object-space origin, radius
/// equal to |y|, optionally truncated and capped.
#[derive(Debug, Copy, Clone)]
pub struct Cone {
    pub minimum: f64,
    pub maximum: f64,
    pub is_closed: bool,
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            is_closed: false,
        }
    }
}

impl Cone {
    pub(super) fn intersect(&self, ray: &Ray) -> SmallVec<[f64; 4]> {
        let mut res = SmallVec::new();

        let d = ray.direction;
        let o = ray.origin;
        let a = d.z.mul_add(d.z, d.x.mul_add(d.x, -(d.y * d.y)));
        let b = 2. * o.z.mul_add(d.z, o.x.mul_add(d.x, -(o.y * d.y)));
        let c = o.z.mul_add(o.z, o.x.mul_add(o.x, -(o.y * o.y)));

        if approx_eq(a, 0.) {
            // parallel to one half of the cone; a single body hit remains
            if !approx_eq(b, 0.) {
                let t = -c / (2. * b);
                if self.within_truncation(ray, t) {
                    res.push(t);
                }
            }
            self.intersect_caps(ray, &mut res);
            return res;
        }

        let discriminant = b.mul_add(b, -(4. * a * c));
        if approx_cmp(discriminant, 0.) == Ordering::Less {
            return res;
        }

        let mut t0 = (-b - discriminant.sqrt()) / (2. * a);
        let mut t1 = (-b + discriminant.sqrt()) / (2. * a);

        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if self.within_truncation(ray, t0) {
            res.push(t0);
        }
        if self.within_truncation(ray, t1) {
            res.push(t1);
        }

        self.intersect_caps(ray, &mut res);
        res
    }

    pub(super) fn normal(&self, p: &Point) -> Vector {
        let distance = p.z.mul_add(p.z, p.x.powi(2));

        if distance < self.maximum.powi(2) && p.y >= self.maximum - EPSILON {
            return Vector::new(0., 1., 0.);
        }

        if distance < self.minimum.powi(2) && p.y <= self.minimum + EPSILON {
            return Vector::new(0., -1., 0.);
        }

        let mut y = distance.sqrt();
        if p.y > 0. {
            y = -y;
        }

        Vector::new(p.x, y, p.z)
    }

    fn within_truncation(&self, ray: &Ray, t: f64) -> bool {
        let y = t.mul_add(ray.direction.y, ray.origin.y);
        approx_cmp(self.minimum, y) == Ordering::Less && approx_cmp(y, self.maximum) == Ordering::Less
    }

    fn check_cap(ray: &Ray, t: f64, radius: f64) -> bool {
        let x = t.mul_add(ray.direction.x, ray.origin.x);
        let z = t.mul_add(ray.direction.z, ray.origin.z);
        approx_cmp(z.mul_add(z, x.powi(2)), radius * radius) != Ordering::Greater
    }

    fn intersect_caps(&self, ray: &Ray, xs: &mut SmallVec<[f64; 4]>) {
        if !self.is_closed || approx_eq(ray.direction.y, 0.) {
            return;
        }

        let t0 = (self.minimum - ray.origin.y) / ray.direction.y;
        if Self::check_cap(ray, t0, self.minimum) {
            xs.push(t0);
        }

        let t1 = (self.maximum - ray.origin.y) / ray.direction.y;
        if Self::check_cap(ray, t1, self.maximum) {
            xs.push(t1);
        }
    }
}
