use crate::ray::Ray;
use crate::tuple::{approx_cmp, approx_eq, Point, Vector, EPSILON};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Unit-radius cylinder along the y axis, optionally truncated and capped.
#[derive(Debug, Copy, Clone)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub is_closed: bool,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            is_closed: false,
        }
    }
}

impl Cylinder {
    pub(super) fn intersect(&self, ray: &Ray) -> SmallVec<[f64; 4]> {
        let mut res = SmallVec::new();

        let a = ray
            .direction
            .z
            .mul_add(ray.direction.z, ray.direction.x.powi(2));
        if approx_eq(a, 0.) {
            self.intersect_caps(ray, &mut res);
            return res;
        }

        let b = (2. * ray.origin.x).mul_add(ray.direction.x, 2. * ray.origin.z * ray.direction.z);
        let c = ray.origin.z.mul_add(ray.origin.z, ray.origin.x.powi(2)) - 1.;

        let discriminant = b.mul_add(b, -(4. * a * c));
        if approx_cmp(discriminant, 0.) == Ordering::Less {
            return res;
        }

        let mut t0 = (-b - discriminant.sqrt()) / (2. * a);
        let mut t1 = (-b + discriminant.sqrt()) / (2. * a);

        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        let y0 = t0.mul_add(ray.direction.y, ray.origin.y);
        if approx_cmp(self.minimum, y0) == Ordering::Less
            && approx_cmp(y0, self.maximum) == Ordering::Less
        {
            res.push(t0);
        }

        let y1 = t1.mul_add(ray.direction.y, ray.origin.y);
        if approx_cmp(self.minimum, y1) == Ordering::Less
            && approx_cmp(y1, self.maximum) == Ordering::Less
        {
            res.push(t1);
        }

        self.intersect_caps(ray, &mut res);
        res
    }

    pub(super) fn normal(&self, p: &Point) -> Vector {
        let distance = p.z.mul_add(p.z, p.x.powi(2));

        if approx_cmp(distance, 1.) == Ordering::Less && p.y >= self.maximum - EPSILON {
            return Vector::new(0., 1., 0.);
        }

        if approx_cmp(distance, 1.) == Ordering::Less && p.y <= self.minimum + EPSILON {
            return Vector::new(0., -1., 0.);
        }

        Vector::new(p.x, 0., p.z)
    }

    fn check_cap(ray: &Ray, t: f64) -> bool {
        let x = t.mul_add(ray.direction.x, ray.origin.x);
        let z = t.mul_add(ray.direction.z, ray.origin.z);
        approx_cmp(z.mul_add(z, x.powi(2)), 1.) != Ordering::Greater
    }

    fn intersect_caps(&self, ray: &Ray, xs: &mut SmallVec<[f64; 4]>) {
        if !self.is_closed || approx_eq(ray.direction.y, 0.) {
            return;
        }

        let t0 = (self.minimum - ray.origin.y) / ray.direction.y;
        if Self::check_cap(ray, t0) {
            xs.push(t0);
        }

        let t1 = (self.maximum - ray.origin.y) / ray.direction.y;
        if Self::check_cap(ray, t1) {
            xs.push(t1);
        }
    }
}
