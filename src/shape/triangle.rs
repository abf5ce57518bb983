use crate::ray::Ray;
use crate::tuple::{Point, Vector, EPSILON};

/// Flat triangle with a precomputed edge basis and face normal.
#[derive(Debug, Copy, Clone)]
pub struct Triangle {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub e1: Vector,
    pub e2: Vector,
    pub normal: Vector,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(&e1).normalize();
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
        }
    }

    /// Moeller-Trumbore. Returns `(t, u, v)` so smooth triangles can reuse
    /// the barycentric coordinates.
    pub(super) fn intersect(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross(&self.e2);
        let determinant = self.e1.dot(&dir_cross_e2);
        if determinant.abs() < EPSILON {
            return None;
        }

        let f = 1. / determinant;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(&dir_cross_e2);
        if !(0. ..=1.).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(&self.e1);
        let v = f * ray.direction.dot(&origin_cross_e1);
        if v < 0. || u + v > 1. {
            return None;
        }

        let t = f * self.e2.dot(&origin_cross_e1);
        Some((t, u, v))
    }
}

/// Triangle with per-vertex normals, interpolated barycentrically at hits.
#[derive(Debug, Copy, Clone)]
pub struct SmoothTriangle {
    pub triangle: Triangle,
    pub n1: Vector,
    pub n2: Vector,
    pub n3: Vector,
}

impl SmoothTriangle {
    pub fn new(p1: Point, p2: Point, p3: Point, n1: Vector, n2: Vector, n3: Vector) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }

    pub(super) fn normal(&self, uv: Option<(f64, f64)>) -> Vector {
        match uv {
            Some((u, v)) => self.n1 * (1. - u - v) + self.n2 * u + self.n3 * v,
            None => self.triangle.normal,
        }
    }
}
