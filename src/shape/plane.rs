use crate::ray::Ray;
use crate::tuple::{Point, Vector, EPSILON};

/// XZ plane through the object-space origin.
pub(super) fn intersect(ray: &Ray) -> Option<f64> {
    if ray.direction.y.abs() < EPSILON {
        return None;
    }
    Some(-ray.origin.y / ray.direction.y)
}

pub(super) fn normal(_p: &Point) -> Vector {
    Vector::new(0., 1., 0.)
}
