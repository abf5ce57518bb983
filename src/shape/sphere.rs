use crate::ray::Ray;
use crate::tuple::{Point, Vector};

/// Unit sphere at the object-space origin.
pub(super) fn intersect(ray: &Ray) -> Option<(f64, f64)> {
    let sphere_to_ray = ray.origin - Point::zero();
    let a = ray.direction.dot(&ray.direction);
    let b = 2. * ray.direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - 1.;
    let discriminant = b.mul_add(b, -(4. * a * c));

    if discriminant < 0. {
        return None;
    }

    let t1 = (-b - discriminant.sqrt()) / (2. * a);
    let t2 = (-b + discriminant.sqrt()) / (2. * a);
    Some((t1, t2))
}

pub(super) fn normal(p: &Point) -> Vector {
    (*p - Point::zero()).normalize()
}
