use crate::ray::Ray;
use crate::tuple::{Point, Vector, EPSILON};
use std::mem::swap;

/// Axis-aligned cube spanning -1 to +1 on every axis.
pub(super) fn intersect(ray: &Ray) -> Option<(f64, f64)> {
    let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x);
    let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y);
    let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z);

    let tmin = xtmin.max(ytmin).max(ztmin);
    let tmax = xtmax.min(ytmax).min(ztmax);

    if tmin > tmax {
        return None;
    }

    Some((tmin, tmax))
}

pub(super) fn normal(p: &Point) -> Vector {
    let maxc = p.x.abs().max(p.y.abs()).max(p.z.abs());

    if maxc == p.x.abs() {
        Vector::new(p.x, 0., 0.)
    } else if maxc == p.y.abs() {
        Vector::new(0., p.y, 0.)
    } else {
        Vector::new(0., 0., p.z)
    }
}

fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    let tmin_numerator = -1. - origin;
    let tmax_numerator = 1. - origin;
    let mut tmin;
    let mut tmax;

    if direction.abs() >= EPSILON {
        tmin = tmin_numerator / direction;
        tmax = tmax_numerator / direction;
    } else {
        tmin = tmin_numerator * f64::INFINITY;
        tmax = tmax_numerator * f64::INFINITY;
    }

    if tmin > tmax {
        swap(&mut tmin, &mut tmax);
    }

    (tmin, tmax)
}

#[cfg(test)]
mod tests {
    use crate::ray::Ray;
    use crate::shape::Shape;
    use crate::tuple::{Point, Vector};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(Point::new(5., 0.5, 0.), Vector::new(-1., 0., 0.), 4., 6. ; "positive x")]
    #[test_case(Point::new(-5., 0.5, 0.), Vector::new(1., 0., 0.), 4., 6. ; "negative x")]
    #[test_case(Point::new(0.5, 5.0, 0.), Vector::new(0., -1., 0.), 4., 6. ; "positive y")]
    #[test_case(Point::new(0.5, -5.0, 0.), Vector::new(0., 1., 0.), 4., 6. ; "negative y")]
    #[test_case(Point::new(0.5, 0.0, 5.), Vector::new(0., 0., -1.), 4., 6. ; "positive z")]
    #[test_case(Point::new(0.5, 0.0, -5.), Vector::new(0., 0., 1.), 4., 6. ; "negative z")]
    #[test_case(Point::new(0., 0.5, 0.), Vector::new(0., 0., 1.), -1., 1. ; "inside")]
    pub fn ray_intersects_cube(origin: Point, direction: Vector, t1: f64, t2: f64) {
        let c = Shape::cube();
        let r = Ray::new(origin, direction);
        let xs = c.intersect(&r);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].t, t1);
        assert_eq!(xs[1].t, t2);
    }

    #[test_case(Point::new(-2., 0.0, 0.), Vector::new(0.2673, 0.5345, 0.8018))]
    #[test_case(Point::new(0., -2.0, 0.), Vector::new(0.8018, 0.2673, 0.5345))]
    #[test_case(Point::new(0., 0., -2.), Vector::new(0.5345, 0.8018, 0.2673))]
    #[test_case(Point::new(2., 0., 2.), Vector::new(0., 0., -1.))]
    #[test_case(Point::new(0., 2., 2.), Vector::new(0., -1., 0.))]
    #[test_case(Point::new(2., 2., 0.), Vector::new(-1., 0., 0.))]
    pub fn ray_misses_cube(origin: Point, direction: Vector) {
        let c = Shape::cube();
        let r = Ray::new(origin, direction);
        assert!(c.intersect(&r).is_empty());
    }

    #[test_case(Point::new(1., -0.5, -0.8), Vector::new(1., 0., 0.))]
    #[test_case(Point::new(-1., -0.2, 0.9), Vector::new(-1., 0., 0.))]
    #[test_case(Point::new(-0.4, 1.0, -0.1), Vector::new(0., 1., 0.))]
    #[test_case(Point::new(0.3, -1.0, -0.7), Vector::new(0., -1., 0.))]
    #[test_case(Point::new(-0.6, 0.3, 1.0), Vector::new(0., 0., 1.))]
    #[test_case(Point::new(0.4, 0.4, -1.0), Vector::new(0., 0., -1.))]
    #[test_case(Point::new(1.0, 1.0, 1.0), Vector::new(1., 0., 0.) ; "corner one")]
    #[test_case(Point::new(-1.0, -1.0, -1.0), Vector::new(-1., 0., 0.); "corner two")]
    pub fn normal_at_surface_of_cube(point: Point, expected: Vector) {
        let c = Shape::cube();
        let normal = c.normal_at(&point, None);
        assert_eq!(normal, expected);
    }
}
