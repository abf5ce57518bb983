use crate::shape::{Intersection, Shape};
use smallvec::SmallVec;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CsgOperation {
    Union,
    Intersection,
    Difference,
}

impl CsgOperation {
    /// Whether a boundary crossing is part of the combined surface, given
    /// which subtree was hit and which subtrees the ray is currently inside.
    fn keeps(self, left_hit: bool, in_left: bool, in_right: bool) -> bool {
        match self {
            Self::Union => (left_hit && !in_right) || (!left_hit && !in_left),
            Self::Intersection => (left_hit && in_right) || (!left_hit && in_left),
            Self::Difference => (left_hit && !in_right) || (!left_hit && in_left),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Csg {
    pub operation: CsgOperation,
    pub left: Box<Shape>,
    pub right: Box<Shape>,
}

/// Walks the merged, t-sorted crossings of both subtrees, toggling the
/// inside/outside state as each boundary passes.
pub(super) fn filter<'a>(
    csg: &Csg,
    xs: SmallVec<[Intersection<'a>; 8]>,
) -> SmallVec<[Intersection<'a>; 8]> {
    let mut in_left = false;
    let mut in_right = false;

    let mut result = SmallVec::new();
    for i in xs {
        let left_hit = csg.left.includes(i.object.get_id());

        if csg.operation.keeps(left_hit, in_left, in_right) {
            result.push(i);
        }

        if left_hit {
            in_left = !in_left;
        } else {
            in_right = !in_right;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::matrix::Matrix4;
    use crate::ray::Ray;
    use crate::shape::{CsgOperation, Intersection, Shape, ShapeKind};
    use crate::tuple::{Point, Vector};
    use pretty_assertions::assert_eq;
    use smallvec::SmallVec;
    use test_case::test_case;

    fn csg_parts(shape: &Shape) -> (&Shape, &Shape) {
        match &shape.kind {
            ShapeKind::Csg(csg) => (&csg.left, &csg.right),
            _ => panic!("not a csg"),
        }
    }

    #[test]
    pub fn csg_holds_operation_and_subtrees() {
        let c = Shape::csg(CsgOperation::Union, Shape::sphere(), Shape::cube());
        let (left, right) = csg_parts(&c);
        assert!(matches!(left.kind, ShapeKind::Sphere));
        assert!(matches!(right.kind, ShapeKind::Cube));
    }

    #[test_case(CsgOperation::Union, true, true, true, false)]
    #[test_case(CsgOperation::Union, true, true, false, true)]
    #[test_case(CsgOperation::Union, true, false, true, false)]
    #[test_case(CsgOperation::Union, true, false, false, true)]
    #[test_case(CsgOperation::Union, false, true, true, false)]
    #[test_case(CsgOperation::Union, false, true, false, false)]
    #[test_case(CsgOperation::Union, false, false, true, true)]
    #[test_case(CsgOperation::Union, false, false, false, true)]
    #[test_case(CsgOperation::Intersection, true, true, true, true)]
    #[test_case(CsgOperation::Intersection, true, true, false, false)]
    #[test_case(CsgOperation::Intersection, true, false, true, true)]
    #[test_case(CsgOperation::Intersection, true, false, false, false)]
    #[test_case(CsgOperation::Intersection, false, true, true, true)]
    #[test_case(CsgOperation::Intersection, false, true, false, true)]
    #[test_case(CsgOperation::Intersection, false, false, true, false)]
    #[test_case(CsgOperation::Intersection, false, false, false, false)]
    #[test_case(CsgOperation::Difference, true, true, true, false)]
    #[test_case(CsgOperation::Difference, true, true, false, true)]
    #[test_case(CsgOperation::Difference, true, false, true, false)]
    #[test_case(CsgOperation::Difference, true, false, false, true)]
    #[test_case(CsgOperation::Difference, false, true, true, true)]
    #[test_case(CsgOperation::Difference, false, true, false, true)]
    #[test_case(CsgOperation::Difference, false, false, true, false)]
    #[test_case(CsgOperation::Difference, false, false, false, false)]
    pub fn evaluating_the_boundary_rule(
        op: CsgOperation,
        left_hit: bool,
        in_left: bool,
        in_right: bool,
        expected: bool,
    ) {
        assert_eq!(op.keeps(left_hit, in_left, in_right), expected);
    }

    #[test_case(CsgOperation::Union, 0, 3)]
    #[test_case(CsgOperation::Intersection, 1, 2)]
    #[test_case(CsgOperation::Difference, 0, 1)]
    pub fn filtering_a_list_of_intersections(op: CsgOperation, first: usize, second: usize) {
        let c = Shape::csg(op, Shape::sphere(), Shape::cube());
        let (left, right) = csg_parts(&c);
        let xs: SmallVec<[Intersection; 8]> = [
            Intersection::new(1., left),
            Intersection::new(2., right),
            Intersection::new(3., left),
            Intersection::new(4., right),
        ]
        .into_iter()
        .collect();
        let expected_ts = (xs[first].t, xs[second].t);

        let filtered = match &c.kind {
            ShapeKind::Csg(csg) => super::filter(csg, xs),
            _ => unreachable!(),
        };
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].t, expected_ts.0);
        assert_eq!(filtered[1].t, expected_ts.1);
    }

    #[test]
    pub fn ray_misses_csg() {
        let c = Shape::csg(CsgOperation::Union, Shape::sphere(), Shape::cube());
        let r = Ray::new(Point::new(0., 2., -5.), Vector::new(0., 0., 1.));
        assert!(c.intersect(&r).is_empty());
    }

    #[test]
    pub fn ray_hits_union_of_offset_spheres() {
        let s1 = Shape::sphere();
        let s2 = Shape::sphere().with_transform(Matrix4::translation(&Vector::new(0., 0., 0.5)));
        let c = Shape::csg(CsgOperation::Union, s1, s2);
        let (left, right) = csg_parts(&c);
        let (left_id, right_id) = (*left.get_id(), *right.get_id());

        let r = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let xs = c.intersect(&r);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].t, 4.);
        assert_eq!(*xs[0].object.get_id(), left_id);
        assert_eq!(xs[1].t, 6.5);
        assert_eq!(*xs[1].object.get_id(), right_id);
    }

    #[test]
    pub fn difference_carves_the_right_subtree_away() {
        let s1 = Shape::sphere();
        let s2 = Shape::sphere().with_transform(Matrix4::translation(&Vector::new(0., 0., 0.5)));
        let c = Shape::csg(CsgOperation::Difference, s1, s2);

        let r = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let xs = c.intersect(&r);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].t, 4.);
        assert_eq!(xs[1].t, 4.5);
    }

    #[test]
    pub fn csg_membership_walks_both_subtrees() {
        let s1 = Shape::sphere();
        let s2 = Shape::cube();
        let outsider = Shape::sphere();
        let (s1_id, s2_id) = (*s1.get_id(), *s2.get_id());
        let c = Shape::csg(CsgOperation::Intersection, s1, s2);

        assert!(c.includes(&s1_id));
        assert!(c.includes(&s2_id));
        assert!(!c.includes(outsider.get_id()));
    }
}
