mod cone;
mod csg;
mod cube;
mod cylinder;
mod group;
mod intersections;
mod plane;
mod sphere;
mod triangle;

pub use cone::Cone;
pub use csg::{Csg, CsgOperation};
pub use cylinder::Cylinder;
pub use group::Group;
pub use intersections::Intersections;
pub use triangle::{SmoothTriangle, Triangle};

use crate::bounds::Bounds;
use crate::material::Material;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::tuple::{Point, Vector, EPSILON};
use itertools::Itertools;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use uuid::Uuid;

/// A surface in the scene graph: a local-to-world transform, a material,
/// and the kind-specific geometry. Groups and CSG nodes own their children
/// by value, so the graph is a tree; the world-to-object chain for nested
/// leaves is accumulated during traversal and recorded on every
/// intersection instead of being re-derived through parent pointers.
#[derive(Debug, Clone)]
pub struct Shape {
    id: Uuid,
    transform: Matrix4,
    inverse_transform: Matrix4,
    material: Material,
    pub kind: ShapeKind,
}

#[derive(Debug, Clone)]
pub enum ShapeKind {
    Sphere,
    Plane,
    Cube,
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
    Csg(Csg),
}

impl Shape {
    fn new(kind: ShapeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            transform: Matrix4::identity(),
            inverse_transform: Matrix4::identity(),
            material: Material::default(),
            kind,
        }
    }

    pub fn sphere() -> Self {
        Self::new(ShapeKind::Sphere)
    }

    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(Material::glass())
    }

    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane)
    }

    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube)
    }

    pub fn cylinder(minimum: f64, maximum: f64, is_closed: bool) -> Self {
        Self::new(ShapeKind::Cylinder(Cylinder {
            minimum,
            maximum,
            is_closed,
        }))
    }

    pub fn infinite_cylinder() -> Self {
        Self::new(ShapeKind::Cylinder(Cylinder::default()))
    }

    pub fn cone(minimum: f64, maximum: f64, is_closed: bool) -> Self {
        Self::new(ShapeKind::Cone(Cone {
            minimum,
            maximum,
            is_closed,
        }))
    }

    pub fn infinite_cone() -> Self {
        Self::new(ShapeKind::Cone(Cone::default()))
    }

    pub fn triangle(p1: Point, p2: Point, p3: Point) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(
        p1: Point,
        p2: Point,
        p3: Point,
        n1: Vector,
        n2: Vector,
        n3: Vector,
    ) -> Self {
        Self::new(ShapeKind::SmoothTriangle(SmoothTriangle::new(
            p1, p2, p3, n1, n2, n3,
        )))
    }

    pub fn group(children: Vec<Self>) -> Self {
        Self::new(ShapeKind::Group(Group::new(children)))
    }

    pub fn csg(operation: CsgOperation, left: Self, right: Self) -> Self {
        Self::new(ShapeKind::Csg(Csg {
            operation,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Self {
        self.inverse_transform = transform.inverse();
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn get_id(&self) -> &Uuid {
        &self.id
    }

    pub fn get_transform(&self) -> &Matrix4 {
        &self.transform
    }

    pub fn get_inverse_transform(&self) -> &Matrix4 {
        &self.inverse_transform
    }

    pub fn get_material(&self) -> &Material {
        &self.material
    }

    pub fn get_material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn add_child(&mut self, child: Self) {
        match &mut self.kind {
            ShapeKind::Group(group) => group.add_child(child),
            _ => panic!("add_child on a shape that is not a group"),
        }
    }

    /// Subtree membership by id; CSG filtering asks this to attribute each
    /// crossing to the left or right operand.
    pub fn includes(&self, id: &Uuid) -> bool {
        match &self.kind {
            ShapeKind::Group(group) => group.children().iter().any(|c| c.includes(id)),
            ShapeKind::Csg(csg) => csg.left.includes(id) || csg.right.includes(id),
            _ => self.id == *id,
        }
    }

    /// Object-space bounding box.
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ShapeKind::Sphere | ShapeKind::Cube => {
                Bounds::new(Point::new(-1., -1., -1.), Point::new(1., 1., 1.))
            }
            ShapeKind::Plane => Bounds::new(
                Point::new(f64::NEG_INFINITY, 0., f64::NEG_INFINITY),
                Point::new(f64::INFINITY, 0., f64::INFINITY),
            ),
            ShapeKind::Cylinder(c) => {
                Bounds::new(Point::new(-1., c.minimum, -1.), Point::new(1., c.maximum, 1.))
            }
            ShapeKind::Cone(c) => {
                let radius = c.minimum.abs().max(c.maximum.abs());
                Bounds::new(
                    Point::new(-radius, c.minimum, -radius),
                    Point::new(radius, c.maximum, radius),
                )
            }
            ShapeKind::Triangle(t) => triangle_bounds(&t.p1, &t.p2, &t.p3),
            ShapeKind::SmoothTriangle(t) => {
                triangle_bounds(&t.triangle.p1, &t.triangle.p2, &t.triangle.p3)
            }
            ShapeKind::Group(group) => group.bounds(),
            ShapeKind::Csg(csg) => {
                let mut bounds = csg.left.parent_space_bounds();
                bounds.merge(csg.right.parent_space_bounds());
                bounds
            }
        }
    }

    /// Object-space bounds carried into the owning container's frame.
    pub fn parent_space_bounds(&self) -> Bounds {
        self.bounds().transform(&self.transform)
    }

    pub fn intersect(&self, ray: &Ray) -> SmallVec<[Intersection; 8]> {
        self.intersect_acc(ray, &Matrix4::identity())
    }

    /// Traversal worker: `parent_acc` is the product of every inverse
    /// transform between the world and this node's parent. Each node folds
    /// its own inverse in, so leaves record the full chain on their
    /// intersections.
    fn intersect_acc<'a>(
        &'a self,
        ray: &Ray,
        parent_acc: &Matrix4,
    ) -> SmallVec<[Intersection<'a>; 8]> {
        let local_ray = ray.transform(&self.inverse_transform);
        let world_to_object = &self.inverse_transform * parent_acc;

        match &self.kind {
            ShapeKind::Sphere => sphere::intersect(&local_ray).map_or_else(SmallVec::new, |(t1, t2)| {
                smallvec![
                    Intersection::along_chain(t1, self, world_to_object, None),
                    Intersection::along_chain(t2, self, world_to_object, None),
                ]
            }),
            ShapeKind::Plane => plane::intersect(&local_ray).map_or_else(SmallVec::new, |t| {
                smallvec![Intersection::along_chain(t, self, world_to_object, None)]
            }),
            ShapeKind::Cube => cube::intersect(&local_ray).map_or_else(SmallVec::new, |(t1, t2)| {
                smallvec![
                    Intersection::along_chain(t1, self, world_to_object, None),
                    Intersection::along_chain(t2, self, world_to_object, None),
                ]
            }),
            ShapeKind::Cylinder(c) => c
                .intersect(&local_ray)
                .into_iter()
                .map(|t| Intersection::along_chain(t, self, world_to_object, None))
                .collect(),
            ShapeKind::Cone(c) => c
                .intersect(&local_ray)
                .into_iter()
                .map(|t| Intersection::along_chain(t, self, world_to_object, None))
                .collect(),
            ShapeKind::Triangle(t) => t.intersect(&local_ray).map_or_else(SmallVec::new, |(t0, _, _)| {
                smallvec![Intersection::along_chain(t0, self, world_to_object, None)]
            }),
            ShapeKind::SmoothTriangle(t) => {
                t.triangle
                    .intersect(&local_ray)
                    .map_or_else(SmallVec::new, |(t0, u, v)| {
                        smallvec![Intersection::along_chain(
                            t0,
                            self,
                            world_to_object,
                            Some((u, v))
                        )]
                    })
            }
            ShapeKind::Group(group) => {
                if group.children().is_empty() || !group.bounds().intersects(&local_ray) {
                    return SmallVec::new();
                }
                group
                    .children()
                    .iter()
                    .flat_map(|child| child.intersect_acc(&local_ray, &world_to_object))
                    .collect()
            }
            ShapeKind::Csg(data) => {
                let mut xs = data.left.intersect_acc(&local_ray, &world_to_object);
                xs.extend(data.right.intersect_acc(&local_ray, &world_to_object));
                xs.sort_unstable();
                csg::filter(data, xs)
            }
        }
    }

    pub fn local_normal_at(&self, p: &Point, uv: Option<(f64, f64)>) -> Vector {
        match &self.kind {
            ShapeKind::Sphere => sphere::normal(p),
            ShapeKind::Plane => plane::normal(p),
            ShapeKind::Cube => cube::normal(p),
            ShapeKind::Cylinder(c) => c.normal(p),
            ShapeKind::Cone(c) => c.normal(p),
            ShapeKind::Triangle(t) => t.normal,
            ShapeKind::SmoothTriangle(t) => t.normal(uv),
            ShapeKind::Group(_) | ShapeKind::Csg(_) => {
                panic!("containers delegate normals to the leaf that was hit")
            }
        }
    }

    /// World normal for a shape used at the top level of a world. Leaves
    /// nested inside groups go through `Intersection::normal_at`, which
    /// knows the whole transform chain.
    pub fn normal_at(&self, world_point: &Point, uv: Option<(f64, f64)>) -> Vector {
        let local_point = &self.inverse_transform * world_point;
        let local_normal = self.local_normal_at(&local_point, uv);
        normal_to_world(&self.inverse_transform, &local_normal)
    }
}

fn triangle_bounds(p1: &Point, p2: &Point, p3: &Point) -> Bounds {
    let mut bounds = Bounds::empty();
    bounds.add_point(*p1);
    bounds.add_point(*p2);
    bounds.add_point(*p3);
    bounds
}

/// Multiplying by the transpose of the inverse chain maps an object-space
/// normal back to world space; the conversion through `Vector` zeroes the
/// w component picked up from the translation column.
fn normal_to_world(world_to_object: &Matrix4, local_normal: &Vector) -> Vector {
    (world_to_object.transpose() * *local_normal).normalize()
}

#[derive(Debug, Copy, Clone)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
    pub world_to_object: Matrix4,
    pub uv: Option<(f64, f64)>,
}

impl<'a> Intersection<'a> {
    /// Record against a shape standing on its own; the chain is just the
    /// shape's inverse transform.
    pub fn new(t: f64, object: &'a Shape) -> Self {
        Self {
            t,
            object,
            world_to_object: *object.get_inverse_transform(),
            uv: None,
        }
    }

    pub fn with_uv(t: f64, object: &'a Shape, u: f64, v: f64) -> Self {
        Self {
            uv: Some((u, v)),
            ..Self::new(t, object)
        }
    }

    fn along_chain(
        t: f64,
        object: &'a Shape,
        world_to_object: Matrix4,
        uv: Option<(f64, f64)>,
    ) -> Self {
        Self {
            t,
            object,
            world_to_object,
            uv,
        }
    }

    pub fn get_hit(hits: &[Self]) -> Option<Self> {
        hits.iter()
            .filter(|&&x| x.t >= 0.)
            .min_by(|x, y| x.t.partial_cmp(&y.t).unwrap())
            .copied()
    }

    pub fn normal_at(&self, world_point: &Point) -> Vector {
        let local_point = &self.world_to_object * world_point;
        let local_normal = self.object.local_normal_at(&local_point, self.uv);
        normal_to_world(&self.world_to_object, &local_normal)
    }

    fn calculate_refractive_indices(&self, xs: &[Self]) -> (f64, f64) {
        let mut n1 = 0.0;
        let mut n2 = 0.0;

        let mut containers: Vec<&'_ Shape> = vec![];
        for i in xs {
            if i == self {
                if let Some(last) = containers.last() {
                    n1 = last.get_material().refractive_index;
                } else {
                    n1 = 1.0;
                }
            }

            if let Some((index, _)) = containers.iter().find_position(|&x| x.id == i.object.id) {
                containers.remove(index);
            } else {
                containers.push(i.object);
            }

            if i == self {
                if let Some(last) = containers.last() {
                    n2 = last.get_material().refractive_index;
                } else {
                    n2 = 1.0;
                }

                break;
            }
        }

        (n1, n2)
    }

    pub fn precompute_hit(self, ray: &Ray, xs: &[Self]) -> PrecomputedHit<'a> {
        let point = ray.position(self.t);
        let eye = -ray.direction;
        let mut normal = self.normal_at(&point);
        let inside;

        if normal.dot(&eye) < 0. {
            normal = -normal;
            inside = true;
        } else {
            inside = false;
        }
        let over_point = point + normal * EPSILON;
        let under_point = point - normal * EPSILON;
        let reflected = ray.direction.reflect(&normal);
        let (n1, n2) = self.calculate_refractive_indices(xs);

        PrecomputedHit {
            intersection: self,
            point,
            eye,
            normal,
            inside,
            over_point,
            under_point,
            reflected_vector: reflected,
            n1,
            n2,
        }
    }
}

impl Eq for Intersection<'_> {}

impl PartialEq<Self> for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.object.id == other.object.id
    }
}

impl PartialOrd<Self> for Intersection<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.t.partial_cmp(&other.t)
    }
}

impl Ord for Intersection<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct PrecomputedHit<'a> {
    pub intersection: Intersection<'a>,
    pub point: Point,
    pub eye: Vector,
    pub normal: Vector,
    pub inside: bool,
    pub over_point: Point,
    pub under_point: Point,
    pub reflected_vector: Vector,
    pub n1: f64,
    pub n2: f64,
}

impl PrecomputedHit<'_> {
    /// Schlick approximation of the Fresnel reflectance at this hit.
    pub fn schlick_reflectance(&self) -> f64 {
        let mut cos = self.eye.dot(&self.normal);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2t = n * n * cos.mul_add(-cos, 1.0);
            if sin2t > 1.0 {
                return 1.0;
            }

            cos = (1.0 - sin2t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        (1.0 - r0).mul_add((1.0 - cos).powi(5), r0)
    }
}
