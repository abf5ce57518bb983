use crate::matrix::Matrix4;
use crate::tuple::{Point, Vector};
use derive_more::Constructor;

#[derive(Debug, Constructor, Copy, Clone, Eq, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn position(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    pub fn transform(self, matrix: &Matrix4) -> Self {
        Self::new(matrix * self.origin, matrix * self.direction)
    }
}
