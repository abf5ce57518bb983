mod noise;

pub use noise::Perlin;

use crate::matrix::Matrix4;
use crate::tuple::{Color, Point};

/// Keeps cells that straddle an axis plane from flickering between parities
/// when floating-point noise lands a coordinate on either side of 0.
const CHECKER_BIAS: f64 = 0.0001;

const DEFAULT_NOISE_SCALE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct Pattern {
    transform: Matrix4,
    inverse_transform: Matrix4,
    pub kind: PatternKind,
}

#[derive(Debug, Clone)]
pub enum PatternKind {
    Solid(Color),
    Stripe(Color, Color),
    Gradient(Color, Color),
    Ring(Color, Color),
    Checker(Color, Color),
    Nested {
        combiner: Box<Pattern>,
        left: Box<Pattern>,
        right: Box<Pattern>,
    },
    Blended {
        left: Box<Pattern>,
        right: Box<Pattern>,
        mixer: Option<fn(Color, Color) -> Color>,
    },
    Noise {
        inner: Box<Pattern>,
        noise: Perlin,
        scale: f64,
    },
}

impl Pattern {
    fn new(kind: PatternKind) -> Self {
        Self {
            transform: Matrix4::identity(),
            inverse_transform: Matrix4::identity(),
            kind,
        }
    }

    pub fn solid(a: Color) -> Self {
        Self::new(PatternKind::Solid(a))
    }

    pub fn stripe(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Stripe(a, b))
    }

    pub fn gradient(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Gradient(a, b))
    }

    pub fn ring(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Ring(a, b))
    }

    pub fn checker(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Checker(a, b))
    }

    pub fn nested(combiner: Self, left: Self, right: Self) -> Self {
        Self::new(PatternKind::Nested {
            combiner: Box::new(combiner),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn blended(left: Self, right: Self, mixer: Option<fn(Color, Color) -> Color>) -> Self {
        Self::new(PatternKind::Blended {
            left: Box::new(left),
            right: Box::new(right),
            mixer,
        })
    }

    pub fn noise_displaced(inner: Self, seed: u64) -> Self {
        Self::new(PatternKind::Noise {
            inner: Box::new(inner),
            noise: Perlin::new(seed),
            scale: DEFAULT_NOISE_SCALE,
        })
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Self {
        self.transform = transform;
        self.inverse_transform = transform.inverse();
        self
    }

    pub fn get_transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// Color seen at a world-space point on a shape: world -> object via the
    /// shape's inverse chain, object -> pattern via this pattern's inverse.
    pub fn color_at_object(&self, world_to_object: &Matrix4, world_point: &Point) -> Color {
        let object_point = world_to_object * world_point;
        self.color_at(&(&self.inverse_transform * object_point))
    }

    /// Rule evaluation at a point already in this pattern's space.
    pub fn color_at(&self, point: &Point) -> Color {
        match &self.kind {
            PatternKind::Solid(a) => *a,
            PatternKind::Stripe(a, b) => stripe_at(point, *a, *b),
            PatternKind::Gradient(a, b) => gradient_at(point, *a, *b),
            PatternKind::Ring(a, b) => ring_at(point, *a, *b),
            PatternKind::Checker(a, b) => checker_at(point, *a, *b),
            PatternKind::Nested {
                combiner,
                left,
                right,
            } => {
                let l = left.color_at_child(point);
                let r = right.color_at_child(point);
                combiner.combine(point, l, r)
            }
            PatternKind::Blended { left, right, mixer } => {
                let l = left.color_at_child(point);
                let r = right.color_at_child(point);
                match mixer {
                    Some(mix) => mix(l, r),
                    None => (l + r) * 0.5,
                }
            }
            PatternKind::Noise {
                inner,
                noise,
                scale,
            } => {
                let displaced = Point::new(
                    noise.noise(point.x, point.y, point.z).mul_add(*scale, point.x),
                    noise.noise(point.y, point.z, point.x).mul_add(*scale, point.y),
                    noise.noise(point.z, point.x, point.y).mul_add(*scale, point.z),
                );
                inner.color_at_child(&displaced)
            }
        }
    }

    fn color_at_child(&self, parent_point: &Point) -> Color {
        self.color_at(&(&self.inverse_transform * parent_point))
    }

    /// A combiner applies its own placement rule, with the two evaluated
    /// sub-pattern colors standing in for its color pair.
    fn combine(&self, parent_point: &Point, a: Color, b: Color) -> Color {
        let point = &self.inverse_transform * parent_point;
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(..) => stripe_at(&point, a, b),
            PatternKind::Gradient(..) => gradient_at(&point, a, b),
            PatternKind::Ring(..) => ring_at(&point, a, b),
            PatternKind::Checker(..) => checker_at(&point, a, b),
            _ => self.color_at(&point),
        }
    }
}

fn stripe_at(point: &Point, a: Color, b: Color) -> Color {
    if point.x.floor() as i64 % 2 == 0 {
        a
    } else {
        b
    }
}

fn gradient_at(point: &Point, a: Color, b: Color) -> Color {
    a + (b - a) * (point.x - point.x.floor())
}

fn ring_at(point: &Point, a: Color, b: Color) -> Color {
    if point.x.hypot(point.z).floor() as i64 % 2 == 0 {
        a
    } else {
        b
    }
}

fn checker_at(point: &Point, a: Color, b: Color) -> Color {
    let cells = (point.x + CHECKER_BIAS).abs().floor()
        + (point.y + CHECKER_BIAS).abs().floor()
        + (point.z + CHECKER_BIAS).abs().floor();
    if cells as i64 % 2 == 0 {
        a
    } else {
        b
    }
}
