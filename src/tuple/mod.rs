use derive_more::{
    Add, AddAssign, Constructor, Display, Div, DivAssign, Error, Mul, MulAssign, Neg, Sub,
    SubAssign,
};
use nalgebra::Point4;
use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

pub const EPSILON: f64 = 0.0001;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON || (a.is_infinite() && b.is_infinite() && a.signum() == b.signum())
}

pub fn approx_cmp(a: f64, b: f64) -> Ordering {
    if approx_eq(a, b) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

#[derive(Debug, Display, Error, Copy, Clone, Eq, PartialEq)]
pub enum AlgebraError {
    #[display(fmt = "cannot normalize a zero-magnitude vector")]
    ZeroMagnitude,
    #[display(fmt = "matrix is singular and cannot be inverted")]
    Singular,
}

#[derive(
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Mul,
    MulAssign,
    Div,
    DivAssign,
    Constructor,
    Debug,
    Copy,
    Clone,
    Default,
)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.z
                .mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)),
        )
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        Self::new(self.x / mag, self.y / mag, self.z / mag)
    }

    /// Checked variant for construction-time callers; the render path relies
    /// on `normalize` never seeing a zero vector.
    pub fn try_normalize(&self) -> Result<Self, AlgebraError> {
        if self.magnitude() < EPSILON {
            return Err(AlgebraError::ZeroMagnitude);
        }
        Ok(self.normalize())
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.z
            .mul_add(other.z, self.x.mul_add(other.x, self.y * other.y))
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y.mul_add(other.z, -self.z * other.y),
            self.z.mul_add(other.x, -self.x * other.z),
            self.x.mul_add(other.y, -self.y * other.x),
        )
    }

    pub fn reflect(&self, normal: &Self) -> Self {
        *self - *normal * 2. * self.dot(normal)
    }
}

impl From<nalgebra::Vector4<f64>> for Vector {
    fn from(value: nalgebra::Vector4<f64>) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

impl From<Vector> for nalgebra::Vector4<f64> {
    fn from(val: Vector) -> Self {
        Self::new(val.x, val.y, val.z, 0.)
    }
}

impl Eq for Vector {}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl Add<Point> for Vector {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

#[derive(Neg, Mul, MulAssign, Div, DivAssign, Debug, Copy, Clone, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self {
            x: 0.,
            y: 0.,
            z: 0.,
        }
    }

    pub const fn one() -> Self {
        Self::new(1., 1., 1.)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Eq for Point {}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl From<Point> for nalgebra::Point4<f64> {
    fn from(val: Point) -> Self {
        Self::new(val.x, val.y, val.z, 1.0)
    }
}

impl From<nalgebra::Point4<f64>> for Point {
    fn from(value: Point4<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, rhs: Vector) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Vector> for Point {
    type Output = Self;

    fn sub(self, rhs: Vector) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<&Self> for Point {
    type Output = Vector;

    fn sub(self, rhs: &Self) -> Self::Output {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<Point> for &Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Self::Output {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[derive(
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    DivAssign,
    Constructor,
    Debug,
    Copy,
    Clone,
    Default,
)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn hadamard_product(&self, other: &Self) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub const fn white() -> Self {
        Self {
            r: 1.,
            g: 1.,
            b: 1.,
        }
    }

    pub const fn black() -> Self {
        Self {
            r: 0.,
            g: 0.,
            b: 0.,
        }
    }
}

impl Eq for Color {}
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.r, other.r) && approx_eq(self.g, other.g) && approx_eq(self.b, other.b)
    }
}

impl Mul<Self> for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.hadamard_product(&rhs)
    }
}
