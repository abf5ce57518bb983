use crate::tuple::{approx_eq, AlgebraError, Point, Vector};
use nalgebra::matrix;
use std::ops::{Index, Mul};

/// Row-major 4x4 transform backed by nalgebra. Transform constructors
/// compose right-to-left: `identity().scale(s).rotate_y(r).translate(t)`
/// builds `T * R * S`.
#[derive(Debug, Copy, Clone)]
pub struct Matrix4(nalgebra::Matrix4<f64>);

impl Matrix4 {
    pub fn identity() -> Self {
        Self(nalgebra::Matrix4::identity())
    }

    pub fn translation(v: &Vector) -> Self {
        Self(nalgebra::Matrix4::new_translation(&nalgebra::Vector3::new(
            v.x, v.y, v.z,
        )))
    }

    pub fn scaling(v: &Vector) -> Self {
        Self(nalgebra::Matrix4::new_nonuniform_scaling(
            &nalgebra::Vector3::new(v.x, v.y, v.z),
        ))
    }

    pub fn rotation_x(r: f64) -> Self {
        let (sin, cos) = r.sin_cos();
        Self(matrix![
            1., 0., 0., 0.;
            0., cos, -sin, 0.;
            0., sin, cos, 0.;
            0., 0., 0., 1.
        ])
    }

    pub fn rotation_y(r: f64) -> Self {
        let (sin, cos) = r.sin_cos();
        Self(matrix![
            cos, 0., sin, 0.;
            0., 1., 0., 0.;
            -sin, 0., cos, 0.;
            0., 0., 0., 1.
        ])
    }

    pub fn rotation_z(r: f64) -> Self {
        let (sin, cos) = r.sin_cos();
        Self(matrix![
            cos, -sin, 0., 0.;
            sin, cos, 0., 0.;
            0., 0., 1., 0.;
            0., 0., 0., 1.
        ])
    }

    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self(matrix![
            1., xy, xz, 0.;
            yx, 1., yz, 0.;
            zx, zy, 1., 0.;
            0., 0., 0., 1.
        ])
    }

    /// Maps world coordinates into camera space for an eye at `from`
    /// looking at `to`.
    pub fn view_transform(from: Point, to: Point, up: Vector) -> Self {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize());
        let true_up = left.cross(&forward);

        let orientation = Self(matrix![
            left.x, left.y, left.z, 0.;
            true_up.x, true_up.y, true_up.z, 0.;
            -forward.x, -forward.y, -forward.z, 0.;
            0., 0., 0., 1.
        ]);

        orientation * Self::translation(&Vector::new(-from.x, -from.y, -from.z))
    }

    pub fn translate(self, v: &Vector) -> Self {
        Self::translation(v) * self
    }

    pub fn scale(self, v: &Vector) -> Self {
        Self::scaling(v) * self
    }

    pub fn rotate_x(self, r: f64) -> Self {
        Self::rotation_x(r) * self
    }

    pub fn rotate_y(self, r: f64) -> Self {
        Self::rotation_y(r) * self
    }

    pub fn rotate_z(self, r: f64) -> Self {
        Self::rotation_z(r) * self
    }

    pub fn shear(self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self::shearing(xy, xz, yx, yz, zx, zy) * self
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    pub fn try_inverse(&self) -> Result<Self, AlgebraError> {
        self.0.try_inverse().map(Self).ok_or(AlgebraError::Singular)
    }

    /// Scene transforms are validated once at construction; a singular
    /// matrix reaching this point is a construction bug.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(inv) => inv,
            Err(_) => panic!("singular transform in the render path"),
        }
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4 {
    fn from(value: nalgebra::Matrix4<f64>) -> Self {
        Self(value)
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl Eq for Matrix4 {}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(&a, &b)| approx_eq(a, b))
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<Matrix4> for &Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Self::Output {
        Matrix4(self.0 * rhs.0)
    }
}

impl Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: &Matrix4) -> Self::Output {
        Matrix4(self.0 * rhs.0)
    }
}

impl Mul<Point> for Matrix4 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Self::Output {
        (self.0 * nalgebra::Point4::from(rhs)).into()
    }
}

impl Mul<Point> for &Matrix4 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Self::Output {
        (self.0 * nalgebra::Point4::from(rhs)).into()
    }
}

impl Mul<&Point> for &Matrix4 {
    type Output = Point;

    fn mul(self, rhs: &Point) -> Self::Output {
        (self.0 * nalgebra::Point4::from(*rhs)).into()
    }
}

impl Mul<Vector> for Matrix4 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Self::Output {
        (self.0 * nalgebra::Vector4::from(rhs)).into()
    }
}

impl Mul<Vector> for &Matrix4 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Self::Output {
        (self.0 * nalgebra::Vector4::from(rhs)).into()
    }
}

impl Mul<&Vector> for &Matrix4 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Self::Output {
        (self.0 * nalgebra::Vector4::from(*rhs)).into()
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::Matrix4;
    use crate::tuple::{AlgebraError, Point, Vector};
    use nalgebra::matrix;
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use std::f64::consts::PI;

    #[test]
    pub fn constructing_matrix4() {
        let m: Matrix4 = matrix![
            1., 2., 3., 4.;
            5.5, 6.5, 7.5, 8.5;
            9., 10., 11., 12.;
            13.5, 14.5, 15.5, 16.5
        ]
        .into();

        assert_eq!(m[(0, 0)], 1.);
        assert_eq!(m[(0, 3)], 4.);
        assert_eq!(m[(1, 0)], 5.5);
        assert_eq!(m[(1, 2)], 7.5);
        assert_eq!(m[(2, 2)], 11.);
        assert_eq!(m[(3, 0)], 13.5);
        assert_eq!(m[(3, 2)], 15.5);
    }

    #[test]
    pub fn comparing_identical_matrix4() {
        let a: Matrix4 = matrix![
            1., 2., 3., 4.;
            5., 6., 7., 8.;
            9., 8., 7., 6.;
            5., 4., 3., 2.
        ]
        .into();
        let b: Matrix4 = matrix![
            1., 2., 3., 4.;
            5., 6., 7., 8.;
            9., 8., 7., 6.;
            5., 4., 3., 2.
        ]
        .into();

        assert_eq!(a, b);
    }

    #[test]
    pub fn comparing_different_matrix4() {
        let a: Matrix4 = matrix![
            1., 2., 3., 4.;
            5., 6., 7., 8.;
            9., 8., 7., 6.;
            5., 4., 3., 2.
        ]
        .into();
        let b: Matrix4 = matrix![
            2., 3., 4., 5.;
            6., 7., 8., 9.;
            8., 7., 6., 5.;
            4., 3., 2., 1.
        ]
        .into();

        assert_ne!(a, b);
    }

    #[test]
    pub fn multiplying_matrices() {
        let a: Matrix4 = matrix![
            1., 2., 3., 4.;
            5., 6., 7., 8.;
            9., 8., 7., 6.;
            5., 4., 3., 2.
        ]
        .into();
        let b: Matrix4 = matrix![
            -2., 1., 2., 3.;
            3., 2., 1., -1.;
            4., 3., 6., 5.;
            1., 2., 7., 8.
        ]
        .into();

        let res: Matrix4 = matrix![
            20., 22., 50., 48.;
            44., 54., 114., 108.;
            40., 58., 110., 102.;
            16., 26., 46., 42.
        ]
        .into();

        assert_eq!(a * b, res);
    }

    #[test]
    pub fn multiply_by_point() {
        let a: Matrix4 = matrix![
            1., 2., 3., 4.;
            2., 4., 4., 2.;
            8., 6., 4., 1.;
            0., 0., 0., 1.
        ]
        .into();
        let b = Point::new(1., 2., 3.);

        assert_eq!(a * b, Point::new(18., 24., 33.));
    }

    #[test]
    pub fn multiplying_matrix_by_identity_matrix() {
        let a: Matrix4 = matrix![
            0., 1., 2., 4.;
            1., 2., 4., 8.;
            2., 4., 8., 16.;
            4., 8., 16., 32.
        ]
        .into();
        let b = Matrix4::identity();
        assert_eq!(a * b, a);
    }

    #[test]
    pub fn transposing_matrix() {
        let a: Matrix4 = matrix![
            0., 9., 3., 0.;
            9., 8., 0., 8.;
            1., 8., 5., 3.;
            0., 0., 5., 8.
        ]
        .into();
        let transposed: Matrix4 = matrix![
            0., 9., 1., 0.;
            9., 8., 8., 0.;
            3., 0., 5., 5.;
            0., 8., 3., 8.
        ]
        .into();

        assert_eq!(a.transpose(), transposed);
    }

    #[test]
    pub fn transposing_identity_matrix() {
        let a = Matrix4::identity();

        assert_eq!(a.transpose(), a);
    }

    #[test]
    pub fn multiplying_matrix_by_its_inverse_yields_identity() {
        let a: Matrix4 = matrix![
            3., -9., 7., 3.;
            3., -8., 2., -9.;
            -4., 4., 4., 1.;
            -6., 5., -1., 1.
        ]
        .into();
        assert_eq!(a * a.inverse(), Matrix4::identity());
    }

    #[test]
    pub fn multiplying_product_by_inverse_recovers_factor() {
        let a: Matrix4 = matrix![
            3., -9., 7., 3.;
            3., -8., 2., -9.;
            -4., 4., 4., 1.;
            -6., 5., -1., 1.
        ]
        .into();
        let b: Matrix4 = matrix![
            8., 2., 2., 2.;
            3., -1., 7., 0.;
            7., 0., 5., 4.;
            6., -2., 0., 5.
        ]
        .into();
        let c = a * b;

        assert_eq!(c * b.inverse(), a);
    }

    #[test]
    pub fn determinant_of_4x4_matrix() {
        let a: Matrix4 = matrix![
            -2., -8., 3., 5.;
            -3., 1., 7., 3.;
            1., 2., -9., 6.;
            -6., 7., 7., -9.
        ]
        .into();
        assert!(crate::tuple::approx_eq(a.determinant(), -4071.));
    }

    #[test]
    pub fn inverting_singular_matrix_fails() {
        let a: Matrix4 = matrix![
            -4., 2., -2., -3.;
            9., 6., 2., 6.;
            0., -5., 1., -5.;
            0., 0., 0., 0.
        ]
        .into();
        assert_eq!(a.try_inverse().unwrap_err(), AlgebraError::Singular);
    }

    #[test]
    pub fn random_rotations_invert_cleanly() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let m = Matrix4::identity()
                .rotate_x(rng.gen_range(-PI..PI))
                .rotate_y(rng.gen_range(-PI..PI))
                .rotate_z(rng.gen_range(-PI..PI));
            assert_eq!(m * m.inverse(), Matrix4::identity());
        }
    }

    #[test]
    pub fn translating_a_point() {
        let t = Matrix4::translation(&Vector::new(5., -3., 2.));
        assert_eq!(t * Point::new(-3., 4., 5.), Point::new(2., 1., 7.));
    }

    #[test]
    pub fn translating_back_with_inverse() {
        let t = Matrix4::translation(&Vector::new(5., -3., 2.));
        assert_eq!(t.inverse() * Point::new(-3., 4., 5.), Point::new(-8., 7., 3.));
    }

    #[test]
    pub fn translation_does_not_affect_vectors() {
        let t = Matrix4::translation(&Vector::new(5., -3., 2.));
        let v = Vector::new(-3., 4., 5.);
        assert_eq!(t * v, v);
    }

    #[test]
    pub fn scaling_a_point() {
        let t = Matrix4::scaling(&Vector::new(2., 3., 4.));
        assert_eq!(t * Point::new(-4., 6., 8.), Point::new(-8., 18., 32.));
    }

    #[test]
    pub fn scaling_a_vector() {
        let t = Matrix4::scaling(&Vector::new(2., 3., 4.));
        assert_eq!(t * Vector::new(-4., 6., 8.), Vector::new(-8., 18., 32.));
    }

    #[test]
    pub fn reflection_is_scaling_by_negative_value() {
        let t = Matrix4::scaling(&Vector::new(-1., 1., 1.));
        assert_eq!(t * Point::new(2., 3., 4.), Point::new(-2., 3., 4.));
    }

    #[test]
    pub fn rotating_point_around_x_axis() {
        let p = Point::new(0., 1., 0.);
        let half_quarter = Matrix4::rotation_x(PI / 4.);
        let full_quarter = Matrix4::rotation_x(PI / 2.);
        assert_eq!(
            half_quarter * p,
            Point::new(0., 2_f64.sqrt() / 2., 2_f64.sqrt() / 2.)
        );
        assert_eq!(full_quarter * p, Point::new(0., 0., 1.));
    }

    #[test]
    pub fn rotating_point_around_y_axis() {
        let p = Point::new(0., 0., 1.);
        let half_quarter = Matrix4::rotation_y(PI / 4.);
        let full_quarter = Matrix4::rotation_y(PI / 2.);
        assert_eq!(
            half_quarter * p,
            Point::new(2_f64.sqrt() / 2., 0., 2_f64.sqrt() / 2.)
        );
        assert_eq!(full_quarter * p, Point::new(1., 0., 0.));
    }

    #[test]
    pub fn rotating_point_around_z_axis() {
        let p = Point::new(0., 1., 0.);
        let half_quarter = Matrix4::rotation_z(PI / 4.);
        let full_quarter = Matrix4::rotation_z(PI / 2.);
        assert_eq!(
            half_quarter * p,
            Point::new(-(2_f64.sqrt()) / 2., 2_f64.sqrt() / 2., 0.)
        );
        assert_eq!(full_quarter * p, Point::new(-1., 0., 0.));
    }

    #[test]
    pub fn shearing_moves_x_in_proportion_to_y() {
        let t = Matrix4::shearing(1., 0., 0., 0., 0., 0.);
        assert_eq!(t * Point::new(2., 3., 4.), Point::new(5., 3., 4.));
    }

    #[test]
    pub fn shearing_moves_z_in_proportion_to_y() {
        let t = Matrix4::shearing(0., 0., 0., 0., 0., 1.);
        assert_eq!(t * Point::new(2., 3., 4.), Point::new(2., 3., 7.));
    }

    #[test]
    pub fn chained_transformations_apply_in_reverse_order() {
        let p = Point::new(1., 0., 1.);
        let t = Matrix4::identity()
            .rotate_x(PI / 2.)
            .scale(&Vector::new(5., 5., 5.))
            .translate(&Vector::new(10., 5., 7.));
        assert_eq!(t * p, Point::new(15., 0., 7.));
    }

    #[test]
    pub fn transformation_matrix_for_default_orientation() {
        let from = Point::new(0., 0., 0.);
        let to = Point::new(0., 0., -1.);
        let up = Vector::new(0., 1., 0.);
        let v = Matrix4::view_transform(from, to, up);
        assert_eq!(v, Matrix4::identity());
    }

    #[test]
    pub fn view_transform_looking_in_positive_z() {
        let from = Point::new(0., 0., 0.);
        let to = Point::new(0., 0., 1.);
        let up = Vector::new(0., 1., 0.);
        let v = Matrix4::view_transform(from, to, up);
        assert_eq!(v, Matrix4::scaling(&Vector::new(-1., 1., -1.)));
    }

    #[test]
    pub fn view_transform_moves_world() {
        let from = Point::new(0., 0., 8.);
        let to = Point::new(0., 0., 0.);
        let up = Vector::new(0., 1., 0.);
        let v = Matrix4::view_transform(from, to, up);
        assert_eq!(v, Matrix4::translation(&Vector::new(0., 0., -8.)));
    }

    #[test]
    pub fn view_transform_maps_eye_to_origin() {
        let from = Point::new(1., 3., 2.);
        let to = Point::new(4., -2., 8.);
        let up = Vector::new(1., 1., 0.);
        let v = Matrix4::view_transform(from, to, up);
        assert_eq!(v * from, Point::new(0., 0., 0.));
    }

    #[test]
    pub fn arbitrary_view_matrix() {
        let from = Point::new(1., 3., 2.);
        let to = Point::new(4., -2., 8.);
        let up = Vector::new(1., 1., 0.);
        let v = Matrix4::view_transform(from, to, up);

        let res: Matrix4 = matrix![
            -0.50709, 0.50709, 0.67612, -2.36643;
            0.76772, 0.60609, 0.12122, -2.82843;
            -0.35857, 0.59761, -0.71714, 0.00000;
            0.00000, 0.00000, 0.00000, 1.00000
        ]
        .into();
        assert_eq!(v, res);
    }
}
