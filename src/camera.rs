use crate::canvas::Canvas;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::tuple::{Color, Point, Vector};
use crate::world::World;
use rayon::prelude::*;
use std::f64::consts::PI;

pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug)]
pub struct Camera {
    pub hsize: usize,
    pub vsize: usize,
    pub field_of_view: f64,
    pub transform: Matrix4,
    pub inverse_transform: Matrix4,
    pub pixel_size: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub max_depth: usize,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize, fov: f64) -> Self {
        let half_view = (fov / 2.).tan();
        let aspect = hsize as f64 / vsize as f64;

        let (half_width, half_height) = if aspect >= 1. {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view: fov,
            transform: Matrix4::identity(),
            inverse_transform: Matrix4::identity(),
            pixel_size: (half_width * 2.) / hsize as f64,
            half_width,
            half_height,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Self {
        self.inverse_transform = transform.inverse();
        self.transform = transform;
        self
    }

    pub fn look_at(self, from: Point, to: Point, up: Vector) -> Self {
        self.with_transform(Matrix4::view_transform(from, to, up))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Ray through the center of pixel (px, py), in world space.
    fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = &self.inverse_transform * Point::new(world_x, world_y, -1.);
        let origin = &self.inverse_transform * Point::new(0., 0., 0.);
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }

    /// Renders the world one ray per pixel. Rows are independent, so they
    /// are farmed out to the rayon pool; the scene is shared read-only.
    pub fn render(&self, world: &World) -> Canvas {
        let rows: Vec<Vec<Color>> = (0..self.vsize)
            .into_par_iter()
            .map(|y| {
                (0..self.hsize)
                    .map(|x| world.color_at(&self.ray_for_pixel(x, y), self.max_depth))
                    .collect()
            })
            .collect();

        Canvas::from_rows(self.hsize, rows)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(160, 120, PI / 2.)
    }
}
