use crate::light::PointLight;
use crate::material::Material;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::shape::{Intersections, PrecomputedHit, Shape};
use crate::tuple::{Color, Point, Vector};
use derive_more::Constructor;

#[derive(Constructor, Default)]
pub struct World {
    pub lights: Vec<PointLight>,
    pub objects: Vec<Shape>,
}

impl World {
    /// Two-sphere reference scene used throughout the shading tests.
    pub fn reference() -> Self {
        let s1 = Shape::sphere().with_material(Material {
            color: Color::new(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });
        let s2 = Shape::sphere().with_transform(Matrix4::scaling(&Vector::new(0.5, 0.5, 0.5)));

        Self {
            lights: vec![PointLight::new(
                Point::new(-10., 10., -10.),
                Color::new(1., 1., 1.),
            )],
            objects: vec![s1, s2],
        }
    }

    fn intersect_world<'a>(&'a self, r: &Ray) -> Intersections<'a> {
        let mut xs = Intersections::new();
        for object in &self.objects {
            xs.extend(object.intersect(r));
        }
        xs
    }

    fn is_shadowed(&self, light: &PointLight, point: &Point) -> bool {
        let to_light = light.position - point;
        let distance = to_light.magnitude();
        let shadow_ray = Ray::new(*point, to_light.normalize());

        match self.intersect_world(&shadow_ray).hit() {
            Some(hit) => hit.t < distance,
            None => false,
        }
    }

    fn shade_hit(&self, comps: &PrecomputedHit, depth: usize) -> Color {
        let material = comps.intersection.object.get_material();

        let mut surface = Color::black();
        for light in &self.lights {
            let in_shadow = self.is_shadowed(light, &comps.over_point);
            surface += light.calculate_lighting(
                material,
                &comps.intersection.world_to_object,
                &comps.over_point,
                &comps.eye,
                &comps.normal,
                in_shadow,
            );
        }

        let reflected = self.reflected_color(comps, depth);
        let refracted = self.refracted_color(comps, depth);

        if material.reflective > 0. && material.transparency > 0. {
            let reflectance = comps.schlick_reflectance();
            surface + reflected * reflectance + refracted * (1. - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Shades a ray against the scene; `depth` bounds the remaining
    /// reflection/refraction recursion.
    pub fn color_at(&self, r: &Ray, depth: usize) -> Color {
        let xs = self.intersect_world(r);
        if let Some(hit) = xs.hit() {
            let sorted = xs.into_sorted();
            let comps = hit.precompute_hit(r, &sorted);
            self.shade_hit(&comps, depth)
        } else {
            Color::black()
        }
    }

    fn reflected_color(&self, comps: &PrecomputedHit, depth: usize) -> Color {
        if depth == 0 {
            return Color::black();
        }
        let reflective = comps.intersection.object.get_material().reflective;
        if reflective == 0. {
            return Color::black();
        }

        let reflect_ray = Ray::new(comps.over_point, comps.reflected_vector);
        self.color_at(&reflect_ray, depth - 1) * reflective
    }

    fn refracted_color(&self, comps: &PrecomputedHit, depth: usize) -> Color {
        if depth == 0 {
            return Color::black();
        }
        let transparency = comps.intersection.object.get_material().transparency;
        if transparency == 0. {
            return Color::black();
        }

        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eye.dot(&comps.normal);
        let sin2_t = n_ratio * n_ratio * cos_i.mul_add(-cos_i, 1.);
        if sin2_t > 1. {
            // total internal reflection
            return Color::black();
        }

        let cos_t = (1. - sin2_t).sqrt();
        let direction =
            comps.normal * n_ratio.mul_add(cos_i, -cos_t) - comps.eye * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);

        self.color_at(&refract_ray, depth - 1) * transparency
    }
}
