use crate::material::Material;
use crate::matrix::Matrix4;
use crate::tuple::{Color, Point, Vector};
use derive_more::Constructor;

#[derive(Debug, Constructor, Default, Copy, Clone, Eq, PartialEq)]
pub struct PointLight {
    pub position: Point,
    pub intensity: Color,
}

impl PointLight {
    /// Phong local illumination for one light. `world_to_object` is the
    /// hit's accumulated inverse-transform chain, used to carry a pattern
    /// sample into object space.
    pub fn calculate_lighting(
        &self,
        material: &Material,
        world_to_object: &Matrix4,
        pos: &Point,
        eye_vector: &Vector,
        normal_vector: &Vector,
        in_shadow: bool,
    ) -> Color {
        let diffuse;
        let specular;

        let effective_color = if let Some(p) = &material.pattern {
            p.color_at_object(world_to_object, pos)
        } else {
            material.color
        };
        let effective_color = effective_color * self.intensity;
        let ambient = effective_color * material.ambient;
        if in_shadow {
            return ambient;
        }

        let light_vector = (self.position - pos).normalize();
        let light_dot_normal = light_vector.dot(normal_vector);
        if light_dot_normal < 0. {
            diffuse = Color::black();
            specular = Color::black();
        } else {
            diffuse = effective_color * material.diffuse * light_dot_normal;
            let reflect_vector = -light_vector.reflect(normal_vector);
            let reflect_dot_eye = reflect_vector.dot(eye_vector);

            if reflect_dot_eye <= 0.0 {
                specular = Color::black();
            } else {
                let factor = reflect_dot_eye.powf(material.shininess);
                specular = self.intensity * material.specular * factor;
            }
        }

        ambient + diffuse + specular
    }
}
