use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::light::PointLight;
use crate::material::Material;
use crate::matrix::Matrix4;
use crate::pattern::Pattern;
use crate::shape::{CsgOperation, Shape};
use crate::tuple::{Color, Point, Vector};
use crate::world::World;
use color_eyre::Result;
use log::info;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Built-in showcase: checkered floor, a glass sphere, a mirrored sphere,
/// a noise-displaced stripe sphere, and a die carved with CSG.
pub fn example_scene() -> (World, Camera) {
    let floor = Shape::plane().with_material(Material {
        pattern: Some(Pattern::checker(
            Color::new(0.85, 0.85, 0.85),
            Color::new(0.25, 0.3, 0.35),
        )),
        reflective: 0.2,
        specular: 0.1,
        ..Default::default()
    });

    let glass = Shape::sphere()
        .with_material(Material {
            color: Color::new(0.05, 0.05, 0.08),
            diffuse: 0.1,
            specular: 1.0,
            shininess: 300.,
            reflective: 0.9,
            transparency: 0.9,
            refractive_index: 1.52,
            ..Default::default()
        })
        .with_transform(Matrix4::translation(&Vector::new(-0.5, 1., 0.5)));

    let mirror = Shape::sphere()
        .with_material(Material {
            color: Color::new(0.1, 0.1, 0.1),
            diffuse: 0.3,
            specular: 1.0,
            shininess: 400.,
            reflective: 0.8,
            ..Default::default()
        })
        .with_transform(
            Matrix4::identity()
                .scale(&Vector::new(0.5, 0.5, 0.5))
                .translate(&Vector::new(1.5, 0.5, -0.5)),
        );

    let marble = Shape::sphere()
        .with_material(Material {
            pattern: Some(
                Pattern::noise_displaced(
                    Pattern::stripe(Color::new(0.1, 0.55, 0.35), Color::new(0.9, 0.9, 0.85))
                        .with_transform(
                            Matrix4::identity()
                                .scale(&Vector::new(0.25, 0.25, 0.25))
                                .rotate_z(FRAC_PI_4),
                        ),
                    7,
                ),
            ),
            diffuse: 0.7,
            specular: 0.3,
            ..Default::default()
        })
        .with_transform(
            Matrix4::identity()
                .scale(&Vector::new(0.33, 0.33, 0.33))
                .translate(&Vector::new(-1.7, 0.33, -0.75)),
        );

    let die = Shape::csg(
        CsgOperation::Difference,
        Shape::cube().with_material(Material {
            color: Color::new(0.9, 0.2, 0.2),
            ..Default::default()
        }),
        Shape::sphere()
            .with_material(Material {
                color: Color::new(0.95, 0.9, 0.2),
                ..Default::default()
            })
            .with_transform(Matrix4::scaling(&Vector::new(1.35, 1.35, 1.35))),
    )
    .with_transform(
        Matrix4::identity()
            .scale(&Vector::new(0.4, 0.4, 0.4))
            .rotate_y(FRAC_PI_4)
            .translate(&Vector::new(1.8, 0.4, 1.6)),
    );

    let world = World {
        lights: vec![PointLight::new(
            Point::new(-10., 10., -10.),
            Color::new(1., 1., 1.),
        )],
        objects: vec![floor, glass, mirror, marble, die],
    };

    let camera = Camera::new(800, 400, FRAC_PI_3).look_at(
        Point::new(0., 1.5, -5.),
        Point::new(0., 1., 0.),
        Vector::new(0., 1., 0.),
    );

    (world, camera)
}

/// Wraps a parsed mesh in a lit scene, framing the camera from the mesh's
/// bounding box.
pub fn mesh_scene(mesh: Shape, rotate: bool) -> (World, Camera) {
    let mesh = if rotate {
        mesh.with_transform(Matrix4::rotation_x(-FRAC_PI_2))
    } else {
        mesh
    };

    let bounds = mesh.parent_space_bounds();
    let center = Point::new(
        (bounds.min.x + bounds.max.x) / 2.,
        (bounds.min.y + bounds.max.y) / 2.,
        (bounds.min.z + bounds.max.z) / 2.,
    );
    let extent = (bounds.max - bounds.min).magnitude().max(1.);

    let floor = Shape::plane()
        .with_material(Material {
            pattern: Some(Pattern::checker(
                Color::new(0.8, 0.8, 0.8),
                Color::new(0.4, 0.4, 0.4),
            )),
            reflective: 0.1,
            specular: 0.,
            ..Default::default()
        })
        .with_transform(Matrix4::translation(&Vector::new(0., bounds.min.y, 0.)));

    let world = World {
        lights: vec![PointLight::new(
            center + Vector::new(-extent, extent, -extent),
            Color::new(1., 1., 1.),
        )],
        objects: vec![floor, mesh],
    };

    let camera = Camera::new(800, 600, FRAC_PI_3)
        .with_max_depth(3)
        .look_at(
            center + Vector::new(0., extent * 0.4, -extent),
            center,
            Vector::new(0., 1., 0.),
        );

    (world, camera)
}

/// Writes `<name>.ppm` (and optionally `<name>.png`) into `out_dir`.
pub fn write_canvas(canvas: &Canvas, out_dir: &Path, name: &str, png: bool) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let ppm_path = out_dir.join(format!("{name}.ppm"));
    fs::write(&ppm_path, canvas.to_ppm())?;
    info!("wrote {}", ppm_path.display());

    if png {
        let png_path = out_dir.join(format!("{name}.png"));
        canvas.write_png(BufWriter::new(File::create(&png_path)?))?;
        info!("wrote {}", png_path.display());
    }

    Ok(())
}
