mod bounds;
mod camera;
mod canvas;
mod light;
mod material;
mod matrix;
mod parser;
mod pattern;
mod ray;
mod scenes;
mod shape;
mod tuple;
mod world;

use crate::parser::ObjParser;
use clap::Parser;
use color_eyre::eyre::eyre;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Offline ray tracer producing portable pixmaps")]
struct Cli {
    /// Render a mesh loaded from a wavefront OBJ file
    #[arg(long, value_name = "PATH")]
    parse: Option<PathBuf>,

    /// Base name of the output image
    #[arg(long, default_value = "example")]
    name: String,

    /// Rotate a parsed mesh a quarter turn about x so y becomes depth
    #[arg(long)]
    rotate: bool,

    /// Render the built-in example scene
    #[arg(long)]
    example: bool,

    /// Directory receiving output images
    #[arg(long, default_value = ".", value_name = "DIR")]
    out_dir: PathBuf,

    /// Additionally write a PNG next to the PPM
    #[arg(long)]
    png: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let cli = Cli::parse();

    let (world, camera) = if let Some(path) = &cli.parse {
        let parsed = ObjParser::parse_file(path)?;
        scenes::mesh_scene(parsed.into_group(), cli.rotate)
    } else if cli.example {
        scenes::example_scene()
    } else {
        return Err(eyre!("nothing to render: pass --example or --parse <path>"));
    };

    let canvas = camera.render(&world);
    scenes::write_canvas(&canvas, &cli.out_dir, &cli.name, cli.png)?;

    Ok(())
}
